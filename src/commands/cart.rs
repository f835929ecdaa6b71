//! 购物车命令

use crate::error::CommandError;
use crate::models::{CartItem, CartSummary, MenuItem};
use crate::AppState;

/// 加入购物车，已存在时数量加一
pub async fn add_to_cart(state: &AppState, item: MenuItem) -> Result<CartItem, CommandError> {
    Ok(state.store.add_to_cart(item).await?)
}

/// 修改数量，`quantity <= 0` 时删除该行并返回 `None`
pub async fn update_cart_quantity(
    state: &AppState,
    id: i64,
    quantity: i64,
) -> Result<Option<CartItem>, CommandError> {
    Ok(state.store.update_cart_quantity(id, quantity).await?)
}

pub async fn remove_from_cart(state: &AppState, id: i64) -> Result<bool, CommandError> {
    Ok(state.store.remove_from_cart(id).await?)
}

pub async fn clear_cart(state: &AppState) -> Result<(), CommandError> {
    Ok(state.store.clear_cart().await?)
}

/// 小计、配送费和合计
pub async fn get_cart_summary(state: &AppState) -> Result<CartSummary, CommandError> {
    Ok(state.store.cart_summary().await?)
}
