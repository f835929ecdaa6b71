//! 菜单管理命令
//!
//! 提供菜品和分类的增删改接口

use tracing::info;

use crate::error::CommandError;
use crate::models::{MenuItem, MenuItemPatch, MenuQuery, NewMenuItem};
use crate::AppState;

/// 新增菜品
pub async fn add_menu_item(state: &AppState, item: NewMenuItem) -> Result<MenuItem, CommandError> {
    let item = state.store.add_menu_item(item).await?;
    info!("菜品已添加: {} -> {}", item.name, item.category);
    Ok(item)
}

/// 更新菜品，ID不存在时返回 `None`
pub async fn update_menu_item(
    state: &AppState,
    id: i64,
    patch: MenuItemPatch,
) -> Result<Option<MenuItem>, CommandError> {
    Ok(state.store.update_menu_item(id, patch).await?)
}

/// 删除菜品（同时从购物车移除）
pub async fn delete_menu_item(
    state: &AppState,
    id: i64,
) -> Result<Option<MenuItem>, CommandError> {
    let removed = state.store.delete_menu_item(id).await?;
    if let Some(item) = &removed {
        info!("菜品已删除: {}", item.name);
    }
    Ok(removed)
}

/// 新增分类，返回是否真正插入
pub async fn add_category(state: &AppState, name: String) -> Result<bool, CommandError> {
    Ok(state.store.add_category(name).await?)
}

/// 删除分类，仍被菜品使用时返回 `CATEGORY_IN_USE`
pub async fn delete_category(state: &AppState, name: String) -> Result<bool, CommandError> {
    Ok(state.store.delete_category(name).await?)
}

/// 按条件查询菜单
pub async fn query_menu(state: &AppState, query: MenuQuery) -> Result<Vec<MenuItem>, CommandError> {
    Ok(state.store.query_menu(query).await?)
}
