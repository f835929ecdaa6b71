// 购物车操作

use super::DomainStore;
use crate::error::{StoreError, StoreResult};
use crate::event_bus::AppEvent;
use crate::models::{CartItem, CartSummary, MenuItem};

impl DomainStore {
    pub fn cart_items(&self) -> &[CartItem] {
        &self.cart_items
    }

    /// 加入购物车：同一菜品只占一行，重复加入时数量加一
    ///
    /// 只按 `item.id` 查找菜单中的菜品，新行使用存储中的副本；
    /// 菜品已不在菜单中时返回 [`StoreError::UnknownMenuItem`]
    pub fn add_to_cart(&mut self, item: &MenuItem) -> StoreResult<CartItem> {
        let Some(current) = self.menu_item(item.id).cloned() else {
            tracing::warn!("菜品 {} 不在菜单中，拒绝加入购物车", item.id);
            return Err(StoreError::UnknownMenuItem(item.id));
        };

        let row = match self.cart_items.iter_mut().find(|row| row.id() == current.id) {
            Some(row) => {
                row.quantity = row.quantity.saturating_add(1);
                row.clone()
            }
            None => {
                let row = CartItem {
                    item: current,
                    quantity: 1,
                };
                self.cart_items.push(row.clone());
                row
            }
        };
        self.record_cart_change();
        Ok(row)
    }

    /// 设置数量
    ///
    /// `quantity <= 0` 等同于 [`remove_from_cart`](Self::remove_from_cart)，返回 `None`
    pub fn update_cart_quantity(&mut self, id: i64, quantity: i64) -> Option<CartItem> {
        if quantity <= 0 {
            self.remove_from_cart(id);
            return None;
        }

        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        let row = self.cart_items.iter_mut().find(|row| row.id() == id)?;
        if row.quantity == quantity {
            return Some(row.clone());
        }
        row.quantity = quantity;
        let row = row.clone();
        self.record_cart_change();
        Some(row)
    }

    /// 删除一行，返回是否存在
    pub fn remove_from_cart(&mut self, id: i64) -> bool {
        let before = self.cart_items.len();
        self.cart_items.retain(|row| row.id() != id);
        let removed = self.cart_items.len() != before;
        if removed {
            self.record_cart_change();
        }
        removed
    }

    pub fn clear_cart(&mut self) {
        if !self.cart_items.is_empty() {
            self.cart_items.clear();
            self.record_cart_change();
        }
    }

    /// 购物车汇总
    ///
    /// 小计超过免配送门槛时免配送费，空购物车不收配送费
    pub fn cart_summary(&self) -> CartSummary {
        let item_count = self
            .cart_items
            .iter()
            .fold(0u32, |sum, row| sum.saturating_add(row.quantity));
        let subtotal: f64 = self.cart_items.iter().map(CartItem::line_total).sum();
        let delivery_fee = if self.cart_items.is_empty()
            || subtotal > self.pricing.free_delivery_threshold
        {
            0.0
        } else {
            self.pricing.delivery_fee
        };

        CartSummary {
            item_count,
            subtotal,
            delivery_fee,
            total: subtotal + delivery_fee,
        }
    }

    fn record_cart_change(&mut self) {
        let summary = self.cart_summary();
        self.record(AppEvent::CartUpdated { summary });
    }
}
