//! 输入验证工具函数
//!
//! 存储在创建和更新时调用，失败时返回带类型的 [`StoreError`]

use crate::error::{StoreError, StoreResult};
use crate::models::{
    AppConfig, MenuItemPatch, NewMenuItem, NewSubscriptionPlan, SubscriptionPlanPatch,
};

/// 名称去除首尾空白后不能为空
pub fn validate_name(name: &str) -> StoreResult<()> {
    if name.trim().is_empty() {
        return Err(StoreError::EmptyName);
    }
    Ok(())
}

/// 价格必须是正的有限数
pub fn validate_price(price: f64) -> StoreResult<()> {
    if !price.is_finite() || price <= 0.0 {
        return Err(StoreError::InvalidPrice(price));
    }
    Ok(())
}

/// 配送费和免配送门槛可以为 0，但必须是非负的有限数
pub fn validate_charge(amount: f64) -> StoreResult<()> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(StoreError::InvalidPrice(amount));
    }
    Ok(())
}

/// 分类必须已存在，比较前去除首尾空白
pub fn validate_category(category: &str, categories: &[String]) -> StoreResult<()> {
    let category = category.trim();
    if !categories.iter().any(|c| c == category) {
        return Err(StoreError::UnknownCategory(category.to_string()));
    }
    Ok(())
}

pub fn validate_new_menu_item(item: &NewMenuItem, categories: &[String]) -> StoreResult<()> {
    validate_name(&item.name)?;
    validate_price(item.price)?;
    validate_category(&item.category, categories)
}

pub fn validate_menu_item_patch(patch: &MenuItemPatch, categories: &[String]) -> StoreResult<()> {
    if let Some(name) = &patch.name {
        validate_name(name)?;
    }
    if let Some(price) = patch.price {
        validate_price(price)?;
    }
    if let Some(category) = &patch.category {
        validate_category(category, categories)?;
    }
    Ok(())
}

pub fn validate_new_plan(plan: &NewSubscriptionPlan) -> StoreResult<()> {
    validate_name(&plan.name)?;
    validate_price(plan.price)
}

pub fn validate_plan_patch(patch: &SubscriptionPlanPatch) -> StoreResult<()> {
    if let Some(name) = &patch.name {
        validate_name(name)?;
    }
    if let Some(price) = patch.price {
        validate_price(price)?;
    }
    Ok(())
}

pub fn validate_app_config(config: &AppConfig) -> StoreResult<()> {
    if let Some(fee) = config.delivery_fee {
        validate_charge(fee)?;
    }
    if let Some(threshold) = config.free_delivery_threshold {
        validate_charge(threshold)?;
    }
    Ok(())
}
