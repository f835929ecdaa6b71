//! 订阅套餐命令
//!
//! 套餐管理（后台）和用户订阅（前台）接口

use tracing::info;

use crate::error::CommandError;
use crate::models::{NewSubscriptionPlan, SubscriptionPlan, SubscriptionPlanPatch};
use crate::AppState;

/// 新增套餐，订阅人数总是从 0 开始
pub async fn add_subscription_plan(
    state: &AppState,
    plan: NewSubscriptionPlan,
) -> Result<SubscriptionPlan, CommandError> {
    let plan = state.store.add_subscription_plan(plan).await?;
    info!("套餐已添加: {} (₹{}/{})", plan.name, plan.price, plan.period);
    Ok(plan)
}

pub async fn update_subscription_plan(
    state: &AppState,
    id: i64,
    patch: SubscriptionPlanPatch,
) -> Result<Option<SubscriptionPlan>, CommandError> {
    Ok(state.store.update_subscription_plan(id, patch).await?)
}

/// 删除套餐，仍有订阅用户时返回 `PLAN_HAS_SUBSCRIBERS`
pub async fn delete_subscription_plan(
    state: &AppState,
    id: i64,
) -> Result<Option<SubscriptionPlan>, CommandError> {
    Ok(state.store.delete_subscription_plan(id).await?)
}

pub async fn subscribe_to_plan(
    state: &AppState,
    id: i64,
) -> Result<Option<SubscriptionPlan>, CommandError> {
    Ok(state.store.subscribe_to_plan(id).await?)
}

pub async fn unsubscribe_from_plan(
    state: &AppState,
    id: i64,
) -> Result<Option<SubscriptionPlan>, CommandError> {
    Ok(state.store.unsubscribe_from_plan(id).await?)
}
