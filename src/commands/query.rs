//! 数据查询命令
//!
//! 界面在收到变更事件后通过这里重新读取状态

use crate::error::CommandError;
use crate::models::{DashboardStats, StoreSnapshot};
use crate::AppState;

/// 获取完整快照
pub async fn get_snapshot(state: &AppState) -> Result<StoreSnapshot, CommandError> {
    Ok(state.store.snapshot().await)
}

/// 获取管理后台概览
pub async fn get_dashboard_stats(state: &AppState) -> Result<DashboardStats, CommandError> {
    Ok(state.store.dashboard_stats().await)
}

/// 存储Actor是否在运行
pub async fn get_store_health(state: &AppState) -> Result<bool, CommandError> {
    Ok(state.store.health_check().await)
}
