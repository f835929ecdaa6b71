//! 通知命令

use crate::error::CommandError;
use crate::models::{NewNotification, Notification};
use crate::AppState;

pub async fn add_notification(
    state: &AppState,
    notification: NewNotification,
) -> Result<Notification, CommandError> {
    Ok(state.store.add_notification(notification).await?)
}

pub async fn mark_notification_as_read(state: &AppState, id: i64) -> Result<bool, CommandError> {
    Ok(state.store.mark_notification_as_read(id).await?)
}

pub async fn mark_all_notifications_as_read(state: &AppState) -> Result<usize, CommandError> {
    Ok(state.store.mark_all_notifications_as_read().await?)
}

pub async fn clear_notifications(state: &AppState) -> Result<(), CommandError> {
    Ok(state.store.clear_notifications().await?)
}
