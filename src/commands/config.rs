//! 配置与主题命令
//!
//! 提供应用配置的读取和更新接口，以及深色模式切换

use tracing::info;

use crate::error::CommandError;
use crate::event_bus::AppEvent;
use crate::models::{AppConfig, PersistedAppConfig};
use crate::utils::validation;
use crate::AppState;

/// 获取应用配置
pub async fn get_app_config(state: &AppState) -> Result<PersistedAppConfig, CommandError> {
    Ok(state.settings.get().await)
}

/// 更新配置
///
/// 计费规则和默认图片立即应用到存储，日志推送开关立即生效；
/// `dark_mode`、`seed_defaults`、`event_bus_capacity` 只在下次启动时使用。
/// 配送费或门槛为负数时返回 `INVALID_PRICE`，配置和存储都不变
pub async fn update_config(
    state: &AppState,
    config: AppConfig,
) -> Result<PersistedAppConfig, CommandError> {
    validation::validate_app_config(&config)?;

    let updated = state
        .settings
        .update(config.clone())
        .await
        .map_err(|e| CommandError::internal(e.to_string()))?;

    if config.delivery_fee.is_some()
        || config.free_delivery_threshold.is_some()
        || config.default_image_url.is_some()
    {
        state.store.apply_config(updated.clone()).await?;
        info!(
            "计费规则已更新: 配送费 ₹{}, 免配送门槛 ₹{}",
            updated.delivery_fee, updated.free_delivery_threshold
        );
    }

    if let Some(logger_settings) = config.logger_settings {
        state
            .log_broadcaster
            .set_enabled(logger_settings.enable_ui_logging);
        info!(
            "日志配置已更新: 界面日志推送 = {}",
            logger_settings.enable_ui_logging
        );
    }

    state.event_bus.publish(AppEvent::ConfigUpdated {
        config_type: "app".to_string(),
    });

    Ok(updated)
}

/// 切换深色模式，返回切换后的值
pub async fn toggle_dark_mode(state: &AppState) -> Result<bool, CommandError> {
    Ok(state.store.toggle_dark_mode().await?)
}

pub async fn set_dark_mode(state: &AppState, enabled: bool) -> Result<bool, CommandError> {
    Ok(state.store.set_dark_mode(enabled).await?)
}
