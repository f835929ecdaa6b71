use std::path::PathBuf;

use anyhow::Result;
use tokio::sync::RwLock;

use crate::models::{AppConfig, PersistedAppConfig};

/// 应用配置管理器
///
/// 只保存应用配置，领域数据始终只在内存中
pub struct SettingsManager {
    path: Option<PathBuf>,
    data: RwLock<PersistedAppConfig>,
}

impl SettingsManager {
    /// 从 JSON 文件加载配置，文件不存在或为空时写入默认配置
    pub async fn new(path: PathBuf) -> Result<Self> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let initial = match tokio::fs::read(&path).await {
            Ok(bytes) if !bytes.is_empty() => {
                serde_json::from_slice::<PersistedAppConfig>(&bytes).unwrap_or_else(|e| {
                    tracing::warn!("配置文件解析失败，使用默认配置: {}", e);
                    PersistedAppConfig::default()
                })
            }
            _ => {
                let default = PersistedAppConfig::default();
                let json = serde_json::to_string_pretty(&default)?;
                tokio::fs::write(&path, json).await?;
                default
            }
        };

        Ok(Self {
            path: Some(path),
            data: RwLock::new(initial),
        })
    }

    /// 不落盘的配置管理器
    pub fn in_memory(config: PersistedAppConfig) -> Self {
        Self {
            path: None,
            data: RwLock::new(config),
        }
    }

    pub async fn get(&self) -> PersistedAppConfig {
        self.data.read().await.clone()
    }

    /// 合并更新并保存
    ///
    /// 写文件失败时返回错误，内存中的配置保持不变
    pub async fn update(&self, update: AppConfig) -> Result<PersistedAppConfig> {
        let mut config = self.data.write().await;
        let mut merged = config.clone();

        if let Some(dark_mode) = update.dark_mode {
            merged.dark_mode = dark_mode;
        }
        if let Some(seed) = update.seed_defaults {
            merged.seed_defaults = seed;
        }
        if let Some(fee) = update.delivery_fee {
            merged.delivery_fee = fee;
        }
        if let Some(threshold) = update.free_delivery_threshold {
            merged.free_delivery_threshold = threshold;
        }
        if let Some(url) = update.default_image_url {
            merged.default_image_url = url;
        }
        if let Some(capacity) = update.event_bus_capacity {
            merged.event_bus_capacity = capacity;
        }
        if let Some(logger) = update.logger_settings {
            merged.logger_settings = logger;
        }

        self.save(&merged).await?;
        *config = merged.clone();
        Ok(merged)
    }

    async fn save(&self, config: &PersistedAppConfig) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let json = serde_json::to_string_pretty(config)?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_file_is_created_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config").join("settings.json");

        let manager = SettingsManager::new(path.clone()).await.unwrap();

        assert_eq!(manager.get().await, PersistedAppConfig::default());
        let saved: PersistedAppConfig =
            serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
        assert_eq!(saved, PersistedAppConfig::default());
    }

    #[tokio::test]
    async fn test_update_is_saved() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let manager = SettingsManager::new(path.clone()).await.unwrap();

        let updated = manager
            .update(AppConfig {
                delivery_fee: Some(35.0),
                dark_mode: Some(true),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(updated.delivery_fee, 35.0);
        assert!(updated.dark_mode);

        let reloaded = SettingsManager::new(path).await.unwrap();
        assert_eq!(reloaded.get().await.delivery_fee, 35.0);
    }

    #[tokio::test]
    async fn test_corrupt_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{not json").unwrap();

        let manager = SettingsManager::new(path).await.unwrap();
        assert_eq!(manager.get().await, PersistedAppConfig::default());
    }

    #[tokio::test]
    async fn test_failed_save_keeps_previous_config() {
        let dir = tempfile::tempdir().unwrap();
        let config_dir = dir.path().join("config");
        let manager = SettingsManager::new(config_dir.join("settings.json"))
            .await
            .unwrap();
        std::fs::remove_dir_all(&config_dir).unwrap();

        let result = manager
            .update(AppConfig {
                delivery_fee: Some(99.0),
                ..Default::default()
            })
            .await;

        assert!(result.is_err(), "目录不存在时保存应该失败");
        assert_eq!(manager.get().await, PersistedAppConfig::default());
    }

    #[tokio::test]
    async fn test_in_memory_update() {
        let manager = SettingsManager::in_memory(PersistedAppConfig::default());
        let updated = manager
            .update(AppConfig {
                free_delivery_threshold: Some(750.0),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(updated.free_delivery_threshold, 750.0);
    }
}
