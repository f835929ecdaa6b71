// Hippie Panda 点餐应用 - 领域状态后端

// 声明模块
pub mod actors;
pub mod commands;
pub mod error;
pub mod event_bus;
pub mod logger;
pub mod models;
pub mod settings;
pub mod store;
pub mod utils;

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::broadcast;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;

use actors::{StoreActor, StoreHandle};
use event_bus::{AppEvent, EventBus};
use logger::LogBroadcaster;
use models::PersistedAppConfig;
use settings::SettingsManager;
use store::DomainStore;

/// 应用状态
///
/// 显式持有、可注入的状态对象，界面层和测试各自构造自己的实例
/// - store: 领域存储Actor的Handle，所有修改都经过它
/// - event_bus: 变更事件，界面订阅后重新读取快照
/// - settings: 应用配置
/// - log_broadcaster: 推送给界面的日志流
#[derive(Clone)]
pub struct AppState {
    pub store: StoreHandle,
    pub event_bus: Arc<EventBus>,
    pub settings: Arc<SettingsManager>,
    pub log_broadcaster: Arc<LogBroadcaster>,
}

impl AppState {
    /// 按当前配置创建存储并启动Actor
    ///
    /// 必须在 tokio 运行时内调用
    pub async fn initialize(
        settings: Arc<SettingsManager>,
        log_broadcaster: Arc<LogBroadcaster>,
    ) -> Self {
        let config = settings.get().await;
        log_broadcaster.set_enabled(config.logger_settings.enable_ui_logging);

        let event_bus = Arc::new(EventBus::new(config.event_bus_capacity));
        let store = DomainStore::from_config(&config);
        let (actor, handle) = StoreActor::new(store, event_bus.clone());
        tokio::spawn(actor.run());

        info!(
            "领域存储已就绪 (默认数据: {}, 深色模式: {})",
            config.seed_defaults, config.dark_mode
        );

        Self {
            store: handle,
            event_bus,
            settings,
            log_broadcaster,
        }
    }

    /// 使用默认配置、不落盘的应用状态
    pub async fn in_memory() -> Self {
        Self::initialize(
            Arc::new(SettingsManager::in_memory(PersistedAppConfig::default())),
            Arc::new(LogBroadcaster::new()),
        )
        .await
    }

    /// 订阅变更事件
    pub fn subscribe(&self) -> broadcast::Receiver<AppEvent> {
        self.event_bus.subscribe()
    }
}

/// 启动参数
#[derive(Debug, Clone, Default)]
pub struct BootstrapOptions {
    /// 配置文件路径，`None` 时只使用内存中的默认配置
    pub config_path: Option<PathBuf>,
    /// 日志目录，`None` 时只输出到控制台
    pub log_dir: Option<PathBuf>,
}

// ==================== 应用入口 ====================

/// 初始化日志、加载配置并启动领域存储
///
/// 返回的 guard 需要保持到程序退出，否则文件日志会丢失
pub async fn bootstrap(
    options: BootstrapOptions,
) -> anyhow::Result<(AppState, Option<WorkerGuard>)> {
    let log_broadcaster = Arc::new(LogBroadcaster::new());
    let guard = logger::init_with_broadcaster(log_broadcaster.clone(), options.log_dir)?;

    info!("初始化 Hippie Panda 领域存储...");

    let settings = match options.config_path {
        Some(path) => SettingsManager::new(path).await?,
        None => SettingsManager::in_memory(PersistedAppConfig::default()),
    };

    let state = AppState::initialize(Arc::new(settings), log_broadcaster).await;
    Ok((state, guard))
}
