// 自定义日志层 - 支持将日志实时推送到界面

use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use tokio::sync::broadcast;
use tracing::{Event, Subscriber};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::writer::{BoxMakeWriter, MakeWriterExt};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::Layer;

/// 日志消息
#[derive(Clone, Debug, serde::Serialize)]
pub struct LogMessage {
    pub timestamp: String,
    pub level: String,
    pub target: String,
    pub message: String,
}

/// 日志推送器 - 将日志发送给订阅的界面
pub struct LogBroadcaster {
    sender: broadcast::Sender<LogMessage>,
    enabled: Arc<RwLock<bool>>,
}

impl LogBroadcaster {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(256);
        Self {
            sender,
            enabled: Arc::new(RwLock::new(true)),
        }
    }

    /// 设置日志推送开关
    pub fn set_enabled(&self, enabled: bool) {
        if let Ok(mut e) = self.enabled.write() {
            *e = enabled;
        }
    }

    /// 获取日志推送状态
    pub fn is_enabled(&self) -> bool {
        self.enabled.read().map(|e| *e).unwrap_or(false)
    }

    /// 订阅日志流
    pub fn subscribe(&self) -> broadcast::Receiver<LogMessage> {
        self.sender.subscribe()
    }

    fn emit_log(&self, log: LogMessage) {
        if !self.is_enabled() {
            return;
        }
        // 没有订阅者时丢弃
        let _ = self.sender.send(log);
    }
}

impl Default for LogBroadcaster {
    fn default() -> Self {
        Self::new()
    }
}

/// 自定义日志层
pub struct UiLogLayer {
    broadcaster: Arc<LogBroadcaster>,
}

impl UiLogLayer {
    pub fn new(broadcaster: Arc<LogBroadcaster>) -> Self {
        Self { broadcaster }
    }
}

impl<S: Subscriber> Layer<S> for UiLogLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if !self.broadcaster.is_enabled() {
            return;
        }

        let metadata = event.metadata();
        let level = metadata.level().to_string();
        let target = metadata.target().to_string();

        let mut visitor = FieldVisitor::default();
        event.record(&mut visitor);

        let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f").to_string();

        self.broadcaster.emit_log(LogMessage {
            timestamp,
            level,
            target,
            message: visitor.into_message(),
        });
    }
}

/// 收集事件的 message 和其余结构化字段，拼成一行给界面显示
#[derive(Default)]
struct FieldVisitor {
    message: String,
    fields: Vec<String>,
}

impl FieldVisitor {
    fn into_message(self) -> String {
        if self.fields.is_empty() {
            return self.message;
        }
        format!("{} {}", self.message, self.fields.join(" "))
    }
}

impl tracing::field::Visit for FieldVisitor {
    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            self.fields.push(format!("{}={}", field.name(), value));
        }
    }

    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{:?}", value);
        } else {
            self.fields.push(format!("{}={:?}", field.name(), value));
        }
    }
}

/// 初始化日志系统（带界面推送功能）
///
/// 传入 `log_dir` 时额外按天轮转写入文件，返回的 guard 需要在程序生命周期内保持
pub fn init_with_broadcaster(
    broadcaster: Arc<LogBroadcaster>,
    log_dir: Option<PathBuf>,
) -> anyhow::Result<Option<WorkerGuard>> {
    use time::macros::format_description;
    use tracing_subscriber::fmt::time::LocalTime;

    let (writer, guard) = match log_dir {
        Some(dir) => {
            std::fs::create_dir_all(&dir)?;
            let file_appender = tracing_appender::rolling::daily(&dir, "app.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            eprintln!("日志文件位置: {:?}", dir);
            (
                BoxMakeWriter::new(std::io::stdout.and(non_blocking)),
                Some(guard),
            )
        }
        None => (BoxMakeWriter::new(std::io::stdout), None),
    };

    // 使用本地时区
    let timer = LocalTime::new(format_description!(
        "[year]-[month]-[day] [hour]:[minute]:[second].[subsecond digits:3]"
    ));

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_writer(writer)
        .with_timer(timer)
        .with_ansi(cfg!(debug_assertions))
        .finish()
        .with(UiLogLayer::new(broadcaster));

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(guard)
}
