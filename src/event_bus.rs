// 事件总线 - 存储变更后通知界面
//
// 实现发布/订阅模式,每次成功的变更后发布事件,订阅者据此重新读取快照
// 使用 tokio::sync::broadcast 实现高效的事件分发

use serde::Serialize;
use tokio::sync::broadcast;

use crate::models::{CartSummary, MenuItem, Notification, SubscriptionPlan};

/// 应用事件枚举 - 定义所有可能的状态变更
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum AppEvent {
    // --- 菜单事件 ---

    /// 新增菜品
    MenuItemAdded { item: MenuItem },

    /// 菜品已更新
    MenuItemUpdated { item: MenuItem },

    /// 菜品已删除
    MenuItemDeleted { id: i64 },

    /// 新增分类
    CategoryAdded { name: String },

    /// 分类已删除
    CategoryDeleted { name: String },

    // --- 购物车事件 ---

    /// 购物车内容变化,附带最新汇总
    CartUpdated { summary: CartSummary },

    // --- 订阅事件 ---

    /// 新增套餐
    SubscriptionPlanAdded { plan: SubscriptionPlan },

    /// 套餐已更新(含订阅人数变化)
    SubscriptionPlanUpdated { plan: SubscriptionPlan },

    /// 套餐已删除
    SubscriptionPlanDeleted { id: i64 },

    // --- 通知事件 ---

    /// 新通知
    NotificationAdded { notification: Notification },

    /// 已读状态变化或通知被清空
    NotificationsChanged { unread: usize, total: usize },

    // --- 系统事件 ---

    /// 深色模式切换
    DarkModeChanged { enabled: bool },

    /// 配置更新事件
    ConfigUpdated { config_type: String },
}

/// 存储变更的广播通道
///
/// 存储Actor是唯一的发布者；界面、日志等订阅者各自持有接收器，
/// 接收器落后超过 `capacity` 条时会收到 `Lagged`，此时应重新读取快照
pub struct EventBus {
    sender: broadcast::Sender<AppEvent>,
}

impl EventBus {
    /// `capacity` 为 0 时按 1 处理
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// 没有订阅者时直接丢弃
    pub fn publish(&self, event: AppEvent) {
        if let Ok(receivers) = self.sender.send(event) {
            tracing::trace!(receivers, "变更事件已广播");
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<AppEvent> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_event_bus_basic() {
        let bus = EventBus::new(100);
        let mut receiver = bus.subscribe();

        bus.publish(AppEvent::MenuItemDeleted { id: 7 });

        match receiver.recv().await {
            Ok(AppEvent::MenuItemDeleted { id }) => assert_eq!(id, 7),
            other => panic!("未收到预期事件: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_multiple_subscribers() {
        let bus = EventBus::new(100);
        let mut receiver1 = bus.subscribe();
        let mut receiver2 = bus.subscribe();
        assert_eq!(bus.subscriber_count(), 2);

        bus.publish(AppEvent::DarkModeChanged { enabled: true });

        assert!(receiver1.try_recv().is_ok());
        assert!(receiver2.try_recv().is_ok());
    }

    #[test]
    fn test_publish_without_subscribers_is_silent() {
        let bus = EventBus::new(4);
        bus.publish(AppEvent::CategoryAdded {
            name: "Snacks".to_string(),
        });
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[test]
    fn test_event_serializes_with_tag() {
        let json = serde_json::to_value(AppEvent::DarkModeChanged { enabled: false }).unwrap();
        assert_eq!(json["event"], "dark_mode_changed");
        assert_eq!(json["enabled"], false);
    }
}
