// Store Actor - 使用Actor模式管理领域存储
//
// 存储只由这个Actor修改，命令按到达顺序逐个完整执行，无需任何锁
// 每条命令产生的事件在回复调用方之前发布到事件总线

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, oneshot};

use crate::error::{StoreError, StoreResult};
use crate::event_bus::EventBus;
use crate::models::*;
use crate::store::DomainStore;

/// 健康检查超时
const HEALTH_CHECK_TIMEOUT: Duration = Duration::from_secs(5);

/// 存储命令
pub enum StoreCommand {
    // --- 菜单 ---
    AddMenuItem {
        item: NewMenuItem,
        reply: oneshot::Sender<StoreResult<MenuItem>>,
    },
    UpdateMenuItem {
        id: i64,
        patch: MenuItemPatch,
        reply: oneshot::Sender<StoreResult<Option<MenuItem>>>,
    },
    DeleteMenuItem {
        id: i64,
        reply: oneshot::Sender<Option<MenuItem>>,
    },
    AddCategory {
        name: String,
        reply: oneshot::Sender<StoreResult<bool>>,
    },
    DeleteCategory {
        name: String,
        reply: oneshot::Sender<StoreResult<bool>>,
    },
    QueryMenu {
        query: MenuQuery,
        reply: oneshot::Sender<Vec<MenuItem>>,
    },

    // --- 购物车 ---
    AddToCart {
        item: MenuItem,
        reply: oneshot::Sender<StoreResult<CartItem>>,
    },
    UpdateCartQuantity {
        id: i64,
        quantity: i64,
        reply: oneshot::Sender<Option<CartItem>>,
    },
    RemoveFromCart {
        id: i64,
        reply: oneshot::Sender<bool>,
    },
    ClearCart {
        reply: oneshot::Sender<()>,
    },
    GetCartSummary {
        reply: oneshot::Sender<CartSummary>,
    },

    // --- 订阅套餐 ---
    AddSubscriptionPlan {
        plan: NewSubscriptionPlan,
        reply: oneshot::Sender<StoreResult<SubscriptionPlan>>,
    },
    UpdateSubscriptionPlan {
        id: i64,
        patch: SubscriptionPlanPatch,
        reply: oneshot::Sender<StoreResult<Option<SubscriptionPlan>>>,
    },
    DeleteSubscriptionPlan {
        id: i64,
        reply: oneshot::Sender<StoreResult<Option<SubscriptionPlan>>>,
    },
    Subscribe {
        id: i64,
        reply: oneshot::Sender<Option<SubscriptionPlan>>,
    },
    Unsubscribe {
        id: i64,
        reply: oneshot::Sender<Option<SubscriptionPlan>>,
    },

    // --- 主题 ---
    ToggleDarkMode {
        reply: oneshot::Sender<bool>,
    },
    SetDarkMode {
        enabled: bool,
        reply: oneshot::Sender<bool>,
    },

    // --- 通知 ---
    AddNotification {
        notification: NewNotification,
        reply: oneshot::Sender<Notification>,
    },
    MarkNotificationAsRead {
        id: i64,
        reply: oneshot::Sender<bool>,
    },
    MarkAllNotificationsAsRead {
        reply: oneshot::Sender<usize>,
    },
    ClearNotifications {
        reply: oneshot::Sender<()>,
    },

    // --- 查询与配置 ---
    GetSnapshot {
        reply: oneshot::Sender<StoreSnapshot>,
    },
    GetDashboardStats {
        reply: oneshot::Sender<DashboardStats>,
    },
    ApplyConfig {
        config: PersistedAppConfig,
        reply: oneshot::Sender<()>,
    },

    /// 健康检查（Ping）
    HealthCheck { reply: oneshot::Sender<()> },
}

/// 领域存储Actor（直接持有存储，无需锁）
pub struct StoreActor {
    receiver: mpsc::Receiver<StoreCommand>,
    store: DomainStore,
    event_bus: Arc<EventBus>,
}

impl StoreActor {
    /// 创建新的Actor
    pub fn new(store: DomainStore, event_bus: Arc<EventBus>) -> (Self, StoreHandle) {
        let (sender, receiver) = mpsc::channel(100);
        let actor = Self {
            receiver,
            store,
            event_bus,
        };
        let handle = StoreHandle { sender };
        (actor, handle)
    }

    /// 运行Actor（在单独的任务中运行）
    pub async fn run(mut self) {
        tracing::info!("Store Actor 已启动");

        while let Some(cmd) = self.receiver.recv().await {
            self.handle(cmd);
        }

        tracing::info!("Store Actor 已停止");
    }

    /// 先发布本次命令产生的事件再回复，调用方拿到结果时事件已经发出
    fn respond<T>(&mut self, reply: oneshot::Sender<T>, value: T) {
        for event in self.store.drain_events() {
            self.event_bus.publish(event);
        }
        // 调用方可能已放弃等待，回复失败可以忽略
        let _ = reply.send(value);
    }

    fn handle(&mut self, cmd: StoreCommand) {
        match cmd {
            StoreCommand::AddMenuItem { item, reply } => {
                let result = self.store.add_menu_item(item);
                self.respond(reply, result);
            }
            StoreCommand::UpdateMenuItem { id, patch, reply } => {
                let result = self.store.update_menu_item(id, patch);
                self.respond(reply, result);
            }
            StoreCommand::DeleteMenuItem { id, reply } => {
                let result = self.store.delete_menu_item(id);
                self.respond(reply, result);
            }
            StoreCommand::AddCategory { name, reply } => {
                let result = self.store.add_category(&name);
                self.respond(reply, result);
            }
            StoreCommand::DeleteCategory { name, reply } => {
                let result = self.store.delete_category(&name);
                self.respond(reply, result);
            }
            StoreCommand::QueryMenu { query, reply } => {
                let result = self.store.query_menu(&query);
                self.respond(reply, result);
            }

            StoreCommand::AddToCart { item, reply } => {
                let result = self.store.add_to_cart(&item);
                self.respond(reply, result);
            }
            StoreCommand::UpdateCartQuantity {
                id,
                quantity,
                reply,
            } => {
                let result = self.store.update_cart_quantity(id, quantity);
                self.respond(reply, result);
            }
            StoreCommand::RemoveFromCart { id, reply } => {
                let result = self.store.remove_from_cart(id);
                self.respond(reply, result);
            }
            StoreCommand::ClearCart { reply } => {
                self.store.clear_cart();
                self.respond(reply, ());
            }
            StoreCommand::GetCartSummary { reply } => {
                let result = self.store.cart_summary();
                self.respond(reply, result);
            }

            StoreCommand::AddSubscriptionPlan { plan, reply } => {
                let result = self.store.add_subscription_plan(plan);
                self.respond(reply, result);
            }
            StoreCommand::UpdateSubscriptionPlan { id, patch, reply } => {
                let result = self.store.update_subscription_plan(id, patch);
                self.respond(reply, result);
            }
            StoreCommand::DeleteSubscriptionPlan { id, reply } => {
                let result = self.store.delete_subscription_plan(id);
                self.respond(reply, result);
            }
            StoreCommand::Subscribe { id, reply } => {
                let result = self.store.subscribe_to_plan(id);
                self.respond(reply, result);
            }
            StoreCommand::Unsubscribe { id, reply } => {
                let result = self.store.unsubscribe_from_plan(id);
                self.respond(reply, result);
            }

            StoreCommand::ToggleDarkMode { reply } => {
                let result = self.store.toggle_dark_mode();
                self.respond(reply, result);
            }
            StoreCommand::SetDarkMode { enabled, reply } => {
                let result = self.store.set_dark_mode(enabled);
                self.respond(reply, result);
            }

            StoreCommand::AddNotification {
                notification,
                reply,
            } => {
                let result = self.store.add_notification(notification);
                self.respond(reply, result);
            }
            StoreCommand::MarkNotificationAsRead { id, reply } => {
                let result = self.store.mark_notification_as_read(id);
                self.respond(reply, result);
            }
            StoreCommand::MarkAllNotificationsAsRead { reply } => {
                let result = self.store.mark_all_notifications_as_read();
                self.respond(reply, result);
            }
            StoreCommand::ClearNotifications { reply } => {
                self.store.clear_notifications();
                self.respond(reply, ());
            }

            StoreCommand::GetSnapshot { reply } => {
                let result = self.store.snapshot();
                self.respond(reply, result);
            }
            StoreCommand::GetDashboardStats { reply } => {
                let result = self.store.dashboard_stats();
                self.respond(reply, result);
            }
            StoreCommand::ApplyConfig { config, reply } => {
                self.store.apply_config(&config);
                self.respond(reply, ());
            }

            StoreCommand::HealthCheck { reply } => {
                let _ = reply.send(());
            }
        }
    }
}

/// 领域存储Handle，可廉价克隆后分发给各个调用方
#[derive(Clone)]
pub struct StoreHandle {
    sender: mpsc::Sender<StoreCommand>,
}

impl StoreHandle {
    /// 发送命令并等待回复，Actor已停止时返回 [`StoreError::StoreUnavailable`]
    async fn request<T>(
        &self,
        build: impl FnOnce(oneshot::Sender<T>) -> StoreCommand,
    ) -> StoreResult<T> {
        let (reply, rx) = oneshot::channel();
        self.sender
            .send(build(reply))
            .await
            .map_err(|_| StoreError::StoreUnavailable)?;
        rx.await.map_err(|_| StoreError::StoreUnavailable)
    }

    // ==================== 菜单 ====================

    pub async fn add_menu_item(&self, item: NewMenuItem) -> StoreResult<MenuItem> {
        self.request(|reply| StoreCommand::AddMenuItem { item, reply })
            .await?
    }

    pub async fn update_menu_item(
        &self,
        id: i64,
        patch: MenuItemPatch,
    ) -> StoreResult<Option<MenuItem>> {
        self.request(|reply| StoreCommand::UpdateMenuItem { id, patch, reply })
            .await?
    }

    pub async fn delete_menu_item(&self, id: i64) -> StoreResult<Option<MenuItem>> {
        self.request(|reply| StoreCommand::DeleteMenuItem { id, reply })
            .await
    }

    pub async fn add_category(&self, name: impl Into<String>) -> StoreResult<bool> {
        let name = name.into();
        self.request(|reply| StoreCommand::AddCategory { name, reply })
            .await?
    }

    pub async fn delete_category(&self, name: impl Into<String>) -> StoreResult<bool> {
        let name = name.into();
        self.request(|reply| StoreCommand::DeleteCategory { name, reply })
            .await?
    }

    pub async fn query_menu(&self, query: MenuQuery) -> StoreResult<Vec<MenuItem>> {
        self.request(|reply| StoreCommand::QueryMenu { query, reply })
            .await
    }

    // ==================== 购物车 ====================

    pub async fn add_to_cart(&self, item: MenuItem) -> StoreResult<CartItem> {
        self.request(|reply| StoreCommand::AddToCart { item, reply })
            .await?
    }

    pub async fn update_cart_quantity(&self, id: i64, quantity: i64) -> StoreResult<Option<CartItem>> {
        self.request(|reply| StoreCommand::UpdateCartQuantity {
            id,
            quantity,
            reply,
        })
        .await
    }

    pub async fn remove_from_cart(&self, id: i64) -> StoreResult<bool> {
        self.request(|reply| StoreCommand::RemoveFromCart { id, reply })
            .await
    }

    pub async fn clear_cart(&self) -> StoreResult<()> {
        self.request(|reply| StoreCommand::ClearCart { reply }).await
    }

    pub async fn cart_summary(&self) -> StoreResult<CartSummary> {
        self.request(|reply| StoreCommand::GetCartSummary { reply })
            .await
    }

    // ==================== 订阅套餐 ====================

    pub async fn add_subscription_plan(
        &self,
        plan: NewSubscriptionPlan,
    ) -> StoreResult<SubscriptionPlan> {
        self.request(|reply| StoreCommand::AddSubscriptionPlan { plan, reply })
            .await?
    }

    pub async fn update_subscription_plan(
        &self,
        id: i64,
        patch: SubscriptionPlanPatch,
    ) -> StoreResult<Option<SubscriptionPlan>> {
        self.request(|reply| StoreCommand::UpdateSubscriptionPlan { id, patch, reply })
            .await?
    }

    pub async fn delete_subscription_plan(&self, id: i64) -> StoreResult<Option<SubscriptionPlan>> {
        self.request(|reply| StoreCommand::DeleteSubscriptionPlan { id, reply })
            .await?
    }

    pub async fn subscribe_to_plan(&self, id: i64) -> StoreResult<Option<SubscriptionPlan>> {
        self.request(|reply| StoreCommand::Subscribe { id, reply })
            .await
    }

    pub async fn unsubscribe_from_plan(&self, id: i64) -> StoreResult<Option<SubscriptionPlan>> {
        self.request(|reply| StoreCommand::Unsubscribe { id, reply })
            .await
    }

    // ==================== 主题 ====================

    pub async fn toggle_dark_mode(&self) -> StoreResult<bool> {
        self.request(|reply| StoreCommand::ToggleDarkMode { reply })
            .await
    }

    pub async fn set_dark_mode(&self, enabled: bool) -> StoreResult<bool> {
        self.request(|reply| StoreCommand::SetDarkMode { enabled, reply })
            .await
    }

    // ==================== 通知 ====================

    pub async fn add_notification(&self, notification: NewNotification) -> StoreResult<Notification> {
        self.request(|reply| StoreCommand::AddNotification {
            notification,
            reply,
        })
        .await
    }

    pub async fn mark_notification_as_read(&self, id: i64) -> StoreResult<bool> {
        self.request(|reply| StoreCommand::MarkNotificationAsRead { id, reply })
            .await
    }

    pub async fn mark_all_notifications_as_read(&self) -> StoreResult<usize> {
        self.request(|reply| StoreCommand::MarkAllNotificationsAsRead { reply })
            .await
    }

    pub async fn clear_notifications(&self) -> StoreResult<()> {
        self.request(|reply| StoreCommand::ClearNotifications { reply })
            .await
    }

    // ==================== 查询与配置 ====================

    /// 获取完整快照，Actor不可用时返回空快照
    pub async fn snapshot(&self) -> StoreSnapshot {
        self.request(|reply| StoreCommand::GetSnapshot { reply })
            .await
            .unwrap_or_default()
    }

    /// 获取后台概览，Actor不可用时返回全零统计
    pub async fn dashboard_stats(&self) -> DashboardStats {
        self.request(|reply| StoreCommand::GetDashboardStats { reply })
            .await
            .unwrap_or_default()
    }

    pub async fn apply_config(&self, config: PersistedAppConfig) -> StoreResult<()> {
        self.request(|reply| StoreCommand::ApplyConfig { config, reply })
            .await
    }

    /// 健康检查
    /// 返回true表示Actor正常运行，false表示Actor无响应或已停止
    pub async fn health_check(&self) -> bool {
        let (reply, rx) = oneshot::channel();

        if self
            .sender
            .send(StoreCommand::HealthCheck { reply })
            .await
            .is_err()
        {
            tracing::warn!("Store Actor 健康检查失败: 通道已关闭");
            return false;
        }

        match tokio::time::timeout(HEALTH_CHECK_TIMEOUT, rx).await {
            Ok(Ok(())) => {
                tracing::debug!("Store Actor 健康检查成功");
                true
            }
            Ok(Err(_)) => {
                tracing::warn!("Store Actor 健康检查失败: Actor已停止");
                false
            }
            Err(_) => {
                tracing::warn!("Store Actor 健康检查失败: 超时(5秒)");
                false
            }
        }
    }
}
