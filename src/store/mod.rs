// 领域存储 - 菜单、购物车、订阅套餐、通知和主题的唯一数据源
//
// 所有修改都通过具名操作完成；每次成功修改会记录待发布的 AppEvent，
// 由持有存储的 Actor 在命令处理完毕后统一发布

mod cart;
mod menu;
mod notification;
mod seed;
mod subscription;

use crate::event_bus::AppEvent;
use crate::models::{DashboardStats, PersistedAppConfig, Pricing, StoreSnapshot};
use crate::models::{CartItem, MenuItem, Notification, SubscriptionPlan};

/// 内存中的领域存储，进程重启后重置
#[derive(Debug, Clone)]
pub struct DomainStore {
    menu_items: Vec<MenuItem>,
    categories: Vec<String>,
    cart_items: Vec<CartItem>,
    subscription_plans: Vec<SubscriptionPlan>,
    is_dark_mode: bool,
    notifications: Vec<Notification>,
    /// 最近分配的ID，所有集合共用一个单调递增序列
    last_id: i64,
    pricing: Pricing,
    default_image_url: String,
    pending_events: Vec<AppEvent>,
}

impl DomainStore {
    /// 创建一个空存储（没有分类、套餐和通知）
    pub fn empty(pricing: Pricing, default_image_url: impl Into<String>) -> Self {
        Self {
            menu_items: Vec::new(),
            categories: Vec::new(),
            cart_items: Vec::new(),
            subscription_plans: Vec::new(),
            is_dark_mode: false,
            notifications: Vec::new(),
            last_id: 0,
            pricing,
            default_image_url: default_image_url.into(),
            pending_events: Vec::new(),
        }
    }

    /// 按配置创建存储，必要时写入默认数据
    pub fn from_config(config: &PersistedAppConfig) -> Self {
        let mut store = Self::empty(Pricing::from(config), config.default_image_url.clone());
        store.is_dark_mode = config.dark_mode;
        if config.seed_defaults {
            store.seed_defaults();
        }
        store
    }

    fn allocate_id(&mut self) -> i64 {
        self.last_id += 1;
        self.last_id
    }

    fn record(&mut self, event: AppEvent) {
        self.pending_events.push(event);
    }

    /// 取出自上次调用以来产生的事件
    pub fn drain_events(&mut self) -> Vec<AppEvent> {
        std::mem::take(&mut self.pending_events)
    }

    // ==================== 主题 ====================

    pub fn is_dark_mode(&self) -> bool {
        self.is_dark_mode
    }

    /// 切换深色模式，返回切换后的值
    pub fn toggle_dark_mode(&mut self) -> bool {
        self.set_dark_mode(!self.is_dark_mode)
    }

    pub fn set_dark_mode(&mut self, enabled: bool) -> bool {
        if self.is_dark_mode != enabled {
            self.is_dark_mode = enabled;
            self.record(AppEvent::DarkModeChanged { enabled });
        }
        self.is_dark_mode
    }

    // ==================== 配置 ====================

    pub fn pricing(&self) -> Pricing {
        self.pricing
    }

    /// 应用新的计费规则和默认图片，购物车汇总随之变化
    pub fn apply_config(&mut self, config: &PersistedAppConfig) {
        let pricing = Pricing::from(config);
        self.default_image_url = config.default_image_url.clone();
        if pricing != self.pricing {
            self.pricing = pricing;
            let summary = self.cart_summary();
            self.record(AppEvent::CartUpdated { summary });
        }
    }

    // ==================== 快照与统计 ====================

    pub fn snapshot(&self) -> StoreSnapshot {
        StoreSnapshot {
            menu_items: self.menu_items.clone(),
            categories: self.categories.clone(),
            cart_items: self.cart_items.clone(),
            subscription_plans: self.subscription_plans.clone(),
            is_dark_mode: self.is_dark_mode,
            notifications: self.notifications.clone(),
        }
    }

    /// 管理后台概览
    pub fn dashboard_stats(&self) -> DashboardStats {
        DashboardStats {
            menu_item_count: self.menu_items.len(),
            category_count: self.categories.len(),
            cart_row_count: self.cart_items.len(),
            total_subscribers: self.total_subscribers(),
            monthly_revenue: self.monthly_revenue(),
            unread_notifications: self.unread_notification_count(),
        }
    }
}

impl Default for DomainStore {
    fn default() -> Self {
        Self::from_config(&PersistedAppConfig::default())
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::models::{NewMenuItem, DEFAULT_IMAGE_URL};

    /// 只带分类、没有套餐和通知的存储
    pub fn store_with_categories(categories: &[&str]) -> DomainStore {
        let mut store = DomainStore::empty(Pricing::default(), DEFAULT_IMAGE_URL);
        for category in categories {
            store.add_category(category).unwrap();
        }
        store.drain_events();
        store
    }

    pub fn new_item(name: &str, category: &str, price: f64) -> NewMenuItem {
        NewMenuItem {
            name: name.to_string(),
            category: category.to_string(),
            price,
            description: format!("{} description", name),
            image_url: String::new(),
            is_veg: true,
        }
    }
}
