// 数据模型模块 - 定义所有的数据结构

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 未提供图片时使用的默认菜品图片
pub const DEFAULT_IMAGE_URL: &str =
    "https://images.pexels.com/photos/1640777/pexels-photo-1640777.jpeg?auto=compress&cs=tinysrgb&w=300&h=200&dpr=1";

// ==================== 菜单 ====================

/// 菜品
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    /// 菜品ID（创建后不变）
    pub id: i64,
    /// 名称
    pub name: String,
    /// 所属分类，必须在分类集合中
    pub category: String,
    /// 价格（₹）
    pub price: f64,
    /// 描述
    pub description: String,
    /// 图片地址
    pub image_url: String,
    /// 是否素食
    pub is_veg: bool,
}

/// 新建菜品请求（ID由存储分配）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMenuItem {
    pub name: String,
    pub category: String,
    pub price: f64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default = "default_true")]
    pub is_veg: bool,
}

fn default_true() -> bool {
    true
}

/// 菜品部分更新，`None` 字段保持不变
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MenuItemPatch {
    pub name: Option<String>,
    pub category: Option<String>,
    pub price: Option<f64>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub is_veg: Option<bool>,
}

impl MenuItemPatch {
    /// 合并到已有菜品
    pub fn apply_to(self, item: &mut MenuItem) {
        if let Some(name) = self.name {
            item.name = name.trim().to_string();
        }
        if let Some(category) = self.category {
            item.category = category.trim().to_string();
        }
        if let Some(price) = self.price {
            item.price = price;
        }
        if let Some(description) = self.description {
            item.description = description;
        }
        if let Some(image_url) = self.image_url {
            item.image_url = image_url;
        }
        if let Some(is_veg) = self.is_veg {
            item.is_veg = is_veg;
        }
    }
}

/// 菜单排序方式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MenuSort {
    #[default]
    Name,
    Price,
    Category,
}

/// 菜单查询条件
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MenuQuery {
    /// 搜索关键字，匹配名称或描述（不区分大小写）
    #[serde(default)]
    pub search: String,
    /// 分类过滤，`None` 或 "All" 表示全部
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub sort_by: MenuSort,
}

// ==================== 购物车 ====================

/// 购物车行：菜品快照加数量
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    #[serde(flatten)]
    pub item: MenuItem,
    /// 数量，存在的行始终 >= 1
    pub quantity: u32,
}

impl CartItem {
    pub fn id(&self) -> i64 {
        self.item.id
    }

    pub fn line_total(&self) -> f64 {
        self.item.price * f64::from(self.quantity)
    }
}

/// 购物车汇总
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartSummary {
    /// 总件数
    pub item_count: u32,
    /// 小计
    pub subtotal: f64,
    /// 配送费
    pub delivery_fee: f64,
    /// 合计
    pub total: f64,
}

// ==================== 订阅套餐 ====================

/// 订阅套餐
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubscriptionPlan {
    pub id: i64,
    pub name: String,
    pub price: f64,
    /// 计费周期，例如 "month"
    pub period: String,
    /// 是否推荐
    pub popular: bool,
    pub description: String,
    /// 套餐权益（有序）
    pub features: Vec<String>,
    /// 订阅人数
    pub subscribers: u32,
}

/// 新建套餐请求
///
/// `subscribers` 会被忽略，新套餐总是从 0 开始
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSubscriptionPlan {
    pub name: String,
    pub price: f64,
    #[serde(default = "default_period")]
    pub period: String,
    #[serde(default)]
    pub popular: bool,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub subscribers: u32,
}

fn default_period() -> String {
    "month".to_string()
}

/// 套餐部分更新
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubscriptionPlanPatch {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub period: Option<String>,
    pub popular: Option<bool>,
    pub description: Option<String>,
    pub features: Option<Vec<String>>,
    pub subscribers: Option<u32>,
}

impl SubscriptionPlanPatch {
    pub fn apply_to(self, plan: &mut SubscriptionPlan) {
        if let Some(name) = self.name {
            plan.name = name.trim().to_string();
        }
        if let Some(price) = self.price {
            plan.price = price;
        }
        if let Some(period) = self.period {
            plan.period = period;
        }
        if let Some(popular) = self.popular {
            plan.popular = popular;
        }
        if let Some(description) = self.description {
            plan.description = description;
        }
        if let Some(features) = self.features {
            plan.features = features;
        }
        if let Some(subscribers) = self.subscribers {
            plan.subscribers = subscribers;
        }
    }
}

// ==================== 通知 ====================

/// 通知类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Info,
    Success,
    Warning,
    Error,
}

/// 应用内通知
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: i64,
    pub title: String,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub read: bool,
    pub timestamp: DateTime<Utc>,
}

/// 新建通知请求（ID和时间戳由存储分配）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewNotification {
    pub title: String,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    #[serde(default)]
    pub read: bool,
}

impl NewNotification {
    pub fn new(kind: NotificationKind, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            kind,
            read: false,
        }
    }
}

// ==================== 快照与统计 ====================

/// 存储的完整快照，界面据此重新渲染
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreSnapshot {
    pub menu_items: Vec<MenuItem>,
    pub categories: Vec<String>,
    pub cart_items: Vec<CartItem>,
    pub subscription_plans: Vec<SubscriptionPlan>,
    pub is_dark_mode: bool,
    pub notifications: Vec<Notification>,
}

/// 管理后台概览数据
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub menu_item_count: usize,
    pub category_count: usize,
    /// 购物车行数（后台展示为"今日订单"）
    pub cart_row_count: usize,
    pub total_subscribers: u32,
    /// 月收入 = Σ 价格 × 订阅人数
    pub monthly_revenue: f64,
    pub unread_notifications: usize,
}

// ==================== 配置 ====================

/// 应用配置更新请求，`None` 字段保持不变
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// 启动时是否使用深色模式
    pub dark_mode: Option<bool>,
    /// 启动时是否写入默认分类、套餐和欢迎通知
    pub seed_defaults: Option<bool>,
    /// 配送费（₹）
    pub delivery_fee: Option<f64>,
    /// 小计超过该金额免配送费
    pub free_delivery_threshold: Option<f64>,
    /// 默认菜品图片
    pub default_image_url: Option<String>,
    /// 事件总线缓冲区大小
    pub event_bus_capacity: Option<usize>,
    /// 日志设置
    pub logger_settings: Option<LoggerSettings>,
}

/// 持久化的应用配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistedAppConfig {
    pub dark_mode: bool,
    pub seed_defaults: bool,
    pub delivery_fee: f64,
    pub free_delivery_threshold: f64,
    pub default_image_url: String,
    pub event_bus_capacity: usize,
    pub logger_settings: LoggerSettings,
}

impl Default for PersistedAppConfig {
    fn default() -> Self {
        Self {
            dark_mode: false,
            seed_defaults: true,
            delivery_fee: 29.0,
            free_delivery_threshold: 500.0,
            default_image_url: DEFAULT_IMAGE_URL.to_string(),
            event_bus_capacity: 256,
            logger_settings: LoggerSettings::default(),
        }
    }
}

/// 日志设置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggerSettings {
    /// 是否将日志推送给界面
    pub enable_ui_logging: bool,
}

impl Default for LoggerSettings {
    fn default() -> Self {
        Self {
            enable_ui_logging: true,
        }
    }
}

/// 计费规则，存储计算购物车汇总时使用
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pricing {
    pub delivery_fee: f64,
    pub free_delivery_threshold: f64,
}

impl Default for Pricing {
    fn default() -> Self {
        Self {
            delivery_fee: 29.0,
            free_delivery_threshold: 500.0,
        }
    }
}

impl From<&PersistedAppConfig> for Pricing {
    fn from(config: &PersistedAppConfig) -> Self {
        Self {
            delivery_fee: config.delivery_fee,
            free_delivery_threshold: config.free_delivery_threshold,
        }
    }
}
