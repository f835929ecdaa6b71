//! 命令模块
//!
//! 提供界面调用的所有命令接口，按功能分组：
//! - menu: 菜单与分类管理
//! - cart: 购物车
//! - subscription: 订阅套餐
//! - notification: 通知
//! - config: 配置与主题
//! - query: 快照与统计查询
//!
//! [`invoke`] 按命令名分发 JSON 参数，供 webview 桥接层直接调用

pub mod cart;
pub mod config;
pub mod menu;
pub mod notification;
pub mod query;
pub mod subscription;

// 重新导出所有命令
pub use cart::*;
pub use config::*;
pub use menu::*;
pub use notification::*;
pub use query::*;
pub use subscription::*;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::CommandError;
use crate::models::*;
use crate::AppState;

#[derive(Deserialize)]
struct IdArgs {
    id: i64,
}

#[derive(Deserialize)]
struct NameArgs {
    name: String,
}

#[derive(Deserialize)]
struct NewMenuItemArgs {
    item: NewMenuItem,
}

#[derive(Deserialize)]
struct UpdateMenuItemArgs {
    id: i64,
    patch: MenuItemPatch,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct QueryMenuArgs {
    query: MenuQuery,
}

#[derive(Deserialize)]
struct AddToCartArgs {
    item: MenuItem,
}

#[derive(Deserialize)]
struct QuantityArgs {
    id: i64,
    quantity: i64,
}

#[derive(Deserialize)]
struct NewPlanArgs {
    plan: NewSubscriptionPlan,
}

#[derive(Deserialize)]
struct UpdatePlanArgs {
    id: i64,
    patch: SubscriptionPlanPatch,
}

#[derive(Deserialize)]
struct NotificationArgs {
    notification: NewNotification,
}

#[derive(Deserialize)]
struct DarkModeArgs {
    enabled: bool,
}

#[derive(Deserialize)]
struct ConfigArgs {
    config: AppConfig,
}

fn parse<T: DeserializeOwned>(args: Value) -> Result<T, CommandError> {
    let args = if args.is_null() {
        Value::Object(Default::default())
    } else {
        args
    };
    serde_json::from_value(args)
        .map_err(|e| CommandError::bad_request(format!("参数解析失败: {}", e)))
}

fn to_json<T: Serialize>(value: T) -> Result<Value, CommandError> {
    serde_json::to_value(value).map_err(|e| CommandError::internal(e.to_string()))
}

/// 按命令名执行命令
///
/// # 参数
/// - `cmd`: snake_case 命令名，例如 `add_to_cart`
/// - `args`: 命令参数对象，无参数命令可传 `null`
///
/// # 返回
/// - `Ok(Value)`: 命令结果的 JSON
/// - `Err(CommandError)`: `{ "code", "error" }` 错误体
pub async fn invoke(state: &AppState, cmd: &str, args: Value) -> Result<Value, CommandError> {
    tracing::debug!("执行命令: {}", cmd);

    match cmd {
        // 菜单
        "add_menu_item" => {
            let a: NewMenuItemArgs = parse(args)?;
            to_json(add_menu_item(state, a.item).await?)
        }
        "update_menu_item" => {
            let a: UpdateMenuItemArgs = parse(args)?;
            to_json(update_menu_item(state, a.id, a.patch).await?)
        }
        "delete_menu_item" => {
            let a: IdArgs = parse(args)?;
            to_json(delete_menu_item(state, a.id).await?)
        }
        "add_category" => {
            let a: NameArgs = parse(args)?;
            to_json(add_category(state, a.name).await?)
        }
        "delete_category" => {
            let a: NameArgs = parse(args)?;
            to_json(delete_category(state, a.name).await?)
        }
        "query_menu" => {
            let a: QueryMenuArgs = parse(args)?;
            to_json(query_menu(state, a.query).await?)
        }

        // 购物车
        "add_to_cart" => {
            let a: AddToCartArgs = parse(args)?;
            to_json(add_to_cart(state, a.item).await?)
        }
        "update_cart_quantity" => {
            let a: QuantityArgs = parse(args)?;
            to_json(update_cart_quantity(state, a.id, a.quantity).await?)
        }
        "remove_from_cart" => {
            let a: IdArgs = parse(args)?;
            to_json(remove_from_cart(state, a.id).await?)
        }
        "clear_cart" => to_json(clear_cart(state).await?),
        "get_cart_summary" => to_json(get_cart_summary(state).await?),

        // 订阅套餐
        "add_subscription_plan" => {
            let a: NewPlanArgs = parse(args)?;
            to_json(add_subscription_plan(state, a.plan).await?)
        }
        "update_subscription_plan" => {
            let a: UpdatePlanArgs = parse(args)?;
            to_json(update_subscription_plan(state, a.id, a.patch).await?)
        }
        "delete_subscription_plan" => {
            let a: IdArgs = parse(args)?;
            to_json(delete_subscription_plan(state, a.id).await?)
        }
        "subscribe_to_plan" => {
            let a: IdArgs = parse(args)?;
            to_json(subscribe_to_plan(state, a.id).await?)
        }
        "unsubscribe_from_plan" => {
            let a: IdArgs = parse(args)?;
            to_json(unsubscribe_from_plan(state, a.id).await?)
        }

        // 通知
        "add_notification" => {
            let a: NotificationArgs = parse(args)?;
            to_json(add_notification(state, a.notification).await?)
        }
        "mark_notification_as_read" => {
            let a: IdArgs = parse(args)?;
            to_json(mark_notification_as_read(state, a.id).await?)
        }
        "mark_all_notifications_as_read" => to_json(mark_all_notifications_as_read(state).await?),
        "clear_notifications" => to_json(clear_notifications(state).await?),

        // 配置与主题
        "get_app_config" => to_json(get_app_config(state).await?),
        "update_config" => {
            let a: ConfigArgs = parse(args)?;
            to_json(update_config(state, a.config).await?)
        }
        "toggle_dark_mode" => to_json(toggle_dark_mode(state).await?),
        "set_dark_mode" => {
            let a: DarkModeArgs = parse(args)?;
            to_json(set_dark_mode(state, a.enabled).await?)
        }

        // 查询
        "get_snapshot" => to_json(get_snapshot(state).await?),
        "get_dashboard_stats" => to_json(get_dashboard_stats(state).await?),
        "get_store_health" => to_json(get_store_health(state).await?),

        other => Err(CommandError::bad_request(format!("未知命令: {}", other))),
    }
}
