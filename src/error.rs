// 领域错误类型

use serde::Serialize;

/// 存储操作失败的原因
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StoreError {
    #[error("名称不能为空")]
    EmptyName,

    #[error("无效的价格: {0}")]
    InvalidPrice(f64),

    #[error("未知分类: {0}")]
    UnknownCategory(String),

    #[error("菜品不在菜单中: {0}")]
    UnknownMenuItem(i64),

    #[error("分类 {category} 下还有 {item_count} 个菜品，无法删除")]
    CategoryInUse { category: String, item_count: usize },

    #[error("套餐 {plan_id} 还有 {subscribers} 位订阅用户，请先迁移用户")]
    PlanHasSubscribers { plan_id: i64, subscribers: u32 },

    #[error("存储服务不可用")]
    StoreUnavailable,
}

impl StoreError {
    /// 给前端使用的稳定错误码
    pub fn code(&self) -> &'static str {
        match self {
            StoreError::EmptyName => "EMPTY_NAME",
            StoreError::InvalidPrice(_) => "INVALID_PRICE",
            StoreError::UnknownCategory(_) => "UNKNOWN_CATEGORY",
            StoreError::UnknownMenuItem(_) => "UNKNOWN_MENU_ITEM",
            StoreError::CategoryInUse { .. } => "CATEGORY_IN_USE",
            StoreError::PlanHasSubscribers { .. } => "PLAN_HAS_SUBSCRIBERS",
            StoreError::StoreUnavailable => "STORE_UNAVAILABLE",
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// 命令层返回给前端的错误体
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommandError {
    pub code: &'static str,
    pub error: String,
}

impl CommandError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            code: "BAD_REQUEST",
            error: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        let error = message.into();
        tracing::error!(error = %error, "命令执行内部错误");
        Self {
            code: "INTERNAL_ERROR",
            error,
        }
    }
}

impl From<StoreError> for CommandError {
    fn from(err: StoreError) -> Self {
        Self {
            code: err.code(),
            error: err.to_string(),
        }
    }
}

impl std::fmt::Display for CommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_error_keeps_store_code() {
        let err: CommandError = StoreError::CategoryInUse {
            category: "Biryani".to_string(),
            item_count: 2,
        }
        .into();
        assert_eq!(err.code, "CATEGORY_IN_USE");
        assert!(err.error.contains("Biryani"));

        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "CATEGORY_IN_USE");
    }
}
