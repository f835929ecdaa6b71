//! 工具函数模块
//!
//! 目前只有输入验证

pub mod validation;

// 重新导出常用函数
pub use validation::*;
