//! 工具模块 - 通用工具函数和类型
//!
//! - [`logger`] - 日志初始化 (app / audit / security)
//! - [`validation`] - 输入校验
//! - [`time`] - 业务时区

pub mod logger;
pub mod time;
pub mod validation;

// Re-export error types from shared
pub use shared::error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
