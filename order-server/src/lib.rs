//! Bakery Order Server - 烘焙订单服务
//!
//! # 架构概述
//!
//! - **价格** (`pricing`): 订单配置 -> 分类价格明细
//! - **订单** (`orders`): 校验、拆分为订单项、存储、状态流转、顾客消息
//! - **数据库** (`db`): SQLite (sqlx)
//! - **通知** (`notify`): 台账、报价邮件 (SES)、管理员推送
//! - **认证** (`auth`): 管理员 Bearer token
//! - **HTTP API** (`api`): axum 路由和处理器
//!
//! # 模块结构
//!
//! ```text
//! order-server/src/
//! ├── core/          # 配置、状态、错误、服务器
//! ├── auth/          # 管理员认证
//! ├── api/           # HTTP 路由和处理器
//! ├── pricing/       # 价格计算
//! ├── orders/        # 订单生命周期
//! ├── notify/        # 下单后的副作用
//! ├── utils/         # 日志、校验、时间
//! └── db/            # 数据库层
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod notify;
pub mod orders;
pub mod pricing;
pub mod utils;

// Re-export 公共类型
pub use crate::core::{Config, Server, ServerState};
pub use orders::{MemoryOrderStore, OrderService, OrderStore, SqliteOrderStore};
pub use pricing::compute_price;
pub use utils::{AppError, AppResult};

// Re-export unified error types from shared
pub use utils::{ApiResponse, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::{cleanup_old_logs, init_logger, init_logger_with_file};

/// 设置运行环境: 工作目录 + 日志
///
/// `.env` 需在加载 [`Config`] 之前读取 (见 `main.rs`)。
pub fn setup_environment(config: &Config) -> anyhow::Result<()> {
    std::fs::create_dir_all(&config.work_dir)?;
    let log_dir = config.log_dir();
    init_logger_with_file(&config.log_level, config.log_json, Some(&log_dir))?;
    Ok(())
}
