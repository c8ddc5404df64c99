//! 服务器启动错误
//!
//! Request-level failures use `AppError`; this covers startup and serving.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("数据库初始化失败: {0}")]
    Database(String),

    #[error("配置无效: {0}")]
    Config(String),

    #[error("目录创建失败: {0}")]
    WorkDir(String),

    #[error("通知服务初始化失败: {0}")]
    Notify(String),

    #[error("I/O 错误: {0}")]
    Io(#[from] std::io::Error),

    #[error("内部服务器错误: {0}")]
    Internal(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, ServerError>;
