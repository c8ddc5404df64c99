use chrono_tz::Tz;
use std::path::PathBuf;

use super::error::{Result, ServerError};

/// 服务器配置 - 订单服务的所有配置项
///
/// # 环境变量
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | WORK_DIR | ./work_dir | 工作目录 (数据库、日志、台账) |
/// | HTTP_PORT | 3000 | HTTP 服务端口 |
/// | ENVIRONMENT | development | 运行环境 |
/// | LOG_LEVEL | info | 日志级别 |
/// | LOG_JSON | false | JSON 日志格式 |
/// | BUSINESS_TIMEZONE | Asia/Seoul | 业务时区 (判断"今天") |
/// | ADMIN_TOKEN | - | 管理接口 Bearer token，未设置时不校验 (production 必填) |
/// | QUOTE_DELIVERY_ENABLED | false | 是否发送报价邮件 (联系方式需为邮箱) |
/// | SES_FROM_EMAIL | orders@bakery.local | 发件地址 |
/// | STAFF_EMAIL | - | 报价邮件抄送 |
/// | BANK_ACCOUNT | - | 付款通知中的账户 |
/// | PUSH_ENABLED | false | 新订单推送 |
/// | REQUEST_BODY_LIMIT | 65536 | 请求体上限 (字节) |
#[derive(Debug, Clone)]
pub struct Config {
    /// 工作目录
    pub work_dir: String,
    /// HTTP API 服务端口
    pub http_port: u16,
    /// 运行环境: development | staging | production
    pub environment: String,
    pub log_level: String,
    pub log_json: bool,
    /// 业务时区
    pub business_timezone: Tz,
    /// 管理员 token (None = 开发模式，不校验)
    pub admin_token: Option<String>,
    pub quote_delivery_enabled: bool,
    pub ses_from_email: String,
    pub staff_email: Option<String>,
    pub bank_account: String,
    pub shop_name: String,
    pub push_enabled: bool,
    pub request_body_limit: usize,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 从任意 key -> value 查找函数加载配置 (测试使用)
    pub fn from_lookup<F>(get: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| get(key).filter(|v| !v.trim().is_empty());
        let flag = |key: &str| {
            non_empty(key)
                .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(false)
        };

        let business_timezone = match non_empty("BUSINESS_TIMEZONE") {
            Some(name) => name.parse::<Tz>().unwrap_or_else(|_| {
                tracing::warn!(timezone = %name, "Unknown BUSINESS_TIMEZONE, falling back to Asia/Seoul");
                chrono_tz::Asia::Seoul
            }),
            None => chrono_tz::Asia::Seoul,
        };

        Self {
            work_dir: non_empty("WORK_DIR").unwrap_or_else(|| "./work_dir".into()),
            http_port: non_empty("HTTP_PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            environment: non_empty("ENVIRONMENT").unwrap_or_else(|| "development".into()),
            log_level: non_empty("LOG_LEVEL").unwrap_or_else(|| "info".into()),
            log_json: flag("LOG_JSON"),
            business_timezone,
            admin_token: non_empty("ADMIN_TOKEN"),
            quote_delivery_enabled: flag("QUOTE_DELIVERY_ENABLED"),
            ses_from_email: non_empty("SES_FROM_EMAIL")
                .unwrap_or_else(|| "orders@bakery.local".into()),
            staff_email: non_empty("STAFF_EMAIL"),
            bank_account: non_empty("BANK_ACCOUNT").unwrap_or_default(),
            shop_name: non_empty("SHOP_NAME").unwrap_or_else(|| "베이커리".into()),
            push_enabled: flag("PUSH_ENABLED"),
            request_body_limit: non_empty("REQUEST_BODY_LIMIT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(64 * 1024),
        }
    }

    /// 默认值 + 自定义工作目录
    ///
    /// 常用于测试场景
    pub fn with_overrides(work_dir: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_lookup(|_| None);
        config.work_dir = work_dir.into();
        config.http_port = http_port;
        config
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Reject settings the server must not start with
    ///
    /// Production refuses to run with the admin routes open.
    pub fn validate(&self) -> Result<()> {
        if self.is_production() && self.admin_token.is_none() {
            return Err(ServerError::Config(
                "ADMIN_TOKEN must be set in production".into(),
            ));
        }
        Ok(())
    }

    pub fn database_path(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("orders.db")
    }

    pub fn log_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("logs")
    }

    pub fn ledger_path(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("ledger").join("orders.csv")
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
