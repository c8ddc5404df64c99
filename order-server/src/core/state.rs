//! 服务器状态
//!
//! Cloned into every handler; all members are cheap handles.

use chrono::NaiveDate;
use std::sync::Arc;

use crate::core::{Config, Result, ServerError};
use crate::db::DbService;
use crate::notify::ledger::CsvOrderLedger;
use crate::notify::mail::{LogMailSender, MailSender, SesMailSender};
use crate::notify::push::{
    LogPushTransport, MemorySubscriberRegistry, PushTransport, SubscriberRegistry,
    WebhookPushTransport,
};
use crate::notify::quote::CsvQuoteRenderer;
use crate::notify::{Notifier, NotifySettings};
use crate::orders::templates::MessageSettings;
use crate::orders::{OrderService, OrderStore, SqliteOrderStore};
use crate::utils::time::business_today;

/// 服务器状态 - 持有所有服务的引用
#[derive(Clone)]
pub struct ServerState {
    /// 服务器配置 (不可变)
    pub config: Arc<Config>,
    /// 订单生命周期
    pub orders: OrderService,
    /// 新订单通知 (台账、邮件、推送)
    pub notifier: Notifier,
}

impl ServerState {
    /// 创建服务器状态 (手动构造)
    ///
    /// 通常使用 [`initialize()`](Self::initialize) 方法代替
    pub fn new(config: Config, orders: OrderService, notifier: Notifier) -> Self {
        Self {
            config: Arc::new(config),
            orders,
            notifier,
        }
    }

    /// 初始化服务器状态
    ///
    /// 按顺序初始化：
    /// 1. 工作目录
    /// 2. 数据库 (work_dir/orders.db)
    /// 3. 邮件 (SES) 与推送
    pub async fn initialize(config: &Config) -> Result<Self> {
        std::fs::create_dir_all(&config.work_dir)
            .map_err(|e| ServerError::WorkDir(format!("{}: {e}", config.work_dir)))?;

        let db = DbService::new(&config.database_path())
            .await
            .map_err(|e| ServerError::Database(e.message))?;
        let store: Arc<dyn OrderStore> = Arc::new(SqliteOrderStore::new(db.pool));

        let mailer: Arc<dyn MailSender> =
            if config.quote_delivery_enabled || config.staff_email.is_some() {
                tracing::info!(from = %config.ses_from_email, "Quote mail via SES");
                Arc::new(SesMailSender::from_env(config.ses_from_email.clone()).await)
            } else {
                Arc::new(LogMailSender)
            };

        let push: Arc<dyn PushTransport> = if config.push_enabled {
            Arc::new(WebhookPushTransport::new().map_err(|e| ServerError::Notify(e.to_string()))?)
        } else {
            Arc::new(LogPushTransport)
        };

        Ok(Self::assemble(config.clone(), store, mailer, push))
    }

    /// 使用指定存储构造，邮件与推送只记录日志 (测试使用)
    pub fn with_store(config: Config, store: Arc<dyn OrderStore>) -> Self {
        Self::assemble(config, store, Arc::new(LogMailSender), Arc::new(LogPushTransport))
    }

    fn assemble(
        config: Config,
        store: Arc<dyn OrderStore>,
        mailer: Arc<dyn MailSender>,
        push: Arc<dyn PushTransport>,
    ) -> Self {
        let orders = OrderService::new(store, config.quote_delivery_enabled);
        let subscribers: Arc<dyn SubscriberRegistry> = Arc::new(MemorySubscriberRegistry::new());
        let settings = NotifySettings {
            quote_delivery_enabled: config.quote_delivery_enabled,
            staff_email: config.staff_email.clone(),
            messages: message_settings(&config),
        };
        let notifier = Notifier::new(
            Arc::new(CsvQuoteRenderer::new(
                config.shop_name.clone(),
                config.business_timezone,
            )),
            mailer,
            Arc::new(CsvOrderLedger::new(
                config.ledger_path(),
                config.business_timezone,
            )),
            subscribers,
            push,
            settings,
        );
        Self::new(config, orders, notifier)
    }

    /// 业务时区的今天
    pub fn today(&self) -> NaiveDate {
        business_today(self.config.business_timezone)
    }

    pub fn message_settings(&self) -> MessageSettings {
        message_settings(&self.config)
    }
}

fn message_settings(config: &Config) -> MessageSettings {
    MessageSettings {
        shop_name: config.shop_name.clone(),
        bank_account: config.bank_account.clone(),
    }
}
