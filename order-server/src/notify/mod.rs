//! Order side effects
//!
//! Everything that happens after an order is stored: ledger row, quote mail
//! to the customer and staff, push to admin devices. Each effect runs in its
//! own task; failures are logged and never reach the HTTP response.

pub mod ledger;
pub mod mail;
pub mod push;
pub mod quote;

use shared::error::ErrorCode;
use shared::models::{Order, PushMessage};
use std::sync::Arc;
use thiserror::Error;
use tokio::task::JoinHandle;

use crate::orders::templates::{MessageKind, MessageSettings, format_won, render_message};
use self::ledger::OrderLedger;
use self::mail::{MailSender, OutgoingMail};
use self::push::{PushTransport, SubscriberRegistry};
use self::quote::QuoteRenderer;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("Quote render failed: {0}")]
    Render(String),

    #[error("Mail delivery failed: {0}")]
    Mail(String),

    #[error("Ledger append failed: {0}")]
    Ledger(String),

    #[error("Push delivery failed: {0}")]
    Push(String),

    #[error("Push subscription expired: {0}")]
    SubscriptionGone(String),
}

impl NotifyError {
    pub fn code(&self) -> ErrorCode {
        match self {
            NotifyError::Render(_) => ErrorCode::QuoteRenderFailed,
            NotifyError::Mail(_) => ErrorCode::MailDeliveryFailed,
            NotifyError::Ledger(_) => ErrorCode::NotificationFailed,
            NotifyError::Push(_) | NotifyError::SubscriptionGone(_) => ErrorCode::PushFailed,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct NotifySettings {
    /// Mail the quote to the customer's contact address
    pub quote_delivery_enabled: bool,
    /// Copy of every new order
    pub staff_email: Option<String>,
    pub messages: MessageSettings,
}

#[derive(Clone)]
pub struct Notifier {
    quotes: Arc<dyn QuoteRenderer>,
    mailer: Arc<dyn MailSender>,
    ledger: Arc<dyn OrderLedger>,
    subscribers: Arc<dyn SubscriberRegistry>,
    push: Arc<dyn PushTransport>,
    settings: NotifySettings,
}

impl Notifier {
    pub fn new(
        quotes: Arc<dyn QuoteRenderer>,
        mailer: Arc<dyn MailSender>,
        ledger: Arc<dyn OrderLedger>,
        subscribers: Arc<dyn SubscriberRegistry>,
        push: Arc<dyn PushTransport>,
        settings: NotifySettings,
    ) -> Self {
        Self {
            quotes,
            mailer,
            ledger,
            subscribers,
            push,
            settings,
        }
    }

    pub fn subscribers(&self) -> &Arc<dyn SubscriberRegistry> {
        &self.subscribers
    }

    /// Spawn every side effect of a new order
    ///
    /// Handles are returned so tests can wait; the server drops them.
    pub fn order_created(&self, order: &Order) -> Vec<JoinHandle<()>> {
        let mut handles = Vec::with_capacity(3);

        let ledger = self.ledger.clone();
        let o = order.clone();
        handles.push(tokio::spawn(async move {
            if let Err(e) = ledger.append(&o).await {
                log_failure(&o.id, "ledger", &e);
            }
        }));

        let recipients = self.mail_recipients(order);
        if !recipients.is_empty() {
            let this = self.clone();
            let o = order.clone();
            handles.push(tokio::spawn(async move {
                this.send_quote(&o, recipients).await;
            }));
        }

        if !self.subscribers.is_empty() {
            let this = self.clone();
            let o = order.clone();
            handles.push(tokio::spawn(async move {
                this.push_new_order(&o).await;
            }));
        }

        handles
    }

    fn mail_recipients(&self, order: &Order) -> Vec<String> {
        let mut recipients = Vec::new();
        if self.settings.quote_delivery_enabled {
            recipients.push(order.contact.trim().to_string());
        }
        if let Some(staff) = &self.settings.staff_email {
            recipients.push(staff.clone());
        }
        recipients
    }

    async fn send_quote(&self, order: &Order, recipients: Vec<String>) {
        let quote = match self.quotes.render(order) {
            Ok(q) => q,
            Err(e) => {
                log_failure(&order.id, "quote", &e);
                return;
            }
        };

        let subject = format!("[{}] 주문 견적서", self.settings.messages.shop_name);
        let body = render_message(order, MessageKind::OrderReceived, &self.settings.messages);

        for to in recipients {
            let mail = OutgoingMail {
                to,
                subject: subject.clone(),
                body: body.clone(),
                attachment: Some(quote.clone()),
            };
            if let Err(e) = self.mailer.send(&mail).await {
                log_failure(&order.id, "mail", &e);
            }
        }
    }

    async fn push_new_order(&self, order: &Order) {
        let message = PushMessage {
            title: "새 주문".to_string(),
            body: format!(
                "{} · {} · {}",
                order.customer_name,
                order.delivery_date,
                format_won(order.total_price)
            ),
            url: Some(format!("/admin/orders/{}", order.id)),
        };

        for subscription in self.subscribers.list() {
            match self.push.deliver(&subscription, &message).await {
                Ok(()) => {}
                Err(NotifyError::SubscriptionGone(endpoint)) => {
                    self.subscribers.remove(&endpoint);
                    tracing::info!(endpoint = %endpoint, "Expired push subscription removed");
                }
                Err(e) => log_failure(&order.id, "push", &e),
            }
        }
    }
}

fn log_failure(order_id: &str, effect: &str, err: &NotifyError) {
    tracing::error!(
        order_id = %order_id,
        effect,
        code = err.code().code(),
        error = %err,
        "Order notification failed"
    );
}
