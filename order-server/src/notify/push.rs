//! Admin push notifications
//!
//! Subscriptions live in memory for the process lifetime. Delivery posts
//! the message as JSON to the subscription endpoint.

use async_trait::async_trait;
use dashmap::DashMap;
use shared::models::{PushMessage, PushSubscription};
use std::time::Duration;

use super::NotifyError;

/// Registered admin devices
pub trait SubscriberRegistry: Send + Sync {
    /// Returns true when the endpoint was not registered before
    fn add(&self, subscription: PushSubscription) -> bool;
    /// Returns true when the endpoint was registered
    fn remove(&self, endpoint: &str) -> bool;
    fn list(&self) -> Vec<PushSubscription>;
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Default)]
pub struct MemorySubscriberRegistry {
    subscriptions: DashMap<String, PushSubscription>,
}

impl MemorySubscriberRegistry {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SubscriberRegistry for MemorySubscriberRegistry {
    fn add(&self, subscription: PushSubscription) -> bool {
        self.subscriptions
            .insert(subscription.endpoint.clone(), subscription)
            .is_none()
    }

    fn remove(&self, endpoint: &str) -> bool {
        self.subscriptions.remove(endpoint).is_some()
    }

    fn list(&self) -> Vec<PushSubscription> {
        let mut all: Vec<PushSubscription> =
            self.subscriptions.iter().map(|e| e.value().clone()).collect();
        all.sort_by(|a, b| a.endpoint.cmp(&b.endpoint));
        all
    }

    fn len(&self) -> usize {
        self.subscriptions.len()
    }
}

#[async_trait]
pub trait PushTransport: Send + Sync {
    async fn deliver(
        &self,
        subscription: &PushSubscription,
        message: &PushMessage,
    ) -> Result<(), NotifyError>;
}

pub struct WebhookPushTransport {
    client: reqwest::Client,
}

impl WebhookPushTransport {
    pub fn new() -> Result<Self, NotifyError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| NotifyError::Push(e.to_string()))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl PushTransport for WebhookPushTransport {
    async fn deliver(
        &self,
        subscription: &PushSubscription,
        message: &PushMessage,
    ) -> Result<(), NotifyError> {
        let resp = self
            .client
            .post(&subscription.endpoint)
            .json(message)
            .send()
            .await
            .map_err(|e| NotifyError::Push(e.to_string()))?;

        let status = resp.status();
        if status == reqwest::StatusCode::NOT_FOUND || status == reqwest::StatusCode::GONE {
            return Err(NotifyError::SubscriptionGone(subscription.endpoint.clone()));
        }
        if !status.is_success() {
            return Err(NotifyError::Push(format!(
                "{} responded {status}",
                subscription.endpoint
            )));
        }
        Ok(())
    }
}

/// Records pushes in the log instead of delivering them
#[derive(Debug, Default)]
pub struct LogPushTransport;

#[async_trait]
impl PushTransport for LogPushTransport {
    async fn deliver(
        &self,
        subscription: &PushSubscription,
        message: &PushMessage,
    ) -> Result<(), NotifyError> {
        tracing::info!(
            endpoint = %subscription.endpoint,
            title = %message.title,
            "Push delivery disabled, message logged only"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sub(endpoint: &str) -> PushSubscription {
        PushSubscription {
            endpoint: endpoint.into(),
            keys: None,
        }
    }

    // ==== Registry Tests ====

    #[test]
    fn test_registry_add_remove_list() {
        let registry = MemorySubscriberRegistry::new();
        assert!(registry.add(sub("https://push.example/b")));
        assert!(registry.add(sub("https://push.example/a")));
        assert!(!registry.add(sub("https://push.example/a")));
        assert_eq!(registry.len(), 2);

        let endpoints: Vec<String> = registry.list().into_iter().map(|s| s.endpoint).collect();
        assert_eq!(
            endpoints,
            vec!["https://push.example/a", "https://push.example/b"]
        );

        assert!(registry.remove("https://push.example/a"));
        assert!(!registry.remove("https://push.example/a"));
        assert_eq!(registry.len(), 1);
    }
}
