//! Admin push notification types

use serde::{Deserialize, Serialize};

/// Browser push subscription as handed over by the admin page
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PushSubscription {
    pub endpoint: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keys: Option<SubscriptionKeys>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SubscriptionKeys {
    pub p256dh: String,
    pub auth: String,
}

/// Payload delivered to every subscriber
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PushMessage {
    pub title: String,
    pub body: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Remove subscription payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnsubscribeRequest {
    pub endpoint: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subscription_without_keys() {
        let sub: PushSubscription =
            serde_json::from_str(r#"{"endpoint":"https://push.example/abc"}"#).unwrap();
        assert_eq!(sub.endpoint, "https://push.example/abc");
        assert!(sub.keys.is_none());
        assert_eq!(
            serde_json::to_string(&sub).unwrap(),
            r#"{"endpoint":"https://push.example/abc"}"#
        );
    }
}
