//! HTTP 路由测试 - 内存存储 + tower oneshot

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode};
use http_body_util::BodyExt;
use order_server::api::build_app;
use order_server::{Config, MemoryOrderStore, ServerState};
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;

const TOKEN: &str = "s3cret";

struct TestApp {
    router: Router,
    _dir: tempfile::TempDir,
}

impl TestApp {
    fn new(admin_token: Option<&str>) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::with_overrides(dir.path().to_string_lossy().to_string(), 0);
        config.admin_token = admin_token.map(String::from);
        let state = ServerState::with_store(config, Arc::new(MemoryOrderStore::new()));
        Self {
            router: build_app(state),
            _dir: dir,
        }
    }

    async fn send(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    async fn submit(&self) -> Value {
        let (status, body) = self
            .send("POST", "/api/orders", None, Some(order_form(days_ahead(3))))
            .await;
        assert_eq!(status, StatusCode::OK, "{body}");
        body
    }
}

fn days_ahead(days: i64) -> String {
    let today = chrono::Utc::now()
        .with_timezone(&chrono_tz::Asia::Seoul)
        .date_naive();
    (today + chrono::Duration::days(days))
        .format("%Y-%m-%d")
        .to_string()
}

fn order_form(delivery_date: String) -> Value {
    json!({
        "customerName": "송하린",
        "contact": "harin@example.com",
        "deliveryDate": delivery_date,
        "deliveryMethod": "pickup",
        "pickupTime": "13:00",
        "regularCookies": { "초코칩": 3, "버터": 2 },
        "packaging": "singleBox",
        "brownieCookieSets": [{ "quantity": 2, "shape": "bear" }]
    })
}

#[tokio::test]
async fn test_health() {
    let app = TestApp::new(Some(TOKEN));
    let (status, body) = app.send("GET", "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert!(body["version"].is_string());

    let (status, body) = app.send("GET", "/health/detailed", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["order_count"], 0);
}

#[tokio::test]
async fn test_price_preview_is_public() {
    let app = TestApp::new(Some(TOKEN));
    let form = json!({
        "brownieCookieSets": [{ "quantity": 12, "shape": "birthdayBear" }]
    });
    let (status, body) = app.send("POST", "/api/price", None, Some(form)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["brownie"], 99_600);
    assert_eq!(body["total"], 99_600);

    let (status, body) = app.send("POST", "/api/price", None, Some(json!({}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 0);
}

#[tokio::test]
async fn test_submit_returns_order_and_breakdown() {
    let app = TestApp::new(Some(TOKEN));
    let body = app.submit().await;

    // 5 × 4500 + 5 × 500 + 2 × 7800
    assert_eq!(body["breakdown"]["total"], 40_600);
    assert_eq!(body["breakdown"]["packaging"], 2_500);
    assert_eq!(body["order"]["totalPrice"], 40_600);
    assert_eq!(body["order"]["status"], "pending");
    assert_eq!(body["order"]["paymentConfirmed"], false);

    let items = body["order"]["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["type"], "regularCookies");
    assert_eq!(items[0]["quantity"], 5);
    assert_eq!(items[0]["packaging"], "singleBox");
    assert_eq!(items[1]["type"], "brownie");
}

#[tokio::test]
async fn test_submit_validation_errors() {
    let app = TestApp::new(Some(TOKEN));

    let (status, body) = app
        .send("POST", "/api/orders", None, Some(order_form(days_ahead(0))))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 4008);
    assert_eq!(body["details"]["field"], "deliveryDate");

    let empty = json!({
        "customerName": "송하린",
        "contact": "harin@example.com",
        "deliveryDate": days_ahead(2),
    });
    let (status, body) = app.send("POST", "/api/orders", None, Some(empty)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 4007);

    let (_, body) = app
        .send("GET", "/api/orders", Some(TOKEN), None)
        .await;
    assert_eq!(body.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_admin_routes_require_token() {
    let app = TestApp::new(Some(TOKEN));
    app.submit().await;

    let (status, body) = app.send("GET", "/api/orders", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], 1001);

    let (status, body) = app.send("GET", "/api/orders", Some("wrong"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], 1004);

    let (status, body) = app.send("GET", "/api/orders", Some(TOKEN), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_admin_routes_open_without_configured_token() {
    let app = TestApp::new(None);
    app.submit().await;

    let (status, body) = app.send("GET", "/api/orders", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_order_lifecycle_routes() {
    let app = TestApp::new(Some(TOKEN));
    let created = app.submit().await;
    let id = created["order"]["id"].as_str().unwrap().to_string();

    let (status, body) = app
        .send(
            "PUT",
            &format!("/api/orders/{id}/payment"),
            Some(TOKEN),
            Some(json!({ "confirmed": true })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "payment_confirmed");
    assert_eq!(body["paymentConfirmed"], true);

    let (status, _) = app
        .send(
            "PUT",
            &format!("/api/orders/{id}/status"),
            Some(TOKEN),
            Some(json!({ "status": "completed" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app
        .send(
            "PUT",
            &format!("/api/orders/{id}/status"),
            Some(TOKEN),
            Some(json!({ "status": "in_production" })),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 4003);

    let (status, body) = app
        .send("GET", &format!("/api/orders/{id}"), Some(TOKEN), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "completed");

    let (status, body) = app
        .send("DELETE", &format!("/api/orders/{id}"), Some(TOKEN), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, true);

    let (status, body) = app
        .send("GET", &format!("/api/orders/{id}"), Some(TOKEN), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 4001);
}

#[tokio::test]
async fn test_delete_unknown_order_is_not_found() {
    let app = TestApp::new(Some(TOKEN));
    app.submit().await;

    let (status, body) = app
        .send("DELETE", "/api/orders/does-not-exist", Some(TOKEN), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 4001);

    let (_, body) = app.send("GET", "/api/orders", Some(TOKEN), None).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_message_templates_route() {
    let app = TestApp::new(Some(TOKEN));
    let created = app.submit().await;
    let id = created["order"]["id"].as_str().unwrap().to_string();

    let (status, body) = app
        .send(
            "GET",
            &format!("/api/orders/{id}/messages/orderReceived"),
            Some(TOKEN),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["kind"], "orderReceived");
    let text = body["text"].as_str().unwrap();
    assert!(text.contains("송하린님"));
    assert!(text.contains("합계: 40,600원"));

    let (status, body) = app
        .send(
            "GET",
            &format!("/api/orders/{id}/messages/invoice"),
            Some(TOKEN),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 5);
}

#[tokio::test]
async fn test_push_subscription_routes() {
    let app = TestApp::new(Some(TOKEN));
    let sub = json!({
        "endpoint": "https://push.example/device-1",
        "keys": { "p256dh": "pk", "auth": "ak" }
    });

    let (status, _) = app
        .send("POST", "/api/push/subscriptions", None, Some(sub.clone()))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = app
        .send("POST", "/api/push/subscriptions", Some(TOKEN), Some(sub.clone()))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, true);

    let (_, body) = app
        .send("POST", "/api/push/subscriptions", Some(TOKEN), Some(sub))
        .await;
    assert_eq!(body, false);

    let (status, body) = app
        .send(
            "POST",
            "/api/push/subscriptions",
            Some(TOKEN),
            Some(json!({ "endpoint": "ftp://nope" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["field"], "endpoint");

    let (_, body) = app
        .send("GET", "/api/push/subscriptions", Some(TOKEN), None)
        .await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["keys"]["p256dh"], "pk");

    let (_, body) = app
        .send(
            "DELETE",
            "/api/push/subscriptions",
            Some(TOKEN),
            Some(json!({ "endpoint": "https://push.example/device-1" })),
        )
        .await;
    assert_eq!(body, true);
}
