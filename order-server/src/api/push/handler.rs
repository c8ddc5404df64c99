//! Push subscription API Handlers

use axum::{Json, extract::State};
use shared::models::{PushSubscription, UnsubscribeRequest};

use crate::audit_log;
use crate::core::ServerState;
use crate::utils::validation::{MAX_URL_LEN, validate_required_text};
use crate::utils::{AppError, AppResult, ErrorCode};

/// GET /api/push/subscriptions - 列出订阅
pub async fn list(State(state): State<ServerState>) -> Json<Vec<PushSubscription>> {
    Json(state.notifier.subscribers().list())
}

/// POST /api/push/subscriptions - 注册订阅
///
/// Returns false when the endpoint was already registered (keys replaced).
pub async fn subscribe(
    State(state): State<ServerState>,
    Json(subscription): Json<PushSubscription>,
) -> AppResult<Json<bool>> {
    validate_required_text(&subscription.endpoint, "endpoint", MAX_URL_LEN)?;
    if !subscription.endpoint.starts_with("https://") && !subscription.endpoint.starts_with("http://") {
        return Err(AppError::invalid_field(
            ErrorCode::InvalidFormat,
            "endpoint",
            "Push endpoint must be an http(s) URL",
        ));
    }
    let endpoint = subscription.endpoint.clone();
    let added = state.notifier.subscribers().add(subscription);
    audit_log!("push_subscribe", endpoint);
    Ok(Json(added))
}

/// DELETE /api/push/subscriptions - 取消订阅
pub async fn unsubscribe(
    State(state): State<ServerState>,
    Json(payload): Json<UnsubscribeRequest>,
) -> AppResult<Json<bool>> {
    let removed = state.notifier.subscribers().remove(&payload.endpoint);
    audit_log!("push_unsubscribe", payload.endpoint);
    Ok(Json(removed))
}
