//! Order API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;
use shared::models::{Order, OrderConfiguration, PaymentUpdate, PriceBreakdown, StatusUpdate};

use crate::audit_log;
use crate::core::ServerState;
use crate::orders::templates::{MessageKind, RenderedMessage, render_message};
use crate::utils::{AppError, AppResult};

#[derive(Debug, Serialize)]
pub struct OrderCreated {
    pub order: Order,
    pub breakdown: PriceBreakdown,
}

/// POST /api/orders - 提交订单
///
/// Notifications run in the background; the response does not wait.
pub async fn create(
    State(state): State<ServerState>,
    Json(config): Json<OrderConfiguration>,
) -> AppResult<Json<OrderCreated>> {
    let (order, breakdown) = state.orders.submit(&config, state.today()).await?;
    drop(state.notifier.order_created(&order));
    Ok(Json(OrderCreated { order, breakdown }))
}

/// GET /api/orders - 获取所有订单
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Order>>> {
    let orders = state.orders.get_all().await?;
    Ok(Json(orders))
}

/// GET /api/orders/{id} - 获取单个订单
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Order>> {
    let order = state.orders.get(&id).await?;
    Ok(Json(order))
}

/// PUT /api/orders/{id}/status - 更新制作状态
pub async fn update_status(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<StatusUpdate>,
) -> AppResult<Json<Order>> {
    let order = state.orders.update_status(&id, payload.status).await?;
    audit_log!("order_status_update", id, payload.status);
    Ok(Json(order))
}

/// PUT /api/orders/{id}/payment - 确认 / 取消付款
pub async fn update_payment(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<PaymentUpdate>,
) -> AppResult<Json<Order>> {
    let order = state.orders.update_payment(&id, payload.confirmed).await?;
    audit_log!("order_payment_update", id, payload.confirmed);
    Ok(Json(order))
}

/// DELETE /api/orders/{id} - 删除订单
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    state.orders.delete(&id).await?;
    audit_log!("order_delete", id);
    Ok(Json(true))
}

/// GET /api/orders/{id}/messages/{kind} - 生成顾客消息
pub async fn message(
    State(state): State<ServerState>,
    Path((id, kind)): Path<(String, String)>,
) -> AppResult<Json<RenderedMessage>> {
    let kind: MessageKind = kind.parse().map_err(AppError::invalid_request)?;
    let order = state.orders.get(&id).await?;
    let text = render_message(&order, kind, &state.message_settings());
    Ok(Json(RenderedMessage { kind, text }))
}
