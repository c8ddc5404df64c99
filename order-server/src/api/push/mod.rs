//! Push subscription API 模块
//!
//! Admin devices register here to receive new-order pushes.

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route(
        "/api/push/subscriptions",
        get(handler::list)
            .post(handler::subscribe)
            .delete(handler::unsubscribe),
    )
}
