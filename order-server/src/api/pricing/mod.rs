//! Pricing API 模块
//!
//! Live price preview for the order form; nothing is stored.

mod handler;

use axum::{Router, routing::post};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/price", post(handler::preview))
}
