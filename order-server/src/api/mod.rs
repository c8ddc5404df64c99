//! HTTP API
//!
//! One directory per resource, each exposing `router()`.

pub mod health;
pub mod orders;
pub mod pricing;
pub mod push;

use axum::{Router, extract::DefaultBodyLimit, middleware};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;

use crate::auth::require_admin;
use crate::core::ServerState;

async fn log_request(
    request: http::Request<axum::body::Body>,
    next: middleware::Next,
) -> http::Response<axum::body::Body> {
    let method = request.method().clone();
    let uri = request.uri().clone();

    let response = next.run(request).await;

    let status = response.status();

    tracing::info!(target: "http_access", "{} {} {}", method, uri, status);

    response
}

/// Build the Axum router (without state)
pub fn routes() -> Router<ServerState> {
    Router::<ServerState>::new()
        .merge(health::router())
        .merge(pricing::router())
        .merge(orders::router())
        .merge(push::router())
}

/// Full application with auth, CORS, compression and access log
pub fn build_app(state: ServerState) -> Router {
    let body_limit = state.config.request_body_limit;
    routes()
        // require_admin 内部会跳过公共路由
        .layer(middleware::from_fn_with_state(state.clone(), require_admin))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new())
        .layer(middleware::from_fn(log_request))
}
