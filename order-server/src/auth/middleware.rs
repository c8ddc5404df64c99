//! 认证中间件
//!
//! 为管理员接口提供 Axum 中间件

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use http::Method;

use crate::core::ServerState;
use crate::security_log;
use crate::utils::AppError;

/// Routes customers call without a token
pub fn is_public_route(method: &Method, path: &str) -> bool {
    if method == Method::OPTIONS || !path.starts_with("/api/") {
        return true;
    }
    method == Method::POST && (path == "/api/orders" || path == "/api/price")
}

/// 认证中间件 - 要求管理员令牌
///
/// 从 `Authorization: Bearer <token>` 头提取令牌并与 `ADMIN_TOKEN` 比较。
/// 未配置 `ADMIN_TOKEN` 时 (开发环境) 直接放行。
///
/// # 跳过认证的路径
///
/// - `OPTIONS *` (CORS 预检)
/// - 非 `/api/` 路径
/// - `POST /api/orders`, `POST /api/price` (顾客下单)
///
/// # 错误处理
///
/// | 错误 | HTTP 状态码 |
/// |------|------------|
/// | 无 Authorization 头 | 401 NotAuthenticated |
/// | 令牌不匹配 | 401 TokenInvalid |
pub async fn require_admin(
    State(state): State<ServerState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    if is_public_route(req.method(), req.uri().path()) {
        return Ok(next.run(req).await);
    }

    let Some(expected) = state.config.admin_token.as_deref() else {
        return Ok(next.run(req).await);
    };

    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let token = match auth_header {
        Some(header) => header
            .strip_prefix("Bearer ")
            .map(str::trim)
            .ok_or_else(|| AppError::invalid_token("Invalid authorization header"))?,
        None => {
            security_log!(WARN, "auth_missing", uri = %req.uri());
            return Err(AppError::not_authenticated());
        }
    };

    if token != expected {
        security_log!(WARN, "auth_failed", method = %req.method(), uri = %req.uri());
        return Err(AppError::invalid_token("Invalid admin token"));
    }

    Ok(next.run(req).await)
}
