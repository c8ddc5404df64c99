//! Order API 模块
//!
//! | 路径 | 方法 | 说明 | 认证 |
//! |------|------|------|------|
//! | /api/orders | POST | 顾客下单 | 无 |
//! | /api/orders | GET | 订单列表 (最新在前) | 管理员 |
//! | /api/orders/{id} | GET / DELETE | 查询 / 删除 | 管理员 |
//! | /api/orders/{id}/status | PUT | 更新制作状态 | 管理员 |
//! | /api/orders/{id}/payment | PUT | 确认 / 取消付款 | 管理员 |
//! | /api/orders/{id}/messages/{kind} | GET | 顾客消息文本 | 管理员 |

mod handler;

use axum::{
    Router,
    routing::{get, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/orders", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/{id}", get(handler::get_by_id).delete(handler::delete))
        .route("/{id}/status", put(handler::update_status))
        .route("/{id}/payment", put(handler::update_payment))
        .route("/{id}/messages/{kind}", get(handler::message))
}
