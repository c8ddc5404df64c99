//! 管理员认证
//!
//! Admin routes are guarded by a shared bearer token (`ADMIN_TOKEN`).

mod middleware;

pub use middleware::{is_public_route, require_admin};
