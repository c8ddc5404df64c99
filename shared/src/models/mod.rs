//! Data models
//!
//! Shared between the order server and the web front-end (via API).
//! Enums stored as TEXT use `#[cfg_attr(feature = "db", derive(sqlx::Type))]`.

pub mod order;
pub mod order_config;
pub mod price;
pub mod push;

// Re-exports
pub use order::*;
pub use order_config::*;
pub use price::*;
pub use push::*;
