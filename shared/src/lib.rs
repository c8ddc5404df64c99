//! Shared types for the bakery order service
//!
//! Domain models exchanged between the order server and the web front-end,
//! the unified error system, and small id/time helpers.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use axum::Json;
pub use http;
pub use serde::{Deserialize, Serialize};
