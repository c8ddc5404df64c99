//! Orders
//!
//! Validation, normalization into line items, storage and lifecycle.

pub mod normalizer;
pub mod service;
pub mod store;
pub mod templates;
pub mod validation;

pub use service::{OrderService, apply_payment};
pub use store::{MemoryOrderStore, OrderStore, SqliteOrderStore};
