//! Pricing Module
//!
//! Menu prices and the price computation shared by the live preview
//! endpoint and order submission.

pub mod catalog;
mod engine;

pub use engine::*;
