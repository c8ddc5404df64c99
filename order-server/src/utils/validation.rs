//! Input validation helpers
//!
//! Centralized text length constants and validation functions.
//! Every helper reports the offending input as a `field` detail.

use shared::error::{AppError, ErrorCode};

// ── Text length limits ──────────────────────────────────────────────

/// Customer names, cookie type names
pub const MAX_NAME_LEN: usize = 200;

/// Heart messages, notes
pub const MAX_NOTE_LEN: usize = 500;

/// Short identifiers: phone numbers, time slots
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

/// Delivery addresses
pub const MAX_ADDRESS_LEN: usize = 500;

/// Push subscription endpoints
pub const MAX_URL_LEN: usize = 2048;

// ── Quantity limits ─────────────────────────────────────────────────

/// Upper bound for any single quantity or box count
pub const MAX_QUANTITY: i64 = 1_000;

// ── Validation helpers ──────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty"))
            .with_detail("field", field));
    }
    check_len(value, field, max_len)
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if let Some(v) = value {
        check_len(v, field, max_len)?;
    }
    Ok(())
}

/// Validate that a quantity lies in `min..=max`.
pub fn validate_quantity(value: i64, field: &str, min: i64, max: i64) -> Result<(), AppError> {
    if value < min || value > max {
        return Err(AppError::invalid_field(
            ErrorCode::ValueOutOfRange,
            field,
            format!("{field} must be between {min} and {max} (got {value})"),
        ));
    }
    Ok(())
}

fn check_len(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    let len = value.chars().count();
    if len > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({len} chars, max {max_len})"
        ))
        .with_detail("field", field));
    }
    Ok(())
}
