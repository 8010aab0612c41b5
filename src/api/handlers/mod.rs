//! API request handlers.
//!
//! This module contains all HTTP request handlers organized by functionality.

use crate::types::{AppError, Result};

/// Article CRUD handlers.
pub mod articles;
/// Authentication handlers (register, login, token introspection).
pub mod auth;
/// Comment CRUD handlers.
pub mod comments;
/// Liveness endpoint.
pub mod health;

/// Parses an integer path id, reporting a non-integer as invalid input.
pub(crate) fn parse_id(raw: &str, what: &str) -> Result<i64> {
    raw.parse::<i64>()
        .map_err(|_| AppError::InvalidInput(format!("Invalid {} id", what)))
}

/// Returns the trimmed value of a required text field, rejecting absent or blank input.
pub(crate) fn required(value: Option<String>, field: &str) -> Result<String> {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(AppError::InvalidInput(format!("Missing field: {}", field))),
    }
}

/// Like [`required`] but keeps the value byte-for-byte; passwords are never trimmed.
pub(crate) fn secret(value: Option<String>) -> Result<String> {
    value
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::InvalidInput("Missing field: password".to_string()))
}
