//!
//! # Custom Error Handling
//!
//! This module defines the custom error type `AppError` used throughout the
//! application. `AppError` implements `actix_web::error::ResponseError` so
//! handler results convert straight into HTTP responses with JSON bodies,
//! and provides `From` implementations for `sqlx::Error`,
//! `validator::ValidationErrors`, and `bcrypt::BcryptError` so the `?`
//! operator works at every layer.

use actix_web::{error::ResponseError, HttpResponse};
use serde_json::{json, Value};
use std::fmt;
use validator::ValidationErrors;

/// Where validation error details point readers for the rule definitions.
const VALIDATION_HELP_URL: &str = "https://docs.rs/validator/latest/validator/";

/// Represents all possible errors that can occur within the application.
#[derive(Debug)]
pub enum AppError {
    /// A client-side error due to a malformed or invalid request (HTTP 400).
    BadRequest(String),
    /// Failed input validation (HTTP 400), carrying per-field details.
    Validation(ValidationErrors),
    /// A duplicate of an existing record, e.g. an already-registered email
    /// (HTTP 400; the API contract reports conflicts as bad requests).
    Conflict(String),
    /// Authentication failure: missing/invalid/expired token or bad
    /// credentials (HTTP 401).
    Unauthorized(String),
    /// A requested resource was not found, or is not visible to the caller
    /// (HTTP 404). Ownership mismatches answer this rather than 403 so a
    /// foreign task's existence is never revealed.
    NotFound(String),
    /// An error originating from database operations (HTTP 500).
    Database(String),
    /// An unexpected server-side error (HTTP 500).
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            AppError::Validation(errors) => write!(f, "Validation Error: {}", errors),
            AppError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            AppError::Database(msg) => write!(f, "Database Error: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal Server Error: {}", msg),
        }
    }
}

/// Flattens `ValidationErrors` into the structured detail list the API
/// returns: one entry per failed rule with the message, the offending
/// input value, the rule code, and a pointer to the rule documentation.
fn validation_details(errors: &ValidationErrors) -> Vec<Value> {
    let mut details = Vec::new();
    for (_field, field_errors) in errors.field_errors() {
        for error in field_errors {
            let message = error
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| error.code.to_string());
            let input_value = error.params.get("value").cloned().unwrap_or(Value::Null);
            details.push(json!({
                "message": message,
                "input_value": input_value,
                "type": error.code,
                "help_url": VALIDATION_HELP_URL,
            }));
        }
    }
    details
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::BadRequest(msg) => HttpResponse::BadRequest().json(json!({
                "error": msg
            })),
            AppError::Validation(errors) => HttpResponse::BadRequest().json(json!({
                "error": "Invalid input data",
                "details": validation_details(errors),
            })),
            AppError::Conflict(msg) => HttpResponse::BadRequest().json(json!({
                "error": msg
            })),
            AppError::Unauthorized(msg) => HttpResponse::Unauthorized().json(json!({
                "error": msg
            })),
            AppError::NotFound(msg) => HttpResponse::NotFound().json(json!({
                "error": msg
            })),
            // The raw message is part of the API contract for unexpected
            // store failures on the update path.
            AppError::Database(msg) => HttpResponse::InternalServerError().json(json!({
                "error": msg
            })),
            AppError::Internal(msg) => HttpResponse::InternalServerError().json(json!({
                "error": msg
            })),
        }
    }
}

/// Converts `sqlx::Error` into `AppError`.
///
/// A unique-index violation (Postgres code 23505) is the authoritative
/// duplicate-record signal and maps to `Conflict`; `RowNotFound` maps to
/// `NotFound`; everything else is a `Database` error.
impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> AppError {
        match &error {
            sqlx::Error::RowNotFound => AppError::NotFound("Record not found".into()),
            sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some("23505") => {
                AppError::Conflict("User already exists".into())
            }
            _ => AppError::Database(error.to_string()),
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> AppError {
        AppError::Validation(errors)
    }
}

/// Hashing failures are server faults, never a caller problem.
impl From<bcrypt::BcryptError> for AppError {
    fn from(error: bcrypt::BcryptError) -> AppError {
        AppError::Internal(error.to_string())
    }
}
