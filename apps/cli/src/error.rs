//! # API Error Type
//!
//! Unified error type for every command.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Star GST                               │
//! │                                                                         │
//! │  Shell / one-shot                  Command layer                        │
//! │  ────────────────                  ─────────────                        │
//! │                                                                         │
//! │  "saved delete 7"                                                       │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<Response, ApiError>                                      │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Bad input? ──── CoreError::Validation(..) ───────┐             │  │
//! │  │         │                                          │             │  │
//! │  │         ▼                                          ▼             │  │
//! │  │  No such entry? ── CoreError::EntryNotFound ──── ApiError ──────►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  shell:    "error: [NotFound] Saved entry not found: #7"  (keeps going) │
//! │  one-shot: same message on stderr, exit status 1                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! With `--json` the error is printed as `{"code":"NOT_FOUND","message":..}`.

use std::io;

use gst_core::{CoreError, ValidationError};
use serde::Serialize;

use crate::state::ConfigError;

/// Error returned from commands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for command responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// History or saved entry does not exist
    NotFound,

    /// Input validation failed
    ValidationError,

    /// The request is well-formed but cannot be carried out
    BusinessLogic,

    /// Writing export text failed
    ExportError,

    /// Configuration could not be loaded
    ConfigError,

    /// Anything else
    Internal,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} entry not found: {}", resource, id))
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates a business logic error.
    pub fn business(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::BusinessLogic, message)
    }

    /// Creates an export error.
    pub fn export(err: io::Error) -> Self {
        tracing::error!("Export failed: {}", err);
        ApiError::new(ErrorCode::ExportError, format!("Export failed: {}", err))
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::EntryNotFound { kind, reference } => ApiError::not_found(&kind, &reference),
            CoreError::LineItemOutOfRange { .. } => ApiError::new(ErrorCode::NotFound, err.to_string()),
            CoreError::UnknownCurrency(_) | CoreError::UnknownMode(_) => {
                ApiError::validation(err.to_string())
            }
            CoreError::Validation(e) => ApiError::from(e),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        ApiError::new(ErrorCode::ConfigError, err.to_string())
    }
}

/// Failures writing to the terminal.
impl From<io::Error> for ApiError {
    fn from(err: io::Error) -> Self {
        ApiError::internal(err.to_string())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}
