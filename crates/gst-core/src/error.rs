//! # Error Types
//!
//! Domain-specific error types for gst-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  gst-core errors (this file)                                           │
//! │  ├── CoreError        - Session/domain failures                        │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  CLI errors (apps/cli)                                                 │
//! │  └── ApiError         - What the terminal user sees                    │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → stderr                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The tax engine itself never returns an error. Malformed numbers are
//! coerced to zero, so these types only describe what the UI layer rejects.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core domain errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A history or saved entry could not be found.
    ///
    /// ## When This Occurs
    /// - Deleting a saved calculation that was already deleted
    /// - Loading a history position past the end of the list
    #[error("{kind} entry not found: {reference}")]
    EntryNotFound { kind: String, reference: String },

    /// A bulk line item index is past the end of the list.
    #[error("Line item {index} does not exist (list has {len} items)")]
    LineItemOutOfRange { index: usize, len: usize },

    /// Currency code is not one of the supported set.
    #[error("Unknown currency: {0}")]
    UnknownCurrency(String),

    /// Tax mode is neither exclusive nor inclusive.
    #[error("Unknown tax mode: {0}")]
    UnknownMode(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These occur when user input doesn't meet requirements. Used for early
/// validation before the session records a calculation.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must not be negative.
    #[error("{field} cannot be negative")]
    Negative { field: String },

    /// Invalid format (e.g., not a number).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
