//! # Validation Module
//!
//! Input validation the UI layer applies before a value reaches the session.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Command parsing (clap)                                       │
//! │  ├── Argument presence and shape                                       │
//! │  └── Enum values (mode, currency)                                      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Negative amounts, out-of-range custom rates                       │
//! │  └── "Nothing to record" checks for history / saved                    │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Tax engine                                                   │
//! │  └── Accepts anything; malformed numbers become 0                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use gst_core::validation::{validate_amount, validate_rate};
//!
//! assert!(validate_amount("1180").is_ok());
//! assert!(validate_amount("-5").is_err());
//! assert!(validate_rate("28").is_ok());
//! assert!(validate_rate("140").is_err());
//! ```

use rust_decimal::Decimal;
use std::str::FromStr;

use crate::error::ValidationError;
use crate::types::coerce_decimal;
use crate::{MAX_DESCRIPTION_LEN, MAX_RATE_PERCENT};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates an amount as the user typed it.
///
/// ## Rules
/// - Empty is allowed (the calculator shows zeros)
/// - Otherwise it must be a number
/// - Must not be negative
pub fn validate_amount(raw: &str) -> ValidationResult<()> {
    let value = match parse_field("amount", raw)? {
        Some(value) => value,
        None => return Ok(()),
    };

    if value.is_sign_negative() && !value.is_zero() {
        return Err(ValidationError::Negative {
            field: "amount".to_string(),
        });
    }

    Ok(())
}

/// Validates a custom rate as the user typed it.
///
/// ## Rules
/// - Empty is allowed (counts as 0%)
/// - Otherwise a number between 0 and 100
pub fn validate_rate(raw: &str) -> ValidationResult<()> {
    let value = match parse_field("rate", raw)? {
        Some(value) => value,
        None => return Ok(()),
    };

    if value < Decimal::ZERO || value > Decimal::from(MAX_RATE_PERCENT) {
        return Err(ValidationError::OutOfRange {
            field: "rate".to_string(),
            min: 0,
            max: MAX_RATE_PERCENT,
        });
    }

    Ok(())
}

/// Validates that there is something worth recording.
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  "save" / "history add"                                                 │
/// │       │                                                                 │
/// │       ▼                                                                 │
/// │  validate_recordable_amount(amount) ← THIS FUNCTION                    │
/// │       │                                                                 │
/// │       ├── empty or ≤ 0? → Error: "amount must be positive"             │
/// │       │                                                                 │
/// │       └── OK → snapshot is recorded                                    │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn validate_recordable_amount(raw: &str) -> ValidationResult<Decimal> {
    let value = coerce_decimal(raw);
    if value <= Decimal::ZERO {
        return Err(ValidationError::MustBePositive {
            field: "amount".to_string(),
        });
    }
    Ok(value)
}

fn parse_field(field: &str, raw: &str) -> ValidationResult<Option<Decimal>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }

    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .map(Some)
        .map_err(|_| ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: "must be a number".to_string(),
        })
}

// =============================================================================
// String Validators
// =============================================================================

/// Validates a description or saved-entry name.
///
/// ## Rules
/// - Can be empty
/// - Maximum 200 characters
///
/// ## Returns
/// The trimmed text.
pub fn validate_description(text: &str) -> ValidationResult<String> {
    let text = text.trim();

    if text.chars().count() > MAX_DESCRIPTION_LEN {
        return Err(ValidationError::TooLong {
            field: "description".to_string(),
            max: MAX_DESCRIPTION_LEN,
        });
    }

    Ok(text.to_string())
}

// =============================================================================
// Unit Tests
// =============================================================================
