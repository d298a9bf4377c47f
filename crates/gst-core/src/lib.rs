//! # gst-core: Pure Business Logic for Star GST
//!
//! This crate is the **heart** of the Star GST calculator. It contains the
//! tax engine and every domain type as pure functions with zero I/O
//! dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Star GST Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Terminal UI (apps/cli)                       │   │
//! │  │    shell ──► commands ──► session state (history, saved, bulk)  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ gst-core (THIS CRATE) ★                         │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │  engine   │  │  catalog  │  │   │
//! │  │   │ TaxInput  │  │   Money   │  │  compute  │  │  presets  │  │   │
//! │  │   │ TaxResult │  │  rounding │  │ aggregate │  │ selection │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO CLOCK • NO GLOBAL STATE • PURE FUNCTIONS          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (TaxRate, TaxMode, Currency, TaxInput, TaxResult)
//! - [`money`] - Money type counted in minor units (paise, cents)
//! - [`engine`] - The tax engine: `compute` and `aggregate`
//! - [`catalog`] - Standard GST rate presets
//! - [`invoice`] - Plain-text export of one calculation
//! - [`error`] - Domain error types
//! - [`validation`] - Input checks the UI layer applies before the engine
//!
//! ## Example Usage
//!
//! ```rust
//! use gst_core::engine;
//! use gst_core::types::{TaxInput, TaxMode};
//!
//! let input = TaxInput::from_raw("1180", "18", TaxMode::Inclusive);
//! let result = engine::compute(&input);
//!
//! assert_eq!(result.base_amount.minor_units(), 100_000); // ₹1,000.00
//! assert_eq!(result.tax_amount.minor_units(), 18_000);   // ₹180.00
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod engine;
pub mod error;
pub mod invoice;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use catalog::{RatePreset, RateSelection, RATE_PRESETS};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum number of entries kept in the calculation history.
///
/// Adding one more evicts the oldest entry.
pub const MAX_HISTORY_ENTRIES: usize = 20;

/// Upper bound accepted for a user-entered rate, in percent.
pub const MAX_RATE_PERCENT: i64 = 100;

/// Maximum length of a description or saved-entry name.
pub const MAX_DESCRIPTION_LEN: usize = 200;
