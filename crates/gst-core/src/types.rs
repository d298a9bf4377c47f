//! # Domain Types
//!
//! Core domain types used throughout Star GST.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    TaxInput     │   │    TaxResult    │   │    LineItem     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  amount         │   │  base_amount    │   │  description    │       │
//! │  │  rate           │   │  tax_amount     │   │  amount (raw)   │       │
//! │  │  mode           │   │  total_amount   │   │  rate           │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────────┐   │
//! │  │    TaxRate      │   │    TaxMode      │   │ CalculationSnapshot │   │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────────  │   │
//! │  │  percent (dec)  │   │  Exclusive      │   │  history & saved    │   │
//! │  │  18 = 18%       │   │  Inclusive      │   │  entries (frozen)   │   │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Local};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::catalog;
use crate::error::CoreError;
use crate::money::Money;

// =============================================================================
// Numeric Coercion
// =============================================================================

/// Parses user-entered text as a decimal, treating anything malformed as zero.
///
/// The longest leading number is used and the rest ignored, so `"1180 rupees"`
/// reads as 1180. Text with no leading number, and values too large for a
/// `Decimal`, become `0`. Scientific notation (`1e3`) is accepted.
///
/// ```rust
/// use rust_decimal::Decimal;
/// use gst_core::types::coerce_decimal;
///
/// assert_eq!(coerce_decimal(" 1180 "), Decimal::from(1180));
/// assert_eq!(coerce_decimal(""), Decimal::ZERO);
/// assert_eq!(coerce_decimal("12abc"), Decimal::from(12));
/// assert_eq!(coerce_decimal("abc12"), Decimal::ZERO);
/// ```
pub fn coerce_decimal(raw: &str) -> Decimal {
    let raw = raw.trim();
    let Some(number) = leading_number(raw) else {
        if !raw.is_empty() {
            tracing::debug!(input = raw, "non-numeric input treated as zero");
        }
        return Decimal::ZERO;
    };

    let parsed = if number.contains('e') {
        Decimal::from_scientific(&number)
    } else {
        Decimal::from_str(&number)
    };
    parsed.unwrap_or_else(|_| {
        tracing::debug!(input = raw, "out-of-range input treated as zero");
        Decimal::ZERO
    })
}

/// Reads `[+-]digits[.digits][e[+-]digits]` from the start of `raw` and
/// rewrites it in a form `Decimal` parses (`-.5e+2` becomes `-0.5e2`).
/// `None` when no digit leads.
fn leading_number(raw: &str) -> Option<String> {
    let mut chars = raw.chars().peekable();
    let mut number = String::new();

    match chars.peek() {
        Some('-') => {
            number.push('-');
            chars.next();
        }
        Some('+') => {
            chars.next();
        }
        _ => {}
    }

    let int_digits = take_digits(&mut chars);
    let mut frac_digits = String::new();
    if chars.peek() == Some(&'.') {
        chars.next();
        frac_digits = take_digits(&mut chars);
    }
    if int_digits.is_empty() && frac_digits.is_empty() {
        return None;
    }

    number.push_str(if int_digits.is_empty() { "0" } else { &int_digits });
    if !frac_digits.is_empty() {
        number.push('.');
        number.push_str(&frac_digits);
    }

    if matches!(chars.next(), Some('e' | 'E')) {
        let negative = match chars.peek() {
            Some('-') => {
                chars.next();
                true
            }
            Some('+') => {
                chars.next();
                false
            }
            _ => false,
        };
        let exponent = take_digits(&mut chars);
        if !exponent.is_empty() {
            number.push('e');
            if negative {
                number.push('-');
            }
            number.push_str(&exponent);
        }
    }

    Some(number)
}

fn take_digits(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> String {
    let mut digits = String::new();
    while let Some(c) = chars.peek().copied().filter(char::is_ascii_digit) {
        digits.push(c);
        chars.next();
    }
    digits
}

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate as a decimal percentage.
///
/// ## Why a Decimal?
/// GST slabs include fractional rates (0.25% on rough precious stones) and
/// the custom-rate field accepts two decimal places, so basis points would
/// not cover every value a user can type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(transparent)]
#[ts(export)]
pub struct TaxRate(#[ts(type = "string")] Decimal);

impl TaxRate {
    /// Creates a tax rate from a percentage.
    #[inline]
    pub const fn from_percent(percent: Decimal) -> Self {
        TaxRate(percent)
    }

    /// Creates a tax rate from basis points (25 bps = 0.25%).
    #[inline]
    pub fn from_bps(bps: u32) -> Self {
        TaxRate(Decimal::new(i64::from(bps), 2).normalize())
    }

    /// Creates a tax rate from user-entered text; malformed text is 0%.
    pub fn from_raw(raw: &str) -> Self {
        TaxRate(coerce_decimal(raw))
    }

    /// Returns the rate as a percentage (18 for 18%).
    #[inline]
    pub const fn percent(&self) -> Decimal {
        self.0
    }

    /// Zero tax rate.
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(Decimal::ZERO)
    }

    /// Checks if tax rate is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::zero()
    }
}

/// Renders without trailing zeros: `18`, `0.25`, `12.5`.
impl fmt::Display for TaxRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.normalize())
    }
}

// =============================================================================
// Tax Mode
// =============================================================================

/// How the entered amount relates to the tax.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum TaxMode {
    /// Tax is added on top of the entered amount.
    /// 1000 at 18% → 1000 + 180 = 1180
    #[default]
    Exclusive,
    /// The entered amount already contains the tax.
    /// 1180 at 18% → 1000 + 180 = 1180
    Inclusive,
}

impl TaxMode {
    /// Every mode, in display order.
    pub const ALL: [TaxMode; 2] = [TaxMode::Exclusive, TaxMode::Inclusive];

    /// Label used on screen and in exports.
    pub const fn label(&self) -> &'static str {
        match self {
            TaxMode::Exclusive => "Exclusive",
            TaxMode::Inclusive => "Inclusive",
        }
    }
}

impl fmt::Display for TaxMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TaxMode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "exclusive" | "excl" | "ex" => Ok(TaxMode::Exclusive),
            "inclusive" | "incl" | "in" => Ok(TaxMode::Inclusive),
            _ => Err(CoreError::UnknownMode(s.to_string())),
        }
    }
}

// =============================================================================
// Currency
// =============================================================================

/// Currencies the calculator can display amounts in.
///
/// The currency is presentation only; it never changes the arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// Indian Rupee
    #[default]
    Inr,
    /// US Dollar
    Usd,
    /// Euro
    Eur,
    /// British Pound
    Gbp,
}

impl Currency {
    /// Every supported currency, in display order.
    pub const ALL: [Currency; 4] = [Currency::Inr, Currency::Usd, Currency::Eur, Currency::Gbp];

    /// ISO 4217 code.
    pub const fn code(&self) -> &'static str {
        match self {
            Currency::Inr => "INR",
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Gbp => "GBP",
        }
    }

    /// Display symbol.
    pub const fn symbol(&self) -> &'static str {
        match self {
            Currency::Inr => "₹",
            Currency::Usd => "$",
            Currency::Eur => "€",
            Currency::Gbp => "£",
        }
    }

    /// Formats an amount for on-screen display: `₹1,180.00`.
    pub fn format(&self, money: Money) -> String {
        if money.is_negative() {
            format!("-{}{}", self.symbol(), money.abs().to_grouped_string())
        } else {
            format!("{}{}", self.symbol(), money.to_grouped_string())
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim();
        Currency::ALL
            .into_iter()
            .find(|c| c.code().eq_ignore_ascii_case(code))
            .ok_or_else(|| CoreError::UnknownCurrency(s.to_string()))
    }
}

// =============================================================================
// Tax Input / Result
// =============================================================================

/// Everything the engine needs for one calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct TaxInput {
    /// Entered amount (base price when exclusive, gross price when inclusive).
    #[ts(type = "string")]
    pub amount: Decimal,
    /// Rate as a percentage.
    pub rate: TaxRate,
    /// Exclusive or inclusive.
    pub mode: TaxMode,
}

impl TaxInput {
    /// Creates an input from already-parsed values.
    pub const fn new(amount: Decimal, rate: TaxRate, mode: TaxMode) -> Self {
        TaxInput { amount, rate, mode }
    }

    /// Creates an input from raw text fields, coercing malformed numbers to 0.
    pub fn from_raw(amount: &str, rate: &str, mode: TaxMode) -> Self {
        TaxInput {
            amount: coerce_decimal(amount),
            rate: TaxRate::from_raw(rate),
            mode,
        }
    }
}

/// Output of the engine. Each field is independently rounded to 2 places.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct TaxResult {
    /// Pre-tax value.
    pub base_amount: Money,
    /// Tax portion.
    pub tax_amount: Money,
    /// Base plus tax.
    pub total_amount: Money,
}

impl TaxResult {
    /// The all-zero result.
    pub const fn zero() -> Self {
        TaxResult {
            base_amount: Money::zero(),
            tax_amount: Money::zero(),
            total_amount: Money::zero(),
        }
    }

    /// Checks if every field is zero.
    pub const fn is_zero(&self) -> bool {
        self.base_amount.is_zero() && self.tax_amount.is_zero() && self.total_amount.is_zero()
    }
}

// =============================================================================
// Line Item
// =============================================================================

/// One row of a bulk calculation.
///
/// The amount is kept as entered so an untouched row can be told apart from
/// a row holding `0`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub description: String,
    pub amount: String,
    pub rate: TaxRate,
}

impl LineItem {
    /// Creates a row.
    pub fn new(description: impl Into<String>, amount: impl Into<String>, rate: TaxRate) -> Self {
        LineItem {
            description: description.into(),
            amount: amount.into(),
            rate,
        }
    }

    /// Builds the engine input for this row, or `None` if no amount was entered.
    pub fn input(&self, mode: TaxMode) -> Option<TaxInput> {
        if self.amount.trim().is_empty() {
            return None;
        }
        Some(TaxInput::new(coerce_decimal(&self.amount), self.rate, mode))
    }
}

impl Default for LineItem {
    /// A blank row at the default rate.
    fn default() -> Self {
        LineItem::new("", "", catalog::DEFAULT_PRESET.rate())
    }
}

// =============================================================================
// Calculation Snapshot
// =============================================================================

/// A frozen copy of one calculation, as kept in history and the saved list.
///
/// Uses the snapshot pattern: later edits to the calculator never change an
/// entry that has already been recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CalculationSnapshot {
    #[ts(as = "String")]
    pub id: Uuid,
    /// Display name (saved entries only).
    pub name: Option<String>,
    #[ts(type = "string")]
    pub amount: Decimal,
    pub rate: TaxRate,
    pub mode: TaxMode,
    pub currency: Currency,
    pub description: String,
    pub result: TaxResult,
    #[ts(as = "String")]
    pub timestamp: DateTime<Local>,
}

impl CalculationSnapshot {
    /// Captures a calculation with a fresh id.
    pub fn capture(
        input: TaxInput,
        currency: Currency,
        description: impl Into<String>,
        result: TaxResult,
        timestamp: DateTime<Local>,
    ) -> Self {
        CalculationSnapshot {
            id: Uuid::new_v4(),
            name: None,
            amount: input.amount,
            rate: input.rate,
            mode: input.mode,
            currency,
            description: description.into(),
            result,
            timestamp,
        }
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// The engine input this snapshot was computed from.
    pub fn input(&self) -> TaxInput {
        TaxInput::new(self.amount, self.rate, self.mode)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
