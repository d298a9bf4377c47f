//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    1180 / 1.18 = 999.9999999999999  ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: Decimal math, Integer storage                            │
//! │    The engine divides with rust_decimal (exact base-10),               │
//! │    rounds half-up to 2 places, then stores whole paise/cents.          │
//! │    Every TaxResult field is exact once it is Money.                    │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use gst_core::money::Money;
//!
//! let price = Money::from_minor_units(118_000); // ₹1,180.00
//! let doubled = price.checked_add(price).unwrap();
//! assert_eq!(doubled.minor_units(), 236_000);
//! assert_eq!(doubled.to_locale_string(), "2,360");
//! ```

use std::fmt;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Number of decimal places in every supported currency.
pub const MINOR_UNIT_SCALE: u32 = 2;

const MINOR_UNITS_PER_MAJOR: i64 = 100;

// =============================================================================
// Rounding
// =============================================================================

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// Values at exactly 0.005 are rounded up to 0.01 (away from zero). This is
/// the single rounding policy of the whole calculator.
///
/// ```
/// use rust_decimal_macros::dec;
/// use gst_core::money::round_half_up;
///
/// assert_eq!(round_half_up(dec!(123.454)), dec!(123.45));
/// assert_eq!(round_half_up(dec!(123.455)), dec!(123.46));
/// assert_eq!(round_half_up(dec!(-123.455)), dec!(-123.46));
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(MINOR_UNIT_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (paise for INR, cents for
/// USD/EUR, pence for GBP).
///
/// ## Design Decisions
/// - **i64 (signed)**: Negative rates under inclusive mode can produce a
///   negative tax amount, so the sign must survive
/// - **Currency-agnostic**: the symbol is attached at display time by
///   [`crate::types::Currency::format`]
///
/// ## Where Money is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  TaxInput.amount ──► engine::compute ──► TaxResult { base, tax, total } │
/// │                                              │                          │
/// │  LineItem results ──► engine::aggregate ─────┤                          │
/// │                                              ▼                          │
/// │                        Displayed as "₹1,180.00" / exported as "₹1,180"  │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from minor units.
    ///
    /// ```rust
    /// use gst_core::money::Money;
    ///
    /// let price = Money::from_minor_units(1099); // 10.99
    /// assert_eq!(price.minor_units(), 1099);
    /// ```
    #[inline]
    pub const fn from_minor_units(units: i64) -> Self {
        Money(units)
    }

    /// Rounds a decimal half-up to two places and converts it to Money.
    ///
    /// Returns `None` if the value does not fit in an `i64` count of minor
    /// units.
    ///
    /// ```rust
    /// use rust_decimal_macros::dec;
    /// use gst_core::money::Money;
    ///
    /// let money = Money::from_decimal(dec!(152.542)).unwrap();
    /// assert_eq!(money.minor_units(), 15254);
    ///
    /// let money = Money::from_decimal(dec!(0.005)).unwrap();
    /// assert_eq!(money.minor_units(), 1);
    /// ```
    pub fn from_decimal(value: Decimal) -> Option<Self> {
        let rounded = round_half_up(value);
        rounded
            .checked_mul(Decimal::from(MINOR_UNITS_PER_MAJOR))?
            .trunc()
            .to_i64()
            .map(Money)
    }

    /// Returns the value in minor units.
    #[inline]
    pub const fn minor_units(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (rupee/dollar) portion, truncated toward zero.
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / MINOR_UNITS_PER_MAJOR
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn minor_part(&self) -> i64 {
        (self.0 % MINOR_UNITS_PER_MAJOR).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Adds two values, or `None` if the sum leaves the `i64` range.
    ///
    /// ```rust
    /// use gst_core::money::Money;
    ///
    /// let a = Money::from_minor_units(1000);
    /// assert_eq!(a.checked_add(a), Some(Money::from_minor_units(2000)));
    /// assert_eq!(Money::from_minor_units(i64::MAX).checked_add(a), None);
    /// ```
    #[inline]
    pub const fn checked_add(self, other: Self) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(units) => Some(Money(units)),
            None => None,
        }
    }

    /// Returns the absolute value.
    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.saturating_abs())
    }

    /// Formats with thousands separators and exactly two decimals.
    ///
    /// ```rust
    /// use gst_core::money::Money;
    ///
    /// assert_eq!(Money::from_minor_units(118_000).to_grouped_string(), "1,180.00");
    /// assert_eq!(Money::from_minor_units(-550).to_grouped_string(), "-5.50");
    /// ```
    pub fn to_grouped_string(&self) -> String {
        format!(
            "{}{}.{:02}",
            self.sign(),
            group_thousands(self.major().unsigned_abs()),
            self.minor_part()
        )
    }

    /// Formats the way a browser's `toLocaleString()` renders a number in
    /// the en-US locale: grouped, with trailing fractional zeros dropped.
    ///
    /// ```rust
    /// use gst_core::money::Money;
    ///
    /// assert_eq!(Money::from_minor_units(118_000).to_locale_string(), "1,180");
    /// assert_eq!(Money::from_minor_units(100_050).to_locale_string(), "1,000.5");
    /// assert_eq!(Money::from_minor_units(15_254).to_locale_string(), "152.54");
    /// ```
    pub fn to_locale_string(&self) -> String {
        let whole = group_thousands(self.major().unsigned_abs());
        let minor = self.minor_part();
        if minor == 0 {
            return format!("{}{}", self.sign(), whole);
        }

        let fraction = format!("{:02}", minor);
        format!("{}{}.{}", self.sign(), whole, fraction.trim_end_matches('0'))
    }

    fn sign(&self) -> &'static str {
        if self.0 < 0 {
            "-"
        } else {
            ""
        }
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Plain two-decimal rendering without a currency symbol ("1180.00").
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}.{:02}",
            self.sign(),
            self.major().abs(),
            self.minor_part()
        )
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_from_minor_units() {
        let money = Money::from_minor_units(1099);
        assert_eq!(money.minor_units(), 1099);
        assert_eq!(money.major(), 10);
        assert_eq!(money.minor_part(), 99);
    }

    #[test]
    fn test_from_decimal_rounds_half_up() {
        assert_eq!(Money::from_decimal(dec!(10.004)).unwrap().minor_units(), 1000);
        assert_eq!(Money::from_decimal(dec!(10.005)).unwrap().minor_units(), 1001);
        assert_eq!(Money::from_decimal(dec!(-10.005)).unwrap().minor_units(), -1001);
        assert_eq!(Money::from_decimal(dec!(0)).unwrap(), Money::zero());
    }

    #[test]
    fn test_from_decimal_overflow_is_none() {
        assert!(Money::from_decimal(Decimal::MAX).is_none());
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_minor_units(1099).to_string(), "10.99");
        assert_eq!(Money::from_minor_units(500).to_string(), "5.00");
        assert_eq!(Money::from_minor_units(-550).to_string(), "-5.50");
        assert_eq!(Money::from_minor_units(-5).to_string(), "-0.05");
        assert_eq!(Money::zero().to_string(), "0.00");
    }

    #[test]
    fn test_grouped_string() {
        assert_eq!(Money::from_minor_units(0).to_grouped_string(), "0.00");
        assert_eq!(Money::from_minor_units(99_999).to_grouped_string(), "999.99");
        assert_eq!(
            Money::from_minor_units(123_456_789).to_grouped_string(),
            "1,234,567.89"
        );
    }

    #[test]
    fn test_locale_string() {
        assert_eq!(Money::zero().to_locale_string(), "0");
        assert_eq!(Money::from_minor_units(18_000).to_locale_string(), "180");
        assert_eq!(Money::from_minor_units(10).to_locale_string(), "0.1");
        assert_eq!(Money::from_minor_units(-100_050).to_locale_string(), "-1,000.5");
        assert_eq!(
            Money::from_minor_units(100_000_000).to_locale_string(),
            "1,000,000"
        );
    }

    #[test]
    fn test_checked_add() {
        let a = Money::from_minor_units(1000);
        let b = Money::from_minor_units(-1500);

        assert_eq!(a.checked_add(b), Some(Money::from_minor_units(-500)));
        assert_eq!(Money::from_minor_units(i64::MAX).checked_add(Money::from_minor_units(1)), None);
        assert_eq!(Money::from_minor_units(i64::MIN).checked_add(Money::from_minor_units(-1)), None);
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Money::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_negative());

        let negative = Money::from_minor_units(-100);
        assert!(negative.is_negative());
        assert_eq!(negative.abs().minor_units(), 100);
    }
}
