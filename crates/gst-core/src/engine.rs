//! # Tax Engine
//!
//! The two pure functions everything else is built around.
//!
//! ## Algorithm
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  EXCLUSIVE (tax on top)              INCLUSIVE (tax backed out)         │
//! │                                                                         │
//! │  base  = amount                      base  = amount / (1 + rate/100)    │
//! │  tax   = amount × rate / 100         tax   = amount − base              │
//! │  total = base + tax                  total = amount                     │
//! │                                                                         │
//! │  Then EACH field is rounded half-up to 2 places on its own.            │
//! │  base + tax may therefore differ from total by 0.01.                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Neither function can fail. A zero divisor (rate of exactly −100% in
//! inclusive mode) or an overflow is treated like any other malformed input
//! and yields the zero result.

use rust_decimal::Decimal;
use tracing::warn;

use crate::money::Money;
use crate::types::{TaxInput, TaxMode, TaxResult};

const ONE_HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Computes base, tax and total for one input.
///
/// ## Example
/// ```rust
/// use gst_core::engine::compute;
/// use gst_core::types::{TaxInput, TaxMode};
///
/// let result = compute(&TaxInput::from_raw("1000", "18", TaxMode::Exclusive));
/// assert_eq!(result.base_amount.to_string(), "1000.00");
/// assert_eq!(result.tax_amount.to_string(), "180.00");
/// assert_eq!(result.total_amount.to_string(), "1180.00");
/// ```
pub fn compute(input: &TaxInput) -> TaxResult {
    let raw = match input.mode {
        TaxMode::Exclusive => exclusive(input.amount, input.rate.percent()),
        TaxMode::Inclusive => inclusive(input.amount, input.rate.percent()),
    };

    raw.and_then(|(base, tax, total)| {
        Some(TaxResult {
            base_amount: Money::from_decimal(base)?,
            tax_amount: Money::from_decimal(tax)?,
            total_amount: Money::from_decimal(total)?,
        })
    })
    .unwrap_or_else(|| {
        warn!(
            amount = %input.amount,
            rate = %input.rate,
            mode = %input.mode,
            "calculation out of range, treating input as zero"
        );
        TaxResult::zero()
    })
}

fn exclusive(amount: Decimal, percent: Decimal) -> Option<(Decimal, Decimal, Decimal)> {
    let tax = amount.checked_mul(percent)?.checked_div(ONE_HUNDRED)?;
    let total = amount.checked_add(tax)?;
    Some((amount, tax, total))
}

fn inclusive(amount: Decimal, percent: Decimal) -> Option<(Decimal, Decimal, Decimal)> {
    let divisor = Decimal::ONE.checked_add(percent.checked_div(ONE_HUNDRED)?)?;
    if divisor.is_zero() {
        return None;
    }
    let base = amount.checked_div(divisor)?;
    let tax = amount.checked_sub(base)?;
    Some((base, tax, amount))
}

/// Sums every field across `results`. No rounding is reapplied.
///
/// A sum past the range of [`Money`] yields the zero result, as in
/// [`compute`].
///
/// ## Example
/// ```rust
/// use gst_core::engine::{aggregate, compute};
/// use gst_core::types::{TaxInput, TaxMode};
///
/// let results = [
///     compute(&TaxInput::from_raw("100", "5", TaxMode::Exclusive)),
///     compute(&TaxInput::from_raw("200", "12", TaxMode::Exclusive)),
/// ];
/// let total = aggregate(&results);
/// assert_eq!(total.tax_amount.to_string(), "29.00");
/// ```
pub fn aggregate<'a, I>(results: I) -> TaxResult
where
    I: IntoIterator<Item = &'a TaxResult>,
{
    results
        .into_iter()
        .try_fold(TaxResult::zero(), |acc, r| {
            Some(TaxResult {
                base_amount: acc.base_amount.checked_add(r.base_amount)?,
                tax_amount: acc.tax_amount.checked_add(r.tax_amount)?,
                total_amount: acc.total_amount.checked_add(r.total_amount)?,
            })
        })
        .unwrap_or_else(|| {
            warn!("totals out of range, treating them as zero");
            TaxResult::zero()
        })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::round_half_up;
    use crate::types::TaxRate;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    fn money(value: Decimal) -> Money {
        Money::from_decimal(value).unwrap()
    }

    fn decimal(money: Money) -> Decimal {
        Decimal::new(money.minor_units(), 2)
    }

    fn result(base: Decimal, tax: Decimal, total: Decimal) -> TaxResult {
        TaxResult {
            base_amount: money(base),
            tax_amount: money(tax),
            total_amount: money(total),
        }
    }

    fn input(amount: Decimal, rate: Decimal, mode: TaxMode) -> TaxInput {
        TaxInput::new(amount, TaxRate::from_percent(rate), mode)
    }

    // =========================================================================
    // compute: concrete scenarios
    // =========================================================================

    #[test]
    fn exclusive_adds_tax_on_top() {
        let got = compute(&input(dec!(1000), dec!(18), TaxMode::Exclusive));

        assert_eq!(got, result(dec!(1000.00), dec!(180.00), dec!(1180.00)));
    }

    #[test]
    fn inclusive_backs_tax_out() {
        let got = compute(&input(dec!(1180), dec!(18), TaxMode::Inclusive));

        assert_eq!(got, result(dec!(1000.00), dec!(180.00), dec!(1180.00)));
    }

    #[test]
    fn zero_amount_is_zero_for_any_rate() {
        for rate in [dec!(0), dec!(0.25), dec!(18), dec!(100)] {
            for mode in TaxMode::ALL {
                assert!(compute(&input(Decimal::ZERO, rate, mode)).is_zero());
            }
        }
    }

    #[test]
    fn malformed_input_is_treated_as_zero() {
        let got = compute(&TaxInput::from_raw("twelve", "18", TaxMode::Exclusive));
        assert!(got.is_zero());

        let got = compute(&TaxInput::from_raw("1000", "", TaxMode::Exclusive));
        assert_eq!(got, result(dec!(1000), dec!(0), dec!(1000)));
    }

    #[test]
    fn fractional_rate() {
        let got = compute(&input(dec!(10000), dec!(0.25), TaxMode::Exclusive));

        assert_eq!(got, result(dec!(10000), dec!(25), dec!(10025)));
    }

    #[test]
    fn hundred_percent_inclusive_halves_amount() {
        let got = compute(&input(dec!(500), dec!(100), TaxMode::Inclusive));

        assert_eq!(got, result(dec!(250), dec!(250), dec!(500)));
    }

    #[test]
    fn negative_rate_inclusive_is_not_rejected() {
        let got = compute(&input(dec!(100), dec!(-20), TaxMode::Inclusive));

        assert_eq!(got.base_amount, money(dec!(125)));
        assert_eq!(got.tax_amount, money(dec!(-25)));
        assert_eq!(got.total_amount, money(dec!(100)));
    }

    #[test]
    fn minus_hundred_percent_inclusive_yields_zero() {
        let got = compute(&input(dec!(100), dec!(-100), TaxMode::Inclusive));

        assert!(got.is_zero());
    }

    #[test]
    fn overflow_yields_zero() {
        let got = compute(&input(Decimal::MAX, dec!(18), TaxMode::Exclusive));

        assert!(got.is_zero());
    }

    #[test]
    fn fields_are_rounded_independently() {
        // 99.99 incl. 18%: base 84.737..., tax 15.252...
        let got = compute(&input(dec!(99.99), dec!(18), TaxMode::Inclusive));

        assert_eq!(got, result(dec!(84.74), dec!(15.25), dec!(99.99)));

        // 1.004 + 1.004 = 2.008: both parts round down, the total rounds up
        let got = compute(&input(dec!(1.004), dec!(100), TaxMode::Exclusive));
        assert_eq!(got, result(dec!(1.00), dec!(1.00), dec!(2.01)));
    }

    #[test]
    fn midpoint_rounds_up() {
        // 0.05 × 10% = 0.005 → 0.01
        let got = compute(&input(dec!(0.05), dec!(10), TaxMode::Exclusive));

        assert_eq!(got.tax_amount, money(dec!(0.01)));
        assert_eq!(got.total_amount, money(dec!(0.06)));
    }

    // =========================================================================
    // compute: properties over a grid of amounts and rates
    // =========================================================================

    fn amounts() -> Vec<Decimal> {
        vec![
            dec!(0.01),
            dec!(1),
            dec!(9.99),
            dec!(99.995),
            dec!(1234.56),
            dec!(49999.5),
            dec!(1000000),
        ]
    }

    fn rates() -> Vec<Decimal> {
        vec![dec!(0), dec!(0.25), dec!(3), dec!(5), dec!(12), dec!(18), dec!(28), dec!(7.75)]
    }

    #[test]
    fn exclusive_total_matches_rounded_formula() {
        for a in amounts() {
            for r in rates() {
                let got = compute(&input(a, r, TaxMode::Exclusive));
                let expected = round_half_up(a + a * r / dec!(100));
                assert_eq!(decimal(got.total_amount), expected, "amount={a} rate={r}");
            }
        }
    }

    #[test]
    fn inclusive_base_and_total_match_rounded_formula() {
        for a in amounts() {
            for r in rates() {
                let got = compute(&input(a, r, TaxMode::Inclusive));
                let expected_base = round_half_up(a / (dec!(1) + r / dec!(100)));
                assert_eq!(decimal(got.base_amount), expected_base, "amount={a} rate={r}");
                assert_eq!(decimal(got.total_amount), round_half_up(a), "amount={a} rate={r}");
            }
        }
    }

    #[test]
    fn total_is_base_plus_tax_within_a_cent() {
        for a in amounts() {
            for r in rates() {
                for mode in TaxMode::ALL {
                    let got = compute(&input(a, r, mode));
                    let drift = got.base_amount.minor_units() + got.tax_amount.minor_units()
                        - got.total_amount.minor_units();
                    assert!(drift.abs() <= 1, "amount={a} rate={r} mode={mode}");
                }
            }
        }
    }

    #[test]
    fn exclusive_then_inclusive_recovers_base() {
        for b in amounts() {
            for r in rates() {
                let forward = compute(&input(b, r, TaxMode::Exclusive));
                let back = compute(&input(decimal(forward.total_amount), r, TaxMode::Inclusive));
                let diff = (decimal(back.base_amount) - b).abs();
                assert!(diff <= dec!(0.02), "base={b} rate={r} recovered={}", back.base_amount);
            }
        }
    }

    // =========================================================================
    // aggregate
    // =========================================================================

    #[test]
    fn aggregate_of_nothing_is_zero() {
        let empty: [TaxResult; 0] = [];

        assert_eq!(aggregate(&empty), TaxResult::zero());
    }

    #[test]
    fn aggregate_sums_componentwise() {
        let r1 = result(dec!(10.01), dec!(1.80), dec!(11.81));
        let r2 = result(dec!(5.50), dec!(0.28), dec!(5.77));

        assert_eq!(aggregate([&r1, &r2]), result(dec!(15.51), dec!(2.08), dec!(17.58)));
    }

    #[test]
    fn bulk_scenario() {
        let results = [
            compute(&input(dec!(100), dec!(5), TaxMode::Exclusive)),
            compute(&input(dec!(200), dec!(12), TaxMode::Exclusive)),
        ];

        assert_eq!(aggregate(&results), result(dec!(300.00), dec!(29.00), dec!(329.00)));
    }

    #[test]
    fn aggregate_overflow_yields_zero() {
        // Each row fits in Money; their sum does not.
        let row = compute(&input(dec!(50000000000000000), dec!(0), TaxMode::Exclusive));
        assert!(!row.is_zero());

        assert!(aggregate([&row, &row]).is_zero());
    }

    #[test]
    fn aggregate_of_negative_taxes() {
        let r1 = compute(&input(dec!(100), dec!(-20), TaxMode::Inclusive));
        let r2 = compute(&input(dec!(100), dec!(-20), TaxMode::Inclusive));

        assert_eq!(aggregate([&r1, &r2]), result(dec!(250), dec!(-50), dec!(200)));
    }
}
