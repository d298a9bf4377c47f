//! # Calculator Commands
//!
//! Commands that edit the single-amount calculator.
//!
//! ## User Workflow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  gst> amount 1180          ──► result recomputed, entry added to history│
//! │  gst> mode inclusive       ──► result recomputed                        │
//! │  gst> rate 12              ──► must be a standard rate                  │
//! │  gst> custom-rate 7.5      ──► any rate from 0 to 100                   │
//! │  gst> currency usd         ──► display only                             │
//! │  gst> desc Teak table      ──► printed on exports                       │
//! │  gst> clear                ──► amount and description emptied           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;

use chrono::Local;
use gst_core::catalog::{self, RateSelection};
use gst_core::validation::{validate_amount, validate_description, validate_rate};
use gst_core::{Currency, TaxMode, TaxRate, TaxResult};
use serde::Serialize;
use tracing::debug;

use crate::cli::CalcArgs;
use crate::error::ApiError;
use crate::state::{preset_rate, Calculator, Session};

use super::Response;

/// The calculator as shown after each command.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationView {
    pub amount: String,
    pub rate: RateSelection,
    pub effective_rate: TaxRate,
    pub mode: TaxMode,
    pub currency: Currency,
    pub description: String,
    pub result: TaxResult,
}

impl From<&Calculator> for CalculationView {
    fn from(calc: &Calculator) -> Self {
        CalculationView {
            amount: calc.amount().to_string(),
            rate: calc.rate().clone(),
            effective_rate: calc.rate().rate(),
            mode: calc.mode(),
            currency: calc.currency(),
            description: calc.description().to_string(),
            result: *calc.result(),
        }
    }
}

impl fmt::Display for CalculationView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rate_label = match &self.rate {
            RateSelection::Custom(_) => "custom".to_string(),
            RateSelection::Preset(rate) => catalog::find_preset(*rate)
                .map(|p| p.label.to_string())
                .unwrap_or_default(),
        };

        writeln!(f, "{:<14}{}", "Amount", self.amount)?;
        writeln!(f, "{:<14}{}% ({})", "GST Rate", self.rate.display_value(), rate_label)?;
        writeln!(f, "{:<14}{}", "Tax Type", self.mode)?;
        if !self.description.is_empty() {
            writeln!(f, "{:<14}{}", "Description", self.description)?;
        }
        writeln!(f, "------------------------")?;
        writeln!(f, "{:<14}{}", "Base Amount", self.currency.format(self.result.base_amount))?;
        writeln!(f, "{:<14}{}", "GST Amount", self.currency.format(self.result.tax_amount))?;
        write!(f, "{:<14}{}", "Total Amount", self.currency.format(self.result.total_amount))
    }
}

fn show_calculation(session: &Session) -> Response {
    Response::Calculation(CalculationView::from(&session.calculator))
}

/// Shows the current calculation.
pub fn show(session: &Session) -> Response {
    debug!("show command");
    show_calculation(session)
}

/// Sets the amount and records the calculation in history.
///
/// Non-positive amounts are accepted but not recorded.
pub fn set_amount(session: &mut Session, raw: &str) -> Result<Response, ApiError> {
    debug!(raw, "set_amount command");
    validate_amount(raw)?;

    session.calculator.set_amount(raw.trim());
    if let Ok(snapshot) = session.calculator.snapshot(Local::now()) {
        session.history.record(snapshot);
    }

    Ok(show_calculation(session))
}

/// Picks one of the standard rates.
pub fn select_rate(session: &mut Session, raw: &str) -> Result<Response, ApiError> {
    debug!(raw, "select_rate command");
    let rate = preset_rate(raw)?;

    session.calculator.set_rate(RateSelection::Preset(rate));
    Ok(show_calculation(session))
}

/// Enters a custom rate, kept exactly as typed.
pub fn set_custom_rate(session: &mut Session, raw: &str) -> Result<Response, ApiError> {
    debug!(raw, "set_custom_rate command");
    validate_rate(raw)?;

    session.calculator.set_rate(RateSelection::Custom(raw.trim().to_string()));
    Ok(show_calculation(session))
}

pub fn set_mode(session: &mut Session, mode: TaxMode) -> Response {
    debug!(%mode, "set_mode command");
    session.calculator.set_mode(mode);
    show_calculation(session)
}

pub fn set_currency(session: &mut Session, currency: Currency) -> Response {
    debug!(%currency, "set_currency command");
    session.calculator.set_currency(currency);
    show_calculation(session)
}

pub fn set_description(session: &mut Session, text: &str) -> Result<Response, ApiError> {
    debug!("set_description command");
    let description = validate_description(text)?;

    session.calculator.set_description(description);
    Ok(show_calculation(session))
}

/// Empties the amount and description.
pub fn clear(session: &mut Session) -> Response {
    debug!("clear command");
    session.calculator.clear();
    show_calculation(session)
}

/// Runs `gst calc`: fills the calculator from arguments in one go.
///
/// Unlike the shell's `rate`, `--rate` takes any value from 0 to 100; a
/// standard value selects its preset.
pub fn calculate(session: &mut Session, args: &CalcArgs) -> Result<Response, ApiError> {
    debug!(?args, "calculate command");
    validate_amount(&args.amount)?;

    if let Some(raw) = &args.rate {
        validate_rate(raw)?;
        let selection = match preset_rate(raw) {
            Ok(rate) => RateSelection::Preset(rate),
            Err(_) => RateSelection::Custom(raw.trim().to_string()),
        };
        session.calculator.set_rate(selection);
    }
    if let Some(mode) = args.mode {
        session.calculator.set_mode(mode);
    }
    if let Some(currency) = args.currency {
        session.calculator.set_currency(currency);
    }
    if let Some(text) = &args.description {
        session.calculator.set_description(validate_description(text)?);
    }
    session.calculator.set_amount(args.amount.trim());

    Ok(show_calculation(session))
}
