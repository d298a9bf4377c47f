//! # Calculator State
//!
//! The single-amount calculator: the raw fields the user has entered and
//! the result computed from them.
//!
//! ## Reactive Recompute
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  set_amount / set_rate / set_mode / load / clear                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  recompute()  ──►  engine::compute(input())  ──►  self.result          │
//! │                                                                         │
//! │  The cached result is never stale: every mutation that can change it   │
//! │  recomputes before returning.                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Local};
use gst_core::catalog::RateSelection;
use gst_core::engine;
use gst_core::invoice::InvoiceDetails;
use gst_core::types::coerce_decimal;
use gst_core::validation::validate_recordable_amount;
use gst_core::{CalculationSnapshot, CoreResult, Currency, TaxInput, TaxMode, TaxResult};
use serde::Serialize;

use super::ConfigState;

/// The calculator's inputs and its current result.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Calculator {
    amount: String,
    rate: RateSelection,
    mode: TaxMode,
    currency: Currency,
    description: String,
    result: TaxResult,
}

impl Calculator {
    /// Creates an empty calculator using the configured defaults.
    pub fn from_config(config: &ConfigState) -> Self {
        Calculator {
            amount: String::new(),
            rate: RateSelection::for_rate(config.default_rate),
            mode: config.tax_mode,
            currency: config.currency,
            description: String::new(),
            result: TaxResult::zero(),
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn amount(&self) -> &str {
        &self.amount
    }

    pub fn rate(&self) -> &RateSelection {
        &self.rate
    }

    pub fn mode(&self) -> TaxMode {
        self.mode
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// The result for the current inputs.
    pub fn result(&self) -> &TaxResult {
        &self.result
    }

    /// The engine input built from the current fields.
    pub fn input(&self) -> TaxInput {
        TaxInput::new(coerce_decimal(&self.amount), self.rate.rate(), self.mode)
    }

    // =========================================================================
    // Setters
    // =========================================================================

    pub fn set_amount(&mut self, raw: impl Into<String>) {
        self.amount = raw.into();
        self.recompute();
    }

    pub fn set_rate(&mut self, selection: RateSelection) {
        self.rate = selection;
        self.recompute();
    }

    pub fn set_mode(&mut self, mode: TaxMode) {
        self.mode = mode;
        self.recompute();
    }

    /// Changes the display currency. The arithmetic does not depend on it.
    pub fn set_currency(&mut self, currency: Currency) {
        self.currency = currency;
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    /// Empties the amount and description. Rate, mode and currency stay.
    pub fn clear(&mut self) {
        self.amount.clear();
        self.description.clear();
        self.recompute();
    }

    /// Restores the inputs of a recorded calculation.
    pub fn load(&mut self, snapshot: &CalculationSnapshot) {
        self.amount = snapshot.amount.normalize().to_string();
        self.rate = RateSelection::for_rate(snapshot.rate);
        self.mode = snapshot.mode;
        self.currency = snapshot.currency;
        self.description = snapshot.description.clone();
        self.recompute();
    }

    fn recompute(&mut self) {
        self.result = engine::compute(&self.input());
    }

    // =========================================================================
    // Outputs
    // =========================================================================

    /// Freezes the current calculation for history or the saved list.
    ///
    /// Fails when there is no positive amount to record.
    pub fn snapshot(&self, at: DateTime<Local>) -> CoreResult<CalculationSnapshot> {
        let amount = validate_recordable_amount(&self.amount)?;
        let input = TaxInput::new(amount, self.rate.rate(), self.mode);

        Ok(CalculationSnapshot::capture(
            input,
            self.currency,
            self.description.clone(),
            self.result,
            at,
        ))
    }

    /// Fields printed on the export text.
    pub fn invoice_details<'a>(&'a self, rate: &'a str) -> InvoiceDetails<'a> {
        InvoiceDetails {
            description: &self.description,
            amount: &self.amount,
            rate,
            mode: self.mode,
            currency: self.currency,
            result: &self.result,
        }
    }
}

impl Default for Calculator {
    fn default() -> Self {
        Calculator::from_config(&ConfigState::default())
    }
}
