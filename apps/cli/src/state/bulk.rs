//! Bulk calculation state: an editable list of line items totalled by the
//! engine.

use std::fmt;
use std::str::FromStr;

use gst_core::catalog::{self, RATE_PRESETS};
use gst_core::engine;
use gst_core::validation::{validate_amount, validate_description};
use gst_core::{CoreError, CoreResult, LineItem, TaxMode, TaxRate, TaxResult, ValidationError};
use serde::Serialize;
use tracing::debug;

/// Editable field of a line item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineField {
    Description,
    Amount,
    Rate,
}

impl FromStr for LineField {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "description" | "desc" => Ok(LineField::Description),
            "amount" => Ok(LineField::Amount),
            "rate" => Ok(LineField::Rate),
            _ => Err(ValidationError::NotAllowed {
                field: "field".to_string(),
                allowed: vec![
                    "description".to_string(),
                    "amount".to_string(),
                    "rate".to_string(),
                ],
            }),
        }
    }
}

impl fmt::Display for LineField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LineField::Description => "description",
            LineField::Amount => "amount",
            LineField::Rate => "rate",
        })
    }
}

/// The line items of a bulk calculation.
///
/// Starts with one blank row. Rows may be removed down to none.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct BulkList {
    items: Vec<LineItem>,
}

impl BulkList {
    pub fn new() -> Self {
        BulkList {
            items: vec![LineItem::default()],
        }
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Appends a blank row at the default rate and returns its index.
    pub fn add(&mut self) -> usize {
        self.push(LineItem::default())
    }

    /// Appends a filled-in row and returns its index.
    pub fn push(&mut self, item: LineItem) -> usize {
        self.items.push(item);
        self.items.len() - 1
    }

    /// Removes the row at `index` (0-based).
    pub fn remove(&mut self, index: usize) -> CoreResult<LineItem> {
        self.check_index(index)?;
        Ok(self.items.remove(index))
    }

    /// Updates one field of the row at `index` (0-based).
    ///
    /// Amounts must not be negative; rates must be one of the standard
    /// presets.
    pub fn update(&mut self, index: usize, field: LineField, value: &str) -> CoreResult<()> {
        self.check_index(index)?;

        match field {
            LineField::Description => {
                self.items[index].description = validate_description(value)?;
            }
            LineField::Amount => {
                validate_amount(value)?;
                self.items[index].amount = value.trim().to_string();
            }
            LineField::Rate => {
                self.items[index].rate = preset_rate(value)?;
            }
        }

        debug!(index, %field, value, "line item updated");
        Ok(())
    }

    /// Per-row results; rows without an amount have none.
    pub fn results(&self, mode: TaxMode) -> Vec<Option<TaxResult>> {
        self.items
            .iter()
            .map(|item| item.input(mode).map(|input| engine::compute(&input)))
            .collect()
    }

    /// Totals across every row that has an amount.
    pub fn totals(&self, mode: TaxMode) -> TaxResult {
        let results: Vec<TaxResult> = self.results(mode).into_iter().flatten().collect();
        engine::aggregate(&results)
    }

    fn check_index(&self, index: usize) -> CoreResult<()> {
        if index >= self.items.len() {
            return Err(CoreError::LineItemOutOfRange {
                index: index + 1,
                len: self.items.len(),
            });
        }
        Ok(())
    }
}

impl Default for BulkList {
    fn default() -> Self {
        BulkList::new()
    }
}

/// Parses a rate that must match one of the standard presets.
pub(crate) fn preset_rate(raw: &str) -> CoreResult<TaxRate> {
    let rate = TaxRate::from_raw(raw);
    let valid = !raw.trim().is_empty() && catalog::find_preset(rate).is_some();

    if !valid {
        return Err(ValidationError::NotAllowed {
            field: "rate".to_string(),
            allowed: RATE_PRESETS.iter().map(|p| p.rate().to_string()).collect(),
        }
        .into());
    }
    Ok(rate)
}
