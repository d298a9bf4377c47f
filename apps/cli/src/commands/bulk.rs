//! # Bulk Commands
//!
//! Several line items totalled together. Every item uses the calculator's
//! tax mode; each has its own standard rate.
//!
//! ```text
//! gst> bulk set 1 desc Teak chair
//! gst> bulk set 1 amount 100
//! gst> bulk set 1 rate 5
//! gst> bulk add
//! gst> bulk set 2 amount 200
//! gst> bulk set 2 rate 12
//!
//!  #  Description           Amount      Rate    Total
//!  1  Teak chair            100         5%      ₹105.00
//!  2                        200         12%     ₹224.00
//! ------------------------
//! Tax Type      Exclusive
//! Base Amount   ₹300.00
//! GST Amount    ₹29.00
//! Total Amount  ₹329.00
//! ```

use std::fmt;

use gst_core::{Currency, TaxMode, TaxRate, TaxResult};
use serde::Serialize;
use tracing::debug;

use crate::cli::BulkArgs;
use crate::error::ApiError;
use crate::state::{BulkList, LineField, Session};

use super::Response;

/// One row as displayed, numbered from 1.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineView {
    pub number: usize,
    pub description: String,
    pub amount: String,
    pub rate: TaxRate,
    /// `None` until an amount is entered.
    pub result: Option<TaxResult>,
}

/// All rows plus their totals.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkView {
    pub mode: TaxMode,
    pub currency: Currency,
    pub items: Vec<LineView>,
    pub totals: TaxResult,
}

impl BulkView {
    fn new(bulk: &BulkList, mode: TaxMode, currency: Currency) -> Self {
        let items = bulk
            .items()
            .iter()
            .zip(bulk.results(mode))
            .enumerate()
            .map(|(i, (item, result))| LineView {
                number: i + 1,
                description: item.description.clone(),
                amount: item.amount.clone(),
                rate: item.rate,
                result,
            })
            .collect();

        BulkView {
            mode,
            currency,
            items,
            totals: bulk.totals(mode),
        }
    }
}

impl fmt::Display for BulkView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.items.is_empty() {
            writeln!(f, "No line items")?;
        } else {
            writeln!(f, "{:>2}  {:<20}  {:<10}  {:<6}  {}", "#", "Description", "Amount", "Rate", "Total")?;
            for item in &self.items {
                let total = item
                    .result
                    .map(|r| self.currency.format(r.total_amount))
                    .unwrap_or_else(|| "-".to_string());
                writeln!(
                    f,
                    "{:>2}  {:<20}  {:<10}  {:<6}  {}",
                    item.number,
                    item.description,
                    item.amount,
                    format!("{}%", item.rate),
                    total
                )?;
            }
        }

        writeln!(f, "------------------------")?;
        writeln!(f, "{:<14}{}", "Tax Type", self.mode)?;
        writeln!(f, "{:<14}{}", "Base Amount", self.currency.format(self.totals.base_amount))?;
        writeln!(f, "{:<14}{}", "GST Amount", self.currency.format(self.totals.tax_amount))?;
        write!(f, "{:<14}{}", "Total Amount", self.currency.format(self.totals.total_amount))
    }
}

fn show_bulk(session: &Session) -> Response {
    Response::Bulk(BulkView::new(
        &session.bulk,
        session.calculator.mode(),
        session.calculator.currency(),
    ))
}

/// Converts a 1-based item number to an index.
fn index_of(item: usize) -> Result<usize, ApiError> {
    item.checked_sub(1)
        .ok_or_else(|| ApiError::validation("Line items are numbered from 1"))
}

/// Shows items and totals.
pub fn list(session: &Session) -> Response {
    debug!("bulk list command");
    show_bulk(session)
}

/// Appends a blank item at 18%.
pub fn add(session: &mut Session) -> Response {
    let index = session.bulk.add();
    debug!(index, "bulk add command");
    show_bulk(session)
}

/// Removes item number `item`.
pub fn remove(session: &mut Session, item: usize) -> Result<Response, ApiError> {
    debug!(item, "bulk remove command");
    session.bulk.remove(index_of(item)?)?;
    Ok(show_bulk(session))
}

/// Sets one field of item number `item`.
pub fn set(session: &mut Session, item: usize, field: LineField, value: &str) -> Result<Response, ApiError> {
    debug!(item, %field, "bulk set command");
    session.bulk.update(index_of(item)?, field, value)?;
    Ok(show_bulk(session))
}

/// Runs `gst bulk`: replaces the line items with those given as
/// `DESCRIPTION:AMOUNT:RATE`.
///
/// The description may itself contain colons; amount and rate are taken
/// from the right.
pub fn calculate(session: &mut Session, args: &BulkArgs) -> Result<Response, ApiError> {
    debug!(count = args.items.len(), "bulk calculate command");
    if let Some(mode) = args.mode {
        session.calculator.set_mode(mode);
    }
    if let Some(currency) = args.currency {
        session.calculator.set_currency(currency);
    }

    let mut bulk = BulkList::new();
    for (i, raw) in args.items.iter().enumerate() {
        let mut parts = raw.rsplitn(3, ':');
        let (rate, amount, description) = match (parts.next(), parts.next(), parts.next()) {
            (Some(rate), Some(amount), Some(description)) => (rate, amount, description),
            _ => {
                return Err(ApiError::validation(format!(
                    "Line item '{}' must look like DESCRIPTION:AMOUNT:RATE",
                    raw
                )))
            }
        };

        let index = if i == 0 { 0 } else { bulk.add() };
        bulk.update(index, LineField::Description, description)?;
        bulk.update(index, LineField::Amount, amount)?;
        bulk.update(index, LineField::Rate, rate)?;
    }
    session.bulk = bulk;

    Ok(show_bulk(session))
}
