//! # Commands Module
//!
//! Every operation the shell and the one-shot subcommands can run.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (Response type, exports)
//! ├── calc.rs     ◄─── Single calculator: amount, rate, mode, currency
//! ├── bulk.rs     ◄─── Line items and their totals
//! ├── history.rs  ◄─── Recent calculations (newest 20)
//! ├── saved.rs    ◄─── Named calculations
//! ├── export.rs   ◄─── copy / download of the export text
//! ├── catalog.rs  ◄─── Rate presets and currencies
//! └── config.rs   ◄─── Effective configuration
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  gst> amount 1180                                                       │
//! │         │                                                               │
//! │         │ (clap parses the line into ShellCommand::Amount)              │
//! │         ▼                                                               │
//! │  fn set_amount(                                                         │
//! │      session: &mut Session,   ◄── Owned by the shell loop              │
//! │      raw: &str,               ◄── From the command line                │
//! │  ) -> Result<Response, ApiError>                                        │
//! │         │                                                               │
//! │         │ (Display, or JSON with --json)                                │
//! │         ▼                                                               │
//! │  stdout: Base Amount ₹1,000.00 ...                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod bulk;
pub mod calc;
pub mod catalog;
pub mod config;
pub mod export;
pub mod history;
pub mod saved;

use std::fmt;

use gst_core::money::Money;
use gst_core::CalculationSnapshot;
use serde::Serialize;

use self::bulk::BulkView;
use self::calc::CalculationView;
use self::catalog::{CurrenciesView, RatesView};
use self::config::ConfigView;
use self::export::ExportView;

/// What a command hands back for printing.
///
/// ## Serialization
/// With `--json` each response is one line:
/// ```json
/// {"kind":"calculation","data":{"amount":"1180","mode":"inclusive",...}}
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", content = "data", rename_all = "camelCase")]
pub enum Response {
    Calculation(CalculationView),
    Bulk(BulkView),
    Entries(EntriesView),
    Entry(EntryView),
    Exported(ExportView),
    Rates(RatesView),
    Currencies(CurrenciesView),
    Config(ConfigView),
    Message(String),
}

impl Response {
    pub fn message(text: impl Into<String>) -> Self {
        Response::Message(text.into())
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Response::Calculation(view) => view.fmt(f),
            Response::Bulk(view) => view.fmt(f),
            Response::Entries(view) => view.fmt(f),
            Response::Entry(view) => view.fmt(f),
            Response::Exported(view) => view.fmt(f),
            Response::Rates(view) => view.fmt(f),
            Response::Currencies(view) => view.fmt(f),
            Response::Config(view) => view.fmt(f),
            Response::Message(text) => f.write_str(text),
        }
    }
}

// =============================================================================
// History / Saved Views
// =============================================================================

/// Which list an entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum EntryKind {
    History,
    Saved,
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            EntryKind::History => "History",
            EntryKind::Saved => "Saved",
        })
    }
}

/// A whole history or saved listing.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntriesView {
    pub kind: EntryKind,
    pub entries: Vec<CalculationSnapshot>,
}

impl fmt::Display for EntriesView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.entries.is_empty() {
            return match self.kind {
                EntryKind::History => f.write_str("No calculations yet"),
                EntryKind::Saved => f.write_str("No saved calculations"),
            };
        }

        for (i, entry) in self.entries.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{:>2}. {}", i + 1, entry_summary(self.kind, entry))?;
        }
        Ok(())
    }
}

/// What happened to a single entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum EntryAction {
    Added,
    Deleted,
}

/// One entry that was just added or deleted.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryView {
    pub kind: EntryKind,
    pub action: EntryAction,
    pub entry: CalculationSnapshot,
}

impl fmt::Display for EntryView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = match (self.kind, self.action) {
            (EntryKind::History, EntryAction::Added) => "Added to history",
            (EntryKind::History, EntryAction::Deleted) => "Removed from history",
            (EntryKind::Saved, EntryAction::Added) => "Saved",
            (EntryKind::Saved, EntryAction::Deleted) => "Deleted",
        };
        write!(f, "{}: {}", verb, entry_summary(self.kind, &self.entry))
    }
}

/// One-line summary: `Sofa set | Amount: ₹1,180 | GST: 18% | Total: ₹1,180 | <time> | <id>`.
fn entry_summary(kind: EntryKind, entry: &CalculationSnapshot) -> String {
    let title = match kind {
        EntryKind::Saved => entry.name.as_deref().unwrap_or("Unnamed calculation"),
        EntryKind::History if entry.description.is_empty() => "Unnamed calculation",
        EntryKind::History => entry.description.as_str(),
    };
    let symbol = entry.currency.symbol();
    let amount = Money::from_decimal(entry.amount)
        .map(|m| m.to_locale_string())
        .unwrap_or_else(|| entry.amount.to_string());

    format!(
        "{} | Amount: {}{} | GST: {}% | {} | Total: {}{} | {} | {}",
        title,
        symbol,
        amount,
        entry.rate,
        entry.mode,
        symbol,
        entry.result.total_amount.to_locale_string(),
        gst_core::invoice::format_timestamp(entry.timestamp),
        entry.id,
    )
}
