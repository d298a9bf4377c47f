//! # Invoice Text
//!
//! Plain-text rendering of one calculation, used for both "copy" and
//! "download". Field order and labels are fixed; anything that already
//! parses this layout depends on them.
//!
//! ```text
//! GST CALCULATION DETAILS
//! Description: Teak dining table        ◄── blank line when no description
//! Amount: ₹1180
//! GST Rate: 18%
//! Tax Type: Inclusive
//! ------------------------
//! Base Amount: ₹1,000
//! GST Amount: ₹180
//! Total Amount: ₹1,180
//! ------------------------
//! Generated on: 10/18/2026, 3:04:05 PM
//! ```
//!
//! The clock is read by the caller, so rendering stays pure.

use chrono::{DateTime, Local};

use crate::types::{Currency, TaxMode, TaxResult};

const RULE: &str = "------------------------";

/// Timestamp layout of the "Generated on" line (en-US locale style).
pub const TIMESTAMP_FORMAT: &str = "%-m/%-d/%Y, %-I:%M:%S %p";

/// The fields printed on an export.
#[derive(Debug, Clone, Copy)]
pub struct InvoiceDetails<'a> {
    pub description: &'a str,
    /// Amount exactly as the user entered it.
    pub amount: &'a str,
    /// Effective rate exactly as selected or entered, without the `%`.
    pub rate: &'a str,
    pub mode: TaxMode,
    pub currency: Currency,
    pub result: &'a TaxResult,
}

/// Renders the export text.
pub fn render(details: &InvoiceDetails<'_>, generated_at: DateTime<Local>) -> String {
    let symbol = details.currency.symbol();
    let description = if details.description.is_empty() {
        String::new()
    } else {
        format!("Description: {}", details.description)
    };

    [
        "GST CALCULATION DETAILS".to_string(),
        description,
        format!("Amount: {}{}", symbol, details.amount),
        format!("GST Rate: {}%", details.rate),
        format!("Tax Type: {}", details.mode),
        RULE.to_string(),
        format!("Base Amount: {}{}", symbol, details.result.base_amount.to_locale_string()),
        format!("GST Amount: {}{}", symbol, details.result.tax_amount.to_locale_string()),
        format!("Total Amount: {}{}", symbol, details.result.total_amount.to_locale_string()),
        RULE.to_string(),
        format!("Generated on: {}", format_timestamp(generated_at)),
    ]
    .join("\n")
}

/// Formats a timestamp the way exports and listings show it.
pub fn format_timestamp(at: DateTime<Local>) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

/// Name of the downloadable artifact: `GST_Calculation_<unix millis>.txt`.
pub fn file_name(generated_at: DateTime<Local>) -> String {
    format!("GST_Calculation_{}.txt", generated_at.timestamp_millis())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::compute;
    use crate::types::TaxInput;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn at() -> DateTime<Local> {
        Local.with_ymd_and_hms(2026, 10, 18, 15, 4, 5).unwrap()
    }

    #[test]
    fn renders_full_layout() {
        let result = compute(&TaxInput::from_raw("1180", "18", TaxMode::Inclusive));
        let details = InvoiceDetails {
            description: "Teak dining table",
            amount: "1180",
            rate: "18",
            mode: TaxMode::Inclusive,
            currency: Currency::Inr,
            result: &result,
        };

        let expected = "\
GST CALCULATION DETAILS
Description: Teak dining table
Amount: ₹1180
GST Rate: 18%
Tax Type: Inclusive
------------------------
Base Amount: ₹1,000
GST Amount: ₹180
Total Amount: ₹1,180
------------------------
Generated on: 10/18/2026, 3:04:05 PM";

        assert_eq!(render(&details, at()), expected);
    }

    #[test]
    fn missing_description_leaves_blank_line() {
        let result = compute(&TaxInput::from_raw("99.5", "12.5", TaxMode::Exclusive));
        let details = InvoiceDetails {
            description: "",
            amount: "99.5",
            rate: "12.5",
            mode: TaxMode::Exclusive,
            currency: Currency::Usd,
            result: &result,
        };

        let text = render(&details, at());
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 11);
        assert_eq!(lines[1], "");
        assert_eq!(lines[2], "Amount: $99.5");
        assert_eq!(lines[6], "Base Amount: $99.5");
        assert_eq!(lines[7], "GST Amount: $12.44");
        assert_eq!(lines[8], "Total Amount: $111.94");
    }

    #[test]
    fn file_name_uses_unix_millis() {
        let name = file_name(at());

        assert_eq!(name, format!("GST_Calculation_{}.txt", at().timestamp_millis()));
        assert!(name.ends_with(".txt"));
    }
}
