//! Rate presets and currencies, for the pickers.

use std::fmt;

use gst_core::catalog::{self, CUSTOM_RATE_LABEL, RATE_PRESETS};
use gst_core::{Currency, TaxRate};
use serde::Serialize;
use tracing::debug;

use super::Response;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RateView {
    pub rate: TaxRate,
    pub label: String,
    pub is_default: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RatesView {
    pub presets: Vec<RateView>,
    pub custom_label: String,
}

impl fmt::Display for RatesView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for preset in &self.presets {
            let marker = if preset.is_default { "  (default)" } else { "" };
            writeln!(f, "{:>6}  {}{}", format!("{}%", preset.rate), preset.label, marker)?;
        }
        write!(f, "{:>6}  {} (custom-rate <value>)", "", self.custom_label)
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyView {
    pub code: Currency,
    pub symbol: &'static str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrenciesView {
    pub currencies: Vec<CurrencyView>,
}

impl fmt::Display for CurrenciesView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lines: Vec<String> = self
            .currencies
            .iter()
            .map(|c| format!("{}  {}", c.code, c.symbol))
            .collect();
        f.write_str(&lines.join("\n"))
    }
}

/// Lists the standard GST rates in picker order.
pub fn rates() -> Response {
    debug!("rates command");
    let default = catalog::DEFAULT_PRESET.rate();

    Response::Rates(RatesView {
        presets: RATE_PRESETS
            .iter()
            .map(|p| RateView {
                rate: p.rate(),
                label: p.label.to_string(),
                is_default: p.rate() == default,
            })
            .collect(),
        custom_label: CUSTOM_RATE_LABEL.to_string(),
    })
}

/// Lists the supported currencies.
pub fn currencies() -> Response {
    debug!("currencies command");
    Response::Currencies(CurrenciesView {
        currencies: Currency::ALL
            .into_iter()
            .map(|code| CurrencyView {
                code,
                symbol: code.symbol(),
            })
            .collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_rates_listing() {
        let text = rates().to_string();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 8);
        assert_eq!(lines[0], "    0%  Essential goods");
        assert_eq!(lines[1], " 0.25%  Rough precious stones");
        assert_eq!(lines[5], "   18%  Most goods & services  (default)");
        assert_eq!(lines[7], "        Custom Rate - Enter manually (custom-rate <value>)");
    }

    #[test]
    fn test_currencies_listing() {
        assert_eq!(currencies().to_string(), "INR  ₹\nUSD  $\nEUR  €\nGBP  £");
    }

    #[test]
    fn test_rates_json() {
        let json = serde_json::to_value(rates()).unwrap();

        assert_eq!(json["kind"], "rates");
        assert_eq!(json["data"]["presets"][1]["rate"], "0.25");
        assert_eq!(json["data"]["presets"][5]["isDefault"], true);
    }
}
