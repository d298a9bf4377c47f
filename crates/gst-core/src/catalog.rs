//! # Rate Catalog
//!
//! The standard GST slabs offered to the user, plus the custom-rate escape
//! hatch.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Rate picker                                                            │
//! │                                                                         │
//! │   0%     Essential goods                                                │
//! │   0.25%  Rough precious stones                                          │
//! │   3%     Gold, silver                                                   │
//! │   5%     Household items                                                │
//! │   12%    Processed food                                                 │
//! │   18%    Most goods & services   ◄── default                           │
//! │   28%    Luxury items                                                   │
//! │   Custom Rate - Enter manually   ◄── RateSelection::Custom             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! This is configuration data for the UI layer. The engine accepts any rate.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::types::TaxRate;

/// A standard rate with its human-readable label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RatePreset {
    bps: u32,
    /// Short description of the goods the slab applies to.
    pub label: &'static str,
}

impl RatePreset {
    const fn new(bps: u32, label: &'static str) -> Self {
        RatePreset { bps, label }
    }

    /// The preset's rate.
    pub fn rate(&self) -> TaxRate {
        TaxRate::from_bps(self.bps)
    }

    /// Picker text, e.g. `18% - Most goods & services`.
    pub fn display_label(&self) -> String {
        format!("{}% - {}", self.rate(), self.label)
    }
}

/// Standard GST rates, in picker order.
pub const RATE_PRESETS: [RatePreset; 7] = [
    RatePreset::new(0, "Essential goods"),
    RatePreset::new(25, "Rough precious stones"),
    RatePreset::new(300, "Gold, silver"),
    RatePreset::new(500, "Household items"),
    RatePreset::new(1200, "Processed food"),
    RatePreset::new(1800, "Most goods & services"),
    RatePreset::new(2800, "Luxury items"),
];

/// The preset selected when the calculator starts (18%).
pub const DEFAULT_PRESET: RatePreset = RATE_PRESETS[5];

/// Label of the custom-rate entry in the picker.
pub const CUSTOM_RATE_LABEL: &str = "Custom Rate - Enter manually";

/// Finds the preset with exactly this rate.
pub fn find_preset(rate: TaxRate) -> Option<&'static RatePreset> {
    RATE_PRESETS.iter().find(|p| p.rate() == rate)
}

/// What the rate picker currently holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum RateSelection {
    /// One of the standard slabs.
    Preset(TaxRate),
    /// A manually entered rate, kept exactly as typed.
    Custom(String),
}

impl RateSelection {
    /// Picks a preset when `rate` matches one, else a custom entry.
    pub fn for_rate(rate: TaxRate) -> Self {
        match find_preset(rate) {
            Some(preset) => RateSelection::Preset(preset.rate()),
            None => RateSelection::Custom(rate.to_string()),
        }
    }

    /// The effective rate. Malformed custom text counts as 0%.
    pub fn rate(&self) -> TaxRate {
        match self {
            RateSelection::Preset(rate) => *rate,
            RateSelection::Custom(raw) => TaxRate::from_raw(raw),
        }
    }

    /// The rate text as the user sees it: the preset value or the raw custom entry.
    pub fn display_value(&self) -> String {
        match self {
            RateSelection::Preset(rate) => rate.to_string(),
            RateSelection::Custom(raw) => raw.clone(),
        }
    }

    /// Checks if this is a custom entry.
    pub fn is_custom(&self) -> bool {
        matches!(self, RateSelection::Custom(_))
    }
}

impl Default for RateSelection {
    fn default() -> Self {
        RateSelection::Preset(DEFAULT_PRESET.rate())
    }
}
