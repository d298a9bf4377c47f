//! # Configuration State
//!
//! Stores the settings the calculator starts from.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`GST_*`)
//! 2. Config file (`config.toml`)
//! 3. Defaults (this file)
//!
//! ```toml
//! # ~/.config/gst/config.toml (Linux)
//! store_name = "Star Furniture"
//! currency = "INR"          # INR | USD | EUR | GBP
//! default_rate = 18         # percent, 0..=100
//! tax_mode = "exclusive"    # exclusive | inclusive
//! export_dir = "/home/me/Downloads"
//! ```
//!
//! Configuration is read once at startup and is read-only afterwards.

use std::path::{Path, PathBuf};

use ::config::{Config, Environment, File, FileFormat};
use directories::{ProjectDirs, UserDirs};
use gst_core::{Currency, TaxMode, TaxRate, MAX_RATE_PERCENT};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Prefix of the environment variables that override the config file.
pub const ENV_PREFIX: &str = "GST";

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct ConfigState {
    /// Store name (shown in the shell banner)
    pub store_name: String,

    /// Currency the calculator starts in
    pub currency: Currency,

    /// Rate the calculator starts at, in percent
    pub default_rate: TaxRate,

    /// Mode the calculator starts in
    pub tax_mode: TaxMode,

    /// Where `download` writes export files
    pub export_dir: PathBuf,
}

impl Default for ConfigState {
    /// ## Default Values
    /// - Store: "Star Furniture"
    /// - Currency: INR (₹)
    /// - Tax: 18% exclusive
    /// - Exports: the user's downloads folder, else the working directory
    fn default() -> Self {
        ConfigState {
            store_name: "Star Furniture".to_string(),
            currency: Currency::Inr,
            default_rate: TaxRate::from_bps(1800),
            tax_mode: TaxMode::Exclusive,
            export_dir: default_export_dir(),
        }
    }
}

impl ConfigState {
    /// Loads configuration from defaults, the config file and `GST_*`
    /// environment variables.
    ///
    /// An explicit `path` must exist. Without one, the platform config
    /// file is used when present.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        ConfigState::load_with(path, Environment::with_prefix(ENV_PREFIX))
    }

    fn load_with(path: Option<&Path>, env: Environment) -> Result<Self, ConfigError> {
        let defaults = ConfigState::default();

        let mut builder = Config::builder()
            .set_default("store_name", defaults.store_name.as_str())?
            .set_default("currency", defaults.currency.code())?
            .set_default("default_rate", defaults.default_rate.to_string())?
            .set_default("tax_mode", "exclusive")?
            .set_default("export_dir", defaults.export_dir.to_string_lossy().into_owned())?;

        let file = match path {
            Some(path) => Some((path.to_path_buf(), true)),
            None => ConfigState::default_config_path().map(|p| (p, false)),
        };
        if let Some((file, required)) = file {
            debug!(path = %file.display(), required, "Reading config file");
            builder = builder.add_source(
                File::from(file.as_path())
                    .format(FileFormat::Toml)
                    .required(required),
            );
        }

        let config: ConfigState = builder.add_source(env).build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "starfurniture", "gst").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let percent = self.default_rate.percent();
        if percent < Decimal::ZERO || percent > Decimal::from(MAX_RATE_PERCENT) {
            return Err(ConfigError::InvalidValue {
                key: "default_rate".to_string(),
                reason: format!("{} is outside 0..={}", self.default_rate, MAX_RATE_PERCENT),
            });
        }
        if self.store_name.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "store_name".to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

fn default_export_dir() -> PathBuf {
    UserDirs::new()
        .and_then(|dirs| dirs.download_dir().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] ::config::ConfigError),

    #[error("Invalid value for {key}: {reason}")]
    InvalidValue { key: String, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::fs;

    fn env(vars: &[(&str, &str)]) -> Environment {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Environment::with_prefix(ENV_PREFIX).source(Some(map))
    }

    fn write_config(contents: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, contents).unwrap();
        (dir, path)
    }

    #[test]
    fn test_defaults() {
        let config = ConfigState::default();

        assert_eq!(config.store_name, "Star Furniture");
        assert_eq!(config.currency, Currency::Inr);
        assert_eq!(config.default_rate, TaxRate::from_bps(1800));
        assert_eq!(config.tax_mode, TaxMode::Exclusive);
    }

    #[test]
    fn test_file_overrides_defaults() {
        let (_dir, path) = write_config(
            r#"
store_name = "Star Furniture Pune"
currency = "USD"
default_rate = 12
"#,
        );

        let config = ConfigState::load_with(Some(&path), env(&[])).unwrap();

        assert_eq!(config.store_name, "Star Furniture Pune");
        assert_eq!(config.currency, Currency::Usd);
        assert_eq!(config.default_rate, TaxRate::from_bps(1200));
        assert_eq!(config.tax_mode, TaxMode::Exclusive);
    }

    #[test]
    fn test_env_overrides_file() {
        let (_dir, path) = write_config("tax_mode = \"exclusive\"\ncurrency = \"USD\"\n");

        let config = ConfigState::load_with(
            Some(&path),
            env(&[("GST_TAX_MODE", "inclusive"), ("GST_DEFAULT_RATE", "0.25")]),
        )
        .unwrap();

        assert_eq!(config.tax_mode, TaxMode::Inclusive);
        assert_eq!(config.default_rate, TaxRate::from_bps(25));
        assert_eq!(config.currency, Currency::Usd);
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.toml");

        let err = ConfigState::load_with(Some(&path), env(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::Load(_)));
    }

    #[test]
    fn test_rate_out_of_range_rejected() {
        let (_dir, path) = write_config("default_rate = 140\n");

        let err = ConfigState::load_with(Some(&path), env(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "default_rate"));
    }

    #[test]
    fn test_unknown_currency_rejected() {
        let (_dir, path) = write_config("currency = \"JPY\"\n");

        assert!(ConfigState::load_with(Some(&path), env(&[])).is_err());
    }

    #[test]
    fn test_serializes_camel_case() {
        let json = serde_json::to_value(ConfigState::default()).unwrap();

        assert_eq!(json["storeName"], "Star Furniture");
        assert_eq!(json["currency"], "INR");
        assert_eq!(json["defaultRate"], "18");
        assert_eq!(json["taxMode"], "exclusive");
    }
}
