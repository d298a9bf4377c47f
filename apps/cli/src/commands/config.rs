//! # Configuration Commands
//!
//! Shows the settings the session was started with.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;
use tracing::debug;

use crate::state::{ConfigState, Session};

use super::Response;

/// Effective configuration plus the file it may have come from.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigView {
    #[serde(flatten)]
    pub config: ConfigState,
    pub config_file: Option<PathBuf>,
}

impl fmt::Display for ConfigView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file = self
            .config_file
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(none)".to_string());

        writeln!(f, "{:<14}{}", "Store", self.config.store_name)?;
        writeln!(f, "{:<14}{}", "Currency", self.config.currency)?;
        writeln!(f, "{:<14}{}%", "Default rate", self.config.default_rate)?;
        writeln!(f, "{:<14}{}", "Tax mode", self.config.tax_mode)?;
        writeln!(f, "{:<14}{}", "Export dir", self.config.export_dir.display())?;
        write!(f, "{:<14}{}", "Config file", file)
    }
}

/// Shows the effective configuration.
pub fn get_config(session: &Session) -> Response {
    debug!("get_config command");
    Response::Config(ConfigView {
        config: session.config.clone(),
        config_file: session.config_file.clone(),
    })
}
