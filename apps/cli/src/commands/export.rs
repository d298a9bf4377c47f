//! # Export Commands
//!
//! `copy` and `download` both render the current calculation as export
//! text and hand it to a [`TextSink`].
//!
//! ```text
//! ┌──────────────┐   invoice::render   ┌──────────────────┐
//! │  Calculator  │ ──────────────────► │  export text     │
//! └──────────────┘                     └────────┬─────────┘
//!                                               │
//!                     ┌─────────────────────────┴──────────────┐
//!                     ▼                                        ▼
//!            ClipboardSink (copy)                 FileSink (download)
//!            kept in session, printed             <export_dir>/GST_Calculation_<ms>.txt
//! ```

use std::fmt;

use chrono::Local;
use gst_core::invoice;
use serde::Serialize;
use tracing::debug;

use crate::error::ApiError;
use crate::sink::{FileSink, TextSink};
use crate::state::{Calculator, Session};

use super::Response;

/// Where the export went and what it said.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportView {
    pub destination: String,
    pub file_name: String,
    pub text: String,
}

impl fmt::Display for ExportView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.destination == "clipboard" {
            write!(f, "{}\n\nCopied to clipboard", self.text)
        } else {
            write!(f, "Downloaded {}", self.destination)
        }
    }
}

/// Renders the calculator's export text and delivers it to `sink`.
pub fn deliver<S: TextSink>(calculator: &Calculator, sink: &mut S) -> Result<Response, ApiError> {
    let now = Local::now();
    let rate = calculator.rate().display_value();
    let text = invoice::render(&calculator.invoice_details(&rate), now);
    let file_name = invoice::file_name(now);

    let destination = sink.deliver(&file_name, &text).map_err(ApiError::export)?;

    Ok(Response::Exported(ExportView {
        destination,
        file_name,
        text,
    }))
}

/// Copies the export text to the session clipboard.
pub fn copy(session: &mut Session) -> Result<Response, ApiError> {
    debug!("copy command");
    deliver(&session.calculator, &mut session.clipboard)
}

/// Writes the export text to the configured export directory.
pub fn download(session: &Session) -> Result<Response, ApiError> {
    debug!(dir = %session.config.export_dir.display(), "download command");
    let mut sink = FileSink::new(&session.config.export_dir);
    deliver(&session.calculator, &mut sink)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::calc;
    use crate::error::ErrorCode;
    use crate::state::ConfigState;
    use std::fs;

    fn view(response: Response) -> ExportView {
        match response {
            Response::Exported(view) => view,
            other => panic!("unexpected response: {other:?}"),
        }
    }

    #[test]
    fn test_copy_fills_clipboard() {
        let mut session = Session::default();
        calc::set_amount(&mut session, "1180").unwrap();
        calc::set_mode(&mut session, gst_core::TaxMode::Inclusive);

        let v = view(copy(&mut session).unwrap());

        assert_eq!(v.destination, "clipboard");
        assert_eq!(session.clipboard.contents(), Some(v.text.as_str()));
        let lines: Vec<&str> = v.text.lines().collect();
        assert_eq!(lines[0], "GST CALCULATION DETAILS");
        assert_eq!(lines[1], "");
        assert_eq!(lines[2], "Amount: ₹1180");
        assert_eq!(lines[3], "GST Rate: 18%");
        assert_eq!(lines[4], "Tax Type: Inclusive");
        assert_eq!(lines[6], "Base Amount: ₹1,000");
        assert_eq!(lines[7], "GST Amount: ₹180");
        assert_eq!(lines[8], "Total Amount: ₹1,180");
    }

    #[test]
    fn test_download_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = ConfigState {
            export_dir: dir.path().to_path_buf(),
            ..ConfigState::default()
        };
        let mut session = Session::new(config);
        calc::set_amount(&mut session, "1000").unwrap();
        calc::set_custom_rate(&mut session, "7.5").unwrap();

        let v = view(download(&session).unwrap());

        assert!(v.file_name.starts_with("GST_Calculation_"));
        assert!(v.file_name.ends_with(".txt"));
        let written = fs::read_to_string(dir.path().join(&v.file_name)).unwrap();
        assert_eq!(written, v.text);
        assert!(written.contains("GST Rate: 7.5%"));
        assert!(written.contains("Total Amount: ₹1,075"));
    }

    #[test]
    fn test_download_failure_is_export_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        fs::write(&blocker, "x").unwrap();
        let config = ConfigState {
            export_dir: blocker,
            ..ConfigState::default()
        };
        let session = Session::new(config);

        let err = download(&session).unwrap_err();
        assert_eq!(err.code, ErrorCode::ExportError);
    }
}
