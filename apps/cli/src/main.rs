//! # Star GST Terminal Entry Point
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Star GST (terminal)                              │
//! │                                                                         │
//! │  $ gst calc 1180 -r 18 -m inclusive     one-shot, prints and exits      │
//! │  $ gst bulk -i Chair:100:5 -i Table:200:12                              │
//! │  $ gst                                  interactive shell               │
//! │                                                                         │
//! │  main.rs ────► hands off to gst_cli::run()                             │
//! │  lib.rs ─────► logging, config, session                                │
//! │  commands/ ──► set_amount, save, copy, download, ...                   │
//! │  gst-core ───► TaxEngine (compute, aggregate)                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::process::ExitCode;

fn main() -> ExitCode {
    // The actual setup is in lib.rs for better testability
    gst_cli::run()
}
