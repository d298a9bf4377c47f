//! # Star GST Terminal Library
//!
//! Core library for the `gst` terminal application.
//! This is the main entry point that parses the command line, loads the
//! configuration and runs either a one-shot command or the shell.
//!
//! ## Module Organization
//! ```text
//! gst_cli/
//! ├── lib.rs          ◄─── You are here (startup & run)
//! ├── cli.rs          ◄─── clap definitions (one-shot and shell lines)
//! ├── shell.rs        ◄─── Interactive loop and output
//! ├── sink.rs         ◄─── Clipboard and file destinations for exports
//! ├── state/
//! │   ├── mod.rs      ◄─── Session (owns everything below)
//! │   ├── calculator.rs
//! │   ├── bulk.rs
//! │   ├── history.rs
//! │   ├── saved.rs
//! │   └── config.rs   ◄─── Layered configuration
//! ├── commands/
//! │   ├── mod.rs      ◄─── Response type
//! │   ├── calc.rs     ◄─── amount / rate / mode / currency
//! │   ├── bulk.rs, history.rs, saved.rs, export.rs, catalog.rs, config.rs
//! └── error.rs        ◄─── API error type for commands
//! ```

pub mod cli;
pub mod commands;
pub mod error;
pub mod shell;
pub mod sink;
pub mod state;

use std::io::{self, IsTerminal};
use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use cli::{Cli, Command};
use commands::Response;
use error::ApiError;
use shell::ShellOptions;
use state::{ConfigState, Session};

/// Runs the application and returns the process exit status.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Application Startup                               │
/// │                                                                         │
/// │  1. Parse Command Line ───────────────────────────────────────────────► │
/// │     • clap: one-shot subcommand, or none for the shell                  │
/// │                                                                         │
/// │  2. Initialize Logging ───────────────────────────────────────────────► │
/// │     • tracing-subscriber with env filter, written to stderr             │
/// │     • Default: WARN, raised by -v, overridden with RUST_LOG             │
/// │                                                                         │
/// │  3. Load Configuration ───────────────────────────────────────────────► │
/// │     • defaults → config.toml → GST_* environment variables              │
/// │                                                                         │
/// │  4. Create Session ───────────────────────────────────────────────────► │
/// │     • Calculator starts at the configured currency, rate and mode       │
/// │                                                                         │
/// │  5. Run ──────────────────────────────────────────────────────────────► │
/// │     • one-shot: print one or more responses, exit 0 / 1                 │
/// │     • shell: loop until quit or end of input                           │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let json = cli.json;
    match execute(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            // Nothing left to report to if stderr itself is gone.
            let _ = shell::print_error(&mut io::stderr().lock(), &err, json);
            ExitCode::FAILURE
        }
    }
}

/// Executes a parsed command line.
pub fn execute(cli: Cli) -> Result<(), ApiError> {
    let config = ConfigState::load(cli.config.as_deref())?;

    let mut session = Session::new(config);
    session.config_file = cli
        .config
        .clone()
        .or_else(|| ConfigState::default_config_path().filter(|p| p.is_file()));
    debug!(config_file = ?session.config_file, "Configuration loaded");

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let json = cli.json;
    let mut emit = |response: Response| shell::print_response(&mut out, &response, json);

    match cli.command.unwrap_or(Command::Shell) {
        Command::Calc(args) => {
            emit(commands::calc::calculate(&mut session, &args)?)?;
            if args.copy {
                emit(commands::export::copy(&mut session)?)?;
            }
            if args.download {
                emit(commands::export::download(&session)?)?;
            }
        }
        Command::Bulk(args) => emit(commands::bulk::calculate(&mut session, &args)?)?,
        Command::Rates => emit(commands::catalog::rates())?,
        Command::Currencies => emit(commands::catalog::currencies())?,
        Command::Config => emit(commands::config::get_config(&session))?,
        Command::Shell => {
            let stdin = io::stdin();
            let options = ShellOptions {
                json,
                prompt: stdin.is_terminal(),
            };
            info!(store = %session.config.store_name, "Starting shell");
            shell::run(&mut session, stdin.lock(), &mut out, &mut io::stderr().lock(), options)?;
        }
    }

    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `-v` / `-vv` / `-vvv` - info / debug / trace
/// - `RUST_LOG=gst_core=trace` - Override entirely
/// - Default: WARN level
fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}
