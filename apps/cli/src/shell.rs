//! # Interactive Shell
//!
//! Reads one command per line and runs it against a session that lives as
//! long as the shell.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Shell Loop                                       │
//! │                                                                         │
//! │  read line ──► blank or # comment? ──► skip                             │
//! │      │                                                                  │
//! │      ▼                                                                  │
//! │  ShellLine::try_parse_from(words)                                       │
//! │      │                    │                                             │
//! │      │ ok                 └── parse error / help ──► printed, continue  │
//! │      ▼                                                                  │
//! │  quit? ──► stop                                                         │
//! │      │                                                                  │
//! │      ▼                                                                  │
//! │  dispatch() ──► Ok(Response)  ──► stdout (text or JSON)                 │
//! │             └─► Err(ApiError) ──► stderr, session keeps going           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Lines are split on whitespace. Quoting is not interpreted; multi-word
//! values (descriptions, names) take the rest of the line.

use std::io::{self, BufRead, Write};

use clap::error::ErrorKind;
use clap::Parser;
use tracing::debug;

use crate::cli::{BulkAction, HistoryAction, SavedAction, ShellCommand, ShellLine};
use crate::commands::{self, Response};
use crate::error::ApiError;
use crate::state::Session;

const PROMPT: &str = "gst> ";

/// How the shell talks to the terminal.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShellOptions {
    /// Print responses and errors as JSON.
    pub json: bool,
    /// Print a banner and a prompt before each line (interactive use).
    pub prompt: bool,
}

/// Runs the shell until `quit` or end of input.
///
/// Only I/O failures on the streams themselves end the loop early. A line
/// that is not UTF-8 is reported and skipped.
pub fn run<R, W, E>(
    session: &mut Session,
    mut input: R,
    out: &mut W,
    err: &mut E,
    options: ShellOptions,
) -> io::Result<()>
where
    R: BufRead,
    W: Write,
    E: Write,
{
    if options.prompt {
        writeln!(
            out,
            "{} GST calculator. Type `help` for commands, `quit` to leave.",
            session.config.store_name
        )?;
    }

    let mut buf = Vec::new();
    loop {
        if options.prompt {
            write!(out, "{}", PROMPT)?;
            out.flush()?;
        }

        buf.clear();
        if input.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        let line = match std::str::from_utf8(&buf) {
            Ok(line) => line.trim(),
            Err(_) => {
                let e = ApiError::validation("input line is not valid UTF-8");
                print_error(err, &e, options.json)?;
                continue;
            }
        };
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let command = match ShellLine::try_parse_from(line.split_whitespace()) {
            Ok(parsed) => parsed.command,
            Err(e) => {
                match e.kind() {
                    ErrorKind::DisplayHelp | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
                        write!(out, "{}", e.render())?
                    }
                    _ => write!(err, "{}", e.render())?,
                }
                continue;
            }
        };

        if matches!(command, ShellCommand::Quit) {
            debug!("quit");
            break;
        }

        match dispatch(session, command) {
            Ok(response) => print_response(out, &response, options.json)?,
            Err(e) => print_error(err, &e, options.json)?,
        }
    }

    Ok(())
}

/// Routes one parsed shell command to its handler.
pub fn dispatch(session: &mut Session, command: ShellCommand) -> Result<Response, ApiError> {
    use commands::{bulk, calc, catalog, config, export, history, saved};

    match command {
        ShellCommand::Amount { value } => calc::set_amount(session, &value),
        ShellCommand::Rate { value } => calc::select_rate(session, &value),
        ShellCommand::CustomRate { value } => calc::set_custom_rate(session, &value),
        ShellCommand::Mode { mode } => Ok(calc::set_mode(session, mode)),
        ShellCommand::Currency { currency } => Ok(calc::set_currency(session, currency)),
        ShellCommand::Desc { words } => calc::set_description(session, &words.join(" ")),
        ShellCommand::Show => Ok(calc::show(session)),
        ShellCommand::Clear => Ok(calc::clear(session)),

        ShellCommand::History { action } => match action.unwrap_or(HistoryAction::List) {
            HistoryAction::Add => history::add(session),
            HistoryAction::List => Ok(history::list(session)),
            HistoryAction::Clear => Ok(history::clear(session)),
            HistoryAction::Load { entry } => history::load(session, entry),
        },

        ShellCommand::Save { name } => saved::save(session, &name.join(" ")),
        ShellCommand::Saved { action } => match action.unwrap_or(SavedAction::List) {
            SavedAction::List => Ok(saved::list(session)),
            SavedAction::Delete { entry } => saved::delete(session, entry),
            SavedAction::Load { entry } => saved::load(session, entry),
        },

        ShellCommand::Bulk { action } => match action.unwrap_or(BulkAction::List) {
            BulkAction::Add => Ok(bulk::add(session)),
            BulkAction::Remove { item } => bulk::remove(session, item),
            BulkAction::Set { item, field, value } => bulk::set(session, item, field, &value.join(" ")),
            BulkAction::List => Ok(bulk::list(session)),
        },

        ShellCommand::Copy => export::copy(session),
        ShellCommand::Download => export::download(session),
        ShellCommand::Rates => Ok(catalog::rates()),
        ShellCommand::Currencies => Ok(catalog::currencies()),
        ShellCommand::Config => Ok(config::get_config(session)),
        ShellCommand::Quit => Ok(Response::message("Goodbye")),
    }
}

/// Writes a response as text, or as one line of JSON.
pub fn print_response<W: Write>(out: &mut W, response: &Response, json: bool) -> io::Result<()> {
    if json {
        serde_json::to_writer(&mut *out, response)?;
        writeln!(out)
    } else {
        writeln!(out, "{}", response)
    }
}

/// Writes an error as `error: ...`, or as one line of JSON.
pub fn print_error<W: Write>(out: &mut W, error: &ApiError, json: bool) -> io::Result<()> {
    if json {
        serde_json::to_writer(&mut *out, error)?;
        writeln!(out)
    } else {
        writeln!(out, "error: {}", error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_script(session: &mut Session, script: &str, json: bool) -> (String, String) {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let options = ShellOptions { json, prompt: false };

        run(session, script.as_bytes(), &mut out, &mut err, options).unwrap();

        (String::from_utf8(out).unwrap(), String::from_utf8(err).unwrap())
    }

    #[test]
    fn test_errors_do_not_end_session() {
        let mut session = Session::default();

        let (out, err) = run_script(&mut session, "amount -5\nrate 7\namount 100\n", false);

        assert!(err.contains("error: [ValidationError] amount cannot be negative"));
        assert!(err.contains("error: [ValidationError] rate must be one of"));
        assert!(out.contains("Total Amount  ₹118.00"));
        assert_eq!(session.calculator.amount(), "100");
    }

    #[test]
    fn test_invalid_utf8_line_does_not_end_session() {
        let mut session = Session::default();
        let input: &[u8] = b"amount 100\ndesc \xff\xfe\namount 200\nshow\n";
        let mut out = Vec::new();
        let mut err = Vec::new();
        let options = ShellOptions { json: false, prompt: false };

        run(&mut session, input, &mut out, &mut err, options).unwrap();

        let err = String::from_utf8(err).unwrap();
        assert_eq!(err, "error: [ValidationError] input line is not valid UTF-8\n");
        assert_eq!(session.calculator.amount(), "200");
        assert_eq!(session.calculator.description(), "");
    }

    #[test]
    fn test_quit_stops_reading() {
        let mut session = Session::default();

        run_script(&mut session, "amount 100\nquit\namount 200\n", false);

        assert_eq!(session.calculator.amount(), "100");
    }

    #[test]
    fn test_comments_and_blank_lines_skipped() {
        let mut session = Session::default();

        let (out, err) = run_script(&mut session, "# setup\n\n   \nshow\n", false);

        assert!(err.is_empty());
        assert!(out.starts_with("Amount"));
    }

    #[test]
    fn test_unknown_command_reported() {
        let mut session = Session::default();

        let (out, err) = run_script(&mut session, "frobnicate\n", false);

        assert!(out.is_empty());
        assert!(err.contains("frobnicate"));
    }

    #[test]
    fn test_help_goes_to_stdout() {
        let mut session = Session::default();

        let (out, err) = run_script(&mut session, "help\n", false);

        assert!(err.is_empty());
        assert!(out.contains("custom-rate"));
    }

    #[test]
    fn test_json_output() {
        let mut session = Session::default();

        let (out, err) = run_script(&mut session, "amount 1000\nsaved delete 3\n", true);

        let response: serde_json::Value = serde_json::from_str(out.trim()).unwrap();
        assert_eq!(response["kind"], "calculation");
        assert_eq!(response["data"]["result"]["totalAmount"], 118000);

        let error: serde_json::Value = serde_json::from_str(err.trim()).unwrap();
        assert_eq!(error["code"], "NOT_FOUND");
    }

    #[test]
    fn test_prompt_and_banner() {
        let mut session = Session::default();
        let mut out = Vec::new();
        let mut err = Vec::new();
        let options = ShellOptions { json: false, prompt: true };

        run(&mut session, "quit\n".as_bytes(), &mut out, &mut err, options).unwrap();

        let out = String::from_utf8(out).unwrap();
        assert!(out.starts_with("Star Furniture GST calculator."));
        assert!(out.ends_with(PROMPT));
    }
}
