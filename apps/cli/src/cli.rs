//! # Command Line Definitions
//!
//! Two grammars share the same clap derive style:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  $ gst calc 1180 --rate 18 --mode inclusive     ◄── Cli (one-shot)      │
//! │  $ gst bulk -i "Chair:100:5" -i "Table:200:12"                          │
//! │  $ gst                                          ◄── Cli, no subcommand  │
//! │  gst> amount 1180                               ◄── ShellLine           │
//! │  gst> saved delete 2                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use gst_core::{Currency, TaxMode};

use crate::state::{EntryRef, LineField};

// =============================================================================
// One-shot Command Line
// =============================================================================

/// GST calculator for furniture retailers.
#[derive(Debug, Parser)]
#[command(name = "gst", version, about)]
pub struct Cli {
    /// Path to config.toml (defaults to the platform config directory)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Print responses as JSON, one object per line
    #[arg(long, global = true)]
    pub json: bool,

    /// More log output on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Calculate GST on a single amount
    Calc(CalcArgs),
    /// Calculate and total several line items
    Bulk(BulkArgs),
    /// List the standard GST rates
    Rates,
    /// List the supported currencies
    Currencies,
    /// Show the effective configuration
    Config,
    /// Start an interactive session (the default)
    Shell,
}

#[derive(Debug, Clone, Args)]
pub struct CalcArgs {
    /// Amount to calculate on
    #[arg(allow_hyphen_values = true)]
    pub amount: String,

    /// GST rate in percent (standard or custom, 0 to 100)
    #[arg(short, long)]
    pub rate: Option<String>,

    /// exclusive (tax on top) or inclusive (tax already in the amount)
    #[arg(short, long)]
    pub mode: Option<TaxMode>,

    /// INR, USD, EUR or GBP
    #[arg(short, long)]
    pub currency: Option<Currency>,

    /// Description printed on the export
    #[arg(short, long)]
    pub description: Option<String>,

    /// Print the export text
    #[arg(long)]
    pub copy: bool,

    /// Write the export text to the export directory
    #[arg(long)]
    pub download: bool,
}

#[derive(Debug, Clone, Args)]
pub struct BulkArgs {
    /// Line item as DESCRIPTION:AMOUNT:RATE (rate must be a standard rate)
    #[arg(short, long = "item", value_name = "DESC:AMOUNT:RATE", required = true)]
    pub items: Vec<String>,

    /// exclusive or inclusive, applied to every item
    #[arg(short, long)]
    pub mode: Option<TaxMode>,

    /// INR, USD, EUR or GBP
    #[arg(short, long)]
    pub currency: Option<Currency>,
}

// =============================================================================
// Shell Lines
// =============================================================================

/// One line typed at the `gst>` prompt.
#[derive(Debug, Parser)]
#[command(
    name = "gst>",
    no_binary_name = true,
    disable_version_flag = true,
    help_template = "{all-args}"
)]
pub struct ShellLine {
    #[command(subcommand)]
    pub command: ShellCommand,
}

#[derive(Debug, Subcommand)]
pub enum ShellCommand {
    /// Set the amount (recorded in history when positive)
    Amount {
        #[arg(allow_hyphen_values = true)]
        value: String,
    },
    /// Pick a standard GST rate
    Rate { value: String },
    /// Enter a custom GST rate (0 to 100)
    #[command(name = "custom-rate")]
    CustomRate { value: String },
    /// exclusive or inclusive
    Mode { mode: TaxMode },
    /// INR, USD, EUR or GBP
    Currency { currency: Currency },
    /// Set the description (no words clears it)
    Desc {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        words: Vec<String>,
    },
    /// Show the current calculation
    Show,
    /// Clear the amount and description
    Clear,
    /// Calculation history (newest first)
    History {
        #[command(subcommand)]
        action: Option<HistoryAction>,
    },
    /// Save the current calculation
    Save {
        /// Name for the entry (defaults to the description)
        #[arg(trailing_var_arg = true)]
        name: Vec<String>,
    },
    /// Saved calculations
    Saved {
        #[command(subcommand)]
        action: Option<SavedAction>,
    },
    /// Bulk line items
    Bulk {
        #[command(subcommand)]
        action: Option<BulkAction>,
    },
    /// Copy the export text
    Copy,
    /// Write the export text to a file
    Download,
    /// List the standard GST rates
    Rates,
    /// List the supported currencies
    Currencies,
    /// Show the effective configuration
    Config,
    /// Leave the shell
    #[command(alias = "exit")]
    Quit,
}

#[derive(Debug, Subcommand)]
pub enum HistoryAction {
    /// Record the current calculation
    Add,
    /// List entries (the default)
    List,
    /// Forget every entry
    Clear,
    /// Load an entry into the calculator
    Load { entry: EntryRef },
}

#[derive(Debug, Subcommand)]
pub enum SavedAction {
    /// List entries (the default)
    List,
    /// Delete an entry
    Delete { entry: EntryRef },
    /// Load an entry into the calculator
    Load { entry: EntryRef },
}

#[derive(Debug, Subcommand)]
pub enum BulkAction {
    /// Append a blank line item
    Add,
    /// Remove a line item by its number
    Remove { item: usize },
    /// Set description, amount or rate of a line item
    Set {
        item: usize,
        field: LineField,
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        value: Vec<String>,
    },
    /// Show items and totals (the default)
    List,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shell(line: &str) -> ShellCommand {
        ShellLine::try_parse_from(line.split_whitespace()).unwrap().command
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
        ShellLine::command().debug_assert();
    }

    #[test]
    fn test_one_shot_calc() {
        let cli = Cli::try_parse_from(["gst", "calc", "1180", "-r", "18", "-m", "inclusive", "--json"]).unwrap();

        assert!(cli.json);
        match cli.command {
            Some(Command::Calc(args)) => {
                assert_eq!(args.amount, "1180");
                assert_eq!(args.rate.as_deref(), Some("18"));
                assert_eq!(args.mode, Some(TaxMode::Inclusive));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_no_subcommand_means_shell() {
        let cli = Cli::try_parse_from(["gst"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_shell_lines() {
        assert!(matches!(shell("amount 1180"), ShellCommand::Amount { value } if value == "1180"));
        assert!(matches!(shell("mode incl"), ShellCommand::Mode { mode: TaxMode::Inclusive }));
        assert!(matches!(shell("currency usd"), ShellCommand::Currency { currency: Currency::Usd }));
        assert!(matches!(shell("custom-rate 7.5"), ShellCommand::CustomRate { value } if value == "7.5"));
        assert!(matches!(shell("exit"), ShellCommand::Quit));

        match shell("desc Teak dining table") {
            ShellCommand::Desc { words } => assert_eq!(words.join(" "), "Teak dining table"),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_shell_subactions() {
        assert!(matches!(shell("history"), ShellCommand::History { action: None }));
        assert!(matches!(
            shell("saved delete 2"),
            ShellCommand::Saved {
                action: Some(SavedAction::Delete { entry: EntryRef::Position(2) })
            }
        ));

        match shell("bulk set 1 desc Teak chair") {
            ShellCommand::Bulk {
                action: Some(BulkAction::Set { item, field, value }),
            } => {
                assert_eq!(item, 1);
                assert_eq!(field, LineField::Description);
                assert_eq!(value.join(" "), "Teak chair");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_shell_rejects_bad_mode() {
        assert!(ShellLine::try_parse_from(["mode", "gross"]).is_err());
        assert!(ShellLine::try_parse_from(["frobnicate"]).is_err());
    }
}
