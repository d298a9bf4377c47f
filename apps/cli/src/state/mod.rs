//! # State Module
//!
//! Owns everything the calculator remembers while the process runs.
//!
//! ## One Owned Session
//! Every collection is a field of [`Session`], which the caller owns and
//! passes to each command by `&mut`. There is no global state and no
//! locking: the terminal runs one command at a time.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Session Architecture                                 │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │  Session                                                        │   │
//! │  │                                                                 │   │
//! │  │  ┌──────────────┐ ┌──────────────┐ ┌──────────────────────────┐ │   │
//! │  │  │ Calculator   │ │ BulkList     │ │ ConfigState              │ │   │
//! │  │  │ amount, rate │ │ line items   │ │ store, currency, rate,   │ │   │
//! │  │  │ mode, result │ │              │ │ mode, export dir         │ │   │
//! │  │  └──────────────┘ └──────────────┘ └──────────────────────────┘ │   │
//! │  │  ┌──────────────┐ ┌──────────────┐ ┌──────────────────────────┐ │   │
//! │  │  │ History      │ │ SavedList    │ │ ClipboardSink            │ │   │
//! │  │  │ newest 20    │ │ unbounded    │ │ last copied export       │ │   │
//! │  │  └──────────────┘ └──────────────┘ └──────────────────────────┘ │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                                                         │
//! │  Nothing here outlives the process.                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod bulk;
mod calculator;
mod config;
mod history;
mod saved;

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

pub use bulk::{BulkList, LineField};
pub(crate) use bulk::preset_rate;
pub use calculator::Calculator;
pub use config::{ConfigError, ConfigState};
pub use history::History;
pub use saved::SavedList;

use gst_core::ValidationError;
use uuid::Uuid;

use crate::sink::ClipboardSink;

/// Everything one run of the calculator holds.
#[derive(Debug)]
pub struct Session {
    pub config: ConfigState,
    /// Config file the settings were read from, if any.
    pub config_file: Option<PathBuf>,
    pub calculator: Calculator,
    pub bulk: BulkList,
    pub history: History,
    pub saved: SavedList,
    pub clipboard: ClipboardSink,
}

impl Session {
    /// Creates a session whose calculator starts from the configured defaults.
    pub fn new(config: ConfigState) -> Self {
        Session {
            calculator: Calculator::from_config(&config),
            bulk: BulkList::new(),
            history: History::new(),
            saved: SavedList::new(),
            clipboard: ClipboardSink::new(),
            config,
            config_file: None,
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Session::new(ConfigState::default())
    }
}

/// How the user points at a history or saved entry.
///
/// Listings number entries from 1, so a plain number is a position; anything
/// else must be the entry's UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryRef {
    /// 1-based position in the listing.
    Position(usize),
    Id(Uuid),
}

impl FromStr for EntryRef {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(position) = s.parse::<usize>() {
            if position == 0 {
                return Err(ValidationError::MustBePositive {
                    field: "position".to_string(),
                });
            }
            return Ok(EntryRef::Position(position));
        }

        Uuid::parse_str(s)
            .map(EntryRef::Id)
            .map_err(|_| ValidationError::InvalidFormat {
                field: "entry".to_string(),
                reason: "must be a list position or an entry id".to_string(),
            })
    }
}

impl fmt::Display for EntryRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryRef::Position(p) => write!(f, "#{}", p),
            EntryRef::Id(id) => write!(f, "{}", id),
        }
    }
}
