//! # History Commands
//!
//! The newest twenty calculations. Entries are added automatically when an
//! amount is entered, or explicitly with `history add`.

use chrono::Local;
use gst_core::{CalculationSnapshot, CoreError};
use tracing::{debug, info};

use crate::error::ApiError;
use crate::state::{EntryRef, History, Session};

use super::{calc, EntriesView, EntryAction, EntryKind, EntryView, Response};

/// Records the current calculation.
pub fn add(session: &mut Session) -> Result<Response, ApiError> {
    debug!("history add command");
    let snapshot = session.calculator.snapshot(Local::now())?;

    if let Some(evicted) = session.history.record(snapshot.clone()) {
        info!(evicted = %evicted.id, "History full, oldest entry dropped");
    }

    Ok(Response::Entry(EntryView {
        kind: EntryKind::History,
        action: EntryAction::Added,
        entry: snapshot,
    }))
}

/// Lists entries, newest first.
pub fn list(session: &Session) -> Response {
    debug!(count = session.history.len(), "history list command");
    Response::Entries(EntriesView {
        kind: EntryKind::History,
        entries: session.history.entries().cloned().collect(),
    })
}

pub fn clear(session: &mut Session) -> Response {
    debug!("history clear command");
    session.history.clear();
    Response::message("History cleared")
}

/// Loads an entry into the calculator.
pub fn load(session: &mut Session, entry: EntryRef) -> Result<Response, ApiError> {
    debug!(%entry, "history load command");
    let snapshot = resolve(&session.history, entry)?.clone();

    session.calculator.load(&snapshot);
    Ok(calc::show(session))
}

fn resolve(history: &History, entry: EntryRef) -> Result<&CalculationSnapshot, CoreError> {
    let found = match entry {
        EntryRef::Position(position) => position.checked_sub(1).and_then(|i| history.get(i)),
        EntryRef::Id(id) => history.find(id),
    };

    found.ok_or_else(|| CoreError::EntryNotFound {
        kind: "History".to_string(),
        reference: entry.to_string(),
    })
}
