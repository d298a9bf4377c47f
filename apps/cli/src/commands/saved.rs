//! # Saved Commands
//!
//! Calculations the user chose to keep. Unlike history there is no cap;
//! entries stay until deleted.

use chrono::Local;
use gst_core::validation::validate_description;
use gst_core::{CalculationSnapshot, CoreError};
use tracing::{debug, info};

use crate::error::ApiError;
use crate::state::{EntryRef, SavedList, Session};

use super::{calc, EntriesView, EntryAction, EntryKind, EntryView, Response};

/// Saves the current calculation, optionally under `name`.
pub fn save(session: &mut Session, name: &str) -> Result<Response, ApiError> {
    debug!("save command");
    let name = validate_description(name)?;

    let mut snapshot = session.calculator.snapshot(Local::now())?;
    if !name.is_empty() {
        snapshot = snapshot.with_name(name);
    }

    let saved = session.saved.save(snapshot).clone();
    info!(id = %saved.id, name = ?saved.name, "Calculation saved");

    Ok(Response::Entry(EntryView {
        kind: EntryKind::Saved,
        action: EntryAction::Added,
        entry: saved,
    }))
}

/// Lists entries in the order they were saved.
pub fn list(session: &Session) -> Response {
    debug!(count = session.saved.len(), "saved list command");
    Response::Entries(EntriesView {
        kind: EntryKind::Saved,
        entries: session.saved.entries().cloned().collect(),
    })
}

pub fn delete(session: &mut Session, entry: EntryRef) -> Result<Response, ApiError> {
    debug!(%entry, "saved delete command");
    let id = resolve(&session.saved, entry)?.id;
    let removed = session.saved.delete(id)?;

    Ok(Response::Entry(EntryView {
        kind: EntryKind::Saved,
        action: EntryAction::Deleted,
        entry: removed,
    }))
}

/// Loads an entry into the calculator.
pub fn load(session: &mut Session, entry: EntryRef) -> Result<Response, ApiError> {
    debug!(%entry, "saved load command");
    let snapshot = resolve(&session.saved, entry)?.clone();

    session.calculator.load(&snapshot);
    Ok(calc::show(session))
}

fn resolve(saved: &SavedList, entry: EntryRef) -> Result<&CalculationSnapshot, CoreError> {
    let found = match entry {
        EntryRef::Position(position) => position.checked_sub(1).and_then(|i| saved.get(i)),
        EntryRef::Id(id) => saved.find(id),
    };

    found.ok_or_else(|| CoreError::EntryNotFound {
        kind: "Saved".to_string(),
        reference: entry.to_string(),
    })
}
