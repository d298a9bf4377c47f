//! Saved calculations: kept until deleted, in the order they were saved.

use gst_core::{CalculationSnapshot, CoreError, CoreResult};
use serde::Serialize;
use uuid::Uuid;

/// Named calculations the user chose to keep.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SavedList {
    entries: Vec<CalculationSnapshot>,
}

impl SavedList {
    pub fn new() -> Self {
        SavedList::default()
    }

    /// Appends an entry and returns it.
    ///
    /// An entry without a name takes its description, or
    /// `GST Calculation {n}` where `n` is the new list length.
    pub fn save(&mut self, mut snapshot: CalculationSnapshot) -> &CalculationSnapshot {
        let unnamed = snapshot.name.as_deref().map_or(true, str::is_empty);
        if unnamed {
            let name = if snapshot.description.is_empty() {
                format!("GST Calculation {}", self.entries.len() + 1)
            } else {
                snapshot.description.clone()
            };
            snapshot.name = Some(name);
        }

        self.entries.push(snapshot);
        &self.entries[self.entries.len() - 1]
    }

    /// Removes the entry with this id.
    pub fn delete(&mut self, id: Uuid) -> CoreResult<CalculationSnapshot> {
        let position = self
            .entries
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| CoreError::EntryNotFound {
                kind: "Saved".to_string(),
                reference: id.to_string(),
            })?;
        Ok(self.entries.remove(position))
    }

    pub fn find(&self, id: Uuid) -> Option<&CalculationSnapshot> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Entry at a 0-based position.
    pub fn get(&self, index: usize) -> Option<&CalculationSnapshot> {
        self.entries.get(index)
    }

    pub fn entries(&self) -> impl Iterator<Item = &CalculationSnapshot> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Local;
    use gst_core::engine::compute;
    use gst_core::{Currency, TaxInput, TaxMode};
    use pretty_assertions::assert_eq;

    fn snapshot(description: &str) -> CalculationSnapshot {
        let input = TaxInput::from_raw("1000", "18", TaxMode::Exclusive);
        CalculationSnapshot::capture(input, Currency::Inr, description, compute(&input), Local::now())
    }

    #[test]
    fn test_default_names() {
        let mut saved = SavedList::new();

        assert_eq!(saved.save(snapshot("")).name.as_deref(), Some("GST Calculation 1"));
        assert_eq!(saved.save(snapshot("Sofa set")).name.as_deref(), Some("Sofa set"));
        assert_eq!(saved.save(snapshot("")).name.as_deref(), Some("GST Calculation 3"));
        assert_eq!(
            saved.save(snapshot("").with_name("Showroom quote")).name.as_deref(),
            Some("Showroom quote")
        );
    }

    #[test]
    fn test_delete_by_id() {
        let mut saved = SavedList::new();
        let id = saved.save(snapshot("A")).id;
        saved.save(snapshot("B"));

        let removed = saved.delete(id).unwrap();

        assert_eq!(removed.description, "A");
        assert_eq!(saved.len(), 1);
        assert!(saved.find(id).is_none());
        assert!(matches!(saved.delete(id), Err(CoreError::EntryNotFound { .. })));
    }

    #[test]
    fn test_keeps_save_order() {
        let mut saved = SavedList::new();
        saved.save(snapshot("first"));
        saved.save(snapshot("second"));

        let names: Vec<&str> = saved.entries().filter_map(|e| e.name.as_deref()).collect();
        assert_eq!(names, ["first", "second"]);
        assert_eq!(saved.get(1).unwrap().description, "second");
    }
}
