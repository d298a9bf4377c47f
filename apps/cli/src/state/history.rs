//! Calculation history: the most recent calculations, newest first.

use std::collections::VecDeque;

use gst_core::{CalculationSnapshot, MAX_HISTORY_ENTRIES};
use serde::Serialize;
use tracing::debug;

/// Bounded history of recorded calculations.
///
/// ```text
///  record(new) ──► [ new, e1, e2, ... e19 ]  ──► e20 evicted
///                    ▲ position 1           ▲ position 20
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct History {
    entries: VecDeque<CalculationSnapshot>,
    #[serde(skip)]
    capacity: usize,
}

impl History {
    pub fn new() -> Self {
        History::with_capacity(MAX_HISTORY_ENTRIES)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        History {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Prepends an entry, returning the oldest one if the cap was exceeded.
    pub fn record(&mut self, snapshot: CalculationSnapshot) -> Option<CalculationSnapshot> {
        self.entries.push_front(snapshot);

        if self.entries.len() > self.capacity {
            let evicted = self.entries.pop_back();
            if let Some(old) = &evicted {
                debug!(id = %old.id, "oldest history entry evicted");
            }
            return evicted;
        }
        None
    }

    /// Entries, newest first.
    pub fn entries(&self) -> impl Iterator<Item = &CalculationSnapshot> {
        self.entries.iter()
    }

    /// Entry at a 0-based position (0 is the newest).
    pub fn get(&self, index: usize) -> Option<&CalculationSnapshot> {
        self.entries.get(index)
    }

    pub fn find(&self, id: uuid::Uuid) -> Option<&CalculationSnapshot> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for History {
    fn default() -> Self {
        History::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Local;
    use gst_core::engine::compute;
    use gst_core::{Currency, TaxInput, TaxMode};

    fn snapshot(amount: u32) -> CalculationSnapshot {
        let input = TaxInput::from_raw(&amount.to_string(), "18", TaxMode::Exclusive);
        CalculationSnapshot::capture(input, Currency::Inr, "", compute(&input), Local::now())
    }

    #[test]
    fn test_newest_first() {
        let mut history = History::new();
        history.record(snapshot(1));
        history.record(snapshot(2));

        let amounts: Vec<String> = history.entries().map(|e| e.amount.to_string()).collect();
        assert_eq!(amounts, ["2", "1"]);
    }

    #[test]
    fn test_twenty_first_entry_evicts_oldest() {
        let mut history = History::new();
        let first = snapshot(1);
        let first_id = first.id;
        history.record(first);

        for amount in 2..=20 {
            assert!(history.record(snapshot(amount)).is_none());
        }
        assert_eq!(history.len(), MAX_HISTORY_ENTRIES);

        let evicted = history.record(snapshot(21)).unwrap();

        assert_eq!(evicted.id, first_id);
        assert_eq!(history.len(), MAX_HISTORY_ENTRIES);
        assert_eq!(history.get(0).unwrap().amount.to_string(), "21");
        assert_eq!(history.get(19).unwrap().amount.to_string(), "2");
        assert!(history.find(first_id).is_none());
    }

    #[test]
    fn test_clear() {
        let mut history = History::new();
        history.record(snapshot(5));
        history.clear();

        assert!(history.is_empty());
        assert!(history.get(0).is_none());
    }
}
