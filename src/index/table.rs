//! PopulationIndex implementation
//!
//! Nested IndexMap keyed by normalized state, then normalized city.

use indexmap::IndexMap;

use super::{normalize_key, Record, UpsertOutcome};

/// In-memory population store
///
/// Not synchronized on its own; `Engine` wraps it in a lock.
#[derive(Debug, Default, Clone)]
pub struct PopulationIndex {
    states: IndexMap<String, IndexMap<String, Record>>,
    len: usize,
}

impl PopulationIndex {
    /// Create a new empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a record; both names are normalized, never trimmed
    pub fn get(&self, state: &str, city: &str) -> Option<&Record> {
        self.states
            .get(&normalize_key(state))?
            .get(&normalize_key(city))
    }

    /// Check whether the (state, city) pair is present
    pub fn contains(&self, state: &str, city: &str) -> bool {
        self.get(state, city).is_some()
    }

    /// Insert or overwrite a record under the keys derived from its own
    /// state and city. The record is stored as given.
    pub fn upsert(&mut self, record: Record) -> UpsertOutcome {
        let state_key = normalize_key(&record.state);
        let city_key = normalize_key(&record.city);

        let cities = self.states.entry(state_key).or_default();
        match cities.insert(city_key, record) {
            Some(_) => UpsertOutcome::Updated,
            None => {
                self.len += 1;
                UpsertOutcome::Created
            }
        }
    }

    /// Number of (state, city) records
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if the index holds no records
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of distinct normalized states
    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    /// Iterate all records, state by state, in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Record> {
        self.states.values().flat_map(|cities| cities.values())
    }
}
