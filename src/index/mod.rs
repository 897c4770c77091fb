//! Index Module
//!
//! In-memory two-level mapping of state → city → record.
//!
//! ## Responsibilities
//! - Case-insensitive keying (keys are lowercased, records keep casing)
//! - At most one record per (state, city); last write wins
//! - Report whether an upsert created or replaced a record
//! - Iterate records in file order for rewrites
//!
//! ## Data Structure Choice
//! Nested `IndexMap`s instead of `HashMap`s:
//! - Iteration follows insertion order, so a rewrite keeps the loaded
//!   file's line order and new cities land at the end
//! - Lookups stay O(1)

mod table;

pub use table::PopulationIndex;

/// One city's population observation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// State name, casing as last written
    pub state: String,

    /// City name, casing as last written
    pub city: String,

    /// Population count
    pub population: u64,
}

impl Record {
    pub fn new(state: impl Into<String>, city: impl Into<String>, population: u64) -> Self {
        Self {
            state: state.into(),
            city: city.into(),
            population,
        }
    }
}

/// What an upsert did to the index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// The (state, city) pair was not present before
    Created,

    /// An existing record was overwritten
    Updated,
}

/// Derive the map key for a state or city name
pub fn normalize_key(name: &str) -> String {
    name.to_lowercase()
}
