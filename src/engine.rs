//! Engine Module
//!
//! The population store that request handlers talk to.
//!
//! ## Responsibilities
//! - Load the backing file into the index at startup
//! - Serve lookups from memory
//! - Apply upserts and rewrite the backing file
//! - Keep concurrent upserts from interleaving

use std::path::Path;

use parking_lot::{Mutex, RwLock};

use crate::config::Config;
use crate::error::{CityPopError, Result};
use crate::index::{normalize_key, PopulationIndex, Record, UpsertOutcome};
use crate::storage::{validate_name, DataFile};

/// The population store
///
/// ## Concurrency Model: Single-Writer / Multiple-Reader (SWMR)
///
/// - **Writes** (upsert/reload): Serialized by `write_lock`
///   - Only ONE write at a time, held across existence check, mutation
///     and the file rewrite
///   - The index write lock is held only while mutating
///
/// - **Reads** (get): Shared read lock on the index, never wait on file I/O
///
/// A failed rewrite leaves the mutation in memory; the next successful
/// upsert brings the file back in line.
pub struct Engine {
    /// Engine configuration
    config: Config,

    /// Backing flat file
    file: DataFile,

    /// state → city → record
    index: RwLock<PopulationIndex>,

    /// Serializes write operations (upsert/reload)
    write_lock: Mutex<()>,
}

impl Engine {
    /// Open the engine with the given config
    ///
    /// Fails if the config is invalid or the backing file cannot be loaded.
    pub fn open(config: Config) -> Result<Self> {
        config.validate()?;

        let file = DataFile::new(&config.data_file);
        let index = file.load()?;

        tracing::info!(
            records = index.len(),
            states = index.state_count(),
            path = %file.path().display(),
            "Data file loaded"
        );

        Ok(Self {
            config,
            file,
            index: RwLock::new(index),
            write_lock: Mutex::new(()),
        })
    }

    /// Open with a path (convenience method)
    ///
    /// Uses default config with the specified data file
    pub fn open_path(path: &Path) -> Result<Self> {
        Self::open(Config::builder().data_file(path).build())
    }

    /// Get the record for a (state, city) pair, any casing
    pub fn get(&self, state: &str, city: &str) -> Result<Record> {
        let index = self.index.read();

        match index.get(state, city) {
            Some(record) => {
                tracing::debug!(state, city, population = record.population, "Lookup hit");
                Ok(record.clone())
            }
            None => {
                tracing::debug!(state, city, "Lookup miss");
                Err(CityPopError::NotFound {
                    state: state.to_string(),
                    city: city.to_string(),
                })
            }
        }
    }

    /// Insert or overwrite a population and rewrite the backing file
    ///
    /// Steps:
    /// 1. Reject names the file format cannot hold
    /// 2. Acquire write lock
    /// 3. Store the record under lowercased state/city
    /// 4. Rewrite the whole file
    ///
    /// On a write failure the in-memory change is kept and
    /// `CityPopError::Persist` is returned.
    pub fn upsert(&self, state: &str, city: &str, population: u64) -> Result<UpsertOutcome> {
        validate_name(state)?;
        validate_name(city)?;

        let _write_guard = self.write_lock.lock();

        let record = Record::new(normalize_key(state), normalize_key(city), population);
        let outcome = self.index.write().upsert(record);

        if let Err(e) = self.persist_locked() {
            tracing::error!(state, city, error = %e, "Failed to write data file");
            return Err(e);
        }

        tracing::info!(state, city, population, ?outcome, "Population saved");
        Ok(outcome)
    }

    /// Re-read the backing file, replacing the whole index
    ///
    /// On failure the current index is left untouched.
    pub fn reload(&self) -> Result<usize> {
        let _write_guard = self.write_lock.lock();

        let fresh = self.file.load()?;
        let count = fresh.len();
        *self.index.write() = fresh;

        tracing::info!(records = count, "Data file reloaded");
        Ok(count)
    }

    /// Internal rewrite (called with write lock held)
    fn persist_locked(&self) -> Result<()> {
        let index = self.index.read();
        self.file.persist(&index)
    }

    // =========================================================================
    // Accessors (for testing and tooling)
    // =========================================================================

    /// Number of records in the index
    pub fn len(&self) -> usize {
        self.index.read().len()
    }

    /// Check if the index is empty
    pub fn is_empty(&self) -> bool {
        self.index.read().is_empty()
    }

    /// Snapshot of all records in file order
    pub fn records(&self) -> Vec<Record> {
        self.index.read().iter().cloned().collect()
    }

    /// Get the backing file path
    pub fn data_file(&self) -> &Path {
        self.file.path()
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}
