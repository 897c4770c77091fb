//! Backing data file
//!
//! Whole-file read at startup, whole-file overwrite on every write.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{CityPopError, Result};
use crate::index::PopulationIndex;

use super::format::{parse_document, render_document};

/// Handle to the flat file behind the index
#[derive(Debug, Clone)]
pub struct DataFile {
    path: PathBuf,
}

impl DataFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Read and parse the whole file
    ///
    /// An unreadable file is `CityPopError::Load`; a bad row is
    /// `CityPopError::MalformedRow`. Both are fatal at startup.
    pub fn load(&self) -> Result<PopulationIndex> {
        let content = fs::read_to_string(&self.path).map_err(|source| CityPopError::Load {
            path: self.path.clone(),
            source,
        })?;

        parse_document(&content)
    }

    /// Overwrite the file with the full contents of `index`
    ///
    /// Not atomic: a failure part-way can leave a truncated file.
    pub fn persist(&self, index: &PopulationIndex) -> Result<()> {
        let document = render_document(index);

        fs::write(&self.path, document).map_err(|source| CityPopError::Persist {
            path: self.path.clone(),
            source,
        })
    }

    /// Get the file path
    pub fn path(&self) -> &Path {
        &self.path
    }
}
