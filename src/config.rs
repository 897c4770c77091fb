//! Configuration for CityPop
//!
//! Centralized configuration with sensible defaults.

use std::path::PathBuf;

use crate::error::{CityPopError, Result};

/// Main configuration for a CityPop instance
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Storage Configuration
    // -------------------------------------------------------------------------
    /// Backing flat file, one `city,state,population` row per line.
    /// Read once at startup and rewritten in full on every upsert.
    pub data_file: PathBuf,

    // -------------------------------------------------------------------------
    // Network Configuration
    // -------------------------------------------------------------------------
    /// HTTP listen address
    pub listen_addr: String,

    /// Largest accepted request body (bytes)
    pub max_body_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from("data/city_populations.csv"),
            listen_addr: "127.0.0.1:5555".to_string(),
            max_body_bytes: 1024,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Check the storage settings before the data file is opened
    ///
    /// The listen address is resolved by `Server::bind`, not here.
    pub fn validate(&self) -> Result<()> {
        if self.data_file.as_os_str().is_empty() {
            return Err(CityPopError::Config("data file path is empty".to_string()));
        }

        if self.listen_addr.trim().is_empty() {
            return Err(CityPopError::Config("listen address is empty".to_string()));
        }

        if self.max_body_bytes == 0 {
            return Err(CityPopError::Config(
                "max body size must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the backing data file
    pub fn data_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.data_file = path.into();
        self
    }

    /// Set the HTTP listen address
    pub fn listen_addr(mut self, addr: impl Into<String>) -> Self {
        self.config.listen_addr = addr.into();
        self
    }

    /// Set the request body limit (in bytes)
    pub fn max_body_bytes(mut self, bytes: usize) -> Self {
        self.config.max_body_bytes = bytes;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
