//! Error types for CityPop
//!
//! Provides a unified error type for all operations.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using CityPopError
pub type Result<T> = std::result::Result<T, CityPopError>;

/// Unified error type for CityPop operations
#[derive(Debug, Error)]
pub enum CityPopError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Load Errors (fatal at startup)
    // -------------------------------------------------------------------------
    #[error("Failed to read data file {}: {source}", .path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed row at line {line}: {reason}")]
    MalformedRow { line: usize, reason: String },

    // -------------------------------------------------------------------------
    // Lookup Errors
    // -------------------------------------------------------------------------
    #[error("City not found: {city}, {state}")]
    NotFound { state: String, city: String },

    // -------------------------------------------------------------------------
    // Persistence Errors
    // -------------------------------------------------------------------------
    #[error("Failed to write data file {}: {source}", .path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // -------------------------------------------------------------------------
    // Input Errors
    // -------------------------------------------------------------------------
    #[error("Invalid population: {0:?}")]
    InvalidPopulation(String),

    #[error("Invalid name {0:?}: commas and line breaks are not allowed")]
    InvalidName(String),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    // -------------------------------------------------------------------------
    // Server Errors
    // -------------------------------------------------------------------------
    #[error("Server error: {0}")]
    Server(String),
}

impl CityPopError {
    /// True for the errors that must abort startup
    pub fn is_load_error(&self) -> bool {
        matches!(self, Self::Load { .. } | Self::MalformedRow { .. })
    }
}
