//! # CityPop
//!
//! A small HTTP lookup/upsert service for city populations with:
//! - A case-insensitive two-level index (state → city → record)
//! - A flat `city,state,population` text file as the only storage
//! - Full-file rewrite after every upsert
//! - Single-writer/multi-reader concurrency model
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      HTTP Server                             │
//! │                  (axum, many clients)                        │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                       Engine                                 │
//! │            (Single Writer / Multi Reader)                    │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │    Index    │          │  Data File  │
//!   │  (RwLock)   │          │  (rewrite)  │
//!   └─────────────┘          └─────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod index;
pub mod storage;
pub mod engine;
pub mod http;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{CityPopError, Result};
pub use config::Config;
pub use engine::Engine;
pub use index::{PopulationIndex, Record, UpsertOutcome};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of CityPop
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
