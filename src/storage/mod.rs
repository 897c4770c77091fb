//! Storage Module
//!
//! Persistent storage as a single flat text file.
//!
//! ## Responsibilities
//! - Load the whole file into a `PopulationIndex` at startup
//! - Rewrite the whole file from the index after every upsert
//!
//! ## File Format
//! ```text
//! Los Angeles,CA,3900000
//! New York,NY,8400000
//! ```
//! - One record per line: `city,state,population`
//! - No header, no quoting, no escaping of embedded commas
//! - Lines joined by `\n`; no trailing newline is written
//! - City comes before state on both read and write

mod format;
mod file;

pub use format::{
    format_row, parse_document, parse_population, parse_row, render_document, validate_name,
};
pub use file::DataFile;
