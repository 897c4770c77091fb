//! Row codec
//!
//! Encoding and decoding of the `city,state,population` text format.

use crate::error::{CityPopError, Result};
use crate::index::{PopulationIndex, Record};

/// Field separator within a row
pub const FIELD_SEPARATOR: char = ',';

/// Row separator
pub const ROW_SEPARATOR: char = '\n';

/// Number of fields in a row
pub const FIELD_COUNT: usize = 3;

// =============================================================================
// Population Parsing
// =============================================================================

/// Parse the leading numeric prefix of `raw` as a population
///
/// Leading whitespace is skipped, an optional sign is accepted, then the
/// longest run of ASCII digits is read and anything after it is ignored:
/// `"500"` → 500, `" 42\n"` → 42, `"12abc"` → 12.
///
/// Returns `None` when no digit follows, when the value is negative, or
/// when it does not fit in a `u64`.
pub fn parse_population(raw: &str) -> Option<u64> {
    let rest = raw.trim_start();

    let (negative, rest) = match rest.as_bytes().first() {
        Some(b'-') => (true, &rest[1..]),
        Some(b'+') => (false, &rest[1..]),
        _ => (false, rest),
    };

    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }

    let value: u64 = rest[..digits_len].parse().ok()?;
    if negative && value != 0 {
        return None;
    }

    Some(value)
}

// =============================================================================
// Name Validation
// =============================================================================

/// Check that a state or city name can be written as a single field
///
/// The format has no quoting, so a separator inside a name would split the
/// row on the next load.
pub fn validate_name(name: &str) -> Result<()> {
    if name.contains([FIELD_SEPARATOR, ROW_SEPARATOR, '\r']) {
        return Err(CityPopError::InvalidName(name.to_string()));
    }
    Ok(())
}

// =============================================================================
// Row Encoding/Decoding
// =============================================================================

/// Decode one row
///
/// `line` is the 1-based line number, used in error reports.
pub fn parse_row(row: &str, line: usize) -> Result<Record> {
    let row = row.strip_suffix('\r').unwrap_or(row);

    let fields: Vec<&str> = row.split(FIELD_SEPARATOR).collect();
    if fields.len() != FIELD_COUNT {
        return Err(CityPopError::MalformedRow {
            line,
            reason: format!("expected {} fields, found {}", FIELD_COUNT, fields.len()),
        });
    }

    let (city, state, population) = (fields[0], fields[1], fields[2]);
    let population = parse_population(population).ok_or_else(|| CityPopError::MalformedRow {
        line,
        reason: format!("population {:?} is not a non-negative integer", population),
    })?;

    Ok(Record::new(state, city, population))
}

/// Encode one record as a row (no line terminator)
pub fn format_row(record: &Record) -> String {
    format!("{},{},{}", record.city, record.state, record.population)
}

// =============================================================================
// Document Encoding/Decoding
// =============================================================================

/// Decode a whole file into an index
///
/// Surrounding whitespace is trimmed first; an empty document yields an
/// empty index. A repeated (state, city) pair keeps the later row.
pub fn parse_document(content: &str) -> Result<PopulationIndex> {
    let mut index = PopulationIndex::new();

    let content = content.trim();
    if content.is_empty() {
        return Ok(index);
    }

    for (i, row) in content.split(ROW_SEPARATOR).enumerate() {
        index.upsert(parse_row(row, i + 1)?);
    }

    Ok(index)
}

/// Encode the whole index, rows joined by `\n` with no trailing newline
pub fn render_document(index: &PopulationIndex) -> String {
    index
        .iter()
        .map(format_row)
        .collect::<Vec<_>>()
        .join("\n")
}
