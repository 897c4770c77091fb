//! Request handlers
//!
//! Translate route parameters and bodies into engine calls.

use axum::extract::{Path, State};
use axum::http::header::CONTENT_TYPE;
use axum::http::HeaderMap;
use bytes::Bytes;
use serde_json::Value;

use crate::error::{CityPopError, Result};
use crate::index::UpsertOutcome;
use crate::storage::parse_population;

use super::{AppState, Reply};

/// `GET /api/population/state/{state}/city/{city}`
pub(super) async fn get_population(
    State(state): State<AppState>,
    Path((state_name, city_name)): Path<(String, String)>,
) -> Reply {
    match state.engine.get(&state_name, &city_name) {
        Ok(record) => Reply::Population(record.population),
        Err(e) => Reply::from_error(&e),
    }
}

/// `PUT /api/population/state/{state}/city/{city}`
///
/// The body is the population value: plain text, or with a JSON content
/// type either a number or a string.
pub(super) async fn put_population(
    State(state): State<AppState>,
    Path((state_name, city_name)): Path<(String, String)>,
    headers: HeaderMap,
    body: Bytes,
) -> Reply {
    let population = match population_from_body(is_json(&headers), &body) {
        Ok(population) => population,
        Err(e) => {
            tracing::warn!(state = %state_name, city = %city_name, error = %e, "Rejected population");
            return Reply::from_error(&e);
        }
    };

    // The file rewrite is blocking I/O
    let engine = state.engine.clone();
    let result = tokio::task::spawn_blocking(move || -> Result<UpsertOutcome> {
        engine.upsert(&state_name, &city_name, population)
    })
    .await;

    match result {
        Ok(Ok(outcome)) => Reply::Saved(outcome),
        Ok(Err(e)) => Reply::from_error(&e),
        Err(e) => {
            tracing::error!(error = %e, "Upsert task failed");
            Reply::Internal
        }
    }
}

/// Check for an `application/json` (or `+json`) content type
fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .map(|mime| {
            let mime = mime.trim();
            mime.eq_ignore_ascii_case("application/json") || mime.ends_with("+json")
        })
        .unwrap_or(false)
}

/// Decode a request body into a population
fn population_from_body(json: bool, body: &[u8]) -> Result<u64> {
    let invalid = || CityPopError::InvalidPopulation(String::from_utf8_lossy(body).into_owned());

    let text = std::str::from_utf8(body).map_err(|_| invalid())?;
    if !json {
        return parse_population(text).ok_or_else(invalid);
    }

    match serde_json::from_str::<Value>(text).map_err(|_| invalid())? {
        Value::Number(n) => n.as_u64().ok_or_else(invalid),
        Value::String(s) => parse_population(&s).ok_or_else(invalid),
        _ => Err(invalid()),
    }
}
