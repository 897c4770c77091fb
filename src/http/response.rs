//! Reply definitions
//!
//! Maps engine results onto status codes and JSON bodies.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::error::CityPopError;
use crate::index::UpsertOutcome;

pub const CITY_NOT_FOUND: &str = "City not found";
pub const POPULATION_CREATED: &str = "Population created!";
pub const POPULATION_UPDATED: &str = "Population updated!";
pub const SAVE_FAILED: &str = "Data could not be saved, maybe the file was opened or locked!";
pub const INVALID_POPULATION: &str = "Population must be a non-negative integer";
pub const INVALID_NAME: &str = "State and city names cannot contain commas or line breaks";
pub const INTERNAL_ERROR: &str = "Internal server error";

// =============================================================================
// Wire Bodies
// =============================================================================

/// `{"population": N}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopulationBody {
    pub population: u64,
}

/// `{"message": "..."}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageBody {
    pub message: String,
}

/// `{"error": "..."}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

fn message(text: &str) -> Response {
    Json(MessageBody {
        message: text.to_string(),
    })
    .into_response()
}

fn error(text: &str) -> Response {
    Json(ErrorBody {
        error: text.to_string(),
    })
    .into_response()
}

// =============================================================================
// Reply
// =============================================================================

/// A reply to send to the client
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Lookup hit
    Population(u64),

    /// Lookup miss
    NotFound,

    /// Upsert saved
    Saved(UpsertOutcome),

    /// Upsert applied in memory but the file rewrite failed
    SaveFailed,

    /// Body was not a usable population
    InvalidPopulation,

    /// State or city cannot be stored in the data file
    InvalidName,

    /// Anything else
    Internal,
}

impl Reply {
    /// Classify an engine error
    pub fn from_error(err: &CityPopError) -> Self {
        match err {
            CityPopError::NotFound { .. } => Reply::NotFound,
            CityPopError::Persist { .. } => Reply::SaveFailed,
            CityPopError::InvalidPopulation(_) => Reply::InvalidPopulation,
            CityPopError::InvalidName(_) => Reply::InvalidName,
            _ => Reply::Internal,
        }
    }

    /// HTTP status for this reply
    pub fn status(&self) -> StatusCode {
        match self {
            Reply::Population(_) => StatusCode::OK,
            Reply::Saved(UpsertOutcome::Created) => StatusCode::CREATED,
            Reply::Saved(UpsertOutcome::Updated) => StatusCode::OK,
            Reply::NotFound | Reply::SaveFailed | Reply::InvalidPopulation | Reply::InvalidName => {
                StatusCode::BAD_REQUEST
            }
            Reply::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Reply {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            Reply::Population(population) => Json(PopulationBody { population }).into_response(),
            Reply::NotFound => error(CITY_NOT_FOUND),
            Reply::Saved(UpsertOutcome::Created) => message(POPULATION_CREATED),
            Reply::Saved(UpsertOutcome::Updated) => message(POPULATION_UPDATED),
            Reply::SaveFailed => message(SAVE_FAILED),
            Reply::InvalidPopulation => message(INVALID_POPULATION),
            Reply::InvalidName => message(INVALID_NAME),
            Reply::Internal => error(INTERNAL_ERROR),
        };
        (status, body).into_response()
    }
}
