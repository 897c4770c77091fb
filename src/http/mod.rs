//! HTTP Module
//!
//! axum front end over the `Engine`.
//!
//! ## Routes
//! ```text
//! GET /api/population/state/{state}/city/{city}
//!     200 {"population": N}
//!     400 {"error": "City not found"}
//!
//! PUT /api/population/state/{state}/city/{city}    body: population
//!     201 {"message": "Population created!"}
//!     200 {"message": "Population updated!"}
//!     400 {"message": "Data could not be saved, maybe the file was opened or locked!"}
//!     400 {"message": "Population must be a non-negative integer"}
//!     400 {"message": "State and city names cannot contain commas or line breaks"}
//! ```

mod handlers;
mod response;
mod server;

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::engine::Engine;

pub use response::{ErrorBody, MessageBody, PopulationBody, Reply};
pub use server::Server;

/// Route serving both lookups and upserts
pub const POPULATION_ROUTE: &str = "/api/population/state/{state}/city/{city}";

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<Engine>,
}

impl AppState {
    pub fn new(engine: Arc<Engine>) -> Self {
        Self { engine }
    }
}

/// Build the application router
pub fn build_router(state: AppState) -> Router {
    let max_body_bytes = state.engine.config().max_body_bytes;

    Router::new()
        .route(
            POPULATION_ROUTE,
            get(handlers::get_population).put(handlers::put_population),
        )
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
