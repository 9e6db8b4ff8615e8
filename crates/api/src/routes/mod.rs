//! API route definitions.

use axum::Router;

use crate::AppState;

pub mod banking;
pub mod compliance;
pub mod health;
pub mod pools;
pub mod route_records;

/// Creates the API router with all routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(route_records::routes())
        .merge(compliance::routes())
        .merge(banking::routes())
        .merge(pools::routes())
}
