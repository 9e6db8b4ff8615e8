//! Compliance balance lookup.

use axum::{Json, Router, extract::State, response::IntoResponse, routing::get};
use serde::Deserialize;

use crate::{AppState, error::ApiError, extractors::AppQuery};

/// Creates the compliance routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/compliance/cb", get(get_compliance_balance))
}

/// Query for one ship-year.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceQuery {
    /// Ship identifier.
    pub ship_id: String,
    /// Reporting year.
    pub year: i32,
}

/// GET `/compliance/cb?shipId=&year=` - Compliance balance for a ship-year.
async fn get_compliance_balance(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<ComplianceQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let calculation = state
        .routes
        .get_compliance_balance(&query.ship_id, query.year)
        .await?;
    Ok(Json(calculation))
}
