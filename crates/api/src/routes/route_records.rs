//! Route record listing and baseline selection.

use axum::{
    Json, Router,
    extract::State,
    response::IntoResponse,
    routing::{get, post},
};
use serde_json::json;

use fueleu_shared::RouteId;

use crate::{AppState, error::ApiError, extractors::AppPath};

/// Creates the route record routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/routes", get(list_routes))
        .route("/routes/{route_id}/baseline", post(set_baseline))
}

/// GET `/routes` - List every ship-year record.
async fn list_routes(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let routes = state.routes.get_all_routes().await?;
    Ok(Json(json!({
        "success": true,
        "count": routes.len(),
        "data": routes,
    })))
}

/// POST `/routes/{route_id}/baseline` - Make a record its ship's baseline.
async fn set_baseline(
    State(state): State<AppState>,
    AppPath(route_id): AppPath<RouteId>,
) -> Result<impl IntoResponse, ApiError> {
    let updated = state.routes.set_baseline(route_id).await?;
    Ok(Json(json!({
        "success": true,
        "message": "Baseline updated successfully",
        "data": updated,
    })))
}
