//! Pool allocation route.

use axum::{Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::post};

use fueleu_core::pooling::CreatePoolRequest;

use crate::{AppState, error::ApiError, extractors::AppJson};

/// Creates the pooling routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/pools", post(create_pool))
}

/// POST `/pools` - Allocate surplus across pool members for one year.
async fn create_pool(
    State(state): State<AppState>,
    AppJson(request): AppJson<CreatePoolRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let pool = state.pools.create_pool(request).await?;
    Ok((StatusCode::CREATED, Json(pool)))
}
