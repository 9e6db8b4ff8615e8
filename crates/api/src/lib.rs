//! HTTP API layer with Axum routes.
//!
//! This crate provides:
//! - REST API routes for banking, pooling, routes, and compliance lookup
//! - Request extractors with uniform validation errors
//! - Error-to-response mapping

pub mod error;
pub mod extractors;
pub mod routes;

use std::sync::Arc;
use std::time::Duration;

use axum::{Router, http::StatusCode};
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use fueleu_core::banking::BankingService;
use fueleu_core::compliance::RouteService;
use fueleu_core::pooling::PoolService;
use fueleu_core::store::{ComplianceProvider, LedgerStore, RouteProvider};

pub use error::ApiError;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Banking ledger operations.
    pub banking: BankingService,
    /// Pool allocation.
    pub pools: PoolService,
    /// Route listing, baselines, and compliance lookup.
    pub routes: RouteService,
}

impl AppState {
    /// Wires the services over one set of storage collaborators.
    #[must_use]
    pub fn new(
        ledger: Arc<dyn LedgerStore>,
        routes: Arc<dyn RouteProvider>,
        compliance: Arc<dyn ComplianceProvider>,
    ) -> Self {
        Self {
            banking: BankingService::new(ledger, Arc::clone(&routes)),
            pools: PoolService::new(Arc::clone(&compliance)),
            routes: RouteService::new(routes, compliance),
        }
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState, request_timeout: Duration) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;
    use std::time::Duration;

    use axum::{
        Router,
        body::Body,
        http::{Request, StatusCode},
    };
    use http_body_util::BodyExt;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use serde_json::Value;
    use tower::ServiceExt;

    use fueleu_core::compliance::{ComplianceCalculation, ShipYearRecord};
    use fueleu_core::store::{InMemoryFleet, InMemoryLedger};
    use fueleu_shared::{RouteId, ShipId};

    use super::{AppState, create_router};

    pub fn record(ship_id: &str, year: i32) -> ShipYearRecord {
        ShipYearRecord {
            id: RouteId::new(),
            ship_id: ShipId::parse(ship_id).unwrap(),
            year,
            vessel_type: "Container".to_string(),
            fuel_type: "HFO".to_string(),
            ghg_intensity: dec!(91.0),
            fuel_consumption: dec!(5000),
            distance: dec!(12000),
            total_emissions: dec!(4500),
            is_baseline: false,
        }
    }

    pub fn calculation(ship_id: &str, year: i32, cb: Decimal) -> ComplianceCalculation {
        ComplianceCalculation {
            ship_id: ShipId::parse(ship_id).unwrap(),
            year,
            vessel_type: "Container".to_string(),
            target_intensity: dec!(89.3368),
            actual_intensity: dec!(91.0),
            fuel_consumption: dec!(5000),
            energy_in_scope: dec!(205000000),
            cb,
        }
    }

    /// Fleet of three ships in 2024 with surplus A, deficits B and C.
    pub fn fleet() -> InMemoryFleet {
        InMemoryFleet::new(
            vec![record("R002", 2024), record("R001", 2024), record("R003", 2024)],
            vec![
                calculation("R001", 2024, dec!(50)),
                calculation("R002", 2024, dec!(-30)),
                calculation("R003", 2024, dec!(-40)),
            ],
        )
    }

    pub fn app_with(fleet: Arc<InMemoryFleet>) -> Router {
        let state = AppState::new(Arc::new(InMemoryLedger::new()), fleet.clone(), fleet);
        create_router(state, Duration::from_secs(5))
    }

    pub fn app() -> Router {
        app_with(Arc::new(fleet()))
    }

    /// Sends one request and returns the status and the decoded JSON body.
    pub async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(body.map_or_else(Body::empty, |json| Body::from(json.to_string())))
            .unwrap();

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }
}
