//! Banking ledger routes.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde::Deserialize;
use serde_json::json;

use fueleu_core::banking::{ApplyRequest, BankRequest};

use crate::{
    AppState,
    error::ApiError,
    extractors::{AppJson, AppQuery},
};

/// Creates the banking routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/banking/bank", post(bank_surplus))
        .route("/banking/apply", post(apply_banked))
        .route("/banking/total", get(total_banked))
        .route("/banking/records", get(list_records))
        .route("/banking/report", get(ledger_report))
}

/// Query naming one ship.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShipQuery {
    /// Ship identifier.
    pub ship_id: String,
}

/// Query for ledger records, optionally narrowed to one year.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordsQuery {
    /// Ship identifier.
    pub ship_id: String,
    /// Compliance year filter.
    pub year: Option<i32>,
}

/// POST `/banking/bank` - Bank surplus CB.
async fn bank_surplus(
    State(state): State<AppState>,
    AppJson(request): AppJson<BankRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let banked = state.banking.bank_surplus(request).await?;
    Ok((StatusCode::CREATED, Json(banked)))
}

/// POST `/banking/apply` - Apply banked CB against a deficit.
async fn apply_banked(
    State(state): State<AppState>,
    AppJson(request): AppJson<ApplyRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let applied = state.banking.apply_banked(request).await?;
    Ok(Json(applied))
}

/// GET `/banking/total?shipId=` - Banked balance across all years.
async fn total_banked(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<ShipQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let total = state.banking.total_banked(&query.ship_id).await?;
    Ok(Json(json!({
        "shipId": query.ship_id,
        "totalBanked": total,
    })))
}

/// GET `/banking/records?shipId=&year=` - Ledger entries in commit order.
async fn list_records(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<RecordsQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let entries = state
        .banking
        .list_entries(&query.ship_id, query.year)
        .await?;
    Ok(Json(json!({
        "success": true,
        "count": entries.len(),
        "data": entries,
    })))
}

/// GET `/banking/report?shipId=` - Replayed running balances.
async fn ledger_report(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<ShipQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let report = state.banking.ledger_report(&query.ship_id).await?;
    Ok(Json(report))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use async_trait::async_trait;
    use axum::http::StatusCode;
    use rstest::rstest;
    use serde_json::{Value, json};

    use fueleu_core::banking::BankEntry;
    use fueleu_core::store::{LedgerStore, ShipLedger, StoreError};
    use fueleu_shared::ShipId;

    use crate::test_support::{app, fleet, send};
    use crate::{AppState, create_router};

    fn bank(ship_id: &str, amount: Value) -> Option<Value> {
        Some(json!({ "shipId": ship_id, "year": 2024, "amount": amount }))
    }

    fn apply(ship_id: &str, amount: Value) -> Option<Value> {
        Some(json!({ "shipId": ship_id, "year": 2025, "applyAmount": amount }))
    }

    #[tokio::test]
    async fn test_bank_then_apply_scenario() {
        let app = app();

        let (status, body) = send(&app, "POST", "/api/v1/banking/bank", bank("R001", json!(100))).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["shipId"], "R001");
        assert_eq!(body["amount"], "100");

        let (status, body) = send(&app, "GET", "/api/v1/banking/total?shipId=R001", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["totalBanked"], "100");

        let (status, body) = send(&app, "POST", "/api/v1/banking/apply", apply("R001", json!(40))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["cb_before"], "100");
        assert_eq!(body["applied"], "40");
        assert_eq!(body["cb_after"], "60");

        let (status, body) = send(&app, "POST", "/api/v1/banking/apply", apply("R001", json!(61))).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"], "INSUFFICIENT_BALANCE");

        let (_, body) = send(&app, "GET", "/api/v1/banking/total?shipId=R001", None).await;
        assert_eq!(body["totalBanked"], "60");
    }

    #[tokio::test]
    async fn test_records_and_report() {
        let app = app();
        send(&app, "POST", "/api/v1/banking/bank", bank("R002", json!("75.5"))).await;
        send(&app, "POST", "/api/v1/banking/apply", apply("R002", json!(25))).await;

        let (status, body) = send(&app, "GET", "/api/v1/banking/records?shipId=R002", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["count"], 2);
        assert_eq!(body["data"][0]["amount"], "75.5");
        assert_eq!(body["data"][1]["amount"], "-25");

        let (_, body) = send(&app, "GET", "/api/v1/banking/records?shipId=R002&year=2025", None).await;
        assert_eq!(body["count"], 1);

        let (status, body) = send(&app, "GET", "/api/v1/banking/report?shipId=R002", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["balances"][1]["currentBalance"], "50.5");
        assert_eq!(body["total"]["withdrawn"], "25");
    }

    #[tokio::test]
    async fn test_total_for_ship_without_entries_is_zero() {
        let (status, body) = send(&app(), "GET", "/api/v1/banking/total?shipId=R003", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["totalBanked"], "0");
    }

    #[rstest]
    #[case(bank("ZZZ", json!(10)), StatusCode::NOT_FOUND, "SHIP_NOT_FOUND")]
    #[case(bank("R001", json!(0)), StatusCode::BAD_REQUEST, "INVALID_AMOUNT")]
    #[case(bank("R001", json!(-5)), StatusCode::BAD_REQUEST, "INVALID_AMOUNT")]
    #[case(bank("R001", json!("0.00001")), StatusCode::BAD_REQUEST, "INVALID_AMOUNT")]
    #[case(bank("R001", json!("79228162514264337593543950335")), StatusCode::BAD_REQUEST, "INVALID_AMOUNT")]
    #[case(bank(" ", json!(10)), StatusCode::BAD_REQUEST, "INVALID_SHIP_ID")]
    #[case(Some(json!({ "shipId": "R001", "year": 2024 })), StatusCode::BAD_REQUEST, "VALIDATION_ERROR")]
    #[case(Some(json!({ "shipId": "R001", "year": 2024, "amount": "lots" })), StatusCode::BAD_REQUEST, "VALIDATION_ERROR")]
    #[tokio::test]
    async fn test_bank_rejections(
        #[case] body: Option<Value>,
        #[case] expected: StatusCode,
        #[case] code: &str,
    ) {
        let (status, response) = send(&app(), "POST", "/api/v1/banking/bank", body).await;
        assert_eq!(status, expected);
        assert_eq!(response["error"], code);
        assert!(response["message"].is_string());
    }

    #[tokio::test]
    async fn test_missing_ship_query_rejected() {
        let (status, body) = send(&app(), "GET", "/api/v1/banking/total", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "VALIDATION_ERROR");
    }

    struct UnavailableLedger;

    #[async_trait]
    impl LedgerStore for UnavailableLedger {
        async fn lock_ship(&self, _: &ShipId) -> Result<Box<dyn ShipLedger>, StoreError> {
            Err(StoreError::Unavailable("connection refused".into()))
        }

        async fn entries(&self, _: &ShipId) -> Result<Vec<BankEntry>, StoreError> {
            Err(StoreError::Unavailable("connection refused".into()))
        }
    }

    #[tokio::test]
    async fn test_storage_failure_is_503_without_details() {
        let fleet = Arc::new(fleet());
        let state = AppState::new(Arc::new(UnavailableLedger), fleet.clone(), fleet);
        let app = create_router(state, Duration::from_secs(5));

        let (status, body) = send(&app, "POST", "/api/v1/banking/apply", apply("R001", json!(1))).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["error"], "STORAGE_UNAVAILABLE");
        assert!(!body["message"].as_str().unwrap().contains("refused"));
    }
}
