//! FuelEU compliance ledger API server.
//!
//! Main entry point for the banking and pooling service.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, bail};
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fueleu_api::{AppState, create_router};
use fueleu_core::store::demo::demo_fleet;
use fueleu_core::store::{InMemoryFleet, InMemoryLedger};
use fueleu_db::{BankingRepository, ComplianceRepository, RouteRepository, connect};
use fueleu_shared::{AppConfig, StorageBackend};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fueleu=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load().context("Failed to load configuration")?;
    if !config.is_storage_configured() {
        bail!("FUELEU__DATABASE__URL must be set for the postgres backend");
    }

    let state = match config.storage.backend {
        StorageBackend::Postgres => {
            let db = connect(
                &config.database.url,
                config.database.max_connections,
                config.database.min_connections,
            )
            .await?;
            info!("Connected to database");

            AppState::new(
                Arc::new(BankingRepository::new(db.clone())),
                Arc::new(RouteRepository::new(db.clone())),
                Arc::new(ComplianceRepository::new(db)),
            )
        }
        StorageBackend::Memory => {
            warn!("Using in-memory storage; ledger entries are lost on restart");
            let (routes, compliance) = demo_fleet();
            let fleet = Arc::new(InMemoryFleet::new(routes, compliance));
            AppState::new(Arc::new(InMemoryLedger::new()), fleet.clone(), fleet)
        }
    };

    // Create router
    let app = create_router(
        state,
        Duration::from_secs(config.server.request_timeout_secs),
    );

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!(backend = ?config.storage.backend, "Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
