//! Route listing, baseline selection, and compliance balance lookup.

use std::sync::Arc;

use tracing::{debug, info};

use fueleu_shared::{RouteId, ShipId};

use super::error::RouteError;
use super::types::{ComplianceCalculation, ShipYearRecord};
use crate::store::{ComplianceProvider, RouteProvider};

/// Read side of the route/CB provider plus the baseline toggle.
#[derive(Clone)]
pub struct RouteService {
    routes: Arc<dyn RouteProvider>,
    compliance: Arc<dyn ComplianceProvider>,
}

impl RouteService {
    /// Creates a route service.
    #[must_use]
    pub fn new(routes: Arc<dyn RouteProvider>, compliance: Arc<dyn ComplianceProvider>) -> Self {
        Self { routes, compliance }
    }

    /// Returns every route record ordered by year, then ship.
    ///
    /// # Errors
    ///
    /// Returns `Storage` if the route provider fails.
    pub async fn get_all_routes(&self) -> Result<Vec<ShipYearRecord>, RouteError> {
        let routes = self.routes.list_routes().await?;
        debug!(count = routes.len(), "Routes listed");
        Ok(routes)
    }

    /// Marks a record as its ship's baseline.
    ///
    /// # Errors
    ///
    /// - `RouteNotFound` if no record has this id
    /// - `Storage` if the route provider fails
    pub async fn set_baseline(&self, route_id: RouteId) -> Result<ShipYearRecord, RouteError> {
        let record = self
            .routes
            .set_baseline(route_id)
            .await?
            .ok_or(RouteError::RouteNotFound(route_id))?;

        info!(
            route_id = %record.id,
            ship_id = %record.ship_id,
            year = record.year,
            "Baseline set"
        );
        Ok(record)
    }

    /// Returns the compliance balance for one ship-year.
    ///
    /// # Errors
    ///
    /// - `InvalidShipId` for a malformed identifier
    /// - `ComplianceNotFound` if the provider has no calculation
    /// - `Storage` if the compliance provider fails
    pub async fn get_compliance_balance(
        &self,
        ship_id: &str,
        year: i32,
    ) -> Result<ComplianceCalculation, RouteError> {
        let ship_id = ShipId::parse(ship_id)?;
        self.compliance
            .compliance_for(std::slice::from_ref(&ship_id), year)
            .await?
            .into_iter()
            .next()
            .ok_or(RouteError::ComplianceNotFound { ship_id, year })
    }
}
