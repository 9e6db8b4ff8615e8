//! Pool service: resolves member balances and runs the allocation.
//!
//! Pools are computed on demand and never persisted; the service only reads
//! from the compliance provider.

use std::collections::BTreeSet;
use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::{info, warn};

use fueleu_shared::ShipId;

use super::allocation::allocate;
use super::error::PoolError;
use super::types::{CreatePoolRequest, Pool, PoolMember};
use crate::store::ComplianceProvider;

/// Pool allocator over a compliance provider.
#[derive(Clone)]
pub struct PoolService {
    compliance: Arc<dyn ComplianceProvider>,
}

impl PoolService {
    /// Creates a pool service.
    #[must_use]
    pub fn new(compliance: Arc<dyn ComplianceProvider>) -> Self {
        Self { compliance }
    }

    /// Forms a pool for `request.year` and redistributes CB among its members.
    ///
    /// # Errors
    ///
    /// - `EmptyPool` if no members are given
    /// - `InvalidShipId` if any member id is malformed
    /// - `MissingMembers` if any member has no compliance balance for the year
    /// - `Storage` if the compliance provider fails
    pub async fn create_pool(&self, request: CreatePoolRequest) -> Result<Pool, PoolError> {
        let ship_ids = request
            .members
            .iter()
            .map(|raw| ShipId::parse(raw))
            .collect::<Result<BTreeSet<_>, _>>()?;
        if ship_ids.is_empty() {
            return Err(PoolError::EmptyPool);
        }
        let ship_ids: Vec<ShipId> = ship_ids.into_iter().collect();

        let calculations = self
            .compliance
            .compliance_for(&ship_ids, request.year)
            .await?;

        let mut members: Vec<PoolMember> = Vec::with_capacity(ship_ids.len());
        let mut missing = Vec::new();
        for ship_id in &ship_ids {
            match calculations
                .iter()
                .find(|calculation| &calculation.ship_id == ship_id)
            {
                Some(calculation) => members.push(calculation.clone().into()),
                None => missing.push(ship_id.clone()),
            }
        }
        if !missing.is_empty() {
            return Err(PoolError::MissingMembers {
                year: request.year,
                ship_ids: missing,
            });
        }

        let pool = Pool {
            year: request.year,
            members: allocate(&members),
        };

        let total = pool.total_after();
        if total < Decimal::ZERO {
            warn!(
                year = pool.year,
                total = %total,
                remaining_deficits = pool.remaining_deficits().count(),
                "Pool total is negative; some members remain in deficit"
            );
        }
        info!(
            year = pool.year,
            members = pool.members.len(),
            total = %total,
            "Pool allocated"
        );

        Ok(pool)
    }
}
