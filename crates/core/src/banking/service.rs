//! Banking service: deposits, withdrawals, and balance queries.
//!
//! Every write runs inside a [`ShipLedger`](crate::store::ShipLedger) session,
//! so the balance read, the sufficiency check, and the append of a withdrawal
//! are one serialized step per ship.

use std::sync::Arc;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use fueleu_shared::ShipId;

use super::balance::{RunningBalance, ShipBalance, replay};
use super::entry::{AMOUNT_SCALE, BankEntry, MAX_AMOUNT, NewBankEntry};
use super::error::BankingError;
use crate::store::{LedgerStore, RouteProvider, checked_sum};

/// Request to bank surplus CB.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankRequest {
    /// Ship identifier as supplied by the caller.
    pub ship_id: String,
    /// Compliance year the surplus comes from.
    pub year: i32,
    /// Amount to bank in gCO₂e; must be positive.
    pub amount: Decimal,
}

/// Request to apply banked CB.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplyRequest {
    /// Ship identifier as supplied by the caller.
    pub ship_id: String,
    /// Compliance year the banked CB is applied to.
    pub year: i32,
    /// Amount to withdraw in gCO₂e; must be positive.
    pub apply_amount: Decimal,
}

/// Result of a successful deposit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BankedSurplus {
    /// The ship.
    pub ship_id: ShipId,
    /// Compliance year.
    pub year: i32,
    /// Amount banked.
    pub amount: Decimal,
}

/// Result of a successful withdrawal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ApplyResult {
    /// Banked balance immediately before the withdrawal.
    pub cb_before: Decimal,
    /// Amount withdrawn.
    pub applied: Decimal,
    /// Banked balance after the withdrawal.
    pub cb_after: Decimal,
}

/// Replayed view of a ship's ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerReport {
    /// Entries in commit order.
    pub entries: Vec<BankEntry>,
    /// Running balance after each entry.
    pub balances: Vec<RunningBalance>,
    /// Totals.
    pub total: ShipBalance,
}

/// Banking engine over a ledger store and a route provider.
#[derive(Clone)]
pub struct BankingService {
    ledger: Arc<dyn LedgerStore>,
    routes: Arc<dyn RouteProvider>,
}

impl BankingService {
    /// Creates a banking service.
    #[must_use]
    pub fn new(ledger: Arc<dyn LedgerStore>, routes: Arc<dyn RouteProvider>) -> Self {
        Self { ledger, routes }
    }

    /// Banks surplus CB for a ship.
    ///
    /// # Errors
    ///
    /// - `InvalidShipId` / `InvalidAmount` for malformed input
    /// - `ShipNotFound` if the ship has no route record
    /// - `Storage` if a collaborator fails
    pub async fn bank_surplus(&self, request: BankRequest) -> Result<BankedSurplus, BankingError> {
        let ship_id = ShipId::parse(&request.ship_id)?;
        validate_amount(request.amount)?;

        if !self.routes.ship_exists(&ship_id).await? {
            return Err(BankingError::ShipNotFound(ship_id));
        }

        let mut session = self.ledger.lock_ship(&ship_id).await?;
        let entry = session
            .append(NewBankEntry::deposit(
                ship_id.clone(),
                request.year,
                request.amount,
            ))
            .await?;
        session.commit().await?;

        info!(
            ship_id = %ship_id,
            year = request.year,
            amount = %request.amount,
            entry_id = %entry.id,
            "Surplus banked"
        );

        Ok(BankedSurplus {
            ship_id,
            year: entry.year,
            amount: entry.amount,
        })
    }

    /// Returns the ship's banked balance across all years; zero if it has
    /// never banked.
    ///
    /// # Errors
    ///
    /// - `InvalidShipId` for a malformed identifier
    /// - `Storage` if the ledger store fails
    pub async fn total_banked(&self, ship_id: &str) -> Result<Decimal, BankingError> {
        let ship_id = ShipId::parse(ship_id)?;
        let total = self.ledger.total_banked(&ship_id).await?;
        debug!(ship_id = %ship_id, total = %total, "Banked total read");
        Ok(total)
    }

    /// Withdraws banked CB.
    ///
    /// The balance read, the sufficiency check, and the append happen inside
    /// one ship session; `cb_before` and `cb_after` come from that same read.
    ///
    /// # Errors
    ///
    /// - `InvalidShipId` / `InvalidAmount` for malformed input
    /// - `InsufficientBalance` if `apply_amount` exceeds the banked balance
    /// - `Storage` if the ledger store fails
    pub async fn apply_banked(&self, request: ApplyRequest) -> Result<ApplyResult, BankingError> {
        let ship_id = ShipId::parse(&request.ship_id)?;
        validate_amount(request.apply_amount)?;

        let mut session = self.ledger.lock_ship(&ship_id).await?;
        let cb_before = session.balance().await?;

        if request.apply_amount > cb_before {
            warn!(
                ship_id = %ship_id,
                available = %cb_before,
                requested = %request.apply_amount,
                "Withdrawal rejected"
            );
            return Err(BankingError::InsufficientBalance {
                available: cb_before,
                requested: request.apply_amount,
            });
        }

        let entry = session
            .append(NewBankEntry::withdrawal(
                ship_id.clone(),
                request.year,
                request.apply_amount,
            ))
            .await?;
        session.commit().await?;

        let cb_after = cb_before - request.apply_amount;
        info!(
            ship_id = %ship_id,
            year = request.year,
            applied = %request.apply_amount,
            cb_after = %cb_after,
            entry_id = %entry.id,
            "Banked surplus applied"
        );

        Ok(ApplyResult {
            cb_before,
            applied: request.apply_amount,
            cb_after,
        })
    }

    /// Lists the ship's ledger entries in commit order, optionally for one year.
    ///
    /// # Errors
    ///
    /// - `InvalidShipId` for a malformed identifier
    /// - `Storage` if the ledger store fails
    pub async fn list_entries(
        &self,
        ship_id: &str,
        year: Option<i32>,
    ) -> Result<Vec<BankEntry>, BankingError> {
        let ship_id = ShipId::parse(ship_id)?;
        let mut entries = self.ledger.entries(&ship_id).await?;
        if let Some(year) = year {
            entries.retain(|entry| entry.year == year);
        }
        Ok(entries)
    }

    /// Replays the ship's ledger into running balances.
    ///
    /// # Errors
    ///
    /// - `InvalidShipId` for a malformed identifier
    /// - `LedgerCorrupted` if the stored ledger ever goes negative
    /// - `Storage` if the ledger store fails
    pub async fn ledger_report(&self, ship_id: &str) -> Result<LedgerReport, BankingError> {
        let ship_id = ShipId::parse(ship_id)?;
        let entries = self.ledger.entries(&ship_id).await?;
        // Bounds every running balance and total folded below.
        checked_sum(entries.iter().map(|entry| entry.amount.abs()))?;
        let balances = replay(&entries).map_err(|violation| BankingError::LedgerCorrupted {
            ship_id: ship_id.clone(),
            violation,
        })?;
        let total = ShipBalance::from_entries(ship_id, &entries);

        Ok(LedgerReport {
            entries,
            balances,
            total,
        })
    }
}

/// Accepts amounts the ledger stores exactly: positive, at most
/// [`MAX_AMOUNT`], and at most [`AMOUNT_SCALE`] decimal places.
fn validate_amount(amount: Decimal) -> Result<(), BankingError> {
    if amount <= Decimal::ZERO {
        return Err(BankingError::InvalidAmount(amount));
    }
    if amount > MAX_AMOUNT {
        return Err(BankingError::AmountTooLarge {
            amount,
            max: MAX_AMOUNT,
        });
    }
    if amount.normalize().scale() > AMOUNT_SCALE {
        return Err(BankingError::AmountTooPrecise {
            amount,
            max_scale: AMOUNT_SCALE,
        });
    }
    Ok(())
}
