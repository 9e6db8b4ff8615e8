//! Banked balance calculations.
//!
//! A ship's banked balance is never stored; it is always a fold over the
//! ship's ledger entries in commit order.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use fueleu_shared::types::{BankEntryId, ShipId};

use super::entry::BankEntry;

/// Aggregate banked position of a ship.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShipBalance {
    /// The ship.
    pub ship_id: ShipId,
    /// Sum of all deposits.
    pub deposited: Decimal,
    /// Sum of all withdrawals, as a positive number.
    pub withdrawn: Decimal,
    /// Net banked balance (`deposited - withdrawn`).
    pub balance: Decimal,
}

impl ShipBalance {
    /// Creates an empty balance.
    #[must_use]
    pub fn new(ship_id: ShipId) -> Self {
        Self {
            ship_id,
            deposited: Decimal::ZERO,
            withdrawn: Decimal::ZERO,
            balance: Decimal::ZERO,
        }
    }

    /// Folds one signed ledger amount into the balance.
    pub fn apply(&mut self, amount: Decimal) {
        if amount.is_sign_negative() {
            self.withdrawn -= amount;
        } else {
            self.deposited += amount;
        }
        self.balance = self.deposited - self.withdrawn;
    }

    /// Folds a whole entry sequence.
    #[must_use]
    pub fn from_entries(ship_id: ShipId, entries: &[BankEntry]) -> Self {
        let mut balance = Self::new(ship_id);
        for entry in entries {
            balance.apply(entry.amount);
        }
        balance
    }
}

/// Running balance information for a ledger entry.
///
/// - `version`: 1-based position of the entry in the ship's ledger
/// - `previous_balance`: balance before this entry
/// - `current_balance`: balance after this entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunningBalance {
    /// Entry the row describes.
    pub entry_id: BankEntryId,
    /// Position in the ship's ledger (monotonically increasing).
    pub version: i64,
    /// Balance before this entry.
    pub previous_balance: Decimal,
    /// Balance after this entry.
    pub current_balance: Decimal,
}

impl RunningBalance {
    /// Creates the running balance for the first entry of a ledger.
    #[must_use]
    pub fn first_entry(entry_id: BankEntryId, change: Decimal) -> Self {
        Self {
            entry_id,
            version: 1,
            previous_balance: Decimal::ZERO,
            current_balance: change,
        }
    }

    /// Creates the running balance following `previous`.
    ///
    /// - `current_balance[N] = previous_balance[N] + change`
    /// - `previous_balance[N] = current_balance[N-1]`
    #[must_use]
    pub fn next_entry(previous: &Self, entry_id: BankEntryId, change: Decimal) -> Self {
        Self {
            entry_id,
            version: previous.version + 1,
            previous_balance: previous.current_balance,
            current_balance: previous.current_balance + change,
        }
    }
}

/// A ledger whose running balance dips below zero.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Ledger entry {entry_id} (version {version}) takes the balance to {balance}")]
pub struct LedgerViolation {
    /// The offending entry.
    pub entry_id: BankEntryId,
    /// Its position in the ledger.
    pub version: i64,
    /// The negative balance it produces.
    pub balance: Decimal,
}

/// Replays a ship's entries (in commit order) into running balances.
///
/// # Errors
///
/// Returns `LedgerViolation` for the first entry after which the balance is
/// negative. A ledger written only through `BankingService` never produces one.
pub fn replay(entries: &[BankEntry]) -> Result<Vec<RunningBalance>, LedgerViolation> {
    let mut rows: Vec<RunningBalance> = Vec::with_capacity(entries.len());

    for entry in entries {
        let row = match rows.last() {
            Some(previous) => RunningBalance::next_entry(previous, entry.id, entry.amount),
            None => RunningBalance::first_entry(entry.id, entry.amount),
        };
        if row.current_balance < Decimal::ZERO {
            return Err(LedgerViolation {
                entry_id: row.entry_id,
                version: row.version,
                balance: row.current_balance,
            });
        }
        rows.push(row);
    }

    Ok(rows)
}
