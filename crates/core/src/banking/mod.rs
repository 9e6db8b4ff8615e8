//! Compliance balance banking.
//!
//! This module implements the banking ledger:
//! - Append-only ledger entries (deposits and withdrawals)
//! - Balance replay and running balances
//! - Banking service with per-ship serialized withdrawals
//! - Error types for banking operations

pub mod balance;
pub mod entry;
pub mod error;
pub mod service;

#[cfg(test)]
mod service_props;

pub use balance::{LedgerViolation, RunningBalance, ShipBalance, replay};
pub use entry::{AMOUNT_SCALE, BankEntry, MAX_AMOUNT, NewBankEntry};
pub use error::BankingError;
pub use service::{ApplyRequest, ApplyResult, BankRequest, BankedSurplus, BankingService, LedgerReport};
