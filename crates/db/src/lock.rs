//! Per-ship serialization on `PostgreSQL`.
//!
//! A [`ShipLock`] is a database transaction that has taken the ship's
//! transaction-scoped advisory lock. Any other session asking for the same
//! ship blocks until this transaction commits or is dropped, so a balance
//! read inside the lock cannot go stale before the append that depends on it.
//!
//! # Usage
//!
//! ```ignore
//! use fueleu_db::lock::ShipLock;
//!
//! let lock = ShipLock::acquire(&db, &ship_id).await?;
//! let entries = BankEntries::find().all(lock.transaction()).await?;
//! lock.commit().await?;
//! ```

use sea_orm::{
    ConnectionTrait, DatabaseConnection, DatabaseTransaction, DbBackend, DbErr, Statement,
    TransactionTrait,
};

use fueleu_shared::ShipId;

/// Takes the advisory lock keyed by the hash of the ship id.
///
/// `pg_advisory_xact_lock` is released automatically at transaction end.
pub const ADVISORY_LOCK_SQL: &str = "SELECT pg_advisory_xact_lock(hashtext($1))";

/// A transaction holding one ship's advisory lock.
pub struct ShipLock {
    txn: DatabaseTransaction,
}

impl ShipLock {
    /// Begins a transaction and blocks until the ship's lock is granted.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction cannot be started or the lock
    /// statement fails.
    pub async fn acquire(db: &DatabaseConnection, ship_id: &ShipId) -> Result<Self, DbErr> {
        let txn = db.begin().await?;
        txn.execute(lock_statement(ship_id)).await?;
        Ok(Self { txn })
    }

    /// Returns the underlying transaction for queries under the lock.
    #[must_use]
    pub fn transaction(&self) -> &DatabaseTransaction {
        &self.txn
    }

    /// Commits the transaction, persisting its writes and releasing the lock.
    ///
    /// # Errors
    ///
    /// Returns an error if the commit fails.
    pub async fn commit(self) -> Result<(), DbErr> {
        self.txn.commit().await
    }
}

fn lock_statement(ship_id: &ShipId) -> Statement {
    Statement::from_sql_and_values(
        DbBackend::Postgres,
        ADVISORY_LOCK_SQL,
        [ship_id.as_str().into()],
    )
}
