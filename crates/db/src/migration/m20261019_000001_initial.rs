//! Initial schema: route records, compliance balances, and the banking ledger.
//!
//! `bank_entries` is append-only at the storage level: a trigger rejects any
//! UPDATE or DELETE, so balances can only ever be derived from history.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(SCHEMA_SQL).await?;
        db.execute_unprepared(APPEND_ONLY_SQL).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_SQL).await?;
        Ok(())
    }
}

const SCHEMA_SQL: &str = r"
-- One record per (ship, year)
CREATE TABLE routes (
    id UUID PRIMARY KEY,
    ship_id VARCHAR(64) NOT NULL,
    year INTEGER NOT NULL,
    vessel_type VARCHAR(64) NOT NULL,
    fuel_type VARCHAR(64) NOT NULL,
    ghg_intensity NUMERIC(12, 4) NOT NULL,
    fuel_consumption NUMERIC(20, 4) NOT NULL,
    distance NUMERIC(20, 4) NOT NULL,
    total_emissions NUMERIC(20, 4) NOT NULL,
    is_baseline BOOLEAN NOT NULL DEFAULT FALSE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT uq_routes_ship_year UNIQUE (ship_id, year)
);

-- At most one baseline per ship
CREATE UNIQUE INDEX uq_routes_baseline_per_ship ON routes(ship_id) WHERE is_baseline;

-- Route listing order
CREATE INDEX idx_routes_year_ship ON routes(year, ship_id);

-- Precomputed compliance balance per (ship, year)
CREATE TABLE ship_compliance (
    id UUID PRIMARY KEY,
    ship_id VARCHAR(64) NOT NULL,
    year INTEGER NOT NULL,
    vessel_type VARCHAR(64) NOT NULL,
    target_intensity NUMERIC(12, 4) NOT NULL,
    actual_intensity NUMERIC(12, 4) NOT NULL,
    fuel_consumption NUMERIC(20, 4) NOT NULL,
    energy_in_scope NUMERIC(28, 4) NOT NULL,
    cb_gco2eq NUMERIC(28, 4) NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT uq_ship_compliance_ship_year UNIQUE (ship_id, year)
);

-- Banking ledger; positive = deposit, negative = withdrawal
CREATE TABLE bank_entries (
    id UUID PRIMARY KEY,
    ship_id VARCHAR(64) NOT NULL,
    year INTEGER NOT NULL,
    amount_gco2eq NUMERIC(28, 4) NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT clock_timestamp(),
    CONSTRAINT chk_bank_entries_nonzero CHECK (amount_gco2eq <> 0)
);

-- Per-ship replay and totals
CREATE INDEX idx_bank_entries_ship ON bank_entries(ship_id, created_at, id);
";

const APPEND_ONLY_SQL: &str = r"
CREATE OR REPLACE FUNCTION prevent_bank_entry_mutation()
RETURNS TRIGGER AS $$
BEGIN
    RAISE EXCEPTION 'bank_entries is append-only: % rejected', TG_OP;
END;
$$ LANGUAGE plpgsql;

CREATE TRIGGER trg_bank_entries_append_only
    BEFORE UPDATE OR DELETE ON bank_entries
    FOR EACH ROW EXECUTE FUNCTION prevent_bank_entry_mutation();
";

const DROP_SQL: &str = r"
DROP TRIGGER IF EXISTS trg_bank_entries_append_only ON bank_entries;
DROP FUNCTION IF EXISTS prevent_bank_entry_mutation();
DROP TABLE IF EXISTS bank_entries CASCADE;
DROP TABLE IF EXISTS ship_compliance CASCADE;
DROP TABLE IF EXISTS routes CASCADE;
";
