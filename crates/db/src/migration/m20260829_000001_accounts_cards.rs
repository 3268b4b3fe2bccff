//! Initial migration: accounts and cards tables.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(ACCOUNTS_CARDS_SQL).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(
            "DROP TABLE IF EXISTS cards CASCADE; DROP TABLE IF EXISTS accounts CASCADE;",
        )
        .await?;
        Ok(())
    }
}

const ACCOUNTS_CARDS_SQL: &str = r"
-- Accounts (end-user contracts), keyed by e-mail
CREATE TABLE accounts (
    email VARCHAR(255) PRIMARY KEY,
    contract_id VARCHAR(14),
    status VARCHAR(11) NOT NULL DEFAULT 'CREATED',
    version BIGINT NOT NULL DEFAULT 0,
    last_updated TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_accounts_status CHECK (status IN ('CREATED', 'ACTIVATED', 'DEACTIVATED')),
    -- EMAID shape: 2 letters + 3 + 9 alphanumerics
    CONSTRAINT chk_accounts_contract CHECK (
        contract_id IS NULL OR contract_id ~ '^[A-Z]{2}[0-9A-Z]{3}[0-9A-Z]{9}$'
    )
);

-- Cards (physical access tokens), at most one owning account
CREATE TABLE cards (
    rfid_uid VARCHAR(14) PRIMARY KEY,
    account_email VARCHAR(255) REFERENCES accounts(email),
    visible_number VARCHAR(19) NOT NULL,
    status VARCHAR(11) NOT NULL DEFAULT 'CREATED',
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_cards_status CHECK (
        status IN ('CREATED', 'ASSIGNED', 'ACTIVATED', 'DEACTIVATED')
    ),
    CONSTRAINT chk_cards_visible_number CHECK (
        visible_number ~ '^\d{4}-\d{4}-\d{4}-\d{4}$'
    )
);

-- Visible number is globally unique
CREATE UNIQUE INDEX idx_cards_visible_number ON cards(visible_number);

-- Owned-card lookup for the account cascade
CREATE INDEX idx_cards_account ON cards(account_email) WHERE account_email IS NOT NULL;

-- Last-updated window listing
CREATE INDEX idx_accounts_last_updated ON accounts(last_updated);
";
