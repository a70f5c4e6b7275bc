//! Initial database migration.
//!
//! Creates the enums, tables, and indexes for the offer/subscription
//! lifecycle and the wallet ledger.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        db.execute_unprepared(ENUMS_SQL).await?;
        db.execute_unprepared(USERS_SQL).await?;
        db.execute_unprepared(PRODUCT_PRICES_SQL).await?;
        db.execute_unprepared(OFFERS_SQL).await?;
        db.execute_unprepared(SUBSCRIPTIONS_SQL).await?;
        db.execute_unprepared(USER_WALLETS_SQL).await?;
        db.execute_unprepared(WALLET_TRANSACTIONS_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        db.execute_unprepared(
            r"
            DROP TABLE IF EXISTS wallet_transactions;
            DROP TABLE IF EXISTS user_wallets;
            DROP TABLE IF EXISTS subscriptions;
            DROP TABLE IF EXISTS offers;
            DROP TABLE IF EXISTS product_prices;
            DROP TABLE IF EXISTS users;
            DROP TYPE IF EXISTS entry_kind;
            DROP TYPE IF EXISTS subscription_status;
            DROP TYPE IF EXISTS offer_status;
            ",
        )
        .await?;

        Ok(())
    }
}

const ENUMS_SQL: &str = r"
CREATE TYPE offer_status AS ENUM ('pending', 'accepted', 'rejected');

CREATE TYPE subscription_status AS ENUM (
    'pending_approval', 'approved', 'rejected', 'active', 'cancelled'
);

CREATE TYPE entry_kind AS ENUM ('credit', 'debit');
";

const USERS_SQL: &str = r"
CREATE TABLE users (
    id UUID PRIMARY KEY,
    email VARCHAR(255) NOT NULL UNIQUE,
    name VARCHAR(255) NOT NULL,
    is_customer BOOLEAN NOT NULL DEFAULT FALSE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);
";

const PRODUCT_PRICES_SQL: &str = r"
CREATE TABLE product_prices (
    id UUID PRIMARY KEY,
    product_name VARCHAR(255) NOT NULL,
    price NUMERIC(19, 4) NOT NULL CHECK (price >= 0),
    billing_cycle_months INTEGER NOT NULL CHECK (billing_cycle_months > 0),
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);
";

const OFFERS_SQL: &str = r"
CREATE TABLE offers (
    id UUID PRIMARY KEY,
    user_id UUID NOT NULL REFERENCES users(id),
    product_price_id UUID NOT NULL REFERENCES product_prices(id),
    created_by UUID NOT NULL REFERENCES users(id),
    offer_number VARCHAR(32) NOT NULL UNIQUE,
    status offer_status NOT NULL DEFAULT 'pending',
    accepted_at TIMESTAMPTZ,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE INDEX idx_offers_user ON offers(user_id);
CREATE INDEX idx_offers_status ON offers(status);
";

const SUBSCRIPTIONS_SQL: &str = r"
CREATE TABLE subscriptions (
    id UUID PRIMARY KEY,
    user_id UUID NOT NULL REFERENCES users(id),
    product_price_id UUID NOT NULL REFERENCES product_prices(id),
    approved_by UUID REFERENCES users(id),
    subscription_number VARCHAR(32) NOT NULL UNIQUE,
    start_date DATE NOT NULL,
    end_date DATE NOT NULL,
    next_billing_date DATE NOT NULL,
    status subscription_status NOT NULL DEFAULT 'pending_approval',
    auto_renew BOOLEAN NOT NULL DEFAULT FALSE,
    approval_note TEXT,
    approved_at TIMESTAMPTZ,
    rejection_note TEXT,
    rejected_at TIMESTAMPTZ,
    cancellation_note TEXT,
    cancelled_at TIMESTAMPTZ,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE INDEX idx_subscriptions_user ON subscriptions(user_id);
CREATE INDEX idx_subscriptions_status ON subscriptions(status);
CREATE INDEX idx_subscriptions_next_billing ON subscriptions(next_billing_date);
";

const USER_WALLETS_SQL: &str = r"
CREATE TABLE user_wallets (
    id UUID PRIMARY KEY,
    user_id UUID NOT NULL REFERENCES users(id),
    wallet_type VARCHAR(64) NOT NULL,
    balance NUMERIC(19, 4) NOT NULL DEFAULT 0,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    UNIQUE (user_id, wallet_type)
);
";

const WALLET_TRANSACTIONS_SQL: &str = r"
CREATE TABLE wallet_transactions (
    id UUID PRIMARY KEY,
    wallet_id UUID NOT NULL REFERENCES user_wallets(id),
    kind entry_kind NOT NULL,
    amount NUMERIC(19, 4) NOT NULL CHECK (amount > 0),
    description TEXT NOT NULL,
    entry_date DATE NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE INDEX idx_wallet_transactions_wallet ON wallet_transactions(wallet_id);
CREATE INDEX idx_wallet_transactions_date ON wallet_transactions(entry_date);
";
