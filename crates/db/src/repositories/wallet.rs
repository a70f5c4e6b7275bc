//! Wallet repository for the credit/debit ledger.
//!
//! Every balance mutation runs inside a transaction with the affected wallet
//! rows locked exclusively, so the pure arithmetic in the core crate always
//! operates on the balance it will overwrite. Without the lock, two
//! concurrent debits could both pass the overdraft check against the same
//! stale read.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};
use tracing::{info, warn};
use uuid::Uuid;

use velora_core::ledger::{self, Entry, EntryKind, LedgerError};
use velora_shared::config::LedgerConfig;

use crate::entities::{sea_orm_active_enums, user_wallets, wallet_transactions};

/// Input for posting or editing a wallet transaction.
#[derive(Debug, Clone)]
pub struct TransactionInput {
    /// Credit or debit.
    pub kind: EntryKind,
    /// Strictly positive amount.
    pub amount: Decimal,
    /// Human-readable purpose of the entry.
    pub description: String,
    /// Accounting date of the entry.
    pub entry_date: NaiveDate,
}

/// A ledger mutation together with the wallet balance(s) it produced.
#[derive(Debug, Clone)]
pub struct PostedTransaction {
    /// The ledger row.
    pub transaction: wallet_transactions::Model,
    /// The wallet the row now belongs to, with its updated balance.
    pub wallet: user_wallets::Model,
    /// The original wallet when an edit moved the row, with its updated
    /// balance. `None` for postings and same-wallet edits.
    pub source_wallet: Option<user_wallets::Model>,
}

/// Wallet repository.
#[derive(Debug, Clone)]
pub struct WalletRepository {
    db: DatabaseConnection,
    reverse_on_delete: bool,
}

impl WalletRepository {
    /// Creates a new wallet repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection, ledger: &LedgerConfig) -> Self {
        Self {
            db,
            reverse_on_delete: ledger.reverse_on_delete,
        }
    }

    /// Finds a user's wallet of the given type, creating it with a zero
    /// balance on first use.
    ///
    /// # Errors
    ///
    /// Returns an error if the lookup or insert fails.
    pub async fn find_or_create_wallet(
        &self,
        user_id: Uuid,
        wallet_type: &str,
    ) -> Result<user_wallets::Model, LedgerError> {
        let existing = user_wallets::Entity::find()
            .filter(user_wallets::Column::UserId.eq(user_id))
            .filter(user_wallets::Column::WalletType.eq(wallet_type))
            .one(&self.db)
            .await
            .map_err(map_db)?;

        if let Some(wallet) = existing {
            return Ok(wallet);
        }

        let now = Utc::now().into();
        let wallet = user_wallets::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            wallet_type: Set(wallet_type.to_string()),
            balance: Set(Decimal::ZERO),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let wallet = wallet.insert(&self.db).await.map_err(map_db)?;
        info!(wallet_id = %wallet.id, user_id = %user_id, wallet_type, "Wallet created");
        Ok(wallet)
    }

    /// Posts a new transaction to a wallet and updates its balance.
    ///
    /// The wallet row is locked for the duration of the transaction, so the
    /// overdraft check runs against the balance being overwritten.
    ///
    /// # Errors
    ///
    /// Returns an error if the wallet is not found, the amount is not
    /// positive, a debit exceeds the balance, or the database operation
    /// fails. On error nothing is persisted.
    pub async fn post_transaction(
        &self,
        wallet_id: Uuid,
        input: TransactionInput,
    ) -> Result<PostedTransaction, LedgerError> {
        let txn = self.db.begin().await.map_err(map_db)?;

        let wallet = Self::lock_wallet(&txn, wallet_id).await?;
        let new_balance = ledger::post(wallet.balance, input.kind, input.amount)?;

        let now = Utc::now().into();
        let row = wallet_transactions::ActiveModel {
            id: Set(Uuid::new_v4()),
            wallet_id: Set(wallet_id),
            kind: Set(input.kind.into()),
            amount: Set(input.amount),
            description: Set(input.description),
            entry_date: Set(input.entry_date),
            created_at: Set(now),
            updated_at: Set(now),
        };
        let transaction = row.insert(&txn).await.map_err(map_db)?;

        let wallet = Self::set_balance(&txn, wallet, new_balance).await?;

        txn.commit().await.map_err(map_db)?;

        info!(
            transaction_id = %transaction.id,
            wallet_id = %wallet_id,
            kind = %input.kind,
            amount = %transaction.amount,
            balance = %wallet.balance,
            "Wallet transaction posted"
        );
        Ok(PostedTransaction {
            transaction,
            wallet,
            source_wallet: None,
        })
    }

    /// Edits an existing transaction as a reverse-then-apply adjustment.
    ///
    /// The original entry's effect is removed from its wallet, then the new
    /// entry is applied to the destination wallet (which may be the same
    /// one). Row update and balance updates commit atomically; a failed
    /// overdraft check on the new entry rolls back everything.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction or either wallet is not found,
    /// the new amount is not positive, the new debit exceeds the
    /// destination's post-reversal balance, or the database operation fails.
    pub async fn edit_transaction(
        &self,
        transaction_id: Uuid,
        new_wallet_id: Uuid,
        input: TransactionInput,
    ) -> Result<PostedTransaction, LedgerError> {
        let txn = self.db.begin().await.map_err(map_db)?;

        let existing = wallet_transactions::Entity::find_by_id(transaction_id)
            .one(&txn)
            .await
            .map_err(map_db)?
            .ok_or(LedgerError::TransactionNotFound(transaction_id))?;

        let source_id = existing.wallet_id;
        let moved = source_id != new_wallet_id;

        // Lock in id order so two concurrent edits touching the same pair of
        // wallets cannot deadlock.
        let (source, destination) = if moved {
            if source_id < new_wallet_id {
                let source = Self::lock_wallet(&txn, source_id).await?;
                let dest = Self::lock_wallet(&txn, new_wallet_id).await?;
                (source, Some(dest))
            } else {
                let dest = Self::lock_wallet(&txn, new_wallet_id).await?;
                let source = Self::lock_wallet(&txn, source_id).await?;
                (source, Some(dest))
            }
        } else {
            (Self::lock_wallet(&txn, source_id).await?, None)
        };

        let original = Entry::new(existing.kind.clone().into(), existing.amount);
        let outcome = ledger::plan_edit(
            original,
            source.balance,
            destination.as_ref().map(|w| w.balance),
            Entry::new(input.kind, input.amount),
        )?;

        let mut active: wallet_transactions::ActiveModel = existing.into();
        active.wallet_id = Set(new_wallet_id);
        active.kind = Set(input.kind.into());
        active.amount = Set(input.amount);
        active.description = Set(input.description);
        active.entry_date = Set(input.entry_date);
        active.updated_at = Set(Utc::now().into());
        let transaction = active.update(&txn).await.map_err(map_db)?;

        let source = Self::set_balance(&txn, source, outcome.source_balance).await?;
        let (wallet, source_wallet) = match (destination, outcome.destination_balance) {
            (Some(dest), Some(balance)) => {
                let dest = Self::set_balance(&txn, dest, balance).await?;
                (dest, Some(source))
            }
            _ => (source, None),
        };

        txn.commit().await.map_err(map_db)?;

        info!(
            transaction_id = %transaction.id,
            wallet_id = %new_wallet_id,
            moved,
            balance = %wallet.balance,
            "Wallet transaction edited"
        );
        Ok(PostedTransaction {
            transaction,
            wallet,
            source_wallet,
        })
    }

    /// Deletes a transaction row.
    ///
    /// When `ledger.reverse_on_delete` is enabled the entry's effect is
    /// first reversed on the owning wallet; otherwise the balance is left
    /// untouched, preserving the historically observed behavior.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction (or, when reversing, its wallet)
    /// is not found, or the database operation fails.
    pub async fn delete_transaction(&self, transaction_id: Uuid) -> Result<(), LedgerError> {
        let txn = self.db.begin().await.map_err(map_db)?;

        let existing = wallet_transactions::Entity::find_by_id(transaction_id)
            .one(&txn)
            .await
            .map_err(map_db)?
            .ok_or(LedgerError::TransactionNotFound(transaction_id))?;

        if self.reverse_on_delete {
            let wallet = Self::lock_wallet(&txn, existing.wallet_id).await?;
            let new_balance =
                ledger::reverse(wallet.balance, existing.kind.clone().into(), existing.amount)?;
            Self::set_balance(&txn, wallet, new_balance).await?;
        }

        let wallet_id = existing.wallet_id;
        wallet_transactions::Entity::delete_by_id(transaction_id)
            .exec(&txn)
            .await
            .map_err(map_db)?;

        txn.commit().await.map_err(map_db)?;

        info!(
            transaction_id = %transaction_id,
            wallet_id = %wallet_id,
            reversed = self.reverse_on_delete,
            "Wallet transaction deleted"
        );
        Ok(())
    }

    /// Recomputes a wallet's balance from its ledger rows.
    ///
    /// Intended for an operator-run reconciliation pass, not the request
    /// path. When the stored balance has drifted from the ledger the stored
    /// value is corrected and the drift logged.
    ///
    /// # Errors
    ///
    /// Returns an error if the wallet is not found or the database
    /// operation fails.
    pub async fn recompute_balance(
        &self,
        wallet_id: Uuid,
    ) -> Result<user_wallets::Model, LedgerError> {
        let txn = self.db.begin().await.map_err(map_db)?;

        let wallet = Self::lock_wallet(&txn, wallet_id).await?;

        let rows = wallet_transactions::Entity::find()
            .filter(wallet_transactions::Column::WalletId.eq(wallet_id))
            .all(&txn)
            .await
            .map_err(map_db)?;

        let net = rows.iter().fold(Decimal::ZERO, |acc, row| match row.kind {
            sea_orm_active_enums::EntryKind::Credit => acc + row.amount,
            sea_orm_active_enums::EntryKind::Debit => acc - row.amount,
        });

        if net == wallet.balance {
            txn.commit().await.map_err(map_db)?;
            return Ok(wallet);
        }

        warn!(
            wallet_id = %wallet_id,
            stored = %wallet.balance,
            recomputed = %net,
            "Wallet balance drifted from ledger, correcting"
        );
        let wallet = Self::set_balance(&txn, wallet, net).await?;
        txn.commit().await.map_err(map_db)?;
        Ok(wallet)
    }

    /// Lists a user's wallets.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list_wallets(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<user_wallets::Model>, LedgerError> {
        user_wallets::Entity::find()
            .filter(user_wallets::Column::UserId.eq(user_id))
            .order_by_asc(user_wallets::Column::WalletType)
            .all(&self.db)
            .await
            .map_err(map_db)
    }

    /// Lists a wallet's transactions, newest entry date first.
    ///
    /// # Errors
    ///
    /// Returns an error if the wallet is not found or the query fails.
    pub async fn list_transactions(
        &self,
        wallet_id: Uuid,
    ) -> Result<Vec<wallet_transactions::Model>, LedgerError> {
        user_wallets::Entity::find_by_id(wallet_id)
            .one(&self.db)
            .await
            .map_err(map_db)?
            .ok_or(LedgerError::WalletNotFound(wallet_id))?;

        wallet_transactions::Entity::find()
            .filter(wallet_transactions::Column::WalletId.eq(wallet_id))
            .order_by_desc(wallet_transactions::Column::EntryDate)
            .order_by_desc(wallet_transactions::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(map_db)
    }

    /// Loads a wallet row with an exclusive lock (`SELECT ... FOR UPDATE`).
    async fn lock_wallet<C>(conn: &C, wallet_id: Uuid) -> Result<user_wallets::Model, LedgerError>
    where
        C: ConnectionTrait,
    {
        user_wallets::Entity::find_by_id(wallet_id)
            .lock_exclusive()
            .one(conn)
            .await
            .map_err(map_db)?
            .ok_or(LedgerError::WalletNotFound(wallet_id))
    }

    async fn set_balance<C>(
        conn: &C,
        wallet: user_wallets::Model,
        balance: Decimal,
    ) -> Result<user_wallets::Model, LedgerError>
    where
        C: ConnectionTrait,
    {
        let mut active: user_wallets::ActiveModel = wallet.into();
        active.balance = Set(balance);
        active.updated_at = Set(Utc::now().into());
        active.update(conn).await.map_err(map_db)
    }
}

fn map_db(e: sea_orm::DbErr) -> LedgerError {
    LedgerError::Database(e.to_string())
}
