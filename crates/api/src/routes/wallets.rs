//! Wallet and ledger transaction routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, patch, post},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;
use tracing::error;
use uuid::Uuid;

use crate::{AppState, middleware::AuthUser};
use velora_core::ledger::{EntryKind, LedgerError};
use velora_db::WalletRepository;
use velora_db::repositories::wallet::{PostedTransaction, TransactionInput};

/// Creates the wallets router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/wallets", post(create_wallet))
        .route("/wallets", get(list_wallets))
        .route("/wallets/{wallet_id}/transactions", post(post_transaction))
        .route("/wallets/{wallet_id}/transactions", get(list_transactions))
        .route("/transactions/{tx_id}", patch(edit_transaction))
        .route("/transactions/{tx_id}", delete(delete_transaction))
}

/// Request payload for creating (or fetching) a wallet.
#[derive(Debug, Deserialize)]
pub struct CreateWalletRequest {
    /// Wallet type, e.g. "cash" or "bank".
    pub wallet_type: String,
}

/// Request payload for posting a transaction.
#[derive(Debug, Deserialize)]
pub struct PostTransactionRequest {
    /// Credit or debit.
    pub kind: EntryKind,
    /// Strictly positive amount.
    pub amount: Decimal,
    /// Human-readable purpose of the entry.
    pub description: String,
    /// Accounting date of the entry.
    pub entry_date: NaiveDate,
}

/// Request payload for editing a transaction.
#[derive(Debug, Deserialize)]
pub struct EditTransactionRequest {
    /// The wallet the entry should belong to after the edit.
    pub wallet_id: Uuid,
    /// Credit or debit.
    pub kind: EntryKind,
    /// Strictly positive amount.
    pub amount: Decimal,
    /// Human-readable purpose of the entry.
    pub description: String,
    /// Accounting date of the entry.
    pub entry_date: NaiveDate,
}

/// POST /wallets - Find or create the acting user's wallet of a type.
async fn create_wallet(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateWalletRequest>,
) -> impl IntoResponse {
    let repo = WalletRepository::new((*state.db).clone(), &state.ledger);

    match repo
        .find_or_create_wallet(auth.user_id(), &payload.wallet_type)
        .await
    {
        Ok(wallet) => (StatusCode::CREATED, Json(json!({ "wallet": wallet }))).into_response(),
        Err(e) => error_response(&e),
    }
}

/// GET /wallets - List the acting user's wallets.
async fn list_wallets(State(state): State<AppState>, auth: AuthUser) -> impl IntoResponse {
    let repo = WalletRepository::new((*state.db).clone(), &state.ledger);

    match repo.list_wallets(auth.user_id()).await {
        Ok(wallets) => Json(json!({ "wallets": wallets })).into_response(),
        Err(e) => error_response(&e),
    }
}

/// POST `/wallets/{wallet_id}/transactions` - Post a credit or debit.
async fn post_transaction(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(wallet_id): Path<Uuid>,
    Json(payload): Json<PostTransactionRequest>,
) -> impl IntoResponse {
    let repo = WalletRepository::new((*state.db).clone(), &state.ledger);

    let input = TransactionInput {
        kind: payload.kind,
        amount: payload.amount,
        description: payload.description,
        entry_date: payload.entry_date,
    };

    match repo.post_transaction(wallet_id, input).await {
        Ok(posted) => (StatusCode::CREATED, posted_json(&posted)).into_response(),
        Err(e) => error_response(&e),
    }
}

/// GET `/wallets/{wallet_id}/transactions` - List a wallet's ledger rows.
async fn list_transactions(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(wallet_id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = WalletRepository::new((*state.db).clone(), &state.ledger);

    match repo.list_transactions(wallet_id).await {
        Ok(transactions) => Json(json!({ "transactions": transactions })).into_response(),
        Err(e) => error_response(&e),
    }
}

/// PATCH `/transactions/{tx_id}` - Edit a transaction as a
/// reverse-then-apply adjustment.
async fn edit_transaction(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(tx_id): Path<Uuid>,
    Json(payload): Json<EditTransactionRequest>,
) -> impl IntoResponse {
    let repo = WalletRepository::new((*state.db).clone(), &state.ledger);

    let input = TransactionInput {
        kind: payload.kind,
        amount: payload.amount,
        description: payload.description,
        entry_date: payload.entry_date,
    };

    match repo.edit_transaction(tx_id, payload.wallet_id, input).await {
        Ok(posted) => posted_json(&posted).into_response(),
        Err(e) => error_response(&e),
    }
}

/// DELETE `/transactions/{tx_id}` - Delete a transaction row.
async fn delete_transaction(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(tx_id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = WalletRepository::new((*state.db).clone(), &state.ledger);

    match repo.delete_transaction(tx_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => error_response(&e),
    }
}

fn posted_json(posted: &PostedTransaction) -> Json<serde_json::Value> {
    Json(json!({
        "transaction": posted.transaction,
        "wallet": posted.wallet,
        "source_wallet": posted.source_wallet,
    }))
}

fn error_response(err: &LedgerError) -> Response {
    let status = StatusCode::from_u16(err.status_code())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    let message = match err {
        LedgerError::Database(_) | LedgerError::UnknownEntryKind(_) => {
            error!(error = %err, "Wallet operation failed");
            "An error occurred".to_string()
        }
        _ => err.to_string(),
    };

    (
        status,
        Json(json!({ "error": err.error_code(), "message": message })),
    )
        .into_response()
}
