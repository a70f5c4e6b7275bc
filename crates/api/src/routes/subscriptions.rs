//! Subscription approval workflow routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Deserialize;
use serde_json::json;
use tracing::error;
use uuid::Uuid;

use crate::{AppState, middleware::AuthUser};
use velora_core::subscription::SubscriptionError;
use velora_db::SubscriptionRepository;

/// Creates the subscriptions router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/subscriptions", post(self_apply))
        .route("/subscriptions", get(list_subscriptions))
        .route("/subscriptions/{sub_id}/approve", post(approve))
        .route("/subscriptions/{sub_id}/reject", post(reject))
        .route("/subscriptions/{sub_id}/cancel", post(cancel))
}

/// Request payload for applying for a subscription.
#[derive(Debug, Deserialize)]
pub struct SelfApplyRequest {
    /// The product price to subscribe to.
    pub product_price_id: Uuid,
}

/// Request payload for approving a subscription.
#[derive(Debug, Default, Deserialize)]
pub struct ApproveRequest {
    /// Optional note from the approver.
    #[serde(default)]
    pub note: Option<String>,
}

/// Request payload for rejecting or cancelling a subscription.
#[derive(Debug, Deserialize)]
pub struct NoteRequest {
    /// Mandatory justification.
    pub note: String,
}

/// POST /subscriptions - Apply for a subscription directly.
async fn self_apply(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<SelfApplyRequest>,
) -> impl IntoResponse {
    let repo = SubscriptionRepository::new((*state.db).clone());

    match repo
        .self_apply(auth.user_id(), payload.product_price_id)
        .await
    {
        Ok(subscription) => (
            StatusCode::CREATED,
            Json(json!({ "subscription": subscription })),
        )
            .into_response(),
        Err(e) => error_response(&e),
    }
}

/// GET /subscriptions - List the acting user's subscriptions.
async fn list_subscriptions(State(state): State<AppState>, auth: AuthUser) -> impl IntoResponse {
    let repo = SubscriptionRepository::new((*state.db).clone());

    match repo.list_for_user(auth.user_id()).await {
        Ok(subscriptions) => Json(json!({ "subscriptions": subscriptions })).into_response(),
        Err(e) => error_response(&e),
    }
}

/// POST `/subscriptions/{sub_id}/approve` - Approve a pending subscription.
///
/// Also grants the subscriber the customer capability on first approval.
async fn approve(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(sub_id): Path<Uuid>,
    payload: Option<Json<ApproveRequest>>,
) -> impl IntoResponse {
    let repo = SubscriptionRepository::new((*state.db).clone());
    let note = payload.and_then(|Json(p)| p.note);

    match repo.approve(sub_id, auth.user_id(), note).await {
        Ok(subscription) => Json(json!({ "subscription": subscription })).into_response(),
        Err(e) => error_response(&e),
    }
}

/// POST `/subscriptions/{sub_id}/reject` - Reject a pending subscription.
async fn reject(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(sub_id): Path<Uuid>,
    Json(payload): Json<NoteRequest>,
) -> impl IntoResponse {
    let repo = SubscriptionRepository::new((*state.db).clone());

    match repo.reject(sub_id, payload.note).await {
        Ok(subscription) => Json(json!({ "subscription": subscription })).into_response(),
        Err(e) => error_response(&e),
    }
}

/// POST `/subscriptions/{sub_id}/cancel` - Cancel an active subscription.
async fn cancel(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(sub_id): Path<Uuid>,
    Json(payload): Json<NoteRequest>,
) -> impl IntoResponse {
    let repo = SubscriptionRepository::new((*state.db).clone());

    match repo.cancel(sub_id, payload.note).await {
        Ok(subscription) => Json(json!({ "subscription": subscription })).into_response(),
        Err(e) => error_response(&e),
    }
}

fn error_response(err: &SubscriptionError) -> Response {
    let status = StatusCode::from_u16(err.status_code())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    let message = if matches!(err, SubscriptionError::Database(_)) {
        error!(error = %err, "Subscription operation failed");
        "An error occurred".to_string()
    } else {
        err.to_string()
    };

    (
        status,
        Json(json!({ "error": err.error_code(), "message": message })),
    )
        .into_response()
}
