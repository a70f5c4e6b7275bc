//! Offer lifecycle routes.

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
use velora_core::offer::OfferError;
use velora_db::OfferRepository;
use velora_db::repositories::offer::CreateOfferInput;

/// Creates the offers router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/offers", post(create_offer))
        .route("/offers", get(list_offers))
        .route("/offers/{offer_id}/accept", post(accept_offer))
        .route("/offers/{offer_id}/reject", post(reject_offer))
}

/// Request payload for creating an offer.
#[derive(Debug, Deserialize)]
pub struct CreateOfferRequest {
    /// The lead the offer targets.
    pub user_id: Uuid,
    /// The proposed product price.
    pub product_price_id: Uuid,
}

/// POST /offers - Extend a pending offer to a lead.
async fn create_offer(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateOfferRequest>,
) -> impl IntoResponse {
    let repo = OfferRepository::new((*state.db).clone());

    match repo
        .create_offer(CreateOfferInput {
            user_id: payload.user_id,
            product_price_id: payload.product_price_id,
            created_by: auth.user_id(),
        })
        .await
    {
        Ok(offer) => (StatusCode::CREATED, Json(json!({ "offer": offer }))).into_response(),
        Err(e) => error_response(&e),
    }
}

/// GET /offers - List the acting user's offers.
async fn list_offers(State(state): State<AppState>, auth: AuthUser) -> impl IntoResponse {
    let repo = OfferRepository::new((*state.db).clone());

    match repo.list_offers(auth.user_id()).await {
        Ok(offers) => Json(json!({ "offers": offers })).into_response(),
        Err(e) => error_response(&e),
    }
}

/// POST `/offers/{offer_id}/accept` - Accept a pending offer.
///
/// On success the response carries both the accepted offer and the
/// subscription created from it.
async fn accept_offer(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(offer_id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = OfferRepository::new((*state.db).clone());

    match repo.accept_offer(offer_id, auth.user_id()).await {
        Ok(accepted) => Json(json!({
            "offer": accepted.offer,
            "subscription": accepted.subscription,
        }))
        .into_response(),
        Err(e) => error_response(&e),
    }
}

/// POST `/offers/{offer_id}/reject` - Reject a pending offer.
async fn reject_offer(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(offer_id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = OfferRepository::new((*state.db).clone());

    match repo.reject_offer(offer_id, auth.user_id()).await {
        Ok(offer) => Json(json!({ "offer": offer })).into_response(),
        Err(e) => error_response(&e),
    }
}

fn error_response(err: &OfferError) -> Response {
    let status = StatusCode::from_u16(err.status_code())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    let message = if matches!(err, OfferError::Database(_)) {
        error!(error = %err, "Offer operation failed");
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
