//! API route definitions.

use axum::Router;

use crate::AppState;

pub mod health;
pub mod offers;
pub mod subscriptions;
pub mod wallets;

/// Creates the API router with all routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(offers::routes())
        .merge(subscriptions::routes())
        .merge(wallets::routes())
}
