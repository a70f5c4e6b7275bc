//! Router-level tests that need no database.
//!
//! Handlers that reject before touching a repository (health, missing
//! identity) are exercised against a disconnected state.

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tower::ServiceExt;
use uuid::Uuid;

use velora_api::{AppState, create_router};
use velora_shared::LedgerConfig;

fn test_router() -> Router {
    create_router(AppState {
        db: Arc::new(DatabaseConnection::Disconnected),
        ledger: LedgerConfig::default(),
    })
}

#[tokio::test]
async fn test_health_endpoint() {
    let response = test_router()
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["service"], "velora-api");
}

#[tokio::test]
async fn test_protected_route_requires_identity() {
    let response = test_router()
        .oneshot(
            Request::builder()
                .uri("/api/v1/wallets")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["error"], "missing_identity");
}

#[tokio::test]
async fn test_malformed_identity_rejected() {
    let response = test_router()
        .oneshot(
            Request::builder()
                .uri("/api/v1/offers")
                .header("x-user-id", "not-a-uuid")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let response = test_router()
        .oneshot(
            Request::builder()
                .uri("/api/v1/nope")
                .header("x-user-id", Uuid::new_v4().to_string())
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
