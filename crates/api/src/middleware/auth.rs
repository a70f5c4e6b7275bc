//! Acting-identity extraction for protected routes.
//!
//! Authentication itself happens upstream: the gateway verifies the caller
//! and forwards the identity as an `x-user-id` header. This extractor only
//! requires that the header is present and a valid UUID.

use axum::{
    Json,
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
};
use serde_json::json;
use uuid::Uuid;

/// Header carrying the gateway-verified acting user id.
pub const USER_ID_HEADER: &str = "x-user-id";

/// Extractor for the acting user's identity.
///
/// Use this in handlers to get the acting user:
///
/// ```ignore
/// async fn handler(auth: AuthUser) -> impl IntoResponse {
///     let user_id = auth.user_id();
///     // ...
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser(pub Uuid);

impl AuthUser {
    /// Returns the acting user's id.
    #[must_use]
    pub const fn user_id(&self) -> Uuid {
        self.0
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<serde_json::Value>);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|h| h.to_str().ok());

        let Some(value) = header else {
            return Err((
                StatusCode::UNAUTHORIZED,
                Json(json!({
                    "error": "missing_identity",
                    "message": "x-user-id header is required"
                })),
            ));
        };

        match Uuid::parse_str(value) {
            Ok(user_id) => Ok(Self(user_id)),
            Err(_) => Err((
                StatusCode::UNAUTHORIZED,
                Json(json!({
                    "error": "invalid_identity",
                    "message": "x-user-id header must be a valid UUID"
                })),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    async fn extract(request: Request<()>) -> Result<AuthUser, StatusCode> {
        let (mut parts, ()) = request.into_parts();
        AuthUser::from_request_parts(&mut parts, &())
            .await
            .map_err(|(status, _)| status)
    }

    #[tokio::test]
    async fn test_extracts_valid_user_id() {
        let id = Uuid::new_v4();
        let request = Request::builder()
            .header(USER_ID_HEADER, id.to_string())
            .body(())
            .unwrap();

        let auth = extract(request).await.unwrap();
        assert_eq!(auth.user_id(), id);
    }

    #[tokio::test]
    async fn test_missing_header_is_unauthorized() {
        let request = Request::builder().body(()).unwrap();
        assert_eq!(extract(request).await, Err(StatusCode::UNAUTHORIZED));
    }

    #[tokio::test]
    async fn test_malformed_header_is_unauthorized() {
        let request = Request::builder()
            .header(USER_ID_HEADER, "not-a-uuid")
            .body(())
            .unwrap();
        assert_eq!(extract(request).await, Err(StatusCode::UNAUTHORIZED));
    }
}
