//! Authentication middleware
//!
//! Extractor for JWT bearer verification. Handlers that take an
//! `AuthenticatedUser` argument are never entered unless the request carried
//! a valid token.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use std::sync::Arc;

use crate::auth::{AuthError, AuthService};
use crate::error::ApiError;

/// Identity resolved from a verified access token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub username: String,
}

/// Extractor for authenticated users
///
/// This extractor verifies the JWT token from the Authorization header
/// and extracts the subject. An absent header, a non-`Bearer` scheme, an
/// expired token and a forged token all produce a 401; the body only
/// distinguishes "no credentials" from "credentials rejected".
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(user: AuthenticatedUser) -> impl IntoResponse {
///     format!("Hello, {}", user.username)
/// }
/// ```
#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    Arc<AuthService>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        // Extract the Authorization header
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|rejection| {
                    tracing::debug!(reason = %rejection, "Missing or malformed Authorization header");
                    ApiError::from(AuthError::MissingToken)
                })?;

        // Get the auth service from state
        let auth_service = Arc::<AuthService>::from_ref(state);

        // Verify the token
        let username = auth_service.authenticate(bearer.token()).map_err(|e| {
            tracing::debug!(reason = %e, "Bearer token rejected");
            ApiError::from(e)
        })?;

        Ok(AuthenticatedUser { username })
    }
}
