//! Authentication HTTP handlers
//!
//! Endpoints for password-based registration and login.

use axum::{extract::State, Json};

use crate::error::ApiError;
use crate::extract::ValidatedJson;
use crate::models::{LoginRequest, MessageResponse, RegisterRequest, TokenResponse};
use crate::state::AppState;

/// POST /auth/register - Create an account
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<RegisterRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.auth_service.register(req).await?;

    Ok(Json(MessageResponse::new("User registered successfully")))
}

/// POST /auth/login - Exchange credentials for an access token
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let tokens = state.auth_service.login(&req).await?;

    Ok(Json(tokens))
}
