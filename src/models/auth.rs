//! Account models and auth request/response DTOs

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Registered account as persisted in the credential store
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone, PartialEq, Eq)]
pub struct UserAccount {
    pub username: String,
    pub email: String,
    pub full_name: Option<String>,
    /// Argon2 PHC string, never the plaintext
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub disabled: bool,
}

// ============================================================================
// Request/Response DTOs
// ============================================================================

/// Request to register a new account
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, message = "username must not be empty"))]
    pub username: String,
    #[validate(email(message = "email must be a valid address"))]
    pub email: String,
    #[validate(length(min = 1, message = "password must not be empty"))]
    pub password: String,
    pub full_name: Option<String>,
    #[serde(default)]
    pub disabled: bool,
}

/// Username/password login
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "username must not be empty"))]
    pub username: String,
    #[validate(length(min = 1, message = "password must not be empty"))]
    pub password: String,
}

/// Token issued on successful login
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

/// Plain acknowledgement body
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
