//! Authentication service
//!
//! Registration and login over the credential store.

use std::sync::{Arc, OnceLock};

use thiserror::Error;

use crate::models::{LoginRequest, RegisterRequest, TokenResponse, UserAccount};
use crate::store::{StoreError, UserStore};

use super::jwt::{TokenError, TokenIssuer};
use super::password::{hash_password, verify_password, PasswordError};

/// Verified against when the username is unknown, so that a miss costs the
/// same as a wrong password.
static DUMMY_HASH: OnceLock<String> = OnceLock::new();

fn dummy_hash() -> &'static str {
    DUMMY_HASH.get_or_init(|| {
        hash_password("dummy_startup_value").unwrap_or_else(|_| {
            "$argon2id$v=19$m=19456,t=2,p=1$dW5rbm93bg$dW5rbm93bg".to_string()
        })
    })
}

/// Auth service errors
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Account is disabled")]
    AccountDisabled,

    #[error("Username or email already taken")]
    AlreadyRegistered,

    #[error("Missing or malformed bearer token")]
    MissingToken,

    #[error("Token rejected: {0}")]
    InvalidToken(#[from] TokenError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("{0}")]
    Hashing(#[from] PasswordError),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Authentication service
#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserStore>,
    tokens: TokenIssuer,
}

impl AuthService {
    /// Create a new AuthService
    ///
    /// Computes the dummy hash up front so the first unknown-user login does
    /// not pay for it.
    pub fn new(users: Arc<dyn UserStore>, tokens: TokenIssuer) -> Self {
        dummy_hash();
        Self { users, tokens }
    }

    /// Register a new account
    ///
    /// Check-then-insert: two concurrent registrations of the same username
    /// can both pass the check and both be stored.
    pub async fn register(&self, request: RegisterRequest) -> Result<(), AuthError> {
        if self
            .users
            .find_by_username_or_email(&request.username, &request.email)
            .await?
            .is_some()
        {
            tracing::debug!(username = %request.username, "Registration rejected, username or email taken");
            return Err(AuthError::AlreadyRegistered);
        }

        let password_hash = hash_blocking(request.password).await?;

        let account = UserAccount {
            username: request.username,
            email: request.email,
            full_name: request.full_name,
            password_hash,
            disabled: request.disabled,
        };
        self.users.insert(&account).await?;

        tracing::info!(username = %account.username, "User registered");
        Ok(())
    }

    /// Check credentials and mint an access token
    pub async fn login(&self, request: &LoginRequest) -> Result<TokenResponse, AuthError> {
        let account = self.users.find_by_username(&request.username).await?;

        let Some(account) = account else {
            // Burn the same verification time as a real account
            let _ = verify_blocking(request.password.clone(), dummy_hash()).await;
            tracing::debug!(username = %request.username, "Login failed, unknown username");
            return Err(AuthError::InvalidCredentials);
        };

        if !verify_blocking(request.password.clone(), account.password_hash.clone()).await? {
            tracing::debug!(username = %request.username, "Login failed, wrong password");
            return Err(AuthError::InvalidCredentials);
        }

        if account.disabled {
            tracing::debug!(username = %request.username, "Login refused, account disabled");
            return Err(AuthError::AccountDisabled);
        }

        let access_token = self.tokens.issue(&account.username)?;

        tracing::info!(username = %account.username, "User logged in");
        Ok(TokenResponse {
            access_token,
            token_type: "bearer".to_string(),
            expires_in: self.tokens.ttl_seconds(),
        })
    }

    /// Resolve the subject of a bearer token
    pub fn authenticate(&self, token: &str) -> Result<String, AuthError> {
        Ok(self.tokens.verify_subject(token)?)
    }
}

/// Argon2 is CPU- and memory-bound; keep it off the async workers
async fn hash_blocking(password: String) -> Result<String, AuthError> {
    tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| AuthError::Internal(format!("Password hashing task failed: {}", e)))?
        .map_err(AuthError::from)
}

async fn verify_blocking<H>(password: String, hash: H) -> Result<bool, AuthError>
where
    H: AsRef<str> + Send + 'static,
{
    tokio::task::spawn_blocking(move || verify_password(&password, hash.as_ref()))
        .await
        .map_err(|e| AuthError::Internal(format!("Password verification task failed: {}", e)))?
        .map_err(AuthError::from)
}
