//! Authentication module
//!
//! Provides username/password authentication.
//! - Argon2id password hashing
//! - JWT access token issuance and verification
//! - Registration and login flows

mod jwt;
mod password;
mod service;

pub use jwt::{Claims, TokenError, TokenIssuer, DEFAULT_ACCESS_TOKEN_TTL_SECONDS};
pub use password::{hash_password, verify_password, PasswordError};
pub use service::{AuthError, AuthService};
