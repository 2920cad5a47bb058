//! API handlers for the recipe organizer

pub mod auth;
pub mod recipes;
pub mod system;

// Re-export AuthenticatedUser from middleware for handler use
pub use crate::middleware::auth::AuthenticatedUser;
