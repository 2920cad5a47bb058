//! Persistence contracts for accounts and recipes
//!
//! Handlers and services only see these traits. `PgStore` backs them with
//! PostgreSQL in production; `MemoryStore` backs them in tests.

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{NewRecipe, Recipe, UserAccount};

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Maximum number of recipes returned by a listing
pub const RECIPE_LIST_LIMIT: i64 = 100;

/// Store errors
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Store operation timed out")]
    Timeout,
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::PoolTimedOut => StoreError::Timeout,
            other => StoreError::Database(other.to_string()),
        }
    }
}

/// Credential store
///
/// Uniqueness of username and email is NOT enforced here. Registration checks
/// with `find_by_username_or_email` and then calls `insert`; the two steps are
/// not atomic.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Find an account matching either the username or the email
    async fn find_by_username_or_email(
        &self,
        username: &str,
        email: &str,
    ) -> Result<Option<UserAccount>, StoreError>;

    /// Find an account by username
    async fn find_by_username(&self, username: &str) -> Result<Option<UserAccount>, StoreError>;

    /// Persist a new account
    async fn insert(&self, user: &UserAccount) -> Result<(), StoreError>;
}

/// Recipe store
#[async_trait]
pub trait RecipeStore: Send + Sync {
    /// Persist a recipe, returning it with its assigned id
    async fn insert_recipe(&self, recipe: NewRecipe) -> Result<Recipe, StoreError>;

    /// List recipes oldest first, optionally only those owned by `owner`
    async fn list_recipes(
        &self,
        owner: Option<&str>,
        limit: i64,
    ) -> Result<Vec<Recipe>, StoreError>;

    async fn get_recipe(&self, id: Uuid) -> Result<Option<Recipe>, StoreError>;

    /// Delete a recipe; `false` if nothing matched
    async fn delete_recipe(&self, id: Uuid) -> Result<bool, StoreError>;
}
