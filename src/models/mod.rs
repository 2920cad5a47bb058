//! Data models for the recipe organizer

use serde::{Deserialize, Serialize};
use sqlx::types::chrono::{DateTime, Utc};
use uuid::Uuid;
use validator::Validate;

pub mod auth;
pub use auth::*;

/// Recipe model
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone, PartialEq)]
pub struct Recipe {
    pub id: Uuid,
    /// Username of the creator; a soft reference, not a foreign key
    #[serde(rename = "user_id")]
    pub owner: Option<String>,
    pub title: String,
    pub ingredients: Vec<String>,
    pub instructions: String,
    pub cuisine: Option<String>,
    pub dietary_restriction: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Recipe ready to be persisted; the store assigns `id` and `created_at`
#[derive(Debug, Clone)]
pub struct NewRecipe {
    pub owner: Option<String>,
    pub title: String,
    pub ingredients: Vec<String>,
    pub instructions: String,
    pub cuisine: Option<String>,
    pub dietary_restriction: Option<String>,
}

// ============================================================================
// Request/Response DTOs
// ============================================================================

/// Body of `POST /recipes/create`; any client-supplied owner is ignored
#[derive(Debug, Deserialize, Validate)]
pub struct RecipeInput {
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: String,
    #[validate(length(min = 1, message = "at least one ingredient is required"))]
    pub ingredients: Vec<String>,
    #[validate(length(min = 1, message = "instructions must not be empty"))]
    pub instructions: String,
    pub cuisine: Option<String>,
    pub dietary_restriction: Option<String>,
}

impl RecipeInput {
    pub fn into_new_recipe(self, owner: String) -> NewRecipe {
        NewRecipe {
            owner: Some(owner),
            title: self.title,
            ingredients: self.ingredients,
            instructions: self.instructions,
            cuisine: self.cuisine,
            dietary_restriction: self.dietary_restriction,
        }
    }
}

/// Query string of `GET /recipes/read`
#[derive(Debug, Default, Deserialize)]
pub struct RecipeQuery {
    pub user_id: Option<String>,
}

/// Ingredients as sent by clients: a JSON list or one comma-separated string
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Ingredients {
    List(Vec<String>),
    Csv(String),
}

impl Default for Ingredients {
    fn default() -> Self {
        Ingredients::List(Vec::new())
    }
}

impl Ingredients {
    /// Normalize to trimmed, non-empty entries
    pub fn into_list(self) -> Vec<String> {
        let raw = match self {
            Ingredients::List(items) => items,
            Ingredients::Csv(csv) => csv.split(',').map(str::to_string).collect(),
        };
        raw.into_iter()
            .map(|item| item.trim().to_string())
            .filter(|item| !item.is_empty())
            .collect()
    }
}

/// Body of `POST /recipes/suggest`
#[derive(Debug, Deserialize, Validate)]
pub struct SuggestRequest {
    #[serde(default)]
    pub ingredients: Ingredients,
    pub dietary_restriction: Option<String>,
    pub cuisine: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SuggestResponse {
    pub recipes: String,
    pub message: String,
}

/// Body of `POST /recipes/chat`
#[derive(Debug, Deserialize, Validate)]
pub struct ChatRequest {
    #[validate(length(min = 1, message = "query must not be empty"))]
    pub query: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
}
