//! Recipe service
//!
//! CRUD over the recipe store plus the two completion-backed flows.
//! Reads and deletes by id do not check ownership.

use std::sync::Arc;

use thiserror::Error;
use uuid::Uuid;

use crate::llm::{CompletionClient, LlmError};
use crate::models::{
    ChatResponse, NewRecipe, Recipe, RecipeInput, SuggestRequest, SuggestResponse,
};
use crate::store::{RecipeStore, StoreError, RECIPE_LIST_LIMIT};

const NO_SUGGESTION: &str = "No recipes found";
const NO_CHAT_REPLY: &str = "No response from AI";

/// Recipe service errors
#[derive(Error, Debug)]
pub enum RecipeError {
    #[error("Recipe not found")]
    NotFound,

    #[error("At least one ingredient is required")]
    NoIngredients,

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Llm(#[from] LlmError),
}

#[derive(Clone)]
pub struct RecipeService {
    store: Arc<dyn RecipeStore>,
    llm: Arc<dyn CompletionClient>,
}

impl RecipeService {
    pub fn new(store: Arc<dyn RecipeStore>, llm: Arc<dyn CompletionClient>) -> Self {
        Self { store, llm }
    }

    /// Recipes owned by `owner`
    pub async fn saved(&self, owner: &str) -> Result<Vec<Recipe>, RecipeError> {
        Ok(self.store.list_recipes(Some(owner), RECIPE_LIST_LIMIT).await?)
    }

    /// All recipes, or only those of `owner` when given
    pub async fn list(&self, owner: Option<&str>) -> Result<Vec<Recipe>, RecipeError> {
        Ok(self.store.list_recipes(owner, RECIPE_LIST_LIMIT).await?)
    }

    /// Store `input` as a recipe owned by `owner`
    pub async fn create(&self, owner: &str, input: RecipeInput) -> Result<Recipe, RecipeError> {
        let recipe = self
            .store
            .insert_recipe(input.into_new_recipe(owner.to_string()))
            .await?;

        tracing::info!(recipe_id = %recipe.id, owner = %owner, "Recipe created");
        Ok(recipe)
    }

    /// Fetch by id; an id that is not a UUID cannot exist
    pub async fn get(&self, id: &str) -> Result<Recipe, RecipeError> {
        let id = Uuid::parse_str(id).map_err(|_| RecipeError::NotFound)?;
        self.store
            .get_recipe(id)
            .await?
            .ok_or(RecipeError::NotFound)
    }

    pub async fn delete(&self, id: &str) -> Result<(), RecipeError> {
        let id = Uuid::parse_str(id).map_err(|_| RecipeError::NotFound)?;
        if !self.store.delete_recipe(id).await? {
            return Err(RecipeError::NotFound);
        }

        tracing::info!(recipe_id = %id, "Recipe deleted");
        Ok(())
    }

    /// Generate recipe text for the given ingredients and save it for `owner`
    ///
    /// Generation and persistence are not atomic: if the insert fails the
    /// generated text is dropped and only the error is returned.
    pub async fn suggest(
        &self,
        owner: &str,
        request: SuggestRequest,
    ) -> Result<SuggestResponse, RecipeError> {
        let ingredients = request.ingredients.into_list();
        if ingredients.is_empty() {
            return Err(RecipeError::NoIngredients);
        }

        let prompt = suggestion_prompt(
            &ingredients,
            request.dietary_restriction.as_deref(),
            request.cuisine.as_deref(),
        );
        let content = self
            .llm
            .complete(&prompt)
            .await?
            .unwrap_or_else(|| NO_SUGGESTION.to_string());

        let title = format!("Recipe generated for {}", ingredients.join(", "));
        let saved = self
            .store
            .insert_recipe(NewRecipe {
                owner: Some(owner.to_string()),
                title,
                ingredients,
                instructions: content.clone(),
                cuisine: request.cuisine,
                dietary_restriction: request.dietary_restriction,
            })
            .await
            .map_err(|e| {
                tracing::warn!(owner = %owner, error = %e, "Generated recipe could not be saved");
                e
            })?;

        tracing::info!(recipe_id = %saved.id, owner = %owner, "Suggested recipe saved");
        Ok(SuggestResponse {
            recipes: content,
            message: "Recipe successfully generated and saved.".to_string(),
        })
    }

    /// Free-form question to the completion API
    pub async fn chat(&self, query: &str) -> Result<ChatResponse, RecipeError> {
        let response = self
            .llm
            .complete(query)
            .await?
            .unwrap_or_else(|| NO_CHAT_REPLY.to_string());

        Ok(ChatResponse { response })
    }
}

fn suggestion_prompt(
    ingredients: &[String],
    dietary_restriction: Option<&str>,
    cuisine: Option<&str>,
) -> String {
    format!(
        "Generate recipes based on the following details:\nIngredients: {}\nDietary Restriction: {}\nCuisine: {}",
        ingredients.join(", "),
        dietary_restriction.unwrap_or("None"),
        cuisine.unwrap_or("Any"),
    )
}
