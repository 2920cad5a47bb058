//! Recipe HTTP handlers

use axum::{
    extract::{Path, Query, State},
    Json,
};

use super::AuthenticatedUser;
use crate::error::ApiError;
use crate::extract::ValidatedJson;
use crate::models::{
    ChatRequest, ChatResponse, MessageResponse, Recipe, RecipeInput, RecipeQuery, SuggestRequest,
    SuggestResponse,
};
use crate::services::RecipeError;
use crate::state::AppState;

/// GET /recipes/saved - Recipes owned by the caller
pub async fn saved(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<Vec<Recipe>>, ApiError> {
    let recipes = state.recipe_service.saved(&user.username).await?;
    Ok(Json(recipes))
}

/// POST /recipes/create - Store a recipe owned by the caller
pub async fn create(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    ValidatedJson(input): ValidatedJson<RecipeInput>,
) -> Result<Json<Recipe>, ApiError> {
    let recipe = state
        .recipe_service
        .create(&user.username, input)
        .await
        .map_err(|e| {
            tracing::error!(owner = %user.username, error = %e, "Failed to create recipe");
            ApiError::InternalError("Failed to create recipe".to_string())
        })?;

    Ok(Json(recipe))
}

/// GET /recipes/read - All recipes, optionally filtered by `user_id`
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<RecipeQuery>,
) -> Result<Json<Vec<Recipe>>, ApiError> {
    // `?user_id=` with no value means no filter
    let owner = query.user_id.as_deref().filter(|user_id| !user_id.is_empty());
    let recipes = state.recipe_service.list(owner).await?;
    Ok(Json(recipes))
}

/// GET /recipes/read/:id
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Recipe>, ApiError> {
    let recipe = state.recipe_service.get(&id).await?;
    Ok(Json(recipe))
}

/// DELETE /recipes/delete/:id
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.recipe_service.delete(&id).await?;
    Ok(Json(MessageResponse::new("Recipe deleted")))
}

/// POST /recipes/suggest - Generate a recipe and save it for the caller
pub async fn suggest(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    ValidatedJson(req): ValidatedJson<SuggestRequest>,
) -> Result<Json<SuggestResponse>, ApiError> {
    let response = state
        .recipe_service
        .suggest(&user.username, req)
        .await
        .map_err(|e| match e {
            RecipeError::NoIngredients => ApiError::from(e),
            e => ApiError::ExternalServiceError(format!(
                "Error fetching recipe suggestions: {}",
                e
            )),
        })?;

    Ok(Json(response))
}

/// POST /recipes/chat - Free-form cooking question
pub async fn chat(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    let response = state
        .recipe_service
        .chat(&req.query)
        .await
        .map_err(|e| {
            ApiError::ExternalServiceError(format!("Error processing chat query: {}", e))
        })?;

    Ok(Json(response))
}
