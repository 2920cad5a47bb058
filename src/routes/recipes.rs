//! Recipe routes

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::handlers::recipes;
use crate::state::AppState;

pub fn recipe_routes() -> Router<AppState> {
    Router::new()
        .route("/recipes/saved", get(recipes::saved))
        .route("/recipes/create", post(recipes::create))
        .route("/recipes/read", get(recipes::list))
        .route("/recipes/read/:id", get(recipes::get))
        .route("/recipes/delete/:id", delete(recipes::delete))
        .route("/recipes/suggest", post(recipes::suggest))
        .route("/recipes/chat", post(recipes::chat))
}
