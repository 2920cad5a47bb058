//! Application state shared across handlers

use std::sync::Arc;

use axum::extract::FromRef;

use crate::auth::AuthService;
use crate::db::Database;
use crate::services::RecipeService;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<AuthService>,
    pub recipe_service: Arc<RecipeService>,
    /// Pool probed by `/health`; absent when running against an in-memory store
    pub database: Option<Database>,
}

impl AppState {
    pub fn new(auth_service: Arc<AuthService>, recipe_service: Arc<RecipeService>) -> Self {
        Self {
            auth_service,
            recipe_service,
            database: None,
        }
    }

    pub fn with_database(mut self, database: Database) -> Self {
        self.database = Some(database);
        self
    }
}

impl FromRef<AppState> for Arc<AuthService> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.auth_service.clone()
    }
}

impl FromRef<AppState> for Arc<RecipeService> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.recipe_service.clone()
    }
}
