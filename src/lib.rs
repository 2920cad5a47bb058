//! Recipe Organizer Backend Library
//!
//! This library exports the core modules for the recipe organizer server:
//! password authentication, recipe storage and the completion-backed
//! suggestion and chat endpoints.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod llm;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod store;

pub use routes::create_router;
pub use state::AppState;
