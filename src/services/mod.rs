//! Business logic services

pub mod recipes;

pub use recipes::{RecipeError, RecipeService};
