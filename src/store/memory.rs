//! In-process stores

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{RecipeStore, StoreError, UserStore};
use crate::models::{NewRecipe, Recipe, UserAccount};

/// Vector-backed store with the same semantics as `PgStore`
#[derive(Clone, Default)]
pub struct MemoryStore {
    users: Arc<RwLock<Vec<UserAccount>>>,
    recipes: Arc<RwLock<Vec<Recipe>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored accounts, duplicates included
    pub async fn user_count(&self) -> usize {
        self.users.read().await.len()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_by_username_or_email(
        &self,
        username: &str,
        email: &str,
    ) -> Result<Option<UserAccount>, StoreError> {
        let users = self.users.read().await;
        Ok(users
            .iter()
            .find(|u| u.username == username || u.email == email)
            .cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<UserAccount>, StoreError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.username == username).cloned())
    }

    async fn insert(&self, user: &UserAccount) -> Result<(), StoreError> {
        self.users.write().await.push(user.clone());
        Ok(())
    }
}

#[async_trait]
impl RecipeStore for MemoryStore {
    async fn insert_recipe(&self, recipe: NewRecipe) -> Result<Recipe, StoreError> {
        let recipe = Recipe {
            id: Uuid::new_v4(),
            owner: recipe.owner,
            title: recipe.title,
            ingredients: recipe.ingredients,
            instructions: recipe.instructions,
            cuisine: recipe.cuisine,
            dietary_restriction: recipe.dietary_restriction,
            created_at: Utc::now(),
        };
        self.recipes.write().await.push(recipe.clone());
        Ok(recipe)
    }

    async fn list_recipes(
        &self,
        owner: Option<&str>,
        limit: i64,
    ) -> Result<Vec<Recipe>, StoreError> {
        let recipes = self.recipes.read().await;
        Ok(recipes
            .iter()
            .filter(|r| owner.map_or(true, |o| r.owner.as_deref() == Some(o)))
            .take(usize::try_from(limit).unwrap_or(0))
            .cloned()
            .collect())
    }

    async fn get_recipe(&self, id: Uuid) -> Result<Option<Recipe>, StoreError> {
        let recipes = self.recipes.read().await;
        Ok(recipes.iter().find(|r| r.id == id).cloned())
    }

    async fn delete_recipe(&self, id: Uuid) -> Result<bool, StoreError> {
        let mut recipes = self.recipes.write().await;
        let before = recipes.len();
        recipes.retain(|r| r.id != id);
        Ok(recipes.len() < before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(username: &str, email: &str) -> UserAccount {
        UserAccount {
            username: username.to_string(),
            email: email.to_string(),
            full_name: None,
            password_hash: "hash".to_string(),
            disabled: false,
        }
    }

    fn new_recipe(owner: Option<&str>, title: &str) -> NewRecipe {
        NewRecipe {
            owner: owner.map(str::to_string),
            title: title.to_string(),
            ingredients: vec!["salt".to_string()],
            instructions: "Season".to_string(),
            cuisine: None,
            dietary_restriction: None,
        }
    }

    #[tokio::test]
    async fn test_find_by_username_or_email() {
        let store = MemoryStore::new();
        store.insert(&account("a", "a@x.com")).await.unwrap();

        assert!(store
            .find_by_username_or_email("a", "other@x.com")
            .await
            .unwrap()
            .is_some());
        assert!(store
            .find_by_username_or_email("other", "a@x.com")
            .await
            .unwrap()
            .is_some());
        assert!(store
            .find_by_username_or_email("b", "b@x.com")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_insert_does_not_enforce_uniqueness() {
        let store = MemoryStore::new();
        store.insert(&account("a", "a@x.com")).await.unwrap();
        store.insert(&account("a", "a@x.com")).await.unwrap();

        assert_eq!(store.user_count().await, 2);
    }

    #[tokio::test]
    async fn test_list_filters_by_owner_and_respects_limit() {
        let store = MemoryStore::new();
        store.insert_recipe(new_recipe(Some("a"), "one")).await.unwrap();
        store.insert_recipe(new_recipe(Some("b"), "two")).await.unwrap();
        store.insert_recipe(new_recipe(None, "three")).await.unwrap();
        store.insert_recipe(new_recipe(Some("a"), "four")).await.unwrap();

        let owned: Vec<String> = store
            .list_recipes(Some("a"), 100)
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.title)
            .collect();
        assert_eq!(owned, vec!["one", "four"]);

        assert_eq!(store.list_recipes(None, 100).await.unwrap().len(), 4);
        assert_eq!(store.list_recipes(None, 2).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_get_and_delete() {
        let store = MemoryStore::new();
        let recipe = store.insert_recipe(new_recipe(None, "soup")).await.unwrap();

        assert_eq!(store.get_recipe(recipe.id).await.unwrap(), Some(recipe.clone()));
        assert!(store.delete_recipe(recipe.id).await.unwrap());
        assert!(!store.delete_recipe(recipe.id).await.unwrap());
        assert!(store.get_recipe(recipe.id).await.unwrap().is_none());
    }
}
