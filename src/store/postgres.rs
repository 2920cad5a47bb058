//! PostgreSQL-backed stores

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::{RecipeStore, StoreError, UserStore};
use crate::models::{NewRecipe, Recipe, UserAccount};

/// Store over a shared connection pool; every query is bounded by `timeout`
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
    timeout: Duration,
}

impl PgStore {
    pub fn new(pool: PgPool, timeout: Duration) -> Self {
        Self { pool, timeout }
    }

    async fn bounded<T, F>(&self, query: F) -> Result<T, StoreError>
    where
        F: Future<Output = Result<T, sqlx::Error>>,
    {
        tokio::time::timeout(self.timeout, query)
            .await
            .map_err(|_| StoreError::Timeout)?
            .map_err(StoreError::from)
    }
}

#[async_trait]
impl UserStore for PgStore {
    async fn find_by_username_or_email(
        &self,
        username: &str,
        email: &str,
    ) -> Result<Option<UserAccount>, StoreError> {
        self.bounded(
            sqlx::query_as::<_, UserAccount>(
                r#"
                SELECT username, email, full_name, password_hash, disabled
                FROM users
                WHERE username = $1 OR email = $2
                LIMIT 1
                "#,
            )
            .bind(username)
            .bind(email)
            .fetch_optional(&self.pool),
        )
        .await
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<UserAccount>, StoreError> {
        self.bounded(
            sqlx::query_as::<_, UserAccount>(
                r#"
                SELECT username, email, full_name, password_hash, disabled
                FROM users
                WHERE username = $1
                ORDER BY created_at ASC
                LIMIT 1
                "#,
            )
            .bind(username)
            .fetch_optional(&self.pool),
        )
        .await
    }

    async fn insert(&self, user: &UserAccount) -> Result<(), StoreError> {
        self.bounded(
            sqlx::query(
                r#"
                INSERT INTO users (id, username, email, full_name, password_hash, disabled)
                VALUES ($1, $2, $3, $4, $5, $6)
                "#,
            )
            .bind(Uuid::new_v4())
            .bind(&user.username)
            .bind(&user.email)
            .bind(&user.full_name)
            .bind(&user.password_hash)
            .bind(user.disabled)
            .execute(&self.pool),
        )
        .await?;

        Ok(())
    }
}

#[async_trait]
impl RecipeStore for PgStore {
    async fn insert_recipe(&self, recipe: NewRecipe) -> Result<Recipe, StoreError> {
        self.bounded(
            sqlx::query_as::<_, Recipe>(
                r#"
                INSERT INTO recipes (id, owner, title, ingredients, instructions, cuisine, dietary_restriction)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                RETURNING id, owner, title, ingredients, instructions, cuisine, dietary_restriction, created_at
                "#,
            )
            .bind(Uuid::new_v4())
            .bind(&recipe.owner)
            .bind(&recipe.title)
            .bind(&recipe.ingredients)
            .bind(&recipe.instructions)
            .bind(&recipe.cuisine)
            .bind(&recipe.dietary_restriction)
            .fetch_one(&self.pool),
        )
        .await
    }

    async fn list_recipes(
        &self,
        owner: Option<&str>,
        limit: i64,
    ) -> Result<Vec<Recipe>, StoreError> {
        self.bounded(
            sqlx::query_as::<_, Recipe>(
                r#"
                SELECT id, owner, title, ingredients, instructions, cuisine, dietary_restriction, created_at
                FROM recipes
                WHERE $1::TEXT IS NULL OR owner = $1
                ORDER BY created_at ASC
                LIMIT $2
                "#,
            )
            .bind(owner)
            .bind(limit)
            .fetch_all(&self.pool),
        )
        .await
    }

    async fn get_recipe(&self, id: Uuid) -> Result<Option<Recipe>, StoreError> {
        self.bounded(
            sqlx::query_as::<_, Recipe>(
                r#"
                SELECT id, owner, title, ingredients, instructions, cuisine, dietary_restriction, created_at
                FROM recipes
                WHERE id = $1
                "#,
            )
            .bind(id)
            .fetch_optional(&self.pool),
        )
        .await
    }

    async fn delete_recipe(&self, id: Uuid) -> Result<bool, StoreError> {
        let result = self
            .bounded(
                sqlx::query("DELETE FROM recipes WHERE id = $1")
                    .bind(id)
                    .execute(&self.pool),
            )
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
