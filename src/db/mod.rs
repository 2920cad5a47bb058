//! PostgreSQL lifecycle: connect, migrate, probe, close

use std::time::Duration;

use sqlx::migrate::MigrateError;
use sqlx::postgres::{PgPool, PgPoolOptions};

use crate::config::Config;
use crate::store::PgStore;

/// Idle connections are recycled after this long
const IDLE_TIMEOUT: Duration = Duration::from_secs(600);

#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("Failed to connect to database: {0}")]
    Connect(#[source] sqlx::Error),

    #[error("Failed to run migrations: {0}")]
    Migrate(#[from] MigrateError),

    #[error("Database unreachable: {0}")]
    Unreachable(#[source] sqlx::Error),
}

/// Owned handle to the connection pool
///
/// Cloning shares the pool. `close` waits for checked-out connections.
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Open the pool; acquiring a connection is bounded by the store timeout
    pub async fn connect(config: &Config) -> Result<Self, DbError> {
        tracing::info!(url = %config.database_url_masked(), "Connecting to database");

        let pool = PgPoolOptions::new()
            .max_connections(config.db_max_connections)
            .acquire_timeout(config.store_timeout)
            .idle_timeout(IDLE_TIMEOUT)
            .connect(&config.database_url)
            .await
            .map_err(DbError::Connect)?;

        tracing::info!(max_connections = config.db_max_connections, "Database pool ready");
        Ok(Self { pool })
    }

    /// Apply pending migrations from `./migrations`
    pub async fn migrate(&self) -> Result<(), DbError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        tracing::info!("Database schema up to date");
        Ok(())
    }

    /// Store handle over this pool with every query bounded by `timeout`
    pub fn store(&self, timeout: Duration) -> PgStore {
        PgStore::new(self.pool.clone(), timeout)
    }

    /// Round-trip a trivial query; used by `/health`
    pub async fn ping(&self) -> Result<(), DbError> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| ())
            .map_err(DbError::Unreachable)
    }

    pub async fn close(&self) {
        self.pool.close().await;
        tracing::info!("Database pool closed");
    }
}
