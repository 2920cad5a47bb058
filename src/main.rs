//! Recipe Organizer Server
//!
//! HTTP backend for registering users, storing recipes and asking an
//! OpenAI-compatible completion API for recipe suggestions.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::signal;

use recipe_organizer_server::{
    auth::{AuthService, TokenIssuer},
    config::Config,
    create_router,
    db::Database,
    llm::OpenAiCompatibleClient,
    services::RecipeService,
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level)),
        )
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!(environment = config.environment.as_str(), "Starting recipe organizer server");

    if config.uses_development_secret() {
        tracing::warn!("JWT_SECRET not set, using the development signing secret");
    }
    if config.llm.api_key.is_empty() {
        tracing::warn!("LLM_API_KEY not set, suggestion and chat requests will be rejected upstream");
    }

    // Initialize database connection pool
    let database = Database::connect(&config).await?;
    database.migrate().await?;

    let store = Arc::new(database.store(config.store_timeout));
    let llm = Arc::new(OpenAiCompatibleClient::new(&config.llm)?);

    let tokens = TokenIssuer::new(&config.jwt_secret, config.jwt_access_token_ttl_seconds);
    let auth_service = Arc::new(AuthService::new(store.clone(), tokens));
    let recipe_service = Arc::new(RecipeService::new(store, llm));

    // Create shared app state
    let app_state = AppState::new(auth_service, recipe_service).with_database(database.clone());

    let app = create_router(app_state, &config.cors_allowed_origins);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .with_context(|| format!("Invalid listen address {}:{}", config.host, config.port))?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!("Server listening on {}", addr);
    tracing::info!("Health check at http://{}/health", addr);

    // Serve with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    database.close().await;
    tracing::info!("Server shutdown complete");

    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown...");
        }
    }
}
