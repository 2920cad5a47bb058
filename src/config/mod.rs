//! Configuration management for the recipe organizer
//!
//! This module handles loading and validating configuration from environment variables,
//! with support for different environments (development, staging, production).

use std::env;
use std::time::Duration;
use thiserror::Error;

use crate::auth::DEFAULT_ACCESS_TOKEN_TTL_SECONDS;

/// Signing secret used when `JWT_SECRET` is unset outside production
const DEVELOPMENT_JWT_SECRET: &str = "development-secret-change-in-production";

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid environment value: {0}")]
    InvalidValue(String),

    #[error("Invalid port number: {0}")]
    InvalidPort(String),
}

/// Application environment
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    /// Parse environment from string
    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        match s.to_lowercase().as_str() {
            "dev" | "development" => Ok(Environment::Development),
            "staging" => Ok(Environment::Staging),
            "prod" | "production" => Ok(Environment::Production),
            _ => Err(ConfigError::InvalidValue(format!(
                "Invalid environment: '{}'. Expected: dev, staging, or prod",
                s
            ))),
        }
    }

    /// Check if this is a production environment
    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }

    /// Get the environment name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Staging => "staging",
            Environment::Production => "production",
        }
    }
}

/// Outbound completion API settings
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// Bearer credential for the completion API
    pub api_key: String,

    /// Base URL; `/chat/completions` is appended
    pub api_base: String,

    /// Model name sent with every request
    pub model: String,

    /// Upper bound on a single completion call
    pub timeout: Duration,
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Database connection URL
    pub database_url: String,

    /// Current environment
    pub environment: Environment,

    /// Listen address
    pub host: String,

    /// Server port
    pub port: u16,

    /// Maximum database connections
    pub db_max_connections: u32,

    /// Upper bound on a single store operation
    pub store_timeout: Duration,

    /// CORS allowed origins
    pub cors_allowed_origins: Vec<String>,

    /// Log level (RUST_LOG)
    pub log_level: String,

    /// JWT secret for token signing
    pub jwt_secret: String,

    /// Access token TTL in seconds (default: 1800 = 30 minutes)
    pub jwt_access_token_ttl_seconds: i64,

    pub llm: LlmConfig,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let environment = env::var("ENVIRONMENT")
            .map(|s| Environment::parse(&s))
            .unwrap_or(Ok(Environment::Development))?;

        let database_url = env::var("DATABASE_URL")
            .map_err(|_| ConfigError::MissingEnvVar("DATABASE_URL".to_string()))?;

        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());

        let port = env::var("PORT")
            .unwrap_or_else(|_| "8000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort("PORT must be a valid number".to_string()))?;

        let db_max_connections = env::var("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "5".to_string())
            .parse::<u32>()
            .unwrap_or(5);

        let store_timeout = Duration::from_secs(parse_seconds(
            "STORE_TIMEOUT_SECONDS",
            env::var("STORE_TIMEOUT_SECONDS").ok().as_deref(),
            5,
        )?);

        let cors_allowed_origins = parse_origins(
            &env::var("CORS_ALLOWED_ORIGINS")
                .unwrap_or_else(|_| "http://localhost:5173,http://localhost:8000".to_string()),
        )?;

        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        let jwt_secret = match env::var("JWT_SECRET") {
            Ok(secret) if !secret.trim().is_empty() => secret,
            _ if environment.is_production() => {
                return Err(ConfigError::MissingEnvVar("JWT_SECRET".to_string()))
            }
            _ => DEVELOPMENT_JWT_SECRET.to_string(),
        };

        let jwt_access_token_ttl_seconds = parse_token_ttl(
            env::var("JWT_ACCESS_TOKEN_TTL_SECONDS").ok().as_deref(),
        )?;

        let llm = LlmConfig {
            api_key: env::var("LLM_API_KEY").unwrap_or_default(),
            api_base: env::var("LLM_API_BASE")
                .unwrap_or_else(|_| "https://api.groq.com/openai/v1".to_string()),
            model: env::var("LLM_MODEL")
                .unwrap_or_else(|_| "llama-3.3-70b-versatile".to_string()),
            timeout: Duration::from_secs(parse_seconds(
                "LLM_TIMEOUT_SECONDS",
                env::var("LLM_TIMEOUT_SECONDS").ok().as_deref(),
                30,
            )?),
        };

        Ok(Config {
            database_url,
            environment,
            host,
            port,
            db_max_connections,
            store_timeout,
            cors_allowed_origins,
            log_level,
            jwt_secret,
            jwt_access_token_ttl_seconds,
            llm,
        })
    }

    /// Whether the signing secret is the built-in development fallback
    pub fn uses_development_secret(&self) -> bool {
        self.jwt_secret == DEVELOPMENT_JWT_SECRET
    }

    /// Get database URL (useful for logging masked version)
    pub fn database_url_masked(&self) -> String {
        mask_url_password(&self.database_url)
    }
}

/// Split a comma-separated origin list, dropping blanks
///
/// Credentials are allowed cross-origin, so a `*` wildcard is refused.
pub fn parse_origins(raw: &str) -> Result<Vec<String>, ConfigError> {
    let origins: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();

    if origins.iter().any(|origin| origin == "*") {
        return Err(ConfigError::InvalidValue(
            "CORS_ALLOWED_ORIGINS cannot contain `*` when credentials are allowed".to_string(),
        ));
    }

    Ok(origins)
}

fn parse_seconds(var: &str, raw: Option<&str>, default: u64) -> Result<u64, ConfigError> {
    match raw {
        Some(raw) => raw
            .trim()
            .parse::<u64>()
            .map_err(|_| ConfigError::InvalidValue(format!("{} must be a number of seconds", var))),
        None => Ok(default),
    }
}

/// Access token lifetime; zero or negative would mint already-expired tokens
fn parse_token_ttl(raw: Option<&str>) -> Result<i64, ConfigError> {
    let Some(raw) = raw else {
        return Ok(DEFAULT_ACCESS_TOKEN_TTL_SECONDS);
    };

    match raw.trim().parse::<i64>() {
        Ok(ttl) if ttl > 0 => Ok(ttl),
        _ => Err(ConfigError::InvalidValue(
            "JWT_ACCESS_TOKEN_TTL_SECONDS must be a positive number of seconds".to_string(),
        )),
    }
}

fn mask_url_password(url: &str) -> String {
    let authority_start = url.find("://").map(|i| i + 3).unwrap_or(0);
    if let Some(at_pos) = url[authority_start..].rfind('@').map(|i| i + authority_start) {
        if let Some(colon_pos) = url[authority_start..at_pos]
            .find(':')
            .map(|i| i + authority_start)
        {
            let prefix = &url[..colon_pos + 1];
            let suffix = &url[at_pos..];
            return format!("{}****{}", prefix, suffix);
        }
    }
    url.to_string()
}
