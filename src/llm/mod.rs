//! Outbound chat-completion client
//!
//! Recipe suggestion and chat are single-prompt passthroughs to an
//! OpenAI-compatible completion API (Groq by default).

use async_trait::async_trait;
use thiserror::Error;

mod openai_compatible;

pub use openai_compatible::OpenAiCompatibleClient;

/// Completion API errors
#[derive(Error, Debug)]
pub enum LlmError {
    #[error("Completion request failed: {0}")]
    Request(String),

    #[error("Completion API error ({status}): {message}")]
    Status { status: u16, message: String },

    #[error("Failed to parse completion response: {0}")]
    Decode(String),
}

/// Single-turn completion
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Send `prompt` as one user message; `None` if the reply had no content
    async fn complete(&self, prompt: &str) -> Result<Option<String>, LlmError>;
}
