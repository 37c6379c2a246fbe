//! Error types shared across the workspace

use thiserror::Error;

/// Errors surfaced by collaborators and configuration loading.
///
/// The engine catches these at its boundary and degrades to a
/// conversational fallback response; they are never shown to end users
/// as raw payloads.
#[derive(Debug, Error)]
pub enum Error {
    #[error("context store error: {0}")]
    ContextStore(String),

    #[error("result store error: {0}")]
    ResultStore(String),

    #[error("llm fallback error: {0}")]
    Llm(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
