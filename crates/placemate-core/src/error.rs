//! Error types for placemate

use thiserror::Error;

/// Result type alias using PlacemateError
pub type Result<T> = std::result::Result<T, PlacemateError>;

/// Error type alias for convenience
pub type Error = PlacemateError;

/// Main error type for placemate
#[derive(Debug, Error)]
pub enum PlacemateError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Retrieval error: {0}")]
    Retrieval(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("External service error: {0}")]
    ExternalError(String),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}
