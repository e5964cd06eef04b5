//! Error types for vidask.

use thiserror::Error;

/// Library-level error type for vidask operations.
#[derive(Error, Debug)]
pub enum VidaskError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("No transcript available: {0}")]
    NoTranscript(String),

    #[error("No chunks to index: {0}")]
    EmptyIndex(String),

    #[error("Upstream service failed: {0}")]
    Upstream(String),

    #[error("External tool not found: {0}. Please install it and ensure it's in your PATH.")]
    ToolNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl VidaskError {
    /// HTTP status code that best describes this error to a remote caller.
    pub fn status_code(&self) -> u16 {
        match self {
            VidaskError::InvalidInput(_) => 400,
            VidaskError::NoTranscript(_) => 404,
            VidaskError::EmptyIndex(_) => 422,
            VidaskError::Upstream(_) | VidaskError::ToolNotFound(_) | VidaskError::Http(_) => 502,
            _ => 500,
        }
    }
}

/// Result type alias for vidask operations.
pub type Result<T> = std::result::Result<T, VidaskError>;
