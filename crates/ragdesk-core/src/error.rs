//! Error types for the RagDesk console

use thiserror::Error;

/// Result type alias using our custom Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for the RagDesk system
#[derive(Error, Debug)]
pub enum Error {
    #[error("Upload transport error: {0}")]
    UploadTransport(String),

    #[error("Search backend error: {0}")]
    SearchBackend(String),

    #[error("Chat backend error: {0}")]
    ChatBackend(String),

    #[error("Settings store error: {0}")]
    SettingsStore(String),

    #[error("Analytics source error: {0}")]
    AnalyticsSource(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Other error: {0}")]
    Other(String),
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Error::Other(err.to_string())
    }
}
