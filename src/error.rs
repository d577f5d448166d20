//! Error types for the Treeline client

use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, TreelineError>;

/// Main error type for the Treeline client
#[derive(Error, Debug)]
pub enum TreelineError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Cluster returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Training job failed: {0}")]
    JobFailed(String),

    #[error("Data file not found: {0}")]
    DataNotFound(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
