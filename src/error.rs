// file: src/error.rs
// description: Custom error types and result type aliases
// reference: https://docs.rs/thiserror

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, FolioError>;

#[derive(Error, Debug)]
pub enum FolioError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("No backend configured")]
    NotConfigured,

    #[error("Backend unreachable: {0}")]
    Connectivity(String),

    #[error("Backend rejected credentials: {0}")]
    Unauthorized(String),

    #[error("Document too large: {size} bytes exceeds backend limit of {limit} bytes")]
    Capacity { size: usize, limit: usize },

    #[error("Backend rate limit exceeded, try again later")]
    RateLimited,

    #[error("Stored document has unexpected shape: {0}")]
    InvalidPayload(String),

    #[error("Backend request failed with status {status}: {message}")]
    Remote { status: u16, message: String },

    #[error("Image processing failed: {0}")]
    Image(String),

    #[error("File operation failed for {path}: {source}")]
    FileOperation {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
