use std::io;
use thiserror::Error;

/// Domain-specific errors for the nutrition advisor
#[derive(Error, Debug)]
pub enum AdvisorError {
    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    #[error("Age out of range: {0} (ages start at 1)")]
    OutOfRangeAge(i64),

    #[error("Food not found: {0}")]
    FoodNotFound(String),

    #[error("Unknown age group: {0}")]
    UnknownAgeGroup(String),

    #[error("Document already indexed: {0}")]
    DocumentAlreadyExists(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Embedding error: {0}")]
    EmbeddingError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    #[error("Request validation error: {0}")]
    ValidationError(String),
}

impl From<serde_json::Error> for AdvisorError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}

/// Result type for advisor operations
pub type AdvisorResult<T> = Result<T, AdvisorError>;
