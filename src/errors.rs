use serde::Serialize;
use thiserror::Error;

/// Coarse error classes surfaced at the HTTP boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Embedding or chat-completion provider failed
    Provider,
    /// Vector store or relational store failed
    Storage,
    /// The request itself was malformed
    Validation,
    /// Configuration could not be resolved
    Config,
    /// Anything else (I/O, serialization)
    Internal,
}

#[derive(Error, Debug)]
pub enum BookRagError {
    #[error("Embedding error: {0}")]
    EmbeddingError(String),

    #[error("LLM error: {0}")]
    LlmError(String),

    #[error("HTTP error: {0}")]
    HttpError(String),

    #[error("Vector store error: {0}")]
    VectorStoreError(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Invalid request: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl BookRagError {
    /// Classify this error for callers that need to react per kind
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::EmbeddingError(_) | Self::LlmError(_) | Self::HttpError(_) => {
                ErrorKind::Provider
            }
            Self::VectorStoreError(_) | Self::Database(_) => ErrorKind::Storage,
            Self::Validation(_) => ErrorKind::Validation,
            Self::ConfigError(_) => ErrorKind::Config,
            Self::Serialization(_) | Self::Io(_) => ErrorKind::Internal,
        }
    }
}

impl From<qdrant_client::QdrantError> for BookRagError {
    fn from(err: qdrant_client::QdrantError) -> Self {
        Self::VectorStoreError(err.to_string())
    }
}

impl From<config::ConfigError> for BookRagError {
    fn from(err: config::ConfigError) -> Self {
        Self::ConfigError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, BookRagError>;

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;

    #[test]
    fn test_provider_errors_share_a_kind() {
        assert_eq!(
            BookRagError::EmbeddingError("boom".to_string()).kind(),
            ErrorKind::Provider
        );
        assert_eq!(
            BookRagError::LlmError("boom".to_string()).kind(),
            ErrorKind::Provider
        );
        assert_eq!(
            BookRagError::HttpError("timeout".to_string()).kind(),
            ErrorKind::Provider
        );
    }

    #[test]
    fn test_storage_kind() {
        let error = BookRagError::VectorStoreError("collection missing".to_string());
        assert_eq!(error.kind(), ErrorKind::Storage);

        let error: BookRagError = sqlx::Error::RowNotFound.into();
        assert_eq!(error.kind(), ErrorKind::Storage);
    }

    #[test]
    fn test_error_from_io() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error: BookRagError = io_err.into();

        assert!(matches!(error, BookRagError::Io(_)));
        assert_eq!(error.kind(), ErrorKind::Internal);
    }

    #[test]
    fn test_display_keeps_message() {
        let error = BookRagError::Validation("question must not be empty".to_string());
        assert_eq!(
            error.to_string(),
            "Invalid request: question must not be empty"
        );
    }

    #[test]
    fn test_kind_serializes_snake_case() {
        let json = serde_json::to_string(&ErrorKind::Validation).unwrap();
        assert_eq!(json, "\"validation\"");
    }
}
