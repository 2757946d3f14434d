//! Rendering of library errors as HTTP responses

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;

use crate::api::types::ErrorBody;
use crate::errors::BookRagError;
use crate::errors::ErrorKind;

/// Which operation failed; selects the `detail` prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Query,
    Index,
}

impl Operation {
    const fn prefix(self) -> &'static str {
        match self {
            Self::Query => "Error processing query",
            Self::Index => "Error indexing documents",
        }
    }
}

/// A failed request: 400 for validation problems, 500 otherwise
#[derive(Debug)]
pub struct ApiError {
    operation: Operation,
    error: BookRagError,
}

impl ApiError {
    #[must_use]
    pub const fn new(operation: Operation, error: BookRagError) -> Self {
        Self { operation, error }
    }

    #[must_use]
    pub fn query(error: BookRagError) -> Self {
        Self::new(Operation::Query, error)
    }

    #[must_use]
    pub fn index(error: BookRagError) -> Self {
        Self::new(Operation::Index, error)
    }

    /// Body that could not be parsed into the expected request
    #[must_use]
    pub fn rejected(operation: Operation, rejection: &JsonRejection) -> Self {
        Self::new(operation, BookRagError::Validation(rejection.body_text()))
    }

    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self.error.kind() {
            ErrorKind::Validation => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            detail: format!("{}: {}", self.operation.prefix(), self.error),
            kind: self.error.kind(),
        };
        (self.status(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_maps_to_bad_request() {
        let err = ApiError::query(BookRagError::Validation("question must not be empty".into()));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_provider_failure_maps_to_internal_error() {
        let err = ApiError::index(BookRagError::EmbeddingError("rate limited".into()));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.operation.prefix(), "Error indexing documents");
    }
}
