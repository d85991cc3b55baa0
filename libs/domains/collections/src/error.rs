use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum CollectionError {
    #[error("Collection not found: {0}")]
    NotFound(Uuid),

    #[error("Content not found: {0}")]
    ContentNotFound(Uuid),

    #[error("Collection with title '{0}' already exists")]
    DuplicateTitle(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Index error: {0}")]
    Index(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type CollectionResult<T> = Result<T, CollectionError>;

/// Convert CollectionError to AppError for standardized error responses
impl From<CollectionError> for AppError {
    fn from(err: CollectionError) -> Self {
        match err {
            CollectionError::NotFound(id) => {
                AppError::NotFound(format!("Collection {} not found", id))
            }
            CollectionError::ContentNotFound(id) => {
                AppError::NotFound(format!("Content {} not found", id))
            }
            CollectionError::DuplicateTitle(title) => {
                AppError::Conflict(format!("Collection with title '{}' already exists", title))
            }
            CollectionError::Validation(msg) => AppError::BadRequest(msg),
            CollectionError::Database(msg) => AppError::InternalServerError(msg),
            CollectionError::Index(msg) => {
                AppError::BadGateway(format!("Search index error: {}", msg))
            }
            CollectionError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for CollectionError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<mongodb::error::Error> for CollectionError {
    fn from(err: mongodb::error::Error) -> Self {
        CollectionError::Database(err.to_string())
    }
}
