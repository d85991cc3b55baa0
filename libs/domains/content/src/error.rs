use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("Content not found: {0}")]
    NotFound(Uuid),

    #[error("Content with title '{0}' already exists")]
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

pub type ContentResult<T> = Result<T, ContentError>;

/// Convert ContentError to AppError for standardized error responses
impl From<ContentError> for AppError {
    fn from(err: ContentError) -> Self {
        match err {
            ContentError::NotFound(id) => AppError::NotFound(format!("Content {} not found", id)),
            ContentError::DuplicateTitle(title) => {
                AppError::Conflict(format!("Content with title '{}' already exists", title))
            }
            ContentError::Validation(msg) => AppError::BadRequest(msg),
            ContentError::Database(msg) => AppError::InternalServerError(msg),
            ContentError::Index(msg) => AppError::BadGateway(format!("Search index error: {}", msg)),
            ContentError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for ContentError {
    fn into_response(self) -> Response {
        // Convert to AppError for the standardized error response format
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<mongodb::error::Error> for ContentError {
    fn from(err: mongodb::error::Error) -> Self {
        ContentError::Database(err.to_string())
    }
}
