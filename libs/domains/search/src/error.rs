use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use domain_collections::CollectionError;
use domain_content::ContentError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Document not found: {0}")]
    NotFound(Uuid),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Vector index error: {0}")]
    Index(String),

    #[error("Embedding error: {0}")]
    Embedding(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type SearchResult<T> = Result<T, SearchError>;

impl From<qdrant_client::QdrantError> for SearchError {
    fn from(err: qdrant_client::QdrantError) -> Self {
        SearchError::Index(err.to_string())
    }
}

impl From<reqwest::Error> for SearchError {
    fn from(err: reqwest::Error) -> Self {
        SearchError::Embedding(err.to_string())
    }
}

impl From<serde_json::Error> for SearchError {
    fn from(err: serde_json::Error) -> Self {
        SearchError::Internal(format!("JSON error: {}", err))
    }
}

impl From<ContentError> for SearchError {
    fn from(err: ContentError) -> Self {
        SearchError::Database(err.to_string())
    }
}

impl From<CollectionError> for SearchError {
    fn from(err: CollectionError) -> Self {
        SearchError::Database(err.to_string())
    }
}

/// Indexer integrations hand search failures back to the owning domain
impl From<SearchError> for ContentError {
    fn from(err: SearchError) -> Self {
        ContentError::Index(err.to_string())
    }
}

impl From<SearchError> for CollectionError {
    fn from(err: SearchError) -> Self {
        CollectionError::Index(err.to_string())
    }
}

/// Convert SearchError to AppError for standardized HTTP error responses
impl From<SearchError> for AppError {
    fn from(err: SearchError) -> Self {
        match err {
            SearchError::NotFound(id) => AppError::NotFound(format!("Document {} not found", id)),
            SearchError::Validation(msg) => AppError::BadRequest(msg),
            SearchError::Index(msg) => AppError::BadGateway(format!("Vector index error: {}", msg)),
            SearchError::Embedding(msg) => {
                AppError::BadGateway(format!("Embedding error: {}", msg))
            }
            SearchError::Database(msg) => AppError::InternalServerError(msg),
            SearchError::Config(msg) => {
                AppError::InternalServerError(format!("Config error: {}", msg))
            }
            SearchError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for SearchError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
