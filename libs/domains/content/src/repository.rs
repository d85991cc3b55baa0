use async_trait::async_trait;
use uuid::Uuid;

use crate::error::ContentResult;
use crate::models::{ContentFilter, CreateContent, LearningContent, UpdateContent};

/// Repository trait for LearningContent persistence
///
/// This trait defines the data access interface for learning contents.
/// Implementations can use different storage backends (MongoDB, etc.)
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContentRepository: Send + Sync {
    /// Create a new content
    async fn create(&self, input: CreateContent) -> ContentResult<LearningContent>;

    /// Get a content by ID
    async fn get_by_id(&self, id: Uuid) -> ContentResult<Option<LearningContent>>;

    /// Get several contents by ID, skipping ids that no longer exist
    async fn get_many(&self, ids: Vec<Uuid>) -> ContentResult<Vec<LearningContent>>;

    /// List contents with optional filters
    async fn list(&self, filter: ContentFilter) -> ContentResult<Vec<LearningContent>>;

    /// List every content, used by full reindex runs
    async fn list_all(&self) -> ContentResult<Vec<LearningContent>>;

    /// Update an existing content
    async fn update(&self, id: Uuid, input: UpdateContent) -> ContentResult<LearningContent>;

    /// Delete a content by ID, removing it from any collections it belongs to
    async fn delete(&self, id: Uuid) -> ContentResult<bool>;

    /// Count contents matching a filter
    async fn count(&self, filter: ContentFilter) -> ContentResult<u64>;

    /// Check if a content title exists
    async fn exists_by_title(&self, title: &str) -> ContentResult<bool>;
}
