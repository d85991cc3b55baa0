use async_trait::async_trait;
use uuid::Uuid;

use crate::error::CollectionResult;
use crate::models::{CollectionFilter, CreateCollection, LearningCollection, UpdateCollection};

/// Repository trait for LearningCollection persistence
///
/// Implementations own the two-way membership bookkeeping: any mutation of a
/// collection's `content_ids` must also update the `collection_ids`
/// back-references on the affected content documents.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CollectionRepository: Send + Sync {
    /// Create a new collection
    async fn create(&self, input: CreateCollection) -> CollectionResult<LearningCollection>;

    /// Get a collection by ID
    async fn get_by_id(&self, id: Uuid) -> CollectionResult<Option<LearningCollection>>;

    /// Get several collections by ID, skipping ids that no longer exist
    async fn get_many(&self, ids: Vec<Uuid>) -> CollectionResult<Vec<LearningCollection>>;

    /// List collections with optional filters
    async fn list(&self, filter: CollectionFilter) -> CollectionResult<Vec<LearningCollection>>;

    /// List every collection, used by full reindex runs
    async fn list_all(&self) -> CollectionResult<Vec<LearningCollection>>;

    /// Update an existing collection
    async fn update(
        &self,
        id: Uuid,
        input: UpdateCollection,
    ) -> CollectionResult<LearningCollection>;

    /// Delete a collection by ID, clearing back-references on member contents
    async fn delete(&self, id: Uuid) -> CollectionResult<bool>;

    /// Count collections matching a filter
    async fn count(&self, filter: CollectionFilter) -> CollectionResult<u64>;

    /// Check if a collection title exists
    async fn exists_by_title(&self, title: &str) -> CollectionResult<bool>;

    /// Add a content to a collection, updating both sides of the membership
    async fn add_content(
        &self,
        id: Uuid,
        content_id: Uuid,
    ) -> CollectionResult<LearningCollection>;

    /// Remove a content from a collection, updating both sides of the membership
    async fn remove_content(
        &self,
        id: Uuid,
        content_id: Uuid,
    ) -> CollectionResult<LearningCollection>;
}
