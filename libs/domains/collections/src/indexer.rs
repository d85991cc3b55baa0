//! Search-index integration point for the collection service.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::CollectionResult;
use crate::models::LearningCollection;

/// Integration trait notified whenever a collection document changes.
///
/// Best-effort: a failing implementation never fails the originating write.
/// Implemented by the search domain's service.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CollectionIndexer: Send + Sync {
    /// Index (or re-index) a collection document
    async fn index_collection(&self, collection: &LearningCollection) -> CollectionResult<()>;

    /// Remove a collection document from the index
    async fn remove_collection(&self, id: Uuid) -> CollectionResult<()>;
}
