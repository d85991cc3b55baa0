//! Search-index integration point for the content service.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::ContentResult;
use crate::models::LearningContent;

/// Integration trait notified whenever a content document changes.
///
/// The service treats the indexer as best-effort: a failing implementation
/// never fails the originating write, it is logged and recovered by a later
/// reindex. Implemented by the search domain's service.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContentIndexer: Send + Sync {
    /// Index (or re-index) a content document
    async fn index_content(&self, content: &LearningContent) -> ContentResult<()>;

    /// Remove a content document from the index
    async fn remove_content(&self, id: Uuid) -> ContentResult<()>;
}
