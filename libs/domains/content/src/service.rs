//! Content Service - Business logic layer

use std::sync::Arc;
use tracing::{instrument, warn};
use uuid::Uuid;
use validator::Validate;

use crate::error::{ContentError, ContentResult};
use crate::indexer::ContentIndexer;
use crate::models::{ContentFilter, CreateContent, LearningContent, UpdateContent};
use crate::repository::ContentRepository;

/// Content service providing business logic operations
///
/// The service layer handles validation, business rules, and orchestrates
/// repository operations. When an indexer is attached, every write is pushed
/// to the search index: upserts run as background tasks that log failures,
/// deletions are awaited inline (a missed delete is the costlier drift
/// direction) but never fail the request.
pub struct ContentService<R: ContentRepository> {
    repository: Arc<R>,
    indexer: Option<Arc<dyn ContentIndexer>>,
}

impl<R: ContentRepository> ContentService<R> {
    /// Create a new ContentService with the given repository
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
            indexer: None,
        }
    }

    /// Attach a search-index integration
    pub fn with_indexer(mut self, indexer: Arc<dyn ContentIndexer>) -> Self {
        self.indexer = Some(indexer);
        self
    }

    /// Create a new content
    #[instrument(skip(self, input), fields(content_title = %input.title))]
    pub async fn create_content(&self, input: CreateContent) -> ContentResult<LearningContent> {
        input
            .validate()
            .map_err(|e| ContentError::Validation(e.to_string()))?;

        if self.repository.exists_by_title(&input.title).await? {
            return Err(ContentError::DuplicateTitle(input.title));
        }

        let content = self.repository.create(input).await?;
        self.push_to_index(&content);
        Ok(content)
    }

    /// Get a content by ID
    #[instrument(skip(self))]
    pub async fn get_content(&self, id: Uuid) -> ContentResult<LearningContent> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(ContentError::NotFound(id))
    }

    /// List contents with optional filters
    #[instrument(skip(self))]
    pub async fn list_contents(&self, filter: ContentFilter) -> ContentResult<Vec<LearningContent>> {
        self.repository.list(filter).await
    }

    /// Update an existing content
    #[instrument(skip(self, input))]
    pub async fn update_content(
        &self,
        id: Uuid,
        input: UpdateContent,
    ) -> ContentResult<LearningContent> {
        input
            .validate()
            .map_err(|e| ContentError::Validation(e.to_string()))?;

        let existing = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or(ContentError::NotFound(id))?;

        // Check for duplicate title if title is being changed
        if let Some(ref new_title) = input.title {
            if new_title != &existing.title && self.repository.exists_by_title(new_title).await? {
                return Err(ContentError::DuplicateTitle(new_title.clone()));
            }
        }

        let updated = self.repository.update(id, input).await?;
        self.push_to_index(&updated);
        Ok(updated)
    }

    /// Delete a content
    #[instrument(skip(self))]
    pub async fn delete_content(&self, id: Uuid) -> ContentResult<()> {
        self.repository.delete(id).await?;

        if let Some(indexer) = &self.indexer {
            if let Err(e) = indexer.remove_content(id).await {
                warn!(error = %e, content_id = %id, "Failed to remove content from search index");
            }
        }

        Ok(())
    }

    /// Count contents matching a filter
    #[instrument(skip(self))]
    pub async fn count_contents(&self, filter: ContentFilter) -> ContentResult<u64> {
        self.repository.count(filter).await
    }

    /// Push a document to the search index (non-blocking, log errors)
    fn push_to_index(&self, content: &LearningContent) {
        if let Some(indexer) = &self.indexer {
            let indexer = Arc::clone(indexer);
            let content = content.clone();
            tokio::spawn(async move {
                if let Err(e) = indexer.index_content(&content).await {
                    warn!(error = %e, content_id = %content.id, "Failed to index content");
                }
            });
        }
    }
}

impl<R: ContentRepository> Clone for ContentService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            indexer: self.indexer.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indexer::MockContentIndexer;
    use crate::models::Difficulty;
    use crate::repository::MockContentRepository;

    fn create_input(title: &str) -> CreateContent {
        CreateContent {
            title: title.to_string(),
            description: "desc".to_string(),
            body: String::new(),
            tags: vec![],
            difficulty: Difficulty::Beginner,
            exercises: vec![],
        }
    }

    #[tokio::test]
    async fn test_create_content_rejects_duplicate_title() {
        let mut repo = MockContentRepository::new();
        repo.expect_exists_by_title()
            .withf(|title| title == "Ownership")
            .return_once(|_| Ok(true));

        let service = ContentService::new(repo);
        let err = service
            .create_content(create_input("Ownership"))
            .await
            .unwrap_err();

        assert!(matches!(err, ContentError::DuplicateTitle(_)));
    }

    #[tokio::test]
    async fn test_create_content_rejects_empty_title() {
        let repo = MockContentRepository::new();
        let service = ContentService::new(repo);

        let err = service.create_content(create_input("")).await.unwrap_err();
        assert!(matches!(err, ContentError::Validation(_)));
    }

    #[tokio::test]
    async fn test_get_content_maps_missing_to_not_found() {
        let mut repo = MockContentRepository::new();
        repo.expect_get_by_id().return_once(|_| Ok(None));

        let service = ContentService::new(repo);
        let err = service.get_content(Uuid::now_v7()).await.unwrap_err();

        assert!(matches!(err, ContentError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_content_survives_indexer_failure() {
        let id = Uuid::now_v7();

        let mut repo = MockContentRepository::new();
        repo.expect_delete().return_once(|_| Ok(true));

        let mut indexer = MockContentIndexer::new();
        indexer
            .expect_remove_content()
            .return_once(|_| Err(ContentError::Index("qdrant unreachable".to_string())));

        let service = ContentService::new(repo).with_indexer(Arc::new(indexer));

        // The write must succeed even though the index removal failed
        service.delete_content(id).await.unwrap();
    }
}
