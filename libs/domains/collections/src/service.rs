//! Collection Service - Business logic layer

use std::sync::Arc;
use tracing::{instrument, warn};
use uuid::Uuid;
use validator::Validate;

use crate::error::{CollectionError, CollectionResult};
use crate::indexer::CollectionIndexer;
use crate::models::{CollectionFilter, CreateCollection, LearningCollection, UpdateCollection};
use crate::repository::CollectionRepository;

/// Collection service providing business logic operations
///
/// Index pushes follow the same policy as the content service: upserts run as
/// background tasks that log failures, deletions are awaited inline but never
/// fail the request. Membership changes do not touch the index because the
/// flattened text of a collection is built from its own fields only.
pub struct CollectionService<R: CollectionRepository> {
    repository: Arc<R>,
    indexer: Option<Arc<dyn CollectionIndexer>>,
}

impl<R: CollectionRepository> CollectionService<R> {
    /// Create a new CollectionService with the given repository
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
            indexer: None,
        }
    }

    /// Attach a search-index integration
    pub fn with_indexer(mut self, indexer: Arc<dyn CollectionIndexer>) -> Self {
        self.indexer = Some(indexer);
        self
    }

    /// Create a new collection
    #[instrument(skip(self, input), fields(collection_title = %input.title))]
    pub async fn create_collection(
        &self,
        input: CreateCollection,
    ) -> CollectionResult<LearningCollection> {
        input
            .validate()
            .map_err(|e| CollectionError::Validation(e.to_string()))?;

        if self.repository.exists_by_title(&input.title).await? {
            return Err(CollectionError::DuplicateTitle(input.title));
        }

        let collection = self.repository.create(input).await?;
        self.push_to_index(&collection);
        Ok(collection)
    }

    /// Get a collection by ID
    #[instrument(skip(self))]
    pub async fn get_collection(&self, id: Uuid) -> CollectionResult<LearningCollection> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(CollectionError::NotFound(id))
    }

    /// List collections with optional filters
    #[instrument(skip(self))]
    pub async fn list_collections(
        &self,
        filter: CollectionFilter,
    ) -> CollectionResult<Vec<LearningCollection>> {
        self.repository.list(filter).await
    }

    /// Update an existing collection
    #[instrument(skip(self, input))]
    pub async fn update_collection(
        &self,
        id: Uuid,
        input: UpdateCollection,
    ) -> CollectionResult<LearningCollection> {
        input
            .validate()
            .map_err(|e| CollectionError::Validation(e.to_string()))?;

        let existing = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or(CollectionError::NotFound(id))?;

        if let Some(ref new_title) = input.title {
            if new_title != &existing.title && self.repository.exists_by_title(new_title).await? {
                return Err(CollectionError::DuplicateTitle(new_title.clone()));
            }
        }

        let updated = self.repository.update(id, input).await?;
        self.push_to_index(&updated);
        Ok(updated)
    }

    /// Delete a collection
    #[instrument(skip(self))]
    pub async fn delete_collection(&self, id: Uuid) -> CollectionResult<()> {
        self.repository.delete(id).await?;

        if let Some(indexer) = &self.indexer {
            if let Err(e) = indexer.remove_collection(id).await {
                warn!(error = %e, collection_id = %id, "Failed to remove collection from search index");
            }
        }

        Ok(())
    }

    /// Count collections matching a filter
    #[instrument(skip(self))]
    pub async fn count_collections(&self, filter: CollectionFilter) -> CollectionResult<u64> {
        self.repository.count(filter).await
    }

    /// Add a content to a collection (idempotent)
    #[instrument(skip(self))]
    pub async fn add_content(
        &self,
        id: Uuid,
        content_id: Uuid,
    ) -> CollectionResult<LearningCollection> {
        self.repository.add_content(id, content_id).await
    }

    /// Remove a content from a collection
    #[instrument(skip(self))]
    pub async fn remove_content(
        &self,
        id: Uuid,
        content_id: Uuid,
    ) -> CollectionResult<LearningCollection> {
        self.repository.remove_content(id, content_id).await
    }

    /// Push a document to the search index (non-blocking, log errors)
    fn push_to_index(&self, collection: &LearningCollection) {
        if let Some(indexer) = &self.indexer {
            let indexer = Arc::clone(indexer);
            let collection = collection.clone();
            tokio::spawn(async move {
                if let Err(e) = indexer.index_collection(&collection).await {
                    warn!(error = %e, collection_id = %collection.id, "Failed to index collection");
                }
            });
        }
    }
}

impl<R: CollectionRepository> Clone for CollectionService<R> {
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
    use crate::indexer::MockCollectionIndexer;
    use crate::repository::MockCollectionRepository;

    fn create_input(title: &str) -> CreateCollection {
        CreateCollection {
            title: title.to_string(),
            description: String::new(),
            tags: vec![],
        }
    }

    #[tokio::test]
    async fn test_create_collection_rejects_duplicate_title() {
        let mut repo = MockCollectionRepository::new();
        repo.expect_exists_by_title().return_once(|_| Ok(true));

        let service = CollectionService::new(repo);
        let err = service
            .create_collection(create_input("Rust Basics"))
            .await
            .unwrap_err();

        assert!(matches!(err, CollectionError::DuplicateTitle(_)));
    }

    #[tokio::test]
    async fn test_add_content_delegates_to_repository() {
        let id = Uuid::now_v7();
        let content_id = Uuid::now_v7();

        let mut repo = MockCollectionRepository::new();
        repo.expect_add_content()
            .withf(move |i, c| *i == id && *c == content_id)
            .return_once(move |i, c| {
                let mut collection = LearningCollection::new(create_input("Rust Basics"));
                collection.id = i;
                collection.content_ids.push(c);
                Ok(collection)
            });

        let service = CollectionService::new(repo);
        let collection = service.add_content(id, content_id).await.unwrap();

        assert_eq!(collection.content_ids, vec![content_id]);
    }

    #[tokio::test]
    async fn test_delete_collection_survives_indexer_failure() {
        let mut repo = MockCollectionRepository::new();
        repo.expect_delete().return_once(|_| Ok(true));

        let mut indexer = MockCollectionIndexer::new();
        indexer
            .expect_remove_collection()
            .return_once(|_| Err(CollectionError::Index("qdrant unreachable".to_string())));

        let service = CollectionService::new(repo).with_indexer(Arc::new(indexer));
        service.delete_collection(Uuid::now_v7()).await.unwrap();
    }
}
