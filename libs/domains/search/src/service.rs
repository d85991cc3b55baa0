//! Search Service - the embed → index → cross-check pipeline

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use domain_collections::{
    CollectionIndexer, CollectionRepository, CollectionResult, LearningCollection,
};
use domain_content::{ContentIndexer, ContentRepository, ContentResult, LearningContent};
use serde_json::json;
use tracing::{debug, info, instrument};
use uuid::Uuid;
use validator::Validate;

use crate::embedding::EmbeddingProvider;
use crate::error::{SearchError, SearchResult};
use crate::flatten::{flatten_collection, flatten_content, flatten_query, point_id};
use crate::models::{
    CollectionHit, ContentHit, EmbeddingModel, IndexPoint, ReindexReport, ScoredPoint,
    SearchRequest, SearchResponse,
};
use crate::repository::VectorIndex;

/// Vector-index collection holding content points
pub const CONTENTS_INDEX: &str = "learning_contents";
/// Vector-index collection holding collection points
pub const COLLECTIONS_INDEX: &str = "learning_collections";

/// Documents embedded per provider call during a full reindex
const REINDEX_BATCH: usize = 32;

/// Search service composing the embedding provider, the vector index, and the
/// MongoDB repositories.
///
/// Both document types share one embedding space; they live in separate index
/// collections so a search can address them independently. Every hit returned
/// to a caller has been re-resolved against MongoDB, so ids that no longer
/// exist there are silently dropped from results.
pub struct SearchService<V: VectorIndex> {
    index: Arc<V>,
    provider: Arc<dyn EmbeddingProvider>,
    model: EmbeddingModel,
    contents: Arc<dyn ContentRepository>,
    collections: Arc<dyn CollectionRepository>,
}

impl<V: VectorIndex> SearchService<V> {
    pub fn new(
        index: V,
        provider: Arc<dyn EmbeddingProvider>,
        model: EmbeddingModel,
        contents: Arc<dyn ContentRepository>,
        collections: Arc<dyn CollectionRepository>,
    ) -> Self {
        Self {
            index: Arc::new(index),
            provider,
            model,
            contents,
            collections,
        }
    }

    /// Create both index collections if they do not exist yet
    pub async fn ensure_collections(&self) -> SearchResult<()> {
        let dimension = self.model.dimension();
        self.index
            .ensure_collection(CONTENTS_INDEX, dimension)
            .await?;
        self.index
            .ensure_collection(COLLECTIONS_INDEX, dimension)
            .await?;
        Ok(())
    }

    /// Connectivity probe for readiness checks
    pub async fn ping(&self) -> SearchResult<()> {
        self.index.ping().await
    }

    // ===== Indexing =====

    /// Flatten, embed, and upsert a content document
    #[instrument(skip(self, content), fields(content_id = %content.id))]
    pub async fn index_content(&self, content: &LearningContent) -> SearchResult<()> {
        let flat = flatten_content(content);
        let embedding = self.provider.embed(self.model, &flat).await?;

        let point = IndexPoint::new(point_id(content.id), embedding.values)
            .with_payload(content_payload(content));

        self.index.upsert(CONTENTS_INDEX, point, false).await
    }

    /// Flatten, embed, and upsert a collection document
    #[instrument(skip(self, collection), fields(collection_id = %collection.id))]
    pub async fn index_collection(&self, collection: &LearningCollection) -> SearchResult<()> {
        let flat = flatten_collection(collection);
        let embedding = self.provider.embed(self.model, &flat).await?;

        let point = IndexPoint::new(point_id(collection.id), embedding.values)
            .with_payload(collection_payload(collection));

        self.index.upsert(COLLECTIONS_INDEX, point, false).await
    }

    /// Remove a content point from the index
    #[instrument(skip(self))]
    pub async fn remove_content(&self, id: Uuid) -> SearchResult<()> {
        self.index
            .delete(CONTENTS_INDEX, vec![point_id(id)], true)
            .await
    }

    /// Remove a collection point from the index
    #[instrument(skip(self))]
    pub async fn remove_collection(&self, id: Uuid) -> SearchResult<()> {
        self.index
            .delete(COLLECTIONS_INDEX, vec![point_id(id)], true)
            .await
    }

    // ===== Search =====

    /// Semantic search across contents and collections.
    ///
    /// The query text and tag filters are flattened by the same rules as the
    /// documents, embedded once, and matched against each index collection in
    /// scope. Hits are resolved against MongoDB; stale index entries never
    /// reach the caller.
    #[instrument(skip(self, request), fields(scope = ?request.scope, limit = request.limit))]
    pub async fn search(&self, request: SearchRequest) -> SearchResult<SearchResponse> {
        request
            .validate()
            .map_err(|e| SearchError::Validation(e.to_string()))?;

        let flat = flatten_query(&request.query, &request.tags);
        let embedding = self.provider.embed(self.model, &flat).await?;
        let vector = embedding.values;

        let mut response = SearchResponse {
            contents: Vec::new(),
            collections: Vec::new(),
        };

        if request.scope.includes_contents() {
            let hits = self
                .index
                .search(
                    CONTENTS_INDEX,
                    vector.clone(),
                    request.limit,
                    request.score_threshold,
                )
                .await?;
            response.contents = self.resolve_content_hits(hits).await?;
        }

        if request.scope.includes_collections() {
            let hits = self
                .index
                .search(
                    COLLECTIONS_INDEX,
                    vector,
                    request.limit,
                    request.score_threshold,
                )
                .await?;
            response.collections = self.resolve_collection_hits(hits).await?;
        }

        Ok(response)
    }

    /// Similar-content discovery seeded by an existing content document
    #[instrument(skip(self))]
    pub async fn similar_contents(&self, id: Uuid, limit: u32) -> SearchResult<Vec<ContentHit>> {
        self.contents
            .get_by_id(id)
            .await?
            .ok_or(SearchError::NotFound(id))?;

        let hits = self
            .index
            .recommend(CONTENTS_INDEX, vec![point_id(id)], limit)
            .await?;

        self.resolve_content_hits(hits).await
    }

    // ===== Recovery =====

    /// Re-embed every document and upsert it into the index.
    ///
    /// Point ids are a pure function of document ids, so a reindex overwrites
    /// in place and converges the index after missed upserts.
    #[instrument(skip(self))]
    pub async fn reindex_all(&self) -> SearchResult<ReindexReport> {
        self.ensure_collections().await?;

        let contents = self.contents.list_all().await?;
        let mut contents_indexed = 0u64;
        for chunk in contents.chunks(REINDEX_BATCH) {
            let texts: Vec<String> = chunk.iter().map(flatten_content).collect();
            let embeddings = self.provider.embed_batch(self.model, &texts).await?;
            let points = batch_points(chunk, embeddings, content_payload)?;
            self.index.upsert_batch(CONTENTS_INDEX, points, true).await?;
            contents_indexed += chunk.len() as u64;
        }

        let collections = self.collections.list_all().await?;
        let mut collections_indexed = 0u64;
        for chunk in collections.chunks(REINDEX_BATCH) {
            let texts: Vec<String> = chunk.iter().map(flatten_collection).collect();
            let embeddings = self.provider.embed_batch(self.model, &texts).await?;
            let points = batch_points(chunk, embeddings, collection_payload)?;
            self.index
                .upsert_batch(COLLECTIONS_INDEX, points, true)
                .await?;
            collections_indexed += chunk.len() as u64;
        }

        info!(contents_indexed, collections_indexed, "Reindex completed");
        Ok(ReindexReport {
            contents_indexed,
            collections_indexed,
        })
    }

    // ===== Hit resolution =====

    async fn resolve_content_hits(
        &self,
        hits: Vec<ScoredPoint>,
    ) -> SearchResult<Vec<ContentHit>> {
        let ids: Vec<Uuid> = hits.iter().filter_map(ScoredPoint::document_id).collect();
        let documents = self.contents.get_many(ids).await?;
        let mut by_id: HashMap<Uuid, LearningContent> =
            documents.into_iter().map(|d| (d.id, d)).collect();

        let total = hits.len();
        let resolved: Vec<ContentHit> = hits
            .into_iter()
            .filter_map(|hit| {
                let document_id = hit.document_id()?;
                let content = by_id.remove(&document_id)?;
                Some(ContentHit {
                    score: hit.score,
                    content,
                })
            })
            .collect();

        if resolved.len() < total {
            debug!(
                dropped = total - resolved.len(),
                "Dropped index hits without a backing document"
            );
        }

        Ok(resolved)
    }

    async fn resolve_collection_hits(
        &self,
        hits: Vec<ScoredPoint>,
    ) -> SearchResult<Vec<CollectionHit>> {
        let ids: Vec<Uuid> = hits.iter().filter_map(ScoredPoint::document_id).collect();
        let documents = self.collections.get_many(ids).await?;
        let mut by_id: HashMap<Uuid, LearningCollection> =
            documents.into_iter().map(|d| (d.id, d)).collect();

        let total = hits.len();
        let resolved: Vec<CollectionHit> = hits
            .into_iter()
            .filter_map(|hit| {
                let document_id = hit.document_id()?;
                let collection = by_id.remove(&document_id)?;
                Some(CollectionHit {
                    score: hit.score,
                    collection,
                })
            })
            .collect();

        if resolved.len() < total {
            debug!(
                dropped = total - resolved.len(),
                "Dropped index hits without a backing document"
            );
        }

        Ok(resolved)
    }
}

fn content_payload(content: &LearningContent) -> serde_json::Value {
    json!({
        "document_id": content.id.to_string(),
        "kind": "content",
        "title": content.title,
    })
}

fn collection_payload(collection: &LearningCollection) -> serde_json::Value {
    json!({
        "document_id": collection.id.to_string(),
        "kind": "collection",
        "title": collection.title,
    })
}

fn batch_points<T: HasDocumentId>(
    chunk: &[T],
    embeddings: Vec<crate::models::EmbeddingVector>,
    payload: fn(&T) -> serde_json::Value,
) -> SearchResult<Vec<IndexPoint>> {
    if embeddings.len() != chunk.len() {
        return Err(SearchError::Embedding(format!(
            "Expected {} embeddings, got {}",
            chunk.len(),
            embeddings.len()
        )));
    }

    Ok(chunk
        .iter()
        .zip(embeddings)
        .map(|(document, embedding)| {
            IndexPoint::new(point_id(document.document_id()), embedding.values)
                .with_payload(payload(document))
        })
        .collect())
}

trait HasDocumentId {
    fn document_id(&self) -> Uuid;
}

impl HasDocumentId for LearningContent {
    fn document_id(&self) -> Uuid {
        self.id
    }
}

impl HasDocumentId for LearningCollection {
    fn document_id(&self) -> Uuid {
        self.id
    }
}

impl<V: VectorIndex> Clone for SearchService<V> {
    fn clone(&self) -> Self {
        Self {
            index: Arc::clone(&self.index),
            provider: Arc::clone(&self.provider),
            model: self.model,
            contents: Arc::clone(&self.contents),
            collections: Arc::clone(&self.collections),
        }
    }
}

// ===== Indexer integrations =====

#[async_trait]
impl<V: VectorIndex> ContentIndexer for SearchService<V> {
    async fn index_content(&self, content: &LearningContent) -> ContentResult<()> {
        SearchService::index_content(self, content)
            .await
            .map_err(Into::into)
    }

    async fn remove_content(&self, id: Uuid) -> ContentResult<()> {
        SearchService::remove_content(self, id)
            .await
            .map_err(Into::into)
    }
}

#[async_trait]
impl<V: VectorIndex> CollectionIndexer for SearchService<V> {
    async fn index_collection(&self, collection: &LearningCollection) -> CollectionResult<()> {
        SearchService::index_collection(self, collection)
            .await
            .map_err(Into::into)
    }

    async fn remove_collection(&self, id: Uuid) -> CollectionResult<()> {
        SearchService::remove_collection(self, id)
            .await
            .map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedding::MockEmbeddingProvider;
    use crate::models::{EmbeddingVector, SearchScope};
    use crate::repository::MockVectorIndex;
    use domain_collections::{CollectionFilter, CreateCollection, UpdateCollection};
    use domain_collections::error::CollectionError;
    use domain_content::error::ContentError;
    use domain_content::{ContentFilter, CreateContent, Difficulty, UpdateContent};

    /// Fixed-content stand-in for the MongoDB content repository
    struct StubContents {
        documents: Vec<LearningContent>,
    }

    #[async_trait]
    impl ContentRepository for StubContents {
        async fn create(&self, _input: CreateContent) -> ContentResult<LearningContent> {
            Err(ContentError::Internal("not used".to_string()))
        }

        async fn get_by_id(&self, id: Uuid) -> ContentResult<Option<LearningContent>> {
            Ok(self.documents.iter().find(|d| d.id == id).cloned())
        }

        async fn get_many(&self, ids: Vec<Uuid>) -> ContentResult<Vec<LearningContent>> {
            Ok(self
                .documents
                .iter()
                .filter(|d| ids.contains(&d.id))
                .cloned()
                .collect())
        }

        async fn list(&self, _filter: ContentFilter) -> ContentResult<Vec<LearningContent>> {
            Ok(self.documents.clone())
        }

        async fn list_all(&self) -> ContentResult<Vec<LearningContent>> {
            Ok(self.documents.clone())
        }

        async fn update(
            &self,
            _id: Uuid,
            _input: UpdateContent,
        ) -> ContentResult<LearningContent> {
            Err(ContentError::Internal("not used".to_string()))
        }

        async fn delete(&self, _id: Uuid) -> ContentResult<bool> {
            Ok(false)
        }

        async fn count(&self, _filter: ContentFilter) -> ContentResult<u64> {
            Ok(self.documents.len() as u64)
        }

        async fn exists_by_title(&self, _title: &str) -> ContentResult<bool> {
            Ok(false)
        }
    }

    /// Fixed-content stand-in for the MongoDB collection repository
    struct StubCollections {
        documents: Vec<LearningCollection>,
    }

    #[async_trait]
    impl CollectionRepository for StubCollections {
        async fn create(&self, _input: CreateCollection) -> CollectionResult<LearningCollection> {
            Err(CollectionError::Internal("not used".to_string()))
        }

        async fn get_by_id(&self, id: Uuid) -> CollectionResult<Option<LearningCollection>> {
            Ok(self.documents.iter().find(|d| d.id == id).cloned())
        }

        async fn get_many(&self, ids: Vec<Uuid>) -> CollectionResult<Vec<LearningCollection>> {
            Ok(self
                .documents
                .iter()
                .filter(|d| ids.contains(&d.id))
                .cloned()
                .collect())
        }

        async fn list(
            &self,
            _filter: CollectionFilter,
        ) -> CollectionResult<Vec<LearningCollection>> {
            Ok(self.documents.clone())
        }

        async fn list_all(&self) -> CollectionResult<Vec<LearningCollection>> {
            Ok(self.documents.clone())
        }

        async fn update(
            &self,
            _id: Uuid,
            _input: UpdateCollection,
        ) -> CollectionResult<LearningCollection> {
            Err(CollectionError::Internal("not used".to_string()))
        }

        async fn delete(&self, _id: Uuid) -> CollectionResult<bool> {
            Ok(false)
        }

        async fn count(&self, _filter: CollectionFilter) -> CollectionResult<u64> {
            Ok(self.documents.len() as u64)
        }

        async fn exists_by_title(&self, _title: &str) -> CollectionResult<bool> {
            Ok(false)
        }

        async fn add_content(
            &self,
            _id: Uuid,
            _content_id: Uuid,
        ) -> CollectionResult<LearningCollection> {
            Err(CollectionError::Internal("not used".to_string()))
        }

        async fn remove_content(
            &self,
            _id: Uuid,
            _content_id: Uuid,
        ) -> CollectionResult<LearningCollection> {
            Err(CollectionError::Internal("not used".to_string()))
        }
    }

    fn content(title: &str) -> LearningContent {
        LearningContent::new(CreateContent {
            title: title.to_string(),
            description: "desc".to_string(),
            body: String::new(),
            tags: vec!["rust".to_string()],
            difficulty: Difficulty::Beginner,
            exercises: vec![],
        })
    }

    fn embedding_provider() -> Arc<dyn EmbeddingProvider> {
        let mut provider = MockEmbeddingProvider::new();
        provider
            .expect_embed()
            .returning(|_, _| {
                Ok(EmbeddingVector {
                    values: vec![0.1, 0.2, 0.3, 0.4],
                    dimension: 4,
                })
            });
        provider.expect_embed_batch().returning(|_, texts| {
            Ok(texts
                .iter()
                .map(|_| EmbeddingVector {
                    values: vec![0.1, 0.2, 0.3, 0.4],
                    dimension: 4,
                })
                .collect())
        });
        Arc::new(provider)
    }

    fn hit_for(document_id: Uuid, score: f32) -> ScoredPoint {
        ScoredPoint {
            id: point_id(document_id),
            score,
            payload: Some(json!({ "document_id": document_id.to_string() })),
        }
    }

    fn service(
        index: MockVectorIndex,
        contents: Vec<LearningContent>,
        collections: Vec<LearningCollection>,
    ) -> SearchService<MockVectorIndex> {
        SearchService::new(
            index,
            embedding_provider(),
            EmbeddingModel::Custom(4),
            Arc::new(StubContents {
                documents: contents,
            }),
            Arc::new(StubCollections {
                documents: collections,
            }),
        )
    }

    fn request(query: &str) -> SearchRequest {
        SearchRequest {
            query: query.to_string(),
            tags: vec![],
            scope: SearchScope::Contents,
            limit: 10,
            score_threshold: None,
        }
    }

    #[tokio::test]
    async fn test_search_drops_hits_without_backing_document() {
        let alive = content("Ownership");
        let alive_id = alive.id;
        let stale_id = Uuid::now_v7();

        let mut index = MockVectorIndex::new();
        index.expect_search().return_once(move |_, _, _, _| {
            Ok(vec![hit_for(stale_id, 0.99), hit_for(alive_id, 0.87)])
        });

        let service = service(index, vec![alive], vec![]);
        let response = service.search(request("borrow checker")).await.unwrap();

        assert_eq!(response.contents.len(), 1);
        assert_eq!(response.contents[0].content.id, alive_id);
        assert_eq!(response.contents[0].score, 0.87);
        assert!(response.collections.is_empty());
    }

    #[tokio::test]
    async fn test_search_scope_contents_skips_collections_index() {
        let mut index = MockVectorIndex::new();
        index
            .expect_search()
            .withf(|collection, _, _, _| collection == CONTENTS_INDEX)
            .times(1)
            .return_once(|_, _, _, _| Ok(vec![]));

        let service = service(index, vec![], vec![]);
        let response = service.search(request("anything")).await.unwrap();

        assert!(response.contents.is_empty());
        assert!(response.collections.is_empty());
    }

    #[tokio::test]
    async fn test_search_rejects_empty_query() {
        let service = service(MockVectorIndex::new(), vec![], vec![]);
        let err = service.search(request("")).await.unwrap_err();
        assert!(matches!(err, SearchError::Validation(_)));
    }

    #[tokio::test]
    async fn test_index_content_uses_derived_point_id() {
        let document = content("Ownership");
        let document_id = document.id;
        let expected_point = point_id(document_id);

        let mut index = MockVectorIndex::new();
        index
            .expect_upsert()
            .withf(move |collection, point, _| {
                collection == CONTENTS_INDEX
                    && point.id == expected_point
                    && point
                        .payload
                        .as_ref()
                        .and_then(|p| p.get("document_id"))
                        .and_then(|v| v.as_str())
                        == Some(document_id.to_string().as_str())
            })
            .times(1)
            .return_once(|_, _, _| Ok(()));

        let service = service(index, vec![], vec![]);
        service.index_content(&document).await.unwrap();
    }

    #[tokio::test]
    async fn test_similar_contents_requires_existing_document() {
        let service = service(MockVectorIndex::new(), vec![], vec![]);
        let err = service
            .similar_contents(Uuid::now_v7(), 5)
            .await
            .unwrap_err();
        assert!(matches!(err, SearchError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_similar_contents_excludes_stale_hits() {
        let seed = content("Seed");
        let similar = content("Similar");
        let seed_id = seed.id;
        let similar_id = similar.id;
        let stale_id = Uuid::now_v7();

        let mut index = MockVectorIndex::new();
        index
            .expect_recommend()
            .withf(move |collection, positive, _| {
                collection == CONTENTS_INDEX && *positive == vec![point_id(seed_id)]
            })
            .return_once(move |_, _, _| {
                Ok(vec![hit_for(similar_id, 0.91), hit_for(stale_id, 0.88)])
            });

        let service = service(index, vec![seed, similar], vec![]);
        let hits = service.similar_contents(seed_id, 5).await.unwrap();

        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].content.id, similar_id);
    }

    #[tokio::test]
    async fn test_reindex_all_counts_both_kinds() {
        let contents = vec![content("A"), content("B")];
        let collection = LearningCollection::new(CreateCollection {
            title: "C".to_string(),
            description: String::new(),
            tags: vec![],
        });

        let mut index = MockVectorIndex::new();
        index
            .expect_ensure_collection()
            .times(2)
            .returning(|_, _| Ok(()));
        index
            .expect_upsert_batch()
            .withf(|collection, points, wait| {
                *wait
                    && ((collection == CONTENTS_INDEX && points.len() == 2)
                        || (collection == COLLECTIONS_INDEX && points.len() == 1))
            })
            .times(2)
            .returning(|_, _, _| Ok(()));

        let service = service(index, contents, vec![collection]);
        let report = service.reindex_all().await.unwrap();

        assert_eq!(report.contents_indexed, 2);
        assert_eq!(report.collections_indexed, 1);
    }
}
