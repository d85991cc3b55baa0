use async_trait::async_trait;
use uuid::Uuid;

use crate::error::SearchResult;
use crate::models::{IndexPoint, ScoredPoint};

/// Repository trait for the vector index
///
/// This trait abstracts the underlying vector database (Qdrant). Collection
/// names are plain strings; the service owns which collections exist.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VectorIndex: Send + Sync {
    /// Create a collection if it does not exist yet
    async fn ensure_collection(&self, collection: &str, dimension: u32) -> SearchResult<()>;

    /// Upsert a single point
    async fn upsert(&self, collection: &str, point: IndexPoint, wait: bool) -> SearchResult<()>;

    /// Upsert multiple points in batch
    async fn upsert_batch(
        &self,
        collection: &str,
        points: Vec<IndexPoint>,
        wait: bool,
    ) -> SearchResult<()>;

    /// Delete points by id
    async fn delete(&self, collection: &str, ids: Vec<Uuid>, wait: bool) -> SearchResult<()>;

    /// Nearest-neighbor search
    async fn search(
        &self,
        collection: &str,
        vector: Vec<f32>,
        limit: u32,
        score_threshold: Option<f32>,
    ) -> SearchResult<Vec<ScoredPoint>>;

    /// Similar-point discovery seeded by existing points
    async fn recommend(
        &self,
        collection: &str,
        positive: Vec<Uuid>,
        limit: u32,
    ) -> SearchResult<Vec<ScoredPoint>>;

    /// Connectivity probe for readiness checks
    async fn ping(&self) -> SearchResult<()>;
}
