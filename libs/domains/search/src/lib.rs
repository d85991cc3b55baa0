//! Semantic Search Domain
//!
//! This module implements the semantic search / recommendation pipeline on top
//! of the content and collection domains.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐
//! │   SearchService  │  ← flatten → embed → index, search with existence check
//! └───┬─────────┬────┘
//!     │         │
//! ┌───▼──────┐ ┌▼─────────────────┐
//! │VectorIndex│ │EmbeddingProvider │
//! │  (trait)  │ │     (trait)      │
//! └───┬──────┘ └┬─────────────────┘
//!     │         │
//! ┌───▼──────┐ ┌▼─────────────────┐
//! │QdrantIndex│ │HuggingFaceProvider│
//! │           │ │OpenAiProvider     │
//! └──────────┘ └──────────────────┘
//! ```
//!
//! Every document is flattened into a deterministic text string, embedded into
//! a fixed-length vector, and stored under a point id derived from the
//! document id (UUIDv5). Search embeds the query the same way, collects
//! nearest neighbors from the contents and collections indexes, and
//! cross-checks the hits against MongoDB before returning them.

pub mod embedding;
pub mod error;
pub mod flatten;
pub mod handlers;
pub mod models;
pub mod qdrant;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use embedding::{
    EmbeddingConfig, EmbeddingProvider, HuggingFaceProvider, OpenAiProvider, provider_from_env,
};
pub use error::{SearchError, SearchResult};
pub use flatten::{flatten_collection, flatten_content, flatten_query, point_id};
pub use handlers::ApiDoc;
pub use models::{
    CollectionHit, ContentHit, EmbeddingModel, EmbeddingProviderType, EmbeddingVector, IndexPoint,
    ReindexReport, ScoredPoint, SearchRequest, SearchResponse, SearchScope,
};
pub use qdrant::{QdrantConfig, QdrantIndex};
pub use repository::VectorIndex;
pub use service::{COLLECTIONS_INDEX, CONTENTS_INDEX, SearchService};
