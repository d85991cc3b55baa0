use domain_collections::LearningCollection;
use domain_content::LearningContent;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Embedding provider types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum EmbeddingProviderType {
    #[default]
    HuggingFace,
    OpenAi,
}

/// Embedding model selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum EmbeddingModel {
    /// sentence-transformers/all-MiniLM-L6-v2 (384 dimensions)
    AllMiniLmL6V2,
    /// sentence-transformers/all-mpnet-base-v2 (768 dimensions)
    AllMpnetBaseV2,
    /// OpenAI text-embedding-3-small (1536 dimensions)
    TextEmbedding3Small,
    /// OpenAI text-embedding-3-large (3072 dimensions)
    TextEmbedding3Large,
    /// Custom model with specified dimension
    Custom(u32),
}

impl Default for EmbeddingModel {
    fn default() -> Self {
        EmbeddingModel::AllMiniLmL6V2
    }
}

impl EmbeddingModel {
    pub fn dimension(&self) -> u32 {
        match self {
            EmbeddingModel::AllMiniLmL6V2 => 384,
            EmbeddingModel::AllMpnetBaseV2 => 768,
            EmbeddingModel::TextEmbedding3Small => 1536,
            EmbeddingModel::TextEmbedding3Large => 3072,
            EmbeddingModel::Custom(dim) => *dim,
        }
    }

    pub fn model_name(&self) -> &str {
        match self {
            EmbeddingModel::AllMiniLmL6V2 => "sentence-transformers/all-MiniLM-L6-v2",
            EmbeddingModel::AllMpnetBaseV2 => "sentence-transformers/all-mpnet-base-v2",
            EmbeddingModel::TextEmbedding3Small => "text-embedding-3-small",
            EmbeddingModel::TextEmbedding3Large => "text-embedding-3-large",
            EmbeddingModel::Custom(_) => "custom",
        }
    }

    /// Get the provider type this model belongs to
    pub fn provider(&self) -> EmbeddingProviderType {
        match self {
            EmbeddingModel::AllMiniLmL6V2
            | EmbeddingModel::AllMpnetBaseV2
            | EmbeddingModel::Custom(_) => EmbeddingProviderType::HuggingFace,
            EmbeddingModel::TextEmbedding3Small | EmbeddingModel::TextEmbedding3Large => {
                EmbeddingProviderType::OpenAi
            }
        }
    }

    /// Resolve a model from its public name
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "sentence-transformers/all-MiniLM-L6-v2" => Some(EmbeddingModel::AllMiniLmL6V2),
            "sentence-transformers/all-mpnet-base-v2" => Some(EmbeddingModel::AllMpnetBaseV2),
            "text-embedding-3-small" => Some(EmbeddingModel::TextEmbedding3Small),
            "text-embedding-3-large" => Some(EmbeddingModel::TextEmbedding3Large),
            _ => None,
        }
    }
}

/// A generated embedding vector
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingVector {
    pub values: Vec<f32>,
    pub dimension: u32,
}

/// A point to upsert into the vector index
#[derive(Debug, Clone)]
pub struct IndexPoint {
    pub id: Uuid,
    pub values: Vec<f32>,
    pub payload: Option<serde_json::Value>,
}

impl IndexPoint {
    pub fn new(id: Uuid, values: Vec<f32>) -> Self {
        Self {
            id,
            values,
            payload: None,
        }
    }

    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = Some(payload);
        self
    }
}

/// A scored nearest-neighbor hit from the vector index
#[derive(Debug, Clone)]
pub struct ScoredPoint {
    pub id: Uuid,
    pub score: f32,
    pub payload: Option<serde_json::Value>,
}

impl ScoredPoint {
    /// Extract the source document id recorded in the point payload
    pub fn document_id(&self) -> Option<Uuid> {
        self.payload
            .as_ref()
            .and_then(|p| p.get("document_id"))
            .and_then(|v| v.as_str())
            .and_then(|s| Uuid::parse_str(s).ok())
    }
}

/// Which index collections a search should cover
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SearchScope {
    #[default]
    All,
    Contents,
    Collections,
}

impl SearchScope {
    pub fn includes_contents(&self) -> bool {
        matches!(self, SearchScope::All | SearchScope::Contents)
    }

    pub fn includes_collections(&self) -> bool {
        matches!(self, SearchScope::All | SearchScope::Collections)
    }
}

/// Semantic search request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct SearchRequest {
    /// Free-text query
    #[validate(length(min = 1, max = 1000))]
    pub query: String,
    /// Optional tag filters, folded into the embedded query text
    #[serde(default)]
    pub tags: Vec<String>,
    /// Which index collections to search
    #[serde(default)]
    pub scope: SearchScope,
    /// Maximum number of hits per index collection
    #[serde(default = "default_limit")]
    #[validate(range(min = 1, max = 100))]
    pub limit: u32,
    /// Minimum similarity score for a hit to be returned
    #[serde(default)]
    pub score_threshold: Option<f32>,
}

fn default_limit() -> u32 {
    10
}

/// A content hit with its similarity score
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ContentHit {
    pub score: f32,
    pub content: LearningContent,
}

/// A collection hit with its similarity score
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CollectionHit {
    pub score: f32,
    pub collection: LearningCollection,
}

/// Semantic search response, one hit list per content type
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SearchResponse {
    pub contents: Vec<ContentHit>,
    pub collections: Vec<CollectionHit>,
}

/// Outcome of a full reindex run
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ReindexReport {
    pub contents_indexed: u64,
    pub collections_indexed: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_dimensions() {
        assert_eq!(EmbeddingModel::AllMiniLmL6V2.dimension(), 384);
        assert_eq!(EmbeddingModel::AllMpnetBaseV2.dimension(), 768);
        assert_eq!(EmbeddingModel::TextEmbedding3Small.dimension(), 1536);
        assert_eq!(EmbeddingModel::Custom(512).dimension(), 512);
    }

    #[test]
    fn test_model_names_round_trip() {
        for model in [
            EmbeddingModel::AllMiniLmL6V2,
            EmbeddingModel::AllMpnetBaseV2,
            EmbeddingModel::TextEmbedding3Small,
            EmbeddingModel::TextEmbedding3Large,
        ] {
            assert_eq!(EmbeddingModel::from_name(model.model_name()), Some(model));
        }
        assert_eq!(EmbeddingModel::from_name("unknown"), None);
    }

    #[test]
    fn test_model_provider_mapping() {
        assert_eq!(
            EmbeddingModel::AllMiniLmL6V2.provider(),
            EmbeddingProviderType::HuggingFace
        );
        assert_eq!(
            EmbeddingModel::TextEmbedding3Small.provider(),
            EmbeddingProviderType::OpenAi
        );
    }

    #[test]
    fn test_scope_includes() {
        assert!(SearchScope::All.includes_contents());
        assert!(SearchScope::All.includes_collections());
        assert!(!SearchScope::Contents.includes_collections());
        assert!(!SearchScope::Collections.includes_contents());
    }

    #[test]
    fn test_scored_point_document_id() {
        let id = Uuid::now_v7();
        let point = ScoredPoint {
            id: Uuid::now_v7(),
            score: 0.9,
            payload: Some(serde_json::json!({ "document_id": id.to_string() })),
        };
        assert_eq!(point.document_id(), Some(id));

        let bare = ScoredPoint {
            id: Uuid::now_v7(),
            score: 0.9,
            payload: None,
        };
        assert_eq!(bare.document_id(), None);
    }
}
