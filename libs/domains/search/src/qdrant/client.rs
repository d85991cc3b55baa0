use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use qdrant_client::Qdrant;
use qdrant_client::qdrant::{
    self, CreateCollectionBuilder, DeletePointsBuilder, Distance, PointId, PointStruct,
    RecommendPointsBuilder, SearchPointsBuilder, UpsertPointsBuilder, Value as QdrantValue,
    VectorParamsBuilder,
};
use uuid::Uuid;

use super::QdrantConfig;
use crate::error::{SearchError, SearchResult};
use crate::models::{IndexPoint, ScoredPoint};
use crate::repository::VectorIndex;

/// Qdrant-backed implementation of VectorIndex
pub struct QdrantIndex {
    client: Qdrant,
}

impl QdrantIndex {
    pub async fn new(config: QdrantConfig) -> SearchResult<Self> {
        let mut builder = Qdrant::from_url(&config.url);

        if let Some(api_key) = config.api_key {
            builder = builder.api_key(api_key);
        }

        builder = builder.timeout(Duration::from_secs(config.timeout_secs));

        let client = builder
            .build()
            .map_err(|e| SearchError::Index(format!("Failed to build client: {}", e)))?;

        Ok(Self { client })
    }

    pub fn from_client(client: Qdrant) -> Self {
        Self { client }
    }

    fn uuid_to_point_id(id: Uuid) -> PointId {
        PointId::from(id.to_string())
    }

    fn point_id_to_uuid(point_id: &PointId) -> SearchResult<Uuid> {
        match &point_id.point_id_options {
            Some(qdrant::point_id::PointIdOptions::Uuid(uuid_str)) => Uuid::parse_str(uuid_str)
                .map_err(|e| SearchError::Internal(format!("Invalid UUID: {}", e))),
            Some(qdrant::point_id::PointIdOptions::Num(num)) => Ok(Uuid::from_u128(*num as u128)),
            None => Err(SearchError::Internal("Missing point ID".to_string())),
        }
    }

    fn payload_to_qdrant(payload: Option<serde_json::Value>) -> HashMap<String, QdrantValue> {
        let Some(value) = payload else {
            return HashMap::new();
        };

        let mut result = HashMap::new();

        if let serde_json::Value::Object(map) = value {
            for (key, val) in map {
                if let Some(qdrant_val) = json_to_qdrant_value(val) {
                    result.insert(key, qdrant_val);
                }
            }
        }

        result
    }

    fn qdrant_to_payload(payload: HashMap<String, QdrantValue>) -> Option<serde_json::Value> {
        if payload.is_empty() {
            return None;
        }

        let mut map = serde_json::Map::new();
        for (key, val) in payload {
            if let Some(json_val) = qdrant_value_to_json(val) {
                map.insert(key, json_val);
            }
        }

        Some(serde_json::Value::Object(map))
    }

    fn scored_point(point: qdrant::ScoredPoint) -> SearchResult<ScoredPoint> {
        let id = point
            .id
            .as_ref()
            .map(Self::point_id_to_uuid)
            .transpose()?
            .ok_or_else(|| SearchError::Internal("Missing point ID".to_string()))?;

        Ok(ScoredPoint {
            id,
            score: point.score,
            payload: Self::qdrant_to_payload(point.payload),
        })
    }

    fn point_struct(point: IndexPoint) -> PointStruct {
        PointStruct::new(
            Self::uuid_to_point_id(point.id),
            point.values,
            Self::payload_to_qdrant(point.payload),
        )
    }
}

fn json_to_qdrant_value(val: serde_json::Value) -> Option<QdrantValue> {
    match val {
        serde_json::Value::Null => None,
        serde_json::Value::Bool(b) => Some(QdrantValue::from(b)),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Some(QdrantValue::from(i))
            } else {
                n.as_f64().map(QdrantValue::from)
            }
        }
        serde_json::Value::String(s) => Some(QdrantValue::from(s)),
        _ => {
            // For complex types, serialize to string
            Some(QdrantValue::from(val.to_string()))
        }
    }
}

fn qdrant_value_to_json(val: QdrantValue) -> Option<serde_json::Value> {
    use qdrant::value::Kind;

    match val.kind {
        Some(Kind::NullValue(_)) => Some(serde_json::Value::Null),
        Some(Kind::BoolValue(b)) => Some(serde_json::Value::Bool(b)),
        Some(Kind::IntegerValue(i)) => Some(serde_json::Value::Number(i.into())),
        Some(Kind::DoubleValue(f)) => {
            serde_json::Number::from_f64(f).map(serde_json::Value::Number)
        }
        Some(Kind::StringValue(s)) => Some(serde_json::Value::String(s)),
        _ => None,
    }
}

#[async_trait]
impl VectorIndex for QdrantIndex {
    async fn ensure_collection(&self, collection: &str, dimension: u32) -> SearchResult<()> {
        if self.client.collection_exists(collection).await? {
            return Ok(());
        }

        // Cosine distance: embedding providers return unnormalized vectors
        let builder = CreateCollectionBuilder::new(collection).vectors_config(
            VectorParamsBuilder::new(dimension as u64, Distance::Cosine),
        );

        self.client.create_collection(builder).await?;
        tracing::info!(collection, dimension, "Created vector index collection");
        Ok(())
    }

    async fn upsert(&self, collection: &str, point: IndexPoint, wait: bool) -> SearchResult<()> {
        self.upsert_batch(collection, vec![point], wait).await
    }

    async fn upsert_batch(
        &self,
        collection: &str,
        points: Vec<IndexPoint>,
        wait: bool,
    ) -> SearchResult<()> {
        if points.is_empty() {
            return Ok(());
        }

        let points: Vec<PointStruct> = points.into_iter().map(Self::point_struct).collect();

        let mut builder = UpsertPointsBuilder::new(collection, points);
        if wait {
            builder = builder.wait(true);
        }

        self.client.upsert_points(builder).await?;
        Ok(())
    }

    async fn delete(&self, collection: &str, ids: Vec<Uuid>, wait: bool) -> SearchResult<()> {
        let point_ids: Vec<PointId> = ids.iter().map(|id| Self::uuid_to_point_id(*id)).collect();

        let mut builder = DeletePointsBuilder::new(collection).points(point_ids);
        if wait {
            builder = builder.wait(true);
        }

        self.client.delete_points(builder).await?;
        Ok(())
    }

    async fn search(
        &self,
        collection: &str,
        vector: Vec<f32>,
        limit: u32,
        score_threshold: Option<f32>,
    ) -> SearchResult<Vec<ScoredPoint>> {
        let mut builder = SearchPointsBuilder::new(collection, vector, limit as u64);

        if let Some(threshold) = score_threshold {
            builder = builder.score_threshold(threshold);
        }

        builder = builder.with_payload(true);

        let results = self.client.search_points(builder).await?;

        results
            .result
            .into_iter()
            .map(Self::scored_point)
            .collect()
    }

    async fn recommend(
        &self,
        collection: &str,
        positive: Vec<Uuid>,
        limit: u32,
    ) -> SearchResult<Vec<ScoredPoint>> {
        let mut builder = RecommendPointsBuilder::new(collection, limit as u64);

        for id in positive {
            builder = builder.add_positive(Self::uuid_to_point_id(id));
        }

        builder = builder.with_payload(true);

        let results = self.client.recommend(builder).await?;

        results
            .result
            .into_iter()
            .map(Self::scored_point)
            .collect()
    }

    async fn ping(&self) -> SearchResult<()> {
        self.client.health_check().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uuid_point_id_round_trip() {
        let id = Uuid::now_v7();
        let point_id = QdrantIndex::uuid_to_point_id(id);
        assert_eq!(QdrantIndex::point_id_to_uuid(&point_id).unwrap(), id);
    }

    #[test]
    fn test_payload_conversion_round_trip() {
        let payload = serde_json::json!({
            "document_id": "0192d3a0-0000-7000-8000-000000000000",
            "kind": "content",
            "indexed": true,
            "score": 1.5_f64,
        });

        let qdrant_payload = QdrantIndex::payload_to_qdrant(Some(payload.clone()));
        let back = QdrantIndex::qdrant_to_payload(qdrant_payload).unwrap();

        assert_eq!(back["document_id"], payload["document_id"]);
        assert_eq!(back["kind"], payload["kind"]);
        assert_eq!(back["indexed"], payload["indexed"]);
    }

    #[test]
    fn test_empty_payload_is_none() {
        let qdrant_payload = QdrantIndex::payload_to_qdrant(None);
        assert!(qdrant_payload.is_empty());
        assert!(QdrantIndex::qdrant_to_payload(qdrant_payload).is_none());
    }

    #[tokio::test]
    #[ignore] // Requires actual Qdrant
    async fn test_ensure_collection_and_search() {
        let index = QdrantIndex::new(QdrantConfig::from_env().unwrap())
            .await
            .unwrap();

        index.ensure_collection("it_points", 4).await.unwrap();

        let id = Uuid::now_v7();
        let point = IndexPoint::new(id, vec![0.1, 0.2, 0.3, 0.4])
            .with_payload(serde_json::json!({ "document_id": id.to_string() }));
        index.upsert("it_points", point, true).await.unwrap();

        let hits = index
            .search("it_points", vec![0.1, 0.2, 0.3, 0.4], 1, None)
            .await
            .unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].document_id(), Some(id));
    }
}
