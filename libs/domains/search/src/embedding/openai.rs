use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::EmbeddingProvider;
use crate::error::{SearchError, SearchResult};
use crate::models::{EmbeddingModel, EmbeddingProviderType, EmbeddingVector};

/// OpenAI embedding provider configuration
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    pub api_key: String,
    pub base_url: String,
}

impl OpenAiConfig {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            base_url: "https://api.openai.com/v1".to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    pub fn from_env() -> SearchResult<Self> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .map_err(|_| SearchError::Config("OPENAI_API_KEY not set".to_string()))?;

        let base_url = std::env::var("OPENAI_BASE_URL")
            .unwrap_or_else(|_| "https://api.openai.com/v1".to_string());

        Ok(Self { api_key, base_url })
    }
}

/// OpenAI embeddings provider
pub struct OpenAiProvider {
    client: Client,
    config: OpenAiConfig,
}

impl OpenAiProvider {
    pub fn new(config: OpenAiConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    pub fn from_env() -> SearchResult<Self> {
        Ok(Self::new(OpenAiConfig::from_env()?))
    }
}

#[derive(Debug, Serialize)]
struct EmbeddingRequest {
    model: String,
    input: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    dimensions: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
    index: usize,
}

#[async_trait]
impl EmbeddingProvider for OpenAiProvider {
    fn provider_type(&self) -> EmbeddingProviderType {
        EmbeddingProviderType::OpenAi
    }

    async fn embed(&self, model: EmbeddingModel, text: &str) -> SearchResult<EmbeddingVector> {
        let results = self.embed_batch(model, &[text.to_string()]).await?;
        results
            .into_iter()
            .next()
            .ok_or_else(|| SearchError::Embedding("No embedding returned".to_string()))
    }

    async fn embed_batch(
        &self,
        model: EmbeddingModel,
        texts: &[String],
    ) -> SearchResult<Vec<EmbeddingVector>> {
        if texts.is_empty() {
            return Ok(vec![]);
        }

        let dimensions = match model {
            EmbeddingModel::Custom(dim) => Some(dim),
            _ => None,
        };

        let request = EmbeddingRequest {
            model: model.model_name().to_string(),
            input: texts.to_vec(),
            dimensions,
        };

        let response = self
            .client
            .post(format!("{}/embeddings", self.config.base_url))
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(SearchError::Embedding(format!(
                "OpenAI API error ({}): {}",
                status, error_text
            )));
        }

        let embedding_response: EmbeddingResponse = response.json().await?;

        // Sort by index to maintain order
        let mut data = embedding_response.data;
        data.sort_by_key(|d| d.index);

        Ok(data
            .into_iter()
            .map(|d| EmbeddingVector {
                dimension: d.embedding.len() as u32,
                values: d.embedding,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serializes_dimensions_only_for_custom() {
        let request = EmbeddingRequest {
            model: "text-embedding-3-small".to_string(),
            input: vec!["hello".to_string()],
            dimensions: None,
        };
        let json = serde_json::to_string(&request).unwrap();
        assert!(!json.contains("dimensions"));

        let request = EmbeddingRequest {
            model: "custom".to_string(),
            input: vec!["hello".to_string()],
            dimensions: Some(512),
        };
        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains("\"dimensions\":512"));
    }

    #[test]
    fn test_response_preserves_input_order() {
        let json = r#"{"data":[
            {"embedding":[0.2],"index":1},
            {"embedding":[0.1],"index":0}
        ]}"#;
        let mut response: EmbeddingResponse = serde_json::from_str(json).unwrap();
        response.data.sort_by_key(|d| d.index);
        assert_eq!(response.data[0].embedding, vec![0.1]);
        assert_eq!(response.data[1].embedding, vec![0.2]);
    }
}
