//! HuggingFace Inference API embedding provider.
//!
//! Calls the hosted feature-extraction pipeline for sentence-transformer
//! models. Requires a HuggingFace API token.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::EmbeddingProvider;
use crate::error::{SearchError, SearchResult};
use crate::models::{EmbeddingModel, EmbeddingProviderType, EmbeddingVector};

/// HuggingFace provider configuration
#[derive(Debug, Clone)]
pub struct HuggingFaceConfig {
    pub api_token: String,
    pub endpoint: String,
}

impl HuggingFaceConfig {
    pub fn new(api_token: String) -> Self {
        Self {
            api_token,
            endpoint: "https://api-inference.huggingface.co".to_string(),
        }
    }

    pub fn with_endpoint(mut self, endpoint: String) -> Self {
        self.endpoint = endpoint;
        self
    }

    pub fn from_env() -> SearchResult<Self> {
        let api_token = std::env::var("HF_API_TOKEN")
            .map_err(|_| SearchError::Config("HF_API_TOKEN not set".to_string()))?;

        let endpoint = std::env::var("HF_ENDPOINT")
            .unwrap_or_else(|_| "https://api-inference.huggingface.co".to_string());

        Ok(Self {
            api_token,
            endpoint,
        })
    }
}

/// HuggingFace feature-extraction embedding provider
pub struct HuggingFaceProvider {
    client: Client,
    config: HuggingFaceConfig,
}

impl HuggingFaceProvider {
    pub fn new(config: HuggingFaceConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    pub fn from_env() -> SearchResult<Self> {
        Ok(Self::new(HuggingFaceConfig::from_env()?))
    }

    fn pipeline_url(&self, model: EmbeddingModel) -> String {
        format!(
            "{}/models/{}/pipeline/feature-extraction",
            self.config.endpoint,
            model.model_name()
        )
    }
}

#[derive(Debug, Serialize)]
struct EmbedRequest<'a> {
    inputs: &'a [String],
    options: EmbedOptions,
}

#[derive(Debug, Serialize)]
struct EmbedOptions {
    wait_for_model: bool,
}

/// The pipeline's response shape varies with the model: sentence-transformers
/// return one vector per input, token-level models return a matrix per input.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum EmbedResponse {
    /// One embedding per input
    Vectors(Vec<Vec<f32>>),
    /// One token matrix per input (mean-pooled here)
    Matrices(Vec<Vec<Vec<f32>>>),
}

fn mean_pool(matrix: Vec<Vec<f32>>) -> SearchResult<Vec<f32>> {
    let rows = matrix.len();
    let mut iter = matrix.into_iter();
    let mut acc = iter
        .next()
        .ok_or_else(|| SearchError::Embedding("Empty embedding matrix".to_string()))?;

    for row in iter {
        for (sum, value) in acc.iter_mut().zip(row) {
            *sum += value;
        }
    }

    for value in acc.iter_mut() {
        *value /= rows as f32;
    }

    Ok(acc)
}

#[async_trait]
impl EmbeddingProvider for HuggingFaceProvider {
    fn provider_type(&self) -> EmbeddingProviderType {
        EmbeddingProviderType::HuggingFace
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

        let request = EmbedRequest {
            inputs: texts,
            options: EmbedOptions {
                wait_for_model: true,
            },
        };

        let response = self
            .client
            .post(self.pipeline_url(model))
            .header("Authorization", format!("Bearer {}", self.config.api_token))
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(SearchError::Embedding(format!(
                "HuggingFace API error ({}): {}",
                status, error_text
            )));
        }

        let parsed: EmbedResponse = response.json().await?;

        let vectors = match parsed {
            EmbedResponse::Vectors(vectors) => vectors,
            EmbedResponse::Matrices(matrices) => matrices
                .into_iter()
                .map(mean_pool)
                .collect::<SearchResult<Vec<_>>>()?,
        };

        if vectors.len() != texts.len() {
            return Err(SearchError::Embedding(format!(
                "Expected {} embeddings, got {}",
                texts.len(),
                vectors.len()
            )));
        }

        Ok(vectors
            .into_iter()
            .map(|values| EmbeddingVector {
                dimension: values.len() as u32,
                values,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pipeline_url() {
        let provider = HuggingFaceProvider::new(HuggingFaceConfig::new("token".to_string()));
        assert_eq!(
            provider.pipeline_url(EmbeddingModel::AllMiniLmL6V2),
            "https://api-inference.huggingface.co/models/sentence-transformers/all-MiniLM-L6-v2/pipeline/feature-extraction"
        );
    }

    #[test]
    fn test_response_parses_vectors_shape() {
        let json = "[[0.1, 0.2], [0.3, 0.4]]";
        let parsed: EmbedResponse = serde_json::from_str(json).unwrap();
        assert!(matches!(parsed, EmbedResponse::Vectors(v) if v.len() == 2));
    }

    #[test]
    fn test_response_parses_matrices_shape() {
        let json = "[[[0.1, 0.2], [0.3, 0.4]]]";
        let parsed: EmbedResponse = serde_json::from_str(json).unwrap();
        assert!(matches!(parsed, EmbedResponse::Matrices(m) if m.len() == 1));
    }

    #[test]
    fn test_mean_pool_averages_rows() {
        let pooled = mean_pool(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        assert_eq!(pooled, vec![2.0, 3.0]);
    }

    #[test]
    fn test_mean_pool_rejects_empty_matrix() {
        assert!(mean_pool(vec![]).is_err());
    }
}
