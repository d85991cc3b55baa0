use crate::error::{SearchError, SearchResult};
use crate::models::{EmbeddingModel, EmbeddingProviderType};

/// Embedding pipeline configuration
#[derive(Debug, Clone)]
pub struct EmbeddingConfig {
    pub provider: EmbeddingProviderType,
    pub model: EmbeddingModel,
}

impl EmbeddingConfig {
    pub fn new(provider: EmbeddingProviderType, model: EmbeddingModel) -> Self {
        Self { provider, model }
    }

    /// Load from environment variables:
    /// - `EMBEDDING_PROVIDER`: "huggingface" (default) or "openai"
    /// - `EMBEDDING_MODEL`: public model name (default:
    ///   sentence-transformers/all-MiniLM-L6-v2)
    /// - `EMBEDDING_DIMENSION`: required when `EMBEDDING_MODEL` is not a
    ///   known model name
    pub fn from_env() -> SearchResult<Self> {
        let provider = match std::env::var("EMBEDDING_PROVIDER") {
            Ok(raw) => match raw.to_ascii_lowercase().as_str() {
                "huggingface" => EmbeddingProviderType::HuggingFace,
                "openai" => EmbeddingProviderType::OpenAi,
                other => {
                    return Err(SearchError::Config(format!(
                        "Unknown EMBEDDING_PROVIDER '{}', expected 'huggingface' or 'openai'",
                        other
                    )));
                }
            },
            Err(_) => EmbeddingProviderType::default(),
        };

        let model = match std::env::var("EMBEDDING_MODEL") {
            Ok(name) => match EmbeddingModel::from_name(&name) {
                Some(model) => model,
                None => {
                    let dimension = std::env::var("EMBEDDING_DIMENSION")
                        .map_err(|_| {
                            SearchError::Config(format!(
                                "EMBEDDING_MODEL '{}' is not a known model; set EMBEDDING_DIMENSION",
                                name
                            ))
                        })?
                        .parse()
                        .map_err(|e| {
                            SearchError::Config(format!("Invalid EMBEDDING_DIMENSION: {}", e))
                        })?;
                    EmbeddingModel::Custom(dimension)
                }
            },
            Err(_) => EmbeddingModel::default(),
        };

        Ok(Self { provider, model })
    }
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            provider: EmbeddingProviderType::default(),
            model: EmbeddingModel::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EmbeddingConfig::default();
        assert_eq!(config.provider, EmbeddingProviderType::HuggingFace);
        assert_eq!(config.model, EmbeddingModel::AllMiniLmL6V2);
    }
}
