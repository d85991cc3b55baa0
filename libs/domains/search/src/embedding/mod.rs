//! Embedding generation providers.

mod config;
mod huggingface;
mod openai;
mod provider;

pub use config::EmbeddingConfig;
pub use huggingface::HuggingFaceProvider;
pub use openai::OpenAiProvider;
pub use provider::EmbeddingProvider;

#[cfg(test)]
pub use provider::MockEmbeddingProvider;

use std::sync::Arc;

use crate::error::SearchResult;
use crate::models::EmbeddingProviderType;

/// Build the provider selected by the embedding configuration, pulling
/// credentials from the environment.
pub fn provider_from_env(
    provider_type: EmbeddingProviderType,
) -> SearchResult<Arc<dyn EmbeddingProvider>> {
    match provider_type {
        EmbeddingProviderType::HuggingFace => {
            Ok(Arc::new(HuggingFaceProvider::from_env()?) as Arc<dyn EmbeddingProvider>)
        }
        EmbeddingProviderType::OpenAi => {
            Ok(Arc::new(OpenAiProvider::from_env()?) as Arc<dyn EmbeddingProvider>)
        }
    }
}
