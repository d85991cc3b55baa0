use core_config::{AppInfo, FromEnv, app_info, server::ServerConfig};
use domain_search::{EmbeddingConfig, QdrantConfig};

// Import MongoDB config from the database library
use database::mongodb::MongoConfig;

// Re-export Environment for use in other modules
pub use core_config::Environment;

/// Application-specific configuration
/// Composes shared config components from the `core_config` library and the
/// search domain
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub mongodb: MongoConfig,
    pub server: ServerConfig,
    pub qdrant: QdrantConfig,
    pub embedding: EmbeddingConfig,
    pub environment: Environment,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let mongodb = MongoConfig::from_env()?;
        let server = ServerConfig::from_env()?;
        let qdrant =
            QdrantConfig::from_env().map_err(|e| eyre::eyre!("Qdrant config error: {}", e))?;
        let embedding = EmbeddingConfig::from_env()
            .map_err(|e| eyre::eyre!("Embedding config error: {}", e))?;

        Ok(Self {
            app: app_info!(),
            mongodb,
            server,
            qdrant,
            embedding,
            environment,
        })
    }
}
