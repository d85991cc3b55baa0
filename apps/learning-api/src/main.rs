use std::sync::Arc;
use std::time::Duration;

use axum_helpers::server::{create_production_app, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use domain_collections::MongoCollectionRepository;
use domain_content::MongoContentRepository;
use domain_search::{QdrantIndex, SearchService, provider_from_env};
use tracing::{info, warn};

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output
    install_color_eyre();

    // Load configuration from environment variables
    let config = Config::from_env()?;

    // Initialize tracing
    init_tracing(&config.environment);

    info!("Connecting to MongoDB at {}", config.mongodb.url());

    // Connect to MongoDB with retry
    let mongo_client =
        database::mongodb::connect_from_config_with_retry(&config.mongodb, None).await?;

    let db = mongo_client.database(config.mongodb.database());

    info!(
        "Successfully connected to MongoDB database: {}",
        config.mongodb.database()
    );

    // Initialize collection indexes
    let content_repository = MongoContentRepository::new(db.clone());
    content_repository.create_indexes().await?;
    let collection_repository = MongoCollectionRepository::new(db.clone());
    collection_repository.create_indexes().await?;
    info!("MongoDB indexes created");

    // Build the semantic search pipeline: Qdrant index + embedding provider
    let index = QdrantIndex::new(config.qdrant.clone())
        .await
        .map_err(|e| eyre::eyre!("Failed to create Qdrant client: {}", e))?;
    let provider = provider_from_env(config.embedding.provider)
        .map_err(|e| eyre::eyre!("Failed to create embedding provider: {}", e))?;

    let search = Arc::new(SearchService::new(
        index,
        provider,
        config.embedding.model,
        Arc::new(content_repository),
        Arc::new(collection_repository),
    ));

    // Create the index collections up front. Qdrant being down at startup is
    // not fatal: writes and searches surface 502s until it returns, and a
    // reindex converges the index.
    if let Err(e) = search.ensure_collections().await {
        warn!(error = %e, "Could not ensure vector index collections at startup");
    }

    // Initialize the application state
    let state = AppState {
        config,
        mongo_client,
        db,
        search,
    };

    // Build router with API routes
    let api_routes = api::routes(&state);

    // Create a router with OpenAPI docs
    let router = axum_helpers::create_router::<openapi::ApiDoc>(api_routes).await?;

    // Merge health endpoints
    let app = router.merge(health_router(state.config.app));

    info!("Starting Learning API with production-ready shutdown (30s timeout)");

    // Production-ready server with graceful shutdown
    create_production_app(
        app,
        &state.config.server,
        Duration::from_secs(30),
        async move {
            info!("Shutting down: closing MongoDB connections");
            // MongoDB client closes automatically on drop
            drop(state.mongo_client);
            info!("MongoDB connection closed successfully");
        },
    )
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Learning API shutdown complete");
    Ok(())
}
