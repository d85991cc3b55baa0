//! Collections API routes
//!
//! This module wires up the collections domain to HTTP routes, with the search
//! service attached as its indexer integration.

use axum::Router;
use domain_collections::{
    CollectionIndexer, CollectionService, MongoCollectionRepository, handlers,
};
use std::sync::Arc;

use crate::state::AppState;

/// Create collections router
pub fn router(state: &AppState) -> Router {
    // Create the MongoDB repository
    let repository = MongoCollectionRepository::new(state.db.clone());

    // Create the service, pushing every write into the search index
    let indexer: Arc<dyn CollectionIndexer> = state.search.clone();
    let service = CollectionService::new(repository).with_indexer(indexer);

    // Return the domain's router
    handlers::router(service)
}
