//! Contents API routes
//!
//! This module wires up the content domain to HTTP routes, with the search
//! service attached as its indexer integration.

use axum::Router;
use domain_content::{ContentIndexer, ContentService, MongoContentRepository, handlers};
use std::sync::Arc;

use crate::state::AppState;

/// Create contents router
pub fn router(state: &AppState) -> Router {
    // Create the MongoDB repository
    let repository = MongoContentRepository::new(state.db.clone());

    // Create the service, pushing every write into the search index
    let indexer: Arc<dyn ContentIndexer> = state.search.clone();
    let service = ContentService::new(repository).with_indexer(indexer);

    // Return the domain's router
    handlers::router(service)
}
