//! Search API routes

use axum::Router;
use domain_search::handlers;
use std::sync::Arc;

use crate::state::AppState;

/// Create search router
pub fn router(state: &AppState) -> Router {
    handlers::router(Arc::clone(&state.search))
}
