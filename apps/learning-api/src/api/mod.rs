//! API routes module
//!
//! This module defines all HTTP API routes for the Learning API.

pub mod collections;
pub mod contents;
pub mod health;
pub mod search;

use axum::Router;

use crate::state::AppState;

/// Create all API routes
/// Note: These are nested under /api by axum_helpers::create_router
pub fn routes(state: &AppState) -> Router {
    Router::new()
        .nest("/contents", contents::router(state))
        .nest("/collections", collections::router(state))
        .nest("/search", search::router(state))
        .merge(health::router(state.clone()))
}
