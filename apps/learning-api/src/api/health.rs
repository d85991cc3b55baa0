//! Health check endpoints

use axum::{
    Router,
    extract::State,
    response::{IntoResponse, Response},
    routing::get,
};
use axum_helpers::server::run_health_checks;

use crate::state::AppState;

/// Create a health check router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/ready", get(readiness_check))
        .with_state(state)
}

/// Readiness check - verifies MongoDB and Qdrant connections
async fn readiness_check(State(state): State<AppState>) -> Response {
    let mongo_client = state.mongo_client.clone();
    let search = state.search.clone();

    let checks: Vec<(&str, axum_helpers::HealthCheckFuture<'_>)> = vec![
        (
            "mongodb",
            Box::pin(async move {
                if database::mongodb::check_health(&mongo_client).await {
                    Ok(())
                } else {
                    Err("MongoDB ping failed".to_string())
                }
            }),
        ),
        (
            "qdrant",
            Box::pin(async move { search.ping().await.map_err(|e| e.to_string()) }),
        ),
    ];

    match run_health_checks(checks).await {
        Ok((status, body)) => (status, body).into_response(),
        Err((status, body)) => (status, body).into_response(),
    }
}
