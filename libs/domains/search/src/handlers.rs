use axum::{
    Json, Router,
    extract::{Query, State},
    routing::{get, post},
};
use axum_helpers::{
    UuidPath, ValidatedJson,
    errors::responses::{
        BadGatewayResponse, BadRequestUuidResponse, BadRequestValidationResponse,
        InternalServerErrorResponse, NotFoundResponse,
    },
};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::{IntoParams, OpenApi};

use crate::error::SearchResult;
use crate::models::{
    CollectionHit, ContentHit, ReindexReport, SearchRequest, SearchResponse, SearchScope,
};
use crate::repository::VectorIndex;
use crate::service::SearchService;

/// OpenAPI documentation for Search API
#[derive(OpenApi)]
#[openapi(
    paths(search, similar_contents, reindex),
    components(
        schemas(
            SearchRequest,
            SearchResponse,
            SearchScope,
            ContentHit,
            CollectionHit,
            ReindexReport
        ),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestUuidResponse,
            BadGatewayResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Search", description = "Semantic search and recommendations (Qdrant)")
    )
)]
pub struct ApiDoc;

/// Create the search router with all HTTP endpoints
pub fn router<V: VectorIndex + 'static>(service: Arc<SearchService<V>>) -> Router {
    Router::new()
        .route("/", post(search))
        .route("/similar/{id}", get(similar_contents))
        .route("/reindex", post(reindex))
        .with_state(service)
}

/// Query parameters for similar-content discovery
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct SimilarParams {
    /// Maximum number of hits
    #[serde(default = "default_similar_limit")]
    pub limit: u32,
}

fn default_similar_limit() -> u32 {
    10
}

/// Semantic search across contents and collections
#[utoipa::path(
    post,
    path = "",
    tag = "Search",
    request_body = SearchRequest,
    responses(
        (status = 200, description = "Search results per content type", body = SearchResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 502, response = BadGatewayResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn search<V: VectorIndex>(
    State(service): State<Arc<SearchService<V>>>,
    ValidatedJson(request): ValidatedJson<SearchRequest>,
) -> SearchResult<Json<SearchResponse>> {
    let response = service.search(request).await?;
    Ok(Json(response))
}

/// Find contents similar to an existing content
#[utoipa::path(
    get,
    path = "/similar/{id}",
    tag = "Search",
    params(
        ("id" = Uuid, Path, description = "Seed content ID"),
        SimilarParams
    ),
    responses(
        (status = 200, description = "Similar contents", body = Vec<ContentHit>),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 502, response = BadGatewayResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn similar_contents<V: VectorIndex>(
    State(service): State<Arc<SearchService<V>>>,
    UuidPath(id): UuidPath,
    Query(params): Query<SimilarParams>,
) -> SearchResult<Json<Vec<ContentHit>>> {
    let limit = params.limit.clamp(1, 100);
    let hits = service.similar_contents(id, limit).await?;
    Ok(Json(hits))
}

/// Re-embed every document and upsert it into the vector index
#[utoipa::path(
    post,
    path = "/reindex",
    tag = "Search",
    responses(
        (status = 200, description = "Reindex completed", body = ReindexReport),
        (status = 502, response = BadGatewayResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn reindex<V: VectorIndex>(
    State(service): State<Arc<SearchService<V>>>,
) -> SearchResult<Json<ReindexReport>> {
    let report = service.reindex_all().await?;
    Ok(Json(report))
}
