use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{
    UuidPath, ValidatedJson,
    errors::responses::{
        BadRequestUuidResponse, BadRequestValidationResponse, ConflictResponse,
        InternalServerErrorResponse, NotFoundResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::ContentResult;
use crate::models::{ContentFilter, CreateContent, LearningContent, UpdateContent};
use crate::repository::ContentRepository;
use crate::service::ContentService;

/// OpenAPI documentation for Contents API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_contents,
        create_content,
        get_content,
        update_content,
        delete_content,
        count_contents,
    ),
    components(
        schemas(LearningContent, CreateContent, UpdateContent, ContentFilter),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestUuidResponse,
            ConflictResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Contents", description = "Learning content endpoints (MongoDB)")
    )
)]
pub struct ApiDoc;

/// Create the contents router with all HTTP endpoints
pub fn router<R: ContentRepository + 'static>(service: ContentService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_contents).post(create_content))
        .route("/count", get(count_contents))
        .route(
            "/{id}",
            get(get_content).put(update_content).delete(delete_content),
        )
        .with_state(shared_service)
}

/// List contents with optional filters
#[utoipa::path(
    get,
    path = "",
    tag = "Contents",
    params(ContentFilter),
    responses(
        (status = 200, description = "List of contents", body = Vec<LearningContent>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_contents<R: ContentRepository>(
    State(service): State<Arc<ContentService<R>>>,
    Query(filter): Query<ContentFilter>,
) -> ContentResult<Json<Vec<LearningContent>>> {
    let contents = service.list_contents(filter).await?;
    Ok(Json(contents))
}

/// Create a new content
#[utoipa::path(
    post,
    path = "",
    tag = "Contents",
    request_body = CreateContent,
    responses(
        (status = 201, description = "Content created successfully", body = LearningContent),
        (status = 400, response = BadRequestValidationResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_content<R: ContentRepository>(
    State(service): State<Arc<ContentService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateContent>,
) -> ContentResult<impl IntoResponse> {
    let content = service.create_content(input).await?;
    Ok((StatusCode::CREATED, Json(content)))
}

/// Get a content by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Contents",
    params(
        ("id" = Uuid, Path, description = "Content ID")
    ),
    responses(
        (status = 200, description = "Content found", body = LearningContent),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_content<R: ContentRepository>(
    State(service): State<Arc<ContentService<R>>>,
    UuidPath(id): UuidPath,
) -> ContentResult<Json<LearningContent>> {
    let content = service.get_content(id).await?;
    Ok(Json(content))
}

/// Update a content
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Contents",
    params(
        ("id" = Uuid, Path, description = "Content ID")
    ),
    request_body = UpdateContent,
    responses(
        (status = 200, description = "Content updated successfully", body = LearningContent),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_content<R: ContentRepository>(
    State(service): State<Arc<ContentService<R>>>,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<UpdateContent>,
) -> ContentResult<Json<LearningContent>> {
    let content = service.update_content(id, input).await?;
    Ok(Json(content))
}

/// Delete a content
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Contents",
    params(
        ("id" = Uuid, Path, description = "Content ID")
    ),
    responses(
        (status = 204, description = "Content deleted successfully"),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_content<R: ContentRepository>(
    State(service): State<Arc<ContentService<R>>>,
    UuidPath(id): UuidPath,
) -> ContentResult<impl IntoResponse> {
    service.delete_content(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Count contents matching a filter
#[utoipa::path(
    get,
    path = "/count",
    tag = "Contents",
    params(ContentFilter),
    responses(
        (status = 200, description = "Content count", body = u64),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn count_contents<R: ContentRepository>(
    State(service): State<Arc<ContentService<R>>>,
    Query(filter): Query<ContentFilter>,
) -> ContentResult<Json<u64>> {
    let count = service.count_contents(filter).await?;
    Ok(Json(count))
}
