use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
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
use uuid::Uuid;

use crate::error::CollectionResult;
use crate::models::{CollectionFilter, CreateCollection, LearningCollection, UpdateCollection};
use crate::repository::CollectionRepository;
use crate::service::CollectionService;

/// OpenAPI documentation for Collections API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_collections,
        create_collection,
        get_collection,
        update_collection,
        delete_collection,
        count_collections,
        add_content,
        remove_content,
    ),
    components(
        schemas(LearningCollection, CreateCollection, UpdateCollection, CollectionFilter),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestUuidResponse,
            ConflictResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Collections", description = "Learning collection endpoints (MongoDB)")
    )
)]
pub struct ApiDoc;

/// Create the collections router with all HTTP endpoints
pub fn router<R: CollectionRepository + 'static>(service: CollectionService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_collections).post(create_collection))
        .route("/count", get(count_collections))
        .route(
            "/{id}",
            get(get_collection)
                .put(update_collection)
                .delete(delete_collection),
        )
        .route(
            "/{id}/contents/{content_id}",
            post(add_content).delete(remove_content),
        )
        .with_state(shared_service)
}

/// List collections with optional filters
#[utoipa::path(
    get,
    path = "",
    tag = "Collections",
    params(CollectionFilter),
    responses(
        (status = 200, description = "List of collections", body = Vec<LearningCollection>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_collections<R: CollectionRepository>(
    State(service): State<Arc<CollectionService<R>>>,
    Query(filter): Query<CollectionFilter>,
) -> CollectionResult<Json<Vec<LearningCollection>>> {
    let collections = service.list_collections(filter).await?;
    Ok(Json(collections))
}

/// Create a new collection
#[utoipa::path(
    post,
    path = "",
    tag = "Collections",
    request_body = CreateCollection,
    responses(
        (status = 201, description = "Collection created successfully", body = LearningCollection),
        (status = 400, response = BadRequestValidationResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_collection<R: CollectionRepository>(
    State(service): State<Arc<CollectionService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateCollection>,
) -> CollectionResult<impl IntoResponse> {
    let collection = service.create_collection(input).await?;
    Ok((StatusCode::CREATED, Json(collection)))
}

/// Get a collection by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Collections",
    params(
        ("id" = Uuid, Path, description = "Collection ID")
    ),
    responses(
        (status = 200, description = "Collection found", body = LearningCollection),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_collection<R: CollectionRepository>(
    State(service): State<Arc<CollectionService<R>>>,
    UuidPath(id): UuidPath,
) -> CollectionResult<Json<LearningCollection>> {
    let collection = service.get_collection(id).await?;
    Ok(Json(collection))
}

/// Update a collection
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Collections",
    params(
        ("id" = Uuid, Path, description = "Collection ID")
    ),
    request_body = UpdateCollection,
    responses(
        (status = 200, description = "Collection updated successfully", body = LearningCollection),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_collection<R: CollectionRepository>(
    State(service): State<Arc<CollectionService<R>>>,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<UpdateCollection>,
) -> CollectionResult<Json<LearningCollection>> {
    let collection = service.update_collection(id, input).await?;
    Ok(Json(collection))
}

/// Delete a collection
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Collections",
    params(
        ("id" = Uuid, Path, description = "Collection ID")
    ),
    responses(
        (status = 204, description = "Collection deleted successfully"),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_collection<R: CollectionRepository>(
    State(service): State<Arc<CollectionService<R>>>,
    UuidPath(id): UuidPath,
) -> CollectionResult<impl IntoResponse> {
    service.delete_collection(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Count collections matching a filter
#[utoipa::path(
    get,
    path = "/count",
    tag = "Collections",
    params(CollectionFilter),
    responses(
        (status = 200, description = "Collection count", body = u64),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn count_collections<R: CollectionRepository>(
    State(service): State<Arc<CollectionService<R>>>,
    Query(filter): Query<CollectionFilter>,
) -> CollectionResult<Json<u64>> {
    let count = service.count_collections(filter).await?;
    Ok(Json(count))
}

/// Add a content to a collection
#[utoipa::path(
    post,
    path = "/{id}/contents/{content_id}",
    tag = "Collections",
    params(
        ("id" = Uuid, Path, description = "Collection ID"),
        ("content_id" = Uuid, Path, description = "Content ID")
    ),
    responses(
        (status = 200, description = "Content added to collection", body = LearningCollection),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn add_content<R: CollectionRepository>(
    State(service): State<Arc<CollectionService<R>>>,
    Path((id, content_id)): Path<(Uuid, Uuid)>,
) -> CollectionResult<Json<LearningCollection>> {
    let collection = service.add_content(id, content_id).await?;
    Ok(Json(collection))
}

/// Remove a content from a collection
#[utoipa::path(
    delete,
    path = "/{id}/contents/{content_id}",
    tag = "Collections",
    params(
        ("id" = Uuid, Path, description = "Collection ID"),
        ("content_id" = Uuid, Path, description = "Content ID")
    ),
    responses(
        (status = 200, description = "Content removed from collection", body = LearningCollection),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn remove_content<R: CollectionRepository>(
    State(service): State<Arc<CollectionService<R>>>,
    Path((id, content_id)): Path<(Uuid, Uuid)>,
) -> CollectionResult<Json<LearningCollection>> {
    let collection = service.remove_content(id, content_id).await?;
    Ok(Json(collection))
}
