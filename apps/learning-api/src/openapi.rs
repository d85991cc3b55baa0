//! OpenAPI documentation configuration

use utoipa::OpenApi;

/// Combined OpenAPI documentation for all APIs
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Learning API",
        version = "0.1.0",
        description = "Learning-content platform backend: MongoDB persistence with Qdrant-backed semantic search",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    nest(
        (path = "/api/contents", api = domain_content::ApiDoc),
        (path = "/api/collections", api = domain_collections::ApiDoc),
        (path = "/api/search", api = domain_search::ApiDoc)
    ),
    tags(
        (name = "Contents", description = "Learning content endpoints (MongoDB)"),
        (name = "Collections", description = "Learning collection endpoints (MongoDB)"),
        (name = "Search", description = "Semantic search and recommendations (Qdrant)")
    )
)]
pub struct ApiDoc;
