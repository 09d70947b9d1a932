use utoipa::OpenApi;

#[derive(OpenApi)]
/// Aggregated OpenAPI specification for the catalog API.
#[openapi(
    paths(
        crate::routes::health::healthcheck,
        crate::routes::catalog::list_entries,
        crate::routes::catalog::create_entry,
        crate::routes::catalog::get_entry,
        crate::routes::catalog::delete_entry,
    ),
    components(
        schemas(
            crate::dto::health::HealthResponse,
            crate::dto::game_entry::GameEntry,
            crate::dto::game_entry::CreateGameEntryRequest,
            crate::dto::game_entry::CreatedGameEntry,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "gamedb", description = "Game catalog CRUD"),
    )
)]
pub struct ApiDoc;
