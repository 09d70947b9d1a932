use axum::Router;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{services::documentation::ApiDoc, state::SharedState};

/// `/api/gamedb` collection and item endpoints.
pub mod catalog;
/// Cross-origin and default response headers.
pub mod cors;
/// Request extractors with status-only rejections.
pub mod extract;
/// `/healthcheck` endpoint.
pub mod health;

/// Compose all route trees, wiring in shared state and documentation routes.
pub fn router(state: SharedState) -> Router<()> {
    let docs: Router<SharedState> = SwaggerUi::new("/docs")
        .url("/api-doc/openapi.json", ApiDoc::openapi())
        .into();

    health::router()
        .merge(catalog::router())
        .merge(docs)
        .with_state(state)
}

/// Full application: routes plus the cross-cutting middleware layers.
pub fn app(state: SharedState) -> Router<()> {
    cors::apply(router(state)).layer(TraceLayer::new_for_http())
}
