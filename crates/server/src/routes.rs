use axum::{
    routing::{delete, get, post},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::types::Health;
use service::plants::service::PlantService;

use crate::openapi::ApiDoc;

pub mod plants;

/// Shared handler state: the plant service over whichever store the
/// startup configuration selected.
#[derive(Clone)]
pub struct AppState {
    pub plants: PlantService,
}

#[utoipa::path(
    get, path = "/health", tag = "health",
    responses((status = 200, description = "Service healthy"))
)]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Build the full application router: health, plant API, OpenAPI docs.
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    let api = Router::new()
        .route("/api/plants", get(plants::list_plants).post(plants::create_plant))
        .route(
            "/api/plants/:plant_id",
            get(plants::get_plant).put(plants::update_plant).delete(plants::delete_plant),
        )
        .route("/api/plants/:plant_id/water", post(plants::water_plant))
        .route(
            "/api/plants/:plant_id/water/:entry_id",
            delete(plants::delete_watering_entry),
        )
        .with_state(state);

    Router::new()
        .route("/health", get(health))
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(api)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
