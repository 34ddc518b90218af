use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Value};

use models::plant::{NewPlant, Plant, PlantPatch, WateringInput};

use crate::errors::ApiError;
use crate::routes::AppState;

#[utoipa::path(
    get, path = "/api/plants", tag = "plants",
    responses((status = 200, description = "All plants"))
)]
pub async fn list_plants(State(state): State<AppState>) -> Result<Json<Vec<Plant>>, ApiError> {
    Ok(Json(state.plants.list_plants().await?))
}

#[utoipa::path(
    post, path = "/api/plants", tag = "plants",
    request_body = crate::openapi::NewPlantDoc,
    responses(
        (status = 201, description = "Created"),
        (status = 400, description = "Missing required field")
    )
)]
pub async fn create_plant(
    State(state): State<AppState>,
    Json(input): Json<NewPlant>,
) -> Result<(StatusCode, Json<Plant>), ApiError> {
    let plant = state.plants.create_plant(input).await?;
    Ok((StatusCode::CREATED, Json(plant)))
}

#[utoipa::path(
    get, path = "/api/plants/{plant_id}", tag = "plants",
    params(("plant_id" = String, Path, description = "Plant id")),
    responses(
        (status = 200, description = "OK"),
        (status = 404, description = "Plant not found")
    )
)]
pub async fn get_plant(
    State(state): State<AppState>,
    Path(plant_id): Path<String>,
) -> Result<Json<Plant>, ApiError> {
    Ok(Json(state.plants.get_plant(&plant_id).await?))
}

#[utoipa::path(
    put, path = "/api/plants/{plant_id}", tag = "plants",
    params(("plant_id" = String, Path, description = "Plant id")),
    request_body = crate::openapi::PlantPatchDoc,
    responses(
        (status = 200, description = "Updated"),
        (status = 404, description = "Plant not found")
    )
)]
pub async fn update_plant(
    State(state): State<AppState>,
    Path(plant_id): Path<String>,
    Json(patch): Json<PlantPatch>,
) -> Result<Json<Plant>, ApiError> {
    Ok(Json(state.plants.update_plant(&plant_id, patch).await?))
}

#[utoipa::path(
    delete, path = "/api/plants/{plant_id}", tag = "plants",
    params(("plant_id" = String, Path, description = "Plant id")),
    responses((status = 200, description = "Deleted (idempotent)"))
)]
pub async fn delete_plant(
    State(state): State<AppState>,
    Path(plant_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    state.plants.delete_plant(&plant_id).await?;
    Ok(Json(json!({"ok": true})))
}

#[utoipa::path(
    post, path = "/api/plants/{plant_id}/water", tag = "watering",
    params(("plant_id" = String, Path, description = "Plant id")),
    request_body = crate::openapi::WateringInputDoc,
    responses(
        (status = 200, description = "Entry appended, full plant returned"),
        (status = 404, description = "Plant not found")
    )
)]
pub async fn water_plant(
    State(state): State<AppState>,
    Path(plant_id): Path<String>,
    body: Option<Json<WateringInput>>,
) -> Result<Json<Plant>, ApiError> {
    // Body is optional: watering with no payload logs "now".
    let input = body.map(|Json(input)| input).unwrap_or_default();
    Ok(Json(state.plants.water_plant(&plant_id, input).await?))
}

#[utoipa::path(
    delete, path = "/api/plants/{plant_id}/water/{entry_id}", tag = "watering",
    params(
        ("plant_id" = String, Path, description = "Plant id"),
        ("entry_id" = String, Path, description = "Watering entry id")
    ),
    responses(
        (status = 200, description = "Matching entries removed, full plant returned"),
        (status = 404, description = "Plant not found")
    )
)]
pub async fn delete_watering_entry(
    State(state): State<AppState>,
    Path((plant_id, entry_id)): Path<(String, String)>,
) -> Result<Json<Plant>, ApiError> {
    Ok(Json(state.plants.delete_watering_entry(&plant_id, &entry_id).await?))
}
