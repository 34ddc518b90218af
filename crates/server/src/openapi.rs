use utoipa::OpenApi;
use utoipa::ToSchema;

// Schema mirrors of the wire payloads, kept here so the models crate stays
// free of OpenAPI derives.

#[derive(ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(ToSchema)]
pub struct NewPlantDoc {
    pub name: String,
    pub plant_type: Option<String>,
    pub photos: Option<Vec<String>>,
    pub watering_interval_days: u32,
    pub fertilizer_every_n_waterings: Option<u32>,
    pub notes: Option<String>,
    pub last_watered_override: Option<String>,
    pub flowering_start: Option<String>,
    pub flowering_end: Option<String>,
    pub flowering_photo: Option<String>,
}

#[derive(ToSchema)]
pub struct PlantPatchDoc {
    pub name: Option<String>,
    pub plant_type: Option<String>,
    pub photos: Option<Vec<String>>,
    pub notes: Option<String>,
    pub watering_interval_days: Option<u32>,
    pub fertilizer_every_n_waterings: Option<u32>,
    pub last_watered_override: Option<String>,
    pub flowering_start: Option<String>,
    pub flowering_end: Option<String>,
    pub flowering_photo: Option<String>,
}

#[derive(ToSchema)]
pub struct WateringInputDoc {
    pub date: Option<String>,
    pub note: Option<String>,
    pub fertilized: Option<bool>,
    pub photos: Option<Vec<String>>,
}

#[derive(ToSchema)]
pub struct WateringEntryDoc {
    pub id: String,
    pub date: String,
    pub note: String,
    pub fertilized: bool,
    pub photos: Vec<String>,
}

#[derive(ToSchema)]
pub struct PlantDoc {
    pub id: String,
    pub name: String,
    pub plant_type: String,
    pub photos: Vec<String>,
    pub watering_interval_days: u32,
    pub fertilizer_every_n_waterings: u32,
    pub notes: String,
    pub created_at: String,
    pub last_watered_override: Option<String>,
    pub flowering_start: Option<String>,
    pub flowering_end: Option<String>,
    pub flowering_photo: Option<String>,
    pub watering_log: Vec<WateringEntryDoc>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::plants::list_plants,
        crate::routes::plants::create_plant,
        crate::routes::plants::get_plant,
        crate::routes::plants::update_plant,
        crate::routes::plants::delete_plant,
        crate::routes::plants::water_plant,
        crate::routes::plants::delete_watering_entry,
    ),
    components(
        schemas(
            HealthResponse,
            NewPlantDoc,
            PlantPatchDoc,
            WateringInputDoc,
            WateringEntryDoc,
            PlantDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "plants"),
        (name = "watering")
    )
)]
pub struct ApiDoc;
