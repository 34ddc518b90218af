use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ModelError;

/// One tracked houseplant with its care metadata and watering history.
/// `id` and `created_at` are assigned server-side and never change;
/// `watering_log` mutates only through append and remove-by-entry-id.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Plant {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub plant_type: String,
    #[serde(default)]
    pub photos: Vec<String>,
    pub watering_interval_days: u32,
    /// 0 = fertilizing reminders disabled.
    #[serde(default)]
    pub fertilizer_every_n_waterings: u32,
    #[serde(default)]
    pub notes: String,
    pub created_at: DateTime<Utc>,
    /// Manual seed for plants whose last watering predates the log.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_watered_override: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flowering_start: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flowering_end: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flowering_photo: Option<String>,
    #[serde(default)]
    pub watering_log: Vec<WateringEntry>,
}

/// One logged watering event, owned by exactly one plant.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct WateringEntry {
    pub id: String,
    pub date: String,
    #[serde(default)]
    pub note: String,
    #[serde(default)]
    pub fertilized: bool,
    #[serde(default)]
    pub photos: Vec<String>,
}

/// Create payload. `name` and `watering_interval_days` are required;
/// everything else defaults. Unknown keys are dropped by serde.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct NewPlant {
    pub name: Option<String>,
    pub plant_type: Option<String>,
    pub photos: Option<Vec<String>>,
    pub watering_interval_days: Option<u32>,
    pub fertilizer_every_n_waterings: Option<u32>,
    pub notes: Option<String>,
    pub last_watered_override: Option<String>,
    pub flowering_start: Option<String>,
    pub flowering_end: Option<String>,
    pub flowering_photo: Option<String>,
}

impl NewPlant {
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.name.is_none() {
            return Err(ModelError::Validation("name is required".into()));
        }
        if self.watering_interval_days.is_none() {
            return Err(ModelError::Validation(
                "watering_interval_days is required".into(),
            ));
        }
        Ok(())
    }

    /// Materialize the full aggregate: fresh id, creation stamp, empty log.
    pub fn into_plant(self) -> Result<Plant, ModelError> {
        self.validate()?;
        Ok(Plant {
            id: Uuid::new_v4().to_string(),
            name: self.name.unwrap_or_default(),
            plant_type: self.plant_type.unwrap_or_default(),
            photos: self.photos.unwrap_or_default(),
            watering_interval_days: self.watering_interval_days.unwrap_or_default(),
            fertilizer_every_n_waterings: self.fertilizer_every_n_waterings.unwrap_or_default(),
            notes: self.notes.unwrap_or_default(),
            created_at: Utc::now(),
            last_watered_override: self.last_watered_override,
            flowering_start: self.flowering_start,
            flowering_end: self.flowering_end,
            flowering_photo: self.flowering_photo,
            watering_log: Vec::new(),
        })
    }
}

/// Merge-by-presence partial update over the mutable field set.
/// `id`, `created_at` and `watering_log` are not representable here, so
/// they can never be mutation targets. Serialization skips absent fields,
/// which lets the document store turn a patch straight into a `$set`.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct PlantPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plant_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photos: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub watering_interval_days: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fertilizer_every_n_waterings: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_watered_override: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flowering_start: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flowering_end: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flowering_photo: Option<String>,
}

impl PlantPatch {
    /// Apply supplied fields to the plant; absent fields keep prior values.
    pub fn apply(&self, plant: &mut Plant) {
        if let Some(v) = &self.name {
            plant.name = v.clone();
        }
        if let Some(v) = &self.plant_type {
            plant.plant_type = v.clone();
        }
        if let Some(v) = &self.photos {
            plant.photos = v.clone();
        }
        if let Some(v) = &self.notes {
            plant.notes = v.clone();
        }
        if let Some(v) = self.watering_interval_days {
            plant.watering_interval_days = v;
        }
        if let Some(v) = self.fertilizer_every_n_waterings {
            plant.fertilizer_every_n_waterings = v;
        }
        if let Some(v) = &self.last_watered_override {
            plant.last_watered_override = Some(v.clone());
        }
        if let Some(v) = &self.flowering_start {
            plant.flowering_start = Some(v.clone());
        }
        if let Some(v) = &self.flowering_end {
            plant.flowering_end = Some(v.clone());
        }
        if let Some(v) = &self.flowering_photo {
            plant.flowering_photo = Some(v.clone());
        }
    }
}

/// Watering request payload; every field optional.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct WateringInput {
    pub date: Option<String>,
    pub note: Option<String>,
    pub fertilized: Option<bool>,
    pub photos: Option<Vec<String>>,
}

impl WateringInput {
    /// Build the log entry: fresh id, date defaulted to now (UTC).
    pub fn into_entry(self) -> WateringEntry {
        WateringEntry {
            id: Uuid::new_v4().to_string(),
            date: self.date.unwrap_or_else(|| Utc::now().to_rfc3339()),
            note: self.note.unwrap_or_default(),
            fertilized: self.fertilized.unwrap_or(false),
            photos: self.photos.unwrap_or_default(),
        }
    }
}
