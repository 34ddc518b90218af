use std::sync::Arc;

use models::plant::{NewPlant, Plant, PlantPatch, WateringInput};
use tracing::info;

use crate::errors::ServiceError;
use crate::plants::store::PlantStore;

/// Business layer for the plant aggregate. Every operation is a single
/// read-modify-write against one record behind the injected store; there is
/// no cross-request coordination, so concurrent writers to the same plant
/// race and the last write wins.
#[derive(Clone)]
pub struct PlantService {
    store: Arc<dyn PlantStore>,
}

impl PlantService {
    pub fn new(store: Arc<dyn PlantStore>) -> Self {
        Self { store }
    }

    /// All plants in storage-defined enumeration order.
    pub async fn list_plants(&self) -> Result<Vec<Plant>, ServiceError> {
        self.store.find_all().await
    }

    /// Validate required fields, assign id and creation stamp, persist.
    pub async fn create_plant(&self, input: NewPlant) -> Result<Plant, ServiceError> {
        let plant = input.into_plant()?;
        self.store.insert(plant.clone()).await?;
        info!(id = %plant.id, name = %plant.name, "created plant");
        Ok(plant)
    }

    pub async fn get_plant(&self, id: &str) -> Result<Plant, ServiceError> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Plant"))
    }

    /// Merge-by-presence update; returns the plant after mutation.
    pub async fn update_plant(&self, id: &str, patch: PlantPatch) -> Result<Plant, ServiceError> {
        self.get_plant(id).await?;
        self.store.update_fields(id, &patch).await?;
        self.get_plant(id).await
    }

    /// Removes the plant and its entire watering log. Deliberately
    /// idempotent: deleting an unknown id is a success.
    pub async fn delete_plant(&self, id: &str) -> Result<(), ServiceError> {
        self.store.delete(id).await?;
        info!(id, "deleted plant");
        Ok(())
    }

    /// Append a watering entry and return the updated plant.
    pub async fn water_plant(&self, id: &str, input: WateringInput) -> Result<Plant, ServiceError> {
        self.get_plant(id).await?;
        let entry = input.into_entry();
        info!(id, entry_id = %entry.id, "recorded watering");
        self.store.push_log_entry(id, entry).await?;
        self.get_plant(id).await
    }

    /// Remove log entries matching `entry_id` (zero matches is a success)
    /// and return the updated plant.
    pub async fn delete_watering_entry(
        &self,
        id: &str,
        entry_id: &str,
    ) -> Result<Plant, ServiceError> {
        self.get_plant(id).await?;
        self.store.pull_log_entry(id, entry_id).await?;
        self.get_plant(id).await
    }
}
