#![cfg(test)]
//! In-memory `PlantStore` fake. No persistence, same contract as the file
//! and mongo variants, which keeps `PlantService` tests backend-free.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use models::plant::{Plant, PlantPatch, WateringEntry};

use crate::errors::ServiceError;
use crate::plants::service::PlantService;
use crate::plants::store::PlantStore;

#[derive(Default)]
pub struct MemoryPlantStore {
    inner: RwLock<HashMap<String, Plant>>,
}

#[async_trait]
impl PlantStore for MemoryPlantStore {
    async fn find_all(&self) -> Result<Vec<Plant>, ServiceError> {
        Ok(self.inner.read().await.values().cloned().collect())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Plant>, ServiceError> {
        Ok(self.inner.read().await.get(id).cloned())
    }

    async fn insert(&self, plant: Plant) -> Result<(), ServiceError> {
        self.inner.write().await.insert(plant.id.clone(), plant);
        Ok(())
    }

    async fn update_fields(&self, id: &str, patch: &PlantPatch) -> Result<(), ServiceError> {
        let mut map = self.inner.write().await;
        let plant = map.get_mut(id).ok_or_else(|| ServiceError::not_found("Plant"))?;
        patch.apply(plant);
        Ok(())
    }

    async fn push_log_entry(&self, id: &str, entry: WateringEntry) -> Result<(), ServiceError> {
        let mut map = self.inner.write().await;
        let plant = map.get_mut(id).ok_or_else(|| ServiceError::not_found("Plant"))?;
        plant.watering_log.push(entry);
        Ok(())
    }

    async fn pull_log_entry(&self, id: &str, entry_id: &str) -> Result<(), ServiceError> {
        let mut map = self.inner.write().await;
        let plant = map.get_mut(id).ok_or_else(|| ServiceError::not_found("Plant"))?;
        plant.watering_log.retain(|e| e.id != entry_id);
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), ServiceError> {
        self.inner.write().await.remove(id);
        Ok(())
    }
}

/// A `PlantService` over a fresh in-memory store.
pub fn memory_service() -> PlantService {
    PlantService::new(Arc::new(MemoryPlantStore::default()))
}
