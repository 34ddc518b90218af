use std::sync::Arc;

use async_trait::async_trait;
use models::plant::{Plant, PlantPatch, WateringEntry};

use crate::errors::ServiceError;
use crate::plants::store::PlantStore;
use crate::storage::json_map_store::JsonMapStore;

/// Flat-file variant: the whole collection lives in one JSON file keyed by
/// plant id, and every mutation is a whole-document replace under the store
/// lock. Suitable for single-household deployments without a database.
#[derive(Clone)]
pub struct FilePlantStore {
    store: Arc<JsonMapStore<String, Plant>>,
}

impl FilePlantStore {
    /// Open the backing file, creating it empty when missing.
    pub async fn new<P: Into<std::path::PathBuf>>(path: P) -> Result<Arc<Self>, ServiceError> {
        let store = JsonMapStore::<String, Plant>::new(path).await?;
        Ok(Arc::new(Self { store }))
    }
}

#[async_trait]
impl PlantStore for FilePlantStore {
    async fn find_all(&self) -> Result<Vec<Plant>, ServiceError> {
        Ok(self.store.list().await.into_iter().map(|(_, v)| v).collect())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Plant>, ServiceError> {
        Ok(self.store.get(&id.to_string()).await)
    }

    async fn insert(&self, plant: Plant) -> Result<(), ServiceError> {
        self.store.insert(plant.id.clone(), plant).await
    }

    async fn update_fields(&self, id: &str, patch: &PlantPatch) -> Result<(), ServiceError> {
        self.store
            .update_map(|map| {
                let plant =
                    map.get_mut(id).ok_or_else(|| ServiceError::not_found("Plant"))?;
                patch.apply(plant);
                Ok(())
            })
            .await
    }

    async fn push_log_entry(&self, id: &str, entry: WateringEntry) -> Result<(), ServiceError> {
        self.store
            .update_map(|map| {
                let plant =
                    map.get_mut(id).ok_or_else(|| ServiceError::not_found("Plant"))?;
                plant.watering_log.push(entry);
                Ok(())
            })
            .await
    }

    async fn pull_log_entry(&self, id: &str, entry_id: &str) -> Result<(), ServiceError> {
        self.store
            .update_map(|map| {
                let plant =
                    map.get_mut(id).ok_or_else(|| ServiceError::not_found("Plant"))?;
                plant.watering_log.retain(|e| e.id != entry_id);
                Ok(())
            })
            .await
    }

    async fn delete(&self, id: &str) -> Result<(), ServiceError> {
        // Idempotent by contract; whether the id existed is irrelevant.
        self.store.remove(&id.to_string()).await.map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::plant::{NewPlant, WateringInput};

    fn tmp_path() -> std::path::PathBuf {
        std::env::temp_dir().join(format!("plants_{}.json", uuid::Uuid::new_v4()))
    }

    fn sample_plant(name: &str) -> Plant {
        NewPlant {
            name: Some(name.into()),
            watering_interval_days: Some(3),
            notes: Some("kitchen sill".into()),
            ..NewPlant::default()
        }
        .into_plant()
        .expect("valid input")
    }

    #[tokio::test]
    async fn file_store_record_lifecycle() -> anyhow::Result<()> {
        let path = tmp_path();
        let store = FilePlantStore::new(&path).await?;

        let plant = sample_plant("Basil");
        store.insert(plant.clone()).await?;

        let found = store.find_by_id(&plant.id).await?.expect("inserted plant");
        assert_eq!(found, plant);
        assert_eq!(store.find_all().await?.len(), 1);

        // survives reopen
        let reopened = FilePlantStore::new(&path).await?;
        assert_eq!(reopened.find_by_id(&plant.id).await?.expect("persisted"), plant);

        store.delete(&plant.id).await?;
        assert!(store.find_by_id(&plant.id).await?.is_none());
        // deleting again is still a success
        store.delete(&plant.id).await?;

        let _ = tokio::fs::remove_file(&path).await;
        Ok(())
    }

    #[tokio::test]
    async fn file_store_update_fields_merges() -> anyhow::Result<()> {
        let path = tmp_path();
        let store = FilePlantStore::new(&path).await?;
        let plant = sample_plant("Monstera");
        store.insert(plant.clone()).await?;

        let patch = PlantPatch { name: Some("Monstera deliciosa".into()), ..PlantPatch::default() };
        store.update_fields(&plant.id, &patch).await?;

        let updated = store.find_by_id(&plant.id).await?.expect("plant");
        assert_eq!(updated.name, "Monstera deliciosa");
        assert_eq!(updated.watering_interval_days, 3);
        assert_eq!(updated.notes, "kitchen sill");
        assert_eq!(updated.created_at, plant.created_at);

        let missing = store.update_fields("no-such-id", &patch).await;
        assert!(matches!(missing, Err(ServiceError::NotFound(_))));

        let _ = tokio::fs::remove_file(&path).await;
        Ok(())
    }

    #[tokio::test]
    async fn file_store_log_push_and_pull() -> anyhow::Result<()> {
        let path = tmp_path();
        let store = FilePlantStore::new(&path).await?;
        let plant = sample_plant("Fern");
        store.insert(plant.clone()).await?;

        let first = WateringInput { note: Some("first".into()), ..WateringInput::default() }
            .into_entry();
        let second = WateringInput { note: Some("second".into()), ..WateringInput::default() }
            .into_entry();
        store.push_log_entry(&plant.id, first.clone()).await?;
        store.push_log_entry(&plant.id, second.clone()).await?;

        let watered = store.find_by_id(&plant.id).await?.expect("plant");
        assert_eq!(watered.watering_log, vec![first.clone(), second.clone()]);

        store.pull_log_entry(&plant.id, &first.id).await?;
        let pulled = store.find_by_id(&plant.id).await?.expect("plant");
        assert_eq!(pulled.watering_log, vec![second.clone()]);

        // pulling an unknown entry id is a success and changes nothing
        store.pull_log_entry(&plant.id, &first.id).await?;
        let unchanged = store.find_by_id(&plant.id).await?.expect("plant");
        assert_eq!(unchanged.watering_log, vec![second]);

        let orphan = store.push_log_entry("no-such-id", first).await;
        assert!(matches!(orphan, Err(ServiceError::NotFound(_))));

        let _ = tokio::fs::remove_file(&path).await;
        Ok(())
    }
}
