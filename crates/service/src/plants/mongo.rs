use std::time::Duration;

use async_trait::async_trait;
use futures_util::stream::TryStreamExt;
use mongodb::bson::{self, doc};
use mongodb::{options::ClientOptions, Client, Collection};
use tracing::info;

use models::plant::{Plant, PlantPatch, WateringEntry};

use crate::errors::ServiceError;
use crate::plants::store::PlantStore;

/// Document-store variant backed by MongoDB.
///
/// Field and array mutations map to atomic `$set` / `$push` / `$pull`
/// updates. Records are matched on the app-level `id` field; the `_id`
/// ObjectId stays internal to the driver.
#[derive(Clone)]
pub struct MongoPlantStore {
    collection: Collection<Plant>,
}

impl MongoPlantStore {
    /// Parse the connection string, ping the deployment, and bind the
    /// `plants` collection.
    pub async fn connect(uri: &str, database: &str) -> Result<Self, ServiceError> {
        let mut options = ClientOptions::parse(uri).await.map_err(storage_err)?;
        options.server_selection_timeout = Some(Duration::from_secs(10));
        let client = Client::with_options(options).map_err(storage_err)?;
        let db = client.database(database);
        db.run_command(doc! { "ping": 1 }).await.map_err(storage_err)?;
        info!(database, "connected to mongodb plant store");
        Ok(Self { collection: db.collection::<Plant>("plants") })
    }
}

fn storage_err<E: std::fmt::Display>(e: E) -> ServiceError {
    ServiceError::Storage(e.to_string())
}

#[async_trait]
impl PlantStore for MongoPlantStore {
    async fn find_all(&self) -> Result<Vec<Plant>, ServiceError> {
        let cursor = self.collection.find(doc! {}).await.map_err(storage_err)?;
        cursor.try_collect().await.map_err(storage_err)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Plant>, ServiceError> {
        self.collection.find_one(doc! { "id": id }).await.map_err(storage_err)
    }

    async fn insert(&self, plant: Plant) -> Result<(), ServiceError> {
        self.collection.insert_one(plant).await.map_err(storage_err)?;
        Ok(())
    }

    async fn update_fields(&self, id: &str, patch: &PlantPatch) -> Result<(), ServiceError> {
        // Absent patch fields are skipped at serialization, so the $set
        // document carries exactly the supplied keys.
        let set = bson::to_document(patch).map_err(storage_err)?;
        if set.is_empty() {
            return self.require_exists(id).await;
        }
        let result = self
            .collection
            .update_one(doc! { "id": id }, doc! { "$set": set })
            .await
            .map_err(storage_err)?;
        if result.matched_count == 0 {
            return Err(ServiceError::not_found("Plant"));
        }
        Ok(())
    }

    async fn push_log_entry(&self, id: &str, entry: WateringEntry) -> Result<(), ServiceError> {
        let entry = bson::to_bson(&entry).map_err(storage_err)?;
        let result = self
            .collection
            .update_one(doc! { "id": id }, doc! { "$push": { "watering_log": entry } })
            .await
            .map_err(storage_err)?;
        if result.matched_count == 0 {
            return Err(ServiceError::not_found("Plant"));
        }
        Ok(())
    }

    async fn pull_log_entry(&self, id: &str, entry_id: &str) -> Result<(), ServiceError> {
        let result = self
            .collection
            .update_one(
                doc! { "id": id },
                doc! { "$pull": { "watering_log": { "id": entry_id } } },
            )
            .await
            .map_err(storage_err)?;
        if result.matched_count == 0 {
            return Err(ServiceError::not_found("Plant"));
        }
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), ServiceError> {
        // Idempotent: a zero deleted_count is not an error.
        self.collection.delete_one(doc! { "id": id }).await.map_err(storage_err)?;
        Ok(())
    }
}

impl MongoPlantStore {
    async fn require_exists(&self, id: &str) -> Result<(), ServiceError> {
        match self.find_by_id(id).await? {
            Some(_) => Ok(()),
            None => Err(ServiceError::not_found("Plant")),
        }
    }
}

// Exercised only against a live deployment; set MONGO_URI to enable.
#[cfg(test)]
mod tests {
    use super::*;
    use models::plant::{NewPlant, WateringInput};

    async fn connect_or_skip() -> Option<MongoPlantStore> {
        let uri = match std::env::var("MONGO_URI") {
            Ok(uri) => uri,
            Err(_) => {
                eprintln!("MONGO_URI missing; skip mongo store tests");
                return None;
            }
        };
        match MongoPlantStore::connect(&uri, "plantario_test").await {
            Ok(store) => Some(store),
            Err(e) => {
                eprintln!("skip: cannot connect to mongodb: {}", e);
                None
            }
        }
    }

    #[tokio::test]
    async fn mongo_store_record_and_log_lifecycle() -> anyhow::Result<()> {
        let store = match connect_or_skip().await {
            Some(store) => store,
            None => return Ok(()),
        };

        let plant = NewPlant {
            name: Some(format!("Basil {}", uuid::Uuid::new_v4())),
            watering_interval_days: Some(3),
            ..NewPlant::default()
        }
        .into_plant()?;
        store.insert(plant.clone()).await?;

        let found = store.find_by_id(&plant.id).await?.expect("inserted plant");
        assert_eq!(found.name, plant.name);
        assert!(found.watering_log.is_empty());

        let patch = PlantPatch { notes: Some("east window".into()), ..PlantPatch::default() };
        store.update_fields(&plant.id, &patch).await?;
        let updated = store.find_by_id(&plant.id).await?.expect("plant");
        assert_eq!(updated.notes, "east window");
        assert_eq!(updated.watering_interval_days, 3);

        let entry = WateringInput { note: Some("sunny day".into()), ..WateringInput::default() }
            .into_entry();
        store.push_log_entry(&plant.id, entry.clone()).await?;
        let watered = store.find_by_id(&plant.id).await?.expect("plant");
        assert_eq!(watered.watering_log.len(), 1);
        assert_eq!(watered.watering_log[0].id, entry.id);

        store.pull_log_entry(&plant.id, &entry.id).await?;
        let pulled = store.find_by_id(&plant.id).await?.expect("plant");
        assert!(pulled.watering_log.is_empty());

        store.delete(&plant.id).await?;
        assert!(store.find_by_id(&plant.id).await?.is_none());
        store.delete(&plant.id).await?;
        Ok(())
    }
}
