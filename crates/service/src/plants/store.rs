use async_trait::async_trait;
use models::plant::{Plant, PlantPatch, WateringEntry};

use crate::errors::ServiceError;

/// Persistence collaborator contract for the plant aggregate: record-level
/// operations plus the two array operations the embedded watering log needs.
///
/// Implementations must make `delete` idempotent and `pull_log_entry` a
/// success when nothing matches; `update_fields` and the array operations
/// report NotFound when the plant id does not exist.
#[async_trait]
pub trait PlantStore: Send + Sync {
    async fn find_all(&self) -> Result<Vec<Plant>, ServiceError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Plant>, ServiceError>;
    async fn insert(&self, plant: Plant) -> Result<(), ServiceError>;
    /// Merge-by-presence: apply only the fields the patch carries.
    async fn update_fields(&self, id: &str, patch: &PlantPatch) -> Result<(), ServiceError>;
    /// Append one entry at the end of the watering log.
    async fn push_log_entry(&self, id: &str, entry: WateringEntry) -> Result<(), ServiceError>;
    /// Remove every log entry whose id matches; zero matches is a success.
    async fn pull_log_entry(&self, id: &str, entry_id: &str) -> Result<(), ServiceError>;
    async fn delete(&self, id: &str) -> Result<(), ServiceError>;
}
