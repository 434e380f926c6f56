use crate::domain::model::RawEntry;
use crate::domain::ports::Storage;
use crate::utils::error::{FeatsError, Result};
use crate::utils::validation::is_contained_resource;
use serde::Deserialize;

/// On-disk shape of a fallback dataset. Extra top-level keys are ignored.
#[derive(Debug, Deserialize)]
struct FallbackDataset {
    ranking: Vec<RawEntry>,
}

/// Reads static fallback datasets through a `Storage` backend.
#[derive(Debug, Clone)]
pub struct FallbackLoader<S: Storage> {
    storage: S,
}

impl<S: Storage> FallbackLoader<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Return the dataset's `ranking` list unmodified and in file order.
    pub async fn load_fallback(&self, resource_id: &str) -> Result<Vec<RawEntry>> {
        if !is_contained_resource(resource_id) {
            return Err(FeatsError::ResourceNotFound {
                resource: resource_id.to_string(),
            });
        }

        let bytes = self.storage.read_file(resource_id).await.map_err(|e| {
            tracing::error!("❌ Cannot read fallback resource '{}': {}", resource_id, e);
            FeatsError::ResourceNotFound {
                resource: resource_id.to_string(),
            }
        })?;

        let dataset: FallbackDataset =
            serde_json::from_slice(&bytes).map_err(|e| FeatsError::MalformedResource {
                resource: resource_id.to_string(),
                reason: e.to_string(),
            })?;

        tracing::debug!(
            "📂 Loaded {} fallback entries from '{}'",
            dataset.ranking.len(),
            resource_id
        );
        Ok(dataset.ranking)
    }
}
