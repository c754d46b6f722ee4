use serde::{Serialize, de::DeserializeOwned};

use crate::domain::{
    common::entities::CoreError,
    profile::entities::UserProfile,
    storage::{USER_PROFILE_KEY, ports::KeyValueStore},
};

/// Typed JSON persistence over the raw key/value port.
///
/// Reads fail open: missing or corrupt data comes back as `None` so a bad
/// snapshot can never take the pipeline down.
#[derive(Debug, Clone)]
pub struct JsonStorageService<S> {
    store: S,
}

impl<S> JsonStorageService<S>
where
    S: KeyValueStore,
{
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub async fn save<T: Serialize + Sync>(&self, key: &str, item: &T) -> Result<(), CoreError> {
        let data = serde_json::to_vec(item)
            .map_err(|e| CoreError::Decoding(format!("failed to encode {key}: {e}")))?;
        self.store.set(key, data).await
    }

    pub async fn load<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let data = match self.store.get(key).await {
            Ok(Some(data)) => data,
            Ok(None) => {
                tracing::debug!(key, "no stored data");
                return None;
            }
            Err(e) => {
                tracing::warn!(key, error = %e, "failed to read stored data");
                return None;
            }
        };

        match serde_json::from_slice(&data) {
            Ok(item) => Some(item),
            Err(e) => {
                tracing::warn!(key, error = %e, "failed to decode stored data");
                None
            }
        }
    }

    pub async fn delete(&self, key: &str) -> Result<(), CoreError> {
        self.store.delete(key).await
    }

    pub async fn save_profile(&self, profile: &UserProfile) -> Result<(), CoreError> {
        self.save(USER_PROFILE_KEY, profile).await
    }

    pub async fn load_profile(&self) -> Option<UserProfile> {
        self.load(USER_PROFILE_KEY).await
    }
}
