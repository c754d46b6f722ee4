use std::{
    collections::HashMap,
    sync::{Arc, RwLock},
};

use crate::domain::{common::entities::CoreError, storage::ports::KeyValueStore};

/// In-memory key/value adapter. Single-key operations are atomic; writers
/// replace values wholesale, last-writer-wins.
#[derive(Debug, Clone, Default)]
pub struct InMemoryKeyValueStore {
    data: Arc<RwLock<HashMap<String, Vec<u8>>>>,
}

impl InMemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for InMemoryKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CoreError> {
        let data = self.data.read().unwrap_or_else(|e| e.into_inner());
        Ok(data.get(key).cloned())
    }

    async fn set(&self, key: &str, value: Vec<u8>) -> Result<(), CoreError> {
        let mut data = self.data.write().unwrap_or_else(|e| e.into_inner());
        data.insert(key.to_string(), value);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), CoreError> {
        let mut data = self.data.write().unwrap_or_else(|e| e.into_inner());
        data.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn set_get_delete_round_trip() {
        let store = InMemoryKeyValueStore::new();

        store.set("key", b"value".to_vec()).await.unwrap();
        assert_eq!(store.get("key").await.unwrap(), Some(b"value".to_vec()));

        store.delete("key").await.unwrap();
        assert_eq!(store.get("key").await.unwrap(), None);
    }

    #[tokio::test]
    async fn set_replaces_prior_value_wholesale() {
        let store = InMemoryKeyValueStore::new();

        store.set("key", b"first".to_vec()).await.unwrap();
        store.set("key", b"second".to_vec()).await.unwrap();

        assert_eq!(store.get("key").await.unwrap(), Some(b"second".to_vec()));
    }

    #[tokio::test]
    async fn clones_share_the_same_backing_map() {
        let store = InMemoryKeyValueStore::new();
        let view = store.clone();

        store.set("key", b"value".to_vec()).await.unwrap();
        assert_eq!(view.get("key").await.unwrap(), Some(b"value".to_vec()));
    }
}
