use chrono::Utc;

use crate::domain::{
    avoid_list::{
        entities::{AvoidList, CacheEntry},
        ports::AvoidListClient,
        value_objects::ProfileSelection,
    },
    common::{CacheConfig, entities::CoreError},
    storage::{BLACKLIST_CACHE_KEY, BLACKLIST_LAST_UPDATE_KEY, ports::KeyValueStore},
};

/// Time-boxed local store of the last successfully fetched avoid-list.
///
/// Read and write failures are swallowed and reported as "no cache"; a
/// corrupted snapshot must never take a scan down.
#[derive(Debug, Clone)]
pub struct OfflineCacheService<S> {
    store: S,
    ttl: chrono::Duration,
}

impl<S> OfflineCacheService<S>
where
    S: KeyValueStore,
{
    pub fn new(store: S, config: CacheConfig) -> Self {
        Self {
            store,
            ttl: config.ttl,
        }
    }

    /// Persist `list` with the current timestamp, unconditionally replacing
    /// any prior entry.
    pub async fn put(&self, list: &AvoidList) {
        let data = match serde_json::to_vec(list) {
            Ok(data) => data,
            Err(e) => {
                tracing::warn!(error = %e, "failed to encode avoid-list for cache");
                return;
            }
        };

        if let Err(e) = self.store.set(BLACKLIST_CACHE_KEY, data).await {
            tracing::warn!(error = %e, "failed to cache avoid-list");
            return;
        }

        let stamp = Utc::now().to_rfc3339();
        if let Err(e) = self
            .store
            .set(BLACKLIST_LAST_UPDATE_KEY, stamp.into_bytes())
            .await
        {
            tracing::warn!(error = %e, "failed to record avoid-list cache timestamp");
            return;
        }

        tracing::info!(items = list.items.len(), "cached avoid-list");
    }

    /// The stored entry, or `None` if never populated or unreadable.
    pub async fn get(&self) -> Option<CacheEntry> {
        let data = match self.store.get(BLACKLIST_CACHE_KEY).await {
            Ok(Some(data)) => data,
            Ok(None) => {
                tracing::debug!("no cached avoid-list");
                return None;
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to read cached avoid-list");
                return None;
            }
        };

        let list: AvoidList = match serde_json::from_slice(&data) {
            Ok(list) => list,
            Err(e) => {
                tracing::warn!(error = %e, "failed to decode cached avoid-list");
                return None;
            }
        };

        let cached_at = match self.store.get(BLACKLIST_LAST_UPDATE_KEY).await {
            Ok(Some(raw)) => String::from_utf8(raw)
                .ok()
                .and_then(|s| chrono::DateTime::parse_from_rfc3339(&s).ok())
                .map(|t| t.with_timezone(&Utc))?,
            _ => return None,
        };

        Some(CacheEntry { list, cached_at })
    }

    /// `now - cached_at < ttl` (24 h by default).
    pub fn is_valid(&self, entry: &CacheEntry) -> bool {
        entry.is_valid_at(Utc::now(), self.ttl)
    }
}

/// Resolves the personalized avoid-list for a profile: one network attempt,
/// then the cache, but only when connectivity itself is gone.
#[derive(Debug, Clone)]
pub struct AvoidListResolver<C, S> {
    client: C,
    cache: OfflineCacheService<S>,
}

impl<C, S> AvoidListResolver<C, S>
where
    C: AvoidListClient,
    S: KeyValueStore,
{
    pub fn new(client: C, cache: OfflineCacheService<S>) -> Self {
        Self { client, cache }
    }

    pub async fn resolve(
        &self,
        selection: ProfileSelection,
        user_id: &str,
    ) -> Result<AvoidList, CoreError> {
        match self.client.fetch_avoid_list(selection, user_id).await {
            Ok(list) => {
                self.cache.put(&list).await;
                Ok(list)
            }
            Err(CoreError::NoConnectivity) => {
                if let Some(entry) = self.cache.get().await {
                    if self.cache.is_valid(&entry) {
                        tracing::info!("no connectivity, serving cached avoid-list");
                        return Ok(entry.list);
                    }
                    tracing::warn!("no connectivity and cached avoid-list is stale");
                }
                Err(CoreError::NoConnectivity)
            }
            // Server and decoding errors surface verbatim; the cache is only
            // consulted when connectivity itself is gone.
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::{
        domain::avoid_list::entities::AvoidListItem,
        infrastructure::storage::memory::InMemoryKeyValueStore,
    };

    struct StubAvoidListClient {
        response: Mutex<Option<Result<AvoidList, CoreError>>>,
    }

    impl StubAvoidListClient {
        fn new(response: Result<AvoidList, CoreError>) -> Self {
            Self {
                response: Mutex::new(Some(response)),
            }
        }
    }

    impl AvoidListClient for StubAvoidListClient {
        async fn fetch_avoid_list(
            &self,
            _selection: ProfileSelection,
            _user_id: &str,
        ) -> Result<AvoidList, CoreError> {
            self.response.lock().unwrap().take().unwrap()
        }
    }

    fn gluten_list() -> AvoidList {
        AvoidList::new(vec![AvoidListItem::new(
            "Gluten",
            vec!["wheat starch".to_string()],
            "gluten-free dietary restriction",
        )])
    }

    fn selection() -> ProfileSelection {
        ProfileSelection {
            dietary: vec!["gluten".to_string()],
            health: vec!["energy".to_string()],
            allergies: vec![],
        }
    }

    fn cache() -> OfflineCacheService<InMemoryKeyValueStore> {
        OfflineCacheService::new(InMemoryKeyValueStore::new(), CacheConfig::default())
    }

    #[tokio::test]
    async fn cache_round_trip_is_valid_immediately() {
        let cache = cache();
        let list = gluten_list();

        cache.put(&list).await;
        let entry = cache.get().await.expect("entry should be present");

        assert_eq!(entry.list, list);
        assert!(cache.is_valid(&entry));
    }

    #[tokio::test]
    async fn corrupt_cache_reads_as_absent() {
        let store = InMemoryKeyValueStore::new();
        store
            .set(BLACKLIST_CACHE_KEY, b"{broken".to_vec())
            .await
            .unwrap();
        store
            .set(BLACKLIST_LAST_UPDATE_KEY, Utc::now().to_rfc3339().into_bytes())
            .await
            .unwrap();

        let cache = OfflineCacheService::new(store, CacheConfig::default());
        assert!(cache.get().await.is_none());
    }

    #[tokio::test]
    async fn successful_fetch_populates_cache() {
        let cache = cache();
        let expected = gluten_list();
        let resolver =
            AvoidListResolver::new(StubAvoidListClient::new(Ok(expected.clone())), cache);

        let list = resolver.resolve(selection(), "Ada Lovelace").await.unwrap();
        assert_eq!(list, expected);

        let cached = resolver.cache.get().await.expect("fetch should cache");
        assert_eq!(cached.list, expected);
    }

    #[tokio::test]
    async fn no_connectivity_falls_back_to_valid_cache() {
        let cache = cache();
        cache.put(&gluten_list()).await;

        let resolver =
            AvoidListResolver::new(StubAvoidListClient::new(Err(CoreError::NoConnectivity)), cache);

        let list = resolver.resolve(selection(), "Ada Lovelace").await.unwrap();
        assert_eq!(list.items[0].item, "Gluten");
    }

    #[tokio::test]
    async fn no_connectivity_with_stale_cache_fails() {
        let store = InMemoryKeyValueStore::new();
        let cache = OfflineCacheService::new(store.clone(), CacheConfig::default());
        cache.put(&gluten_list()).await;

        // Age the entry past the 24 h window.
        let stale = (Utc::now() - chrono::Duration::hours(25)).to_rfc3339();
        store
            .set(BLACKLIST_LAST_UPDATE_KEY, stale.into_bytes())
            .await
            .unwrap();

        let resolver =
            AvoidListResolver::new(StubAvoidListClient::new(Err(CoreError::NoConnectivity)), cache);

        let err = resolver.resolve(selection(), "Ada Lovelace").await.unwrap_err();
        assert!(matches!(err, CoreError::NoConnectivity));
    }

    #[tokio::test]
    async fn no_connectivity_without_cache_fails() {
        let resolver = AvoidListResolver::new(
            StubAvoidListClient::new(Err(CoreError::NoConnectivity)),
            cache(),
        );

        let err = resolver.resolve(selection(), "Ada Lovelace").await.unwrap_err();
        assert!(matches!(err, CoreError::NoConnectivity));
    }

    #[tokio::test]
    async fn server_error_does_not_consult_cache() {
        let cache = cache();
        cache.put(&gluten_list()).await;

        let resolver =
            AvoidListResolver::new(StubAvoidListClient::new(Err(CoreError::Server(500))), cache);

        let err = resolver.resolve(selection(), "Ada Lovelace").await.unwrap_err();
        assert!(matches!(err, CoreError::Server(500)));
    }

    #[tokio::test]
    async fn timeout_style_network_error_does_not_consult_cache() {
        let cache = cache();
        cache.put(&gluten_list()).await;

        let resolver = AvoidListResolver::new(
            StubAvoidListClient::new(Err(CoreError::Network("timed out".to_string()))),
            cache,
        );

        let err = resolver.resolve(selection(), "Ada Lovelace").await.unwrap_err();
        assert!(matches!(err, CoreError::Network(_)));
    }
}
