//! Generic bidirectional name/ID resolving cache
//!
//! One instance serves a single namespace (classifications, roles, ...).
//! Population is lazy: the first lookup in either direction triggers a
//! full fetch from the injected [`EntitySource`]. Lookups that miss after
//! a refresh are memoized in a negative cache so known-absent keys do not
//! trigger repeated fetches.
//!
//! A refresh that actually repopulates the maps also clears the negative
//! sets, so an entity recreated server-side after a confirmed miss
//! resolves again on the next refresh. This diverges from older cache
//! variants that kept negative entries forever.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info};

use super::{EntitySource, NamedEntity};
use crate::error::AtlanError;

/// Runtime statistics for a [`ResolvingCache`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheStats {
    /// Lookups answered from the maps or the negative cache, without I/O
    pub hits: u64,
    /// Lookups that had to fall through to a refresh
    pub misses: u64,
    /// Successful refreshes executed
    pub refreshes: u64,
    /// Entities in the current snapshot
    pub entries: usize,
}

/// Snapshot of one namespace, replaced wholesale on refresh
#[derive(Debug)]
struct CacheState<E> {
    by_id: HashMap<String, E>,
    name_to_id: HashMap<String, String>,
    id_to_name: HashMap<String, String>,
    deleted_names: HashSet<String>,
    deleted_ids: HashSet<String>,
}

impl<E> Default for CacheState<E> {
    fn default() -> Self {
        Self {
            by_id: HashMap::new(),
            name_to_id: HashMap::new(),
            id_to_name: HashMap::new(),
            deleted_names: HashSet::new(),
            deleted_ids: HashSet::new(),
        }
    }
}

/// Bidirectional, lazily-populated name↔ID cache for one namespace
///
/// The cache is instance-scoped: it holds an injected fetch collaborator
/// rather than reaching into any globally reachable client, so independent
/// sessions never cross-contaminate and tests can substitute a fake source.
///
/// Lookups may run concurrently from many tasks. A refresh executes under
/// a mutex so at most one fetch is in flight; the map triple is replaced
/// under a single write guard, so no reader observes state mixed across
/// refresh generations.
#[derive(Debug)]
pub struct ResolvingCache<S: EntitySource> {
    namespace: &'static str,
    source: S,
    state: RwLock<CacheState<S::Entity>>,
    refresh_lock: Mutex<()>,
    hits: AtomicU64,
    misses: AtomicU64,
    refreshes: AtomicU64,
}

impl<S: EntitySource> ResolvingCache<S> {
    /// Create an empty cache for `namespace` backed by `source`
    pub fn new(namespace: &'static str, source: S) -> Self {
        Self {
            namespace,
            source,
            state: RwLock::new(CacheState::default()),
            refresh_lock: Mutex::new(()),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            refreshes: AtomicU64::new(0),
        }
    }

    /// Namespace label this cache serves (used in errors and logs)
    pub fn namespace(&self) -> &'static str {
        self.namespace
    }

    /// Resolve a display name to its service-internal ID
    ///
    /// Returns `Ok(None)` once a refresh has confirmed the name absent;
    /// repeated lookups of a confirmed-absent name are answered from the
    /// negative cache without I/O. Transport failures during the refresh
    /// propagate unchanged.
    pub async fn get_id_for_name(&self, name: &str) -> Result<Option<String>, AtlanError> {
        {
            let state = self.state.read().await;
            if let Some(id) = state.name_to_id.get(name) {
                self.hits.fetch_add(1, Ordering::Relaxed);
                return Ok(Some(id.clone()));
            }
            if state.deleted_names.contains(name) {
                self.hits.fetch_add(1, Ordering::Relaxed);
                debug!(
                    namespace = self.namespace,
                    name, "negative cache hit, skipping refresh"
                );
                return Ok(None);
            }
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        let _guard = self.refresh_lock.lock().await;

        // A refresh that completed while we waited may already answer this.
        {
            let state = self.state.read().await;
            if let Some(id) = state.name_to_id.get(name) {
                return Ok(Some(id.clone()));
            }
            if state.deleted_names.contains(name) {
                return Ok(None);
            }
        }

        self.refresh_locked().await?;

        let mut state = self.state.write().await;
        match state.name_to_id.get(name).cloned() {
            Some(id) => Ok(Some(id)),
            None => {
                debug!(
                    namespace = self.namespace,
                    name, "name absent after refresh, recording negative result"
                );
                state.deleted_names.insert(name.to_owned());
                Ok(None)
            }
        }
    }

    /// Resolve a service-internal ID to its display name
    ///
    /// Symmetric to [`get_id_for_name`](Self::get_id_for_name).
    pub async fn get_name_for_id(&self, id: &str) -> Result<Option<String>, AtlanError> {
        {
            let state = self.state.read().await;
            if let Some(name) = state.id_to_name.get(id) {
                self.hits.fetch_add(1, Ordering::Relaxed);
                return Ok(Some(name.clone()));
            }
            if state.deleted_ids.contains(id) {
                self.hits.fetch_add(1, Ordering::Relaxed);
                debug!(
                    namespace = self.namespace,
                    id, "negative cache hit, skipping refresh"
                );
                return Ok(None);
            }
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        let _guard = self.refresh_lock.lock().await;

        {
            let state = self.state.read().await;
            if let Some(name) = state.id_to_name.get(id) {
                return Ok(Some(name.clone()));
            }
            if state.deleted_ids.contains(id) {
                return Ok(None);
            }
        }

        self.refresh_locked().await?;

        let mut state = self.state.write().await;
        match state.id_to_name.get(id).cloned() {
            Some(name) => Ok(Some(name)),
            None => {
                debug!(
                    namespace = self.namespace,
                    id, "ID absent after refresh, recording negative result"
                );
                state.deleted_ids.insert(id.to_owned());
                Ok(None)
            }
        }
    }

    /// Fetch the full entity for an ID, resolving through the cache
    pub async fn get_by_id(&self, id: &str) -> Result<Option<S::Entity>, AtlanError> {
        {
            let state = self.state.read().await;
            if let Some(entity) = state.by_id.get(id) {
                self.hits.fetch_add(1, Ordering::Relaxed);
                return Ok(Some(entity.clone()));
            }
            if state.deleted_ids.contains(id) {
                self.hits.fetch_add(1, Ordering::Relaxed);
                return Ok(None);
            }
        }

        if self.get_name_for_id(id).await?.is_none() {
            return Ok(None);
        }
        let state = self.state.read().await;
        Ok(state.by_id.get(id).cloned())
    }

    /// Fetch the full entity for a display name, resolving through the cache
    pub async fn get_by_name(&self, name: &str) -> Result<Option<S::Entity>, AtlanError> {
        // Warm path: resolve name and entity under one read guard so both
        // come from the same snapshot.
        {
            let state = self.state.read().await;
            if let Some(id) = state.name_to_id.get(name) {
                self.hits.fetch_add(1, Ordering::Relaxed);
                return Ok(state.by_id.get(id).cloned());
            }
            if state.deleted_names.contains(name) {
                self.hits.fetch_add(1, Ordering::Relaxed);
                return Ok(None);
            }
        }

        if self.get_id_for_name(name).await?.is_none() {
            return Ok(None);
        }
        let state = self.state.read().await;
        Ok(state
            .name_to_id
            .get(name)
            .and_then(|id| state.by_id.get(id))
            .cloned())
    }

    /// Fail fast if any of the given IDs does not resolve in this namespace
    ///
    /// The returned [`AtlanError::Validation`] names the first offending ID.
    pub async fn validate_ids<I, T>(&self, ids: I) -> Result<(), AtlanError>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        for id in ids {
            let id = id.as_ref();
            if self.get_name_for_id(id).await?.is_none() {
                return Err(AtlanError::Validation {
                    namespace: self.namespace,
                    kind: "id",
                    value: id.to_owned(),
                });
            }
        }
        Ok(())
    }

    /// Fail fast if any of the given names does not resolve in this namespace
    pub async fn validate_names<I, T>(&self, names: I) -> Result<(), AtlanError>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        for name in names {
            let name = name.as_ref();
            if self.get_id_for_name(name).await?.is_none() {
                return Err(AtlanError::Validation {
                    namespace: self.namespace,
                    kind: "name",
                    value: name.to_owned(),
                });
            }
        }
        Ok(())
    }

    /// Repopulate the cache from the backing source
    ///
    /// At most one refresh is in flight at a time; concurrent callers wait
    /// for the running one to finish and then return.
    pub async fn refresh(&self) -> Result<(), AtlanError> {
        let _guard = self.refresh_lock.lock().await;
        self.refresh_locked().await
    }

    /// Snapshot the cache's runtime statistics
    pub async fn stats(&self) -> CacheStats {
        let entries = self.state.read().await.by_id.len();
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            refreshes: self.refreshes.load(Ordering::Relaxed),
            entries,
        }
    }

    /// Fetch-and-swap; caller must hold `refresh_lock`
    async fn refresh_locked(&self) -> Result<(), AtlanError> {
        let entities = self.source.fetch_all().await?;

        if entities.is_empty() {
            // "No data" signal: keep the existing snapshot rather than
            // wiping queryable state.
            debug!(
                namespace = self.namespace,
                "fetch returned no entities, keeping existing snapshot"
            );
            return Ok(());
        }

        let mut by_id = HashMap::with_capacity(entities.len());
        let mut name_to_id = HashMap::with_capacity(entities.len());
        let mut id_to_name = HashMap::with_capacity(entities.len());
        for entity in entities {
            name_to_id.insert(entity.name().to_owned(), entity.id().to_owned());
            id_to_name.insert(entity.id().to_owned(), entity.name().to_owned());
            by_id.insert(entity.id().to_owned(), entity);
        }

        let count = by_id.len();

        // Swap all maps under one write guard so readers never see state
        // mixed across refresh generations. A successful repopulation also
        // invalidates prior negative results.
        let mut state = self.state.write().await;
        state.by_id = by_id;
        state.name_to_id = name_to_id;
        state.id_to_name = id_to_name;
        state.deleted_names.clear();
        state.deleted_ids.clear();
        drop(state);

        self.refreshes.fetch_add(1, Ordering::Relaxed);
        info!(
            namespace = self.namespace,
            entities = count,
            "cache refreshed"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicUsize;
    use std::sync::Mutex as StdMutex;

    use async_trait::async_trait;

    use super::*;

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct TestEntity {
        id: String,
        name: String,
    }

    impl TestEntity {
        fn new(id: &str, name: &str) -> Self {
            Self {
                id: id.to_owned(),
                name: name.to_owned(),
            }
        }
    }

    impl NamedEntity for TestEntity {
        fn id(&self) -> &str {
            &self.id
        }

        fn name(&self) -> &str {
            &self.name
        }
    }

    struct FakeSource {
        entities: StdMutex<Vec<TestEntity>>,
        calls: AtomicUsize,
        fail: StdMutex<bool>,
    }

    impl FakeSource {
        fn with(entities: Vec<TestEntity>) -> Self {
            Self {
                entities: StdMutex::new(entities),
                calls: AtomicUsize::new(0),
                fail: StdMutex::new(false),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl EntitySource for FakeSource {
        type Entity = TestEntity;

        async fn fetch_all(&self) -> Result<Vec<TestEntity>, AtlanError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if *self.fail.lock().unwrap() {
                return Err(AtlanError::ServerError {
                    status: 503,
                    body: "unavailable".into(),
                });
            }
            Ok(self.entities.lock().unwrap().clone())
        }
    }

    fn admin_cache() -> ResolvingCache<FakeSource> {
        ResolvingCache::new(
            "role",
            FakeSource::with(vec![TestEntity::new("r-1", "$admin")]),
        )
    }

    #[tokio::test]
    async fn test_cold_lookup_populates_and_resolves() {
        let cache = admin_cache();

        let id = cache.get_id_for_name("$admin").await.unwrap();
        assert_eq!(id.as_deref(), Some("r-1"));
        assert_eq!(cache.source.calls(), 1);
    }

    #[tokio::test]
    async fn test_second_lookup_is_a_hit() {
        let cache = admin_cache();

        cache.get_id_for_name("$admin").await.unwrap();
        let id = cache.get_id_for_name("$admin").await.unwrap();

        assert_eq!(id.as_deref(), Some("r-1"));
        assert_eq!(cache.source.calls(), 1);
        assert_eq!(cache.stats().await.hits, 1);
    }

    #[tokio::test]
    async fn test_reverse_lookup() {
        let cache = admin_cache();

        let name = cache.get_name_for_id("r-1").await.unwrap();
        assert_eq!(name.as_deref(), Some("$admin"));

        // Reverse direction is served from the same snapshot
        let id = cache.get_id_for_name("$admin").await.unwrap();
        assert_eq!(id.as_deref(), Some("r-1"));
        assert_eq!(cache.source.calls(), 1);
    }

    #[tokio::test]
    async fn test_confirmed_miss_is_memoized() {
        let cache = admin_cache();

        assert!(cache.get_id_for_name("$ghost").await.unwrap().is_none());
        assert_eq!(cache.source.calls(), 1);

        // Second lookup answered from the negative cache, no fetch
        assert!(cache.get_id_for_name("$ghost").await.unwrap().is_none());
        assert_eq!(cache.source.calls(), 1);
    }

    #[tokio::test]
    async fn test_confirmed_missing_id_is_memoized() {
        let cache = admin_cache();

        assert!(cache.get_name_for_id("r-404").await.unwrap().is_none());
        assert!(cache.get_name_for_id("r-404").await.unwrap().is_none());
        assert_eq!(cache.source.calls(), 1);
    }

    #[tokio::test]
    async fn test_empty_fetch_keeps_existing_snapshot() {
        let cache = admin_cache();
        cache.get_id_for_name("$admin").await.unwrap();

        cache.source.entities.lock().unwrap().clear();
        cache.refresh().await.unwrap();

        let id = cache.get_id_for_name("$admin").await.unwrap();
        assert_eq!(id.as_deref(), Some("r-1"));
    }

    #[tokio::test]
    async fn test_refresh_clears_negative_cache() {
        let cache = admin_cache();

        assert!(cache.get_id_for_name("$steward").await.unwrap().is_none());

        // Entity appears server-side after being recorded as absent
        cache
            .source
            .entities
            .lock()
            .unwrap()
            .push(TestEntity::new("r-2", "$steward"));
        cache.refresh().await.unwrap();

        let id = cache.get_id_for_name("$steward").await.unwrap();
        assert_eq!(id.as_deref(), Some("r-2"));
    }

    #[tokio::test]
    async fn test_unrelated_miss_revalidates_negative_entries() {
        let cache = admin_cache();

        assert!(cache.get_id_for_name("$steward").await.unwrap().is_none());

        cache
            .source
            .entities
            .lock()
            .unwrap()
            .push(TestEntity::new("r-2", "$steward"));

        // A lookup for a different unseen key triggers a refresh, which
        // repopulates the maps and drops the stale negative entry.
        assert!(cache.get_id_for_name("$other").await.unwrap().is_none());
        let id = cache.get_id_for_name("$steward").await.unwrap();
        assert_eq!(id.as_deref(), Some("r-2"));
    }

    #[tokio::test]
    async fn test_transport_error_propagates() {
        let cache = admin_cache();
        *cache.source.fail.lock().unwrap() = true;

        let err = cache.get_id_for_name("$admin").await.unwrap_err();
        assert!(matches!(err, AtlanError::ServerError { status: 503, .. }));
    }

    #[tokio::test]
    async fn test_cached_lookup_survives_transport_failure() {
        let cache = admin_cache();
        cache.get_id_for_name("$admin").await.unwrap();

        *cache.source.fail.lock().unwrap() = true;

        // Already-cached key never performs I/O, so it cannot fail
        let id = cache.get_id_for_name("$admin").await.unwrap();
        assert_eq!(id.as_deref(), Some("r-1"));
    }

    #[tokio::test]
    async fn test_validate_ids_names_the_culprit() {
        let cache = admin_cache();

        let err = cache.validate_ids(["r-1", "r-404"]).await.unwrap_err();
        match err {
            AtlanError::Validation {
                namespace,
                kind,
                value,
            } => {
                assert_eq!(namespace, "role");
                assert_eq!(kind, "id");
                assert_eq!(value, "r-404");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_validate_names_passes_for_known_names() {
        let cache = admin_cache();
        assert!(cache.validate_names(["$admin"]).await.is_ok());
    }

    #[tokio::test]
    async fn test_get_by_name_returns_full_entity() {
        let cache = admin_cache();

        let entity = cache.get_by_name("$admin").await.unwrap().unwrap();
        assert_eq!(entity, TestEntity::new("r-1", "$admin"));

        assert!(cache.get_by_name("$ghost").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_stats_track_hits_misses_refreshes() {
        let cache = admin_cache();

        cache.get_id_for_name("$admin").await.unwrap(); // miss + refresh
        cache.get_id_for_name("$admin").await.unwrap(); // hit
        cache.get_id_for_name("$ghost").await.unwrap(); // miss + refresh
        cache.get_id_for_name("$ghost").await.unwrap(); // negative hit

        let stats = cache.stats().await;
        assert_eq!(stats.hits, 2);
        assert_eq!(stats.misses, 2);
        assert_eq!(stats.refreshes, 2);
        assert_eq!(stats.entries, 1);
    }
}
