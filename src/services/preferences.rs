use crate::models::{PreferencesUpdate, UserPreferences};
use crate::services::storage::{KeyValueStore, StorageError, StorageKey};
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

/// Owner of one user's preference record
///
/// Never fails towards its caller: unreadable data falls back to the default
/// record and failed writes are logged. The in-memory copy is authoritative
/// for the lifetime of the store, so a merge stays visible even when it could
/// not be persisted. Concurrent saves are last-write-wins.
pub struct PreferenceStore {
    storage: Arc<dyn KeyValueStore>,
    key: String,
    current: RwLock<Option<UserPreferences>>,
}

impl PreferenceStore {
    /// Create a store persisting under an explicit key
    pub fn new(storage: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
            current: RwLock::new(None),
        }
    }

    /// Create a store for a user, keyed as `prefs:{user_id}`
    pub fn for_user(storage: Arc<dyn KeyValueStore>, user_id: &str) -> Self {
        Self::new(storage, StorageKey::preferences(user_id))
    }

    /// Current preferences, or the default record when none are stored
    pub fn get_preferences(&self) -> UserPreferences {
        if let Some(cached) = self.cached() {
            return cached;
        }

        let loaded = self.load_persisted();
        self.replace_cached(Some(loaded.clone()));
        loaded
    }

    /// Shallow-merge `update` onto the current record and persist the result
    ///
    /// Returns the merged record.
    pub fn save_preferences(&self, update: PreferencesUpdate) -> UserPreferences {
        let mut merged = self.get_preferences();
        merged.merge(update);
        self.replace_cached(Some(merged.clone()));

        match self.persist(&merged) {
            Ok(()) => tracing::debug!(key = %self.key, "Preferences saved"),
            Err(e) => tracing::warn!(
                key = %self.key,
                "Failed to persist preferences, keeping in-memory copy: {}",
                e
            ),
        }

        merged
    }

    /// Reset to the default record and drop the persisted value
    pub fn clear_preferences(&self) -> UserPreferences {
        let defaults = UserPreferences::default();
        self.replace_cached(Some(defaults.clone()));

        if let Err(e) = self.storage.remove(&self.key) {
            tracing::warn!(key = %self.key, "Failed to remove stored preferences: {}", e);
        }

        defaults
    }

    /// Whether the profile is complete enough to filter jobs with
    pub fn has_completed_profile(&self) -> bool {
        self.get_preferences().has_completed_profile()
    }

    /// Profile completeness percentage (0-100)
    pub fn get_profile_completeness(&self) -> u8 {
        self.get_preferences().completeness()
    }

    fn load_persisted(&self) -> UserPreferences {
        let raw = match self.storage.load(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return UserPreferences::default(),
            Err(e) => {
                tracing::warn!(key = %self.key, "Failed to load preferences, using defaults: {}", e);
                return UserPreferences::default();
            }
        };

        serde_json::from_str(&raw).unwrap_or_else(|e| {
            tracing::warn!(key = %self.key, "Stored preferences are corrupt, using defaults: {}", e);
            UserPreferences::default()
        })
    }

    fn persist(&self, preferences: &UserPreferences) -> Result<(), StorageError> {
        let json = serde_json::to_string(preferences)?;
        self.storage.save(&self.key, &json)
    }

    fn cached(&self) -> Option<UserPreferences> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn replace_cached(&self, preferences: Option<UserPreferences>) {
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = preferences;
    }
}

/// Hands out one shared [`PreferenceStore`] per active user
///
/// Stores idle for longer than the TTL are evicted and rebuilt from storage
/// on next use.
pub struct PreferenceRegistry {
    storage: Arc<dyn KeyValueStore>,
    sessions: moka::sync::Cache<String, Arc<PreferenceStore>>,
}

impl PreferenceRegistry {
    pub fn new(storage: Arc<dyn KeyValueStore>, max_sessions: u64, idle_ttl_secs: u64) -> Self {
        let sessions = moka::sync::Cache::builder()
            .max_capacity(max_sessions)
            .time_to_idle(Duration::from_secs(idle_ttl_secs))
            .build();

        Self { storage, sessions }
    }

    /// The store for `user_id`, created on first use
    pub fn store_for(&self, user_id: &str) -> Arc<PreferenceStore> {
        self.sessions.get_with(user_id.to_string(), || {
            tracing::trace!("Opening preference session for {}", user_id);
            Arc::new(PreferenceStore::for_user(self.storage.clone(), user_id))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::WorkType;
    use crate::services::storage::{FileStore, MemoryStore};

    /// Storage that refuses every write
    struct ReadOnlyStore {
        inner: MemoryStore,
    }

    impl KeyValueStore for ReadOnlyStore {
        fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
            self.inner.load(key)
        }

        fn save(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("read-only".to_string()))
        }

        fn remove(&self, _key: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("read-only".to_string()))
        }
    }

    fn full_update() -> PreferencesUpdate {
        PreferencesUpdate {
            job_title: Some("Software Engineer".to_string()),
            skills: Some("Python,React".to_string()),
            salary_min: Some("80000".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_defaults_when_nothing_saved() {
        let store = PreferenceStore::for_user(Arc::new(MemoryStore::new()), "u1");

        assert_eq!(store.get_preferences(), UserPreferences::default());
        assert_eq!(store.get_preferences(), UserPreferences::default());
        assert!(!store.has_completed_profile());
        assert_eq!(store.get_profile_completeness(), 0);
    }

    #[test]
    fn test_save_merges_and_persists() {
        let storage = Arc::new(MemoryStore::new());
        let store = PreferenceStore::for_user(storage.clone(), "u1");

        store.save_preferences(full_update());
        let merged = store.save_preferences(PreferencesUpdate {
            work_type: Some(WorkType::Remote),
            ..Default::default()
        });

        assert_eq!(merged.job_title, "Software Engineer");
        assert_eq!(merged.work_type, WorkType::Remote);
        assert!(store.has_completed_profile());
        assert_eq!(store.get_profile_completeness(), 60);

        // A fresh store over the same storage sees the persisted record
        let reopened = PreferenceStore::for_user(storage, "u1");
        assert_eq!(reopened.get_preferences(), merged);
    }

    #[test]
    fn test_corrupt_record_reads_as_defaults() {
        let storage = Arc::new(MemoryStore::new());
        storage.save("prefs:u1", "{not json").unwrap();

        let store = PreferenceStore::for_user(storage, "u1");
        assert_eq!(store.get_preferences(), UserPreferences::default());
    }

    #[test]
    fn test_failed_write_keeps_in_memory_copy() {
        let storage = Arc::new(ReadOnlyStore { inner: MemoryStore::new() });
        let store = PreferenceStore::for_user(storage.clone(), "u1");

        store.save_preferences(full_update());

        assert_eq!(store.get_preferences().job_title, "Software Engineer");
        assert!(storage.inner.is_empty());
    }

    #[test]
    fn test_clear_resets_to_defaults() {
        let storage = Arc::new(MemoryStore::new());
        let store = PreferenceStore::for_user(storage.clone(), "u1");
        store.save_preferences(full_update());

        assert_eq!(store.clear_preferences(), UserPreferences::default());
        assert_eq!(store.get_preferences(), UserPreferences::default());
        assert!(storage.load("prefs:u1").unwrap().is_none());
    }

    #[test]
    fn test_similar_user_ids_keep_separate_files() {
        let dir = tempfile::tempdir().unwrap();
        let storage: Arc<dyn KeyValueStore> = Arc::new(FileStore::new(dir.path()).unwrap());

        PreferenceStore::for_user(storage.clone(), "a:b").save_preferences(full_update());

        let neighbour = PreferenceStore::for_user(storage.clone(), "a_b");
        assert_eq!(neighbour.get_preferences(), UserPreferences::default());

        let reopened = PreferenceStore::for_user(storage, "a:b");
        assert!(reopened.has_completed_profile());
    }

    #[test]
    fn test_registry_shares_store_per_user() {
        let registry = PreferenceRegistry::new(Arc::new(MemoryStore::new()), 100, 60);

        registry.store_for("u1").save_preferences(full_update());

        assert!(registry.store_for("u1").has_completed_profile());
        assert!(!registry.store_for("u2").has_completed_profile());
        assert!(Arc::ptr_eq(&registry.store_for("u1"), &registry.store_for("u1")));
    }
}
