//! In-memory stand-ins for the database, cache and blob store.

use async_trait::async_trait;
use behemoth_core::{BehemothError, BehemothResult, HealthCheck, HealthStatus, Profile, ProfileId};
use behemoth_repository::ProfileRepository;
use behemoth_service::{BlobStore, CacheInterface};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::time::Duration;

#[derive(Default)]
pub struct MemoryRepository {
    profiles: Mutex<HashMap<ProfileId, Profile>>,
    down: AtomicBool,
}

impl MemoryRepository {
    pub fn get(&self, id: &str) -> Option<Profile> {
        let id = ProfileId::parse(id).unwrap();
        self.profiles.lock().unwrap().get(&id).cloned()
    }

    pub fn count(&self) -> usize {
        self.profiles.lock().unwrap().len()
    }

    pub fn set_down(&self, down: bool) {
        self.down.store(down, Ordering::SeqCst);
    }

    fn ensure_up(&self) -> BehemothResult<()> {
        if self.down.load(Ordering::SeqCst) {
            return Err(BehemothError::Database(
                "mysql://behemoth:secret@db:3306 refused connection".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl ProfileRepository for MemoryRepository {
    async fn find_by_id(&self, id: &ProfileId) -> BehemothResult<Option<Profile>> {
        self.ensure_up()?;
        Ok(self.profiles.lock().unwrap().get(id).cloned())
    }

    async fn insert(&self, profile: &Profile) -> BehemothResult<()> {
        self.ensure_up()?;
        let mut profiles = self.profiles.lock().unwrap();
        if profiles.contains_key(&profile.id) {
            return Err(BehemothError::conflict(format!("Profile {} exists", profile.id)));
        }
        profiles.insert(profile.id.clone(), profile.clone());
        Ok(())
    }

    async fn update(&self, profile: &Profile) -> BehemothResult<()> {
        self.ensure_up()?;
        let mut profiles = self.profiles.lock().unwrap();
        match profiles.get_mut(&profile.id) {
            Some(stored) => {
                *stored = profile.clone();
                Ok(())
            }
            None => Err(BehemothError::not_found("Profile", &profile.id)),
        }
    }

    async fn health_check(&self) -> BehemothResult<()> {
        self.ensure_up()
    }
}

#[async_trait]
impl HealthCheck for MemoryRepository {
    fn name(&self) -> &str {
        "database"
    }

    async fn check(&self) -> HealthStatus {
        match ProfileRepository::health_check(self).await {
            Ok(()) => HealthStatus::Healthy,
            Err(e) => HealthStatus::Unhealthy(e.to_string()),
        }
    }
}

#[derive(Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, String>>,
    down: AtomicBool,
}

impl MemoryCache {
    pub fn value(&self, key: &str) -> Option<String> {
        self.entries.lock().unwrap().get(key).cloned()
    }

    pub fn set_down(&self, down: bool) {
        self.down.store(down, Ordering::SeqCst);
    }

    fn ensure_up(&self) -> BehemothResult<()> {
        if self.down.load(Ordering::SeqCst) {
            return Err(BehemothError::Cache("connection reset".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl CacheInterface for MemoryCache {
    async fn get_raw(&self, key: &str) -> BehemothResult<Option<String>> {
        self.ensure_up()?;
        Ok(self.value(key))
    }

    async fn set_raw(&self, key: &str, value: &str, _ttl: Option<Duration>) -> BehemothResult<()> {
        self.ensure_up()?;
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn delete(&self, key: &str) -> BehemothResult<bool> {
        self.ensure_up()?;
        Ok(self.entries.lock().unwrap().remove(key).is_some())
    }

    async fn ping(&self) -> BehemothResult<()> {
        self.ensure_up()
    }

    fn is_enabled(&self) -> bool {
        true
    }
}

#[async_trait]
impl HealthCheck for MemoryCache {
    fn name(&self) -> &str {
        "cache"
    }

    async fn check(&self) -> HealthStatus {
        match self.ping().await {
            Ok(()) => HealthStatus::Healthy,
            Err(e) => HealthStatus::Degraded(e.to_string()),
        }
    }
}

#[derive(Default)]
pub struct MemoryBlobStore {
    uploads: Mutex<Vec<(String, String, Vec<u8>)>>,
}

impl MemoryBlobStore {
    pub fn uploads(&self) -> Vec<(String, String, Vec<u8>)> {
        self.uploads.lock().unwrap().clone()
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn upload(&self, name: &str, content_type: &str, bytes: &[u8]) -> BehemothResult<String> {
        self.uploads
            .lock()
            .unwrap()
            .push((name.to_string(), content_type.to_string(), bytes.to_vec()));
        Ok(format!("http://blobs.test/avatars/{}", name))
    }

    async fn ensure_container(&self) -> BehemothResult<()> {
        Ok(())
    }
}
