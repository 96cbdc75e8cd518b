//! In-memory fakes with call counters shared by the unit tests.

use crate::cache::CacheInterface;
use crate::storage::BlobStore;
use async_trait::async_trait;
use behemoth_core::{BehemothError, BehemothResult, Profile, ProfileId};
use behemoth_repository::ProfileRepository;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// Profile as the database would hold it after an update.
pub fn stored_profile(id: &str, username: &str, bio: Option<&str>) -> Profile {
    let mut profile = Profile::empty(ProfileId::parse(id).unwrap());
    profile.apply_details(username.to_string(), bio.map(str::to_string));
    profile
}

/// In-memory profile repository.
#[derive(Default)]
pub struct InMemoryProfileRepository {
    profiles: Mutex<HashMap<ProfileId, Profile>>,
    find_calls: AtomicUsize,
    insert_calls: AtomicUsize,
    update_calls: AtomicUsize,
    hide_next_find: AtomicBool,
    fail: AtomicBool,
}

impl InMemoryProfileRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_profiles(profiles: Vec<Profile>) -> Self {
        let repo = Self::new();
        for profile in profiles {
            repo.profiles.lock().unwrap().insert(profile.id.clone(), profile);
        }
        repo
    }

    /// Makes the next `find_by_id` report a miss, as if another request
    /// inserted the row right after it was read.
    pub fn hide_next_find(&self) {
        self.hide_next_find.store(true, Ordering::SeqCst);
    }

    pub fn fail_with_database_error(&self) {
        self.fail.store(true, Ordering::SeqCst);
    }

    pub fn get(&self, id: &ProfileId) -> Option<Profile> {
        self.profiles.lock().unwrap().get(id).cloned()
    }

    pub fn len(&self) -> usize {
        self.profiles.lock().unwrap().len()
    }

    pub fn find_calls(&self) -> usize {
        self.find_calls.load(Ordering::SeqCst)
    }

    pub fn insert_calls(&self) -> usize {
        self.insert_calls.load(Ordering::SeqCst)
    }

    pub fn update_calls(&self) -> usize {
        self.update_calls.load(Ordering::SeqCst)
    }

    fn check_available(&self) -> BehemothResult<()> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(BehemothError::Database("connection refused".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl ProfileRepository for InMemoryProfileRepository {
    async fn find_by_id(&self, id: &ProfileId) -> BehemothResult<Option<Profile>> {
        self.find_calls.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;
        if self.hide_next_find.swap(false, Ordering::SeqCst) {
            return Ok(None);
        }
        Ok(self.get(id))
    }

    async fn insert(&self, profile: &Profile) -> BehemothResult<()> {
        self.insert_calls.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;
        let mut profiles = self.profiles.lock().unwrap();
        if profiles.contains_key(&profile.id) {
            return Err(BehemothError::conflict(format!("Duplicate entry '{}'", profile.id)));
        }
        profiles.insert(profile.id.clone(), profile.clone());
        Ok(())
    }

    async fn update(&self, profile: &Profile) -> BehemothResult<()> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;
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
        self.check_available()
    }
}

/// In-memory cache recording the TTL of each write.
#[derive(Default)]
pub struct InMemoryCache {
    entries: Mutex<HashMap<String, (String, Option<Duration>)>>,
    set_calls: AtomicUsize,
    delete_calls: AtomicUsize,
}

impl InMemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put(&self, key: &str, value: &str) {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), (value.to_string(), None));
    }

    pub fn value(&self, key: &str) -> Option<String> {
        self.entries.lock().unwrap().get(key).map(|(v, _)| v.clone())
    }

    /// `None` when absent, `Some(ttl)` when present.
    pub fn ttl(&self, key: &str) -> Option<Option<Duration>> {
        self.entries.lock().unwrap().get(key).map(|(_, ttl)| *ttl)
    }

    pub fn clear(&self) {
        self.entries.lock().unwrap().clear();
    }

    pub fn set_calls(&self) -> usize {
        self.set_calls.load(Ordering::SeqCst)
    }

    pub fn delete_calls(&self) -> usize {
        self.delete_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CacheInterface for InMemoryCache {
    async fn get_raw(&self, key: &str) -> BehemothResult<Option<String>> {
        Ok(self.value(key))
    }

    async fn set_raw(&self, key: &str, value: &str, ttl: Option<Duration>) -> BehemothResult<()> {
        self.set_calls.fetch_add(1, Ordering::SeqCst);
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), (value.to_string(), ttl));
        Ok(())
    }

    async fn delete(&self, key: &str) -> BehemothResult<bool> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.entries.lock().unwrap().remove(key).is_some())
    }

    async fn ping(&self) -> BehemothResult<()> {
        Ok(())
    }

    fn is_enabled(&self) -> bool {
        true
    }
}

/// Blob store keeping uploads in memory.
#[derive(Default)]
pub struct InMemoryBlobStore {
    blobs: Mutex<Vec<(String, String, Vec<u8>)>>,
}

impl InMemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// `(name, content_type, bytes)` of every upload, in order.
    pub fn uploads(&self) -> Vec<(String, String, Vec<u8>)> {
        self.blobs.lock().unwrap().clone()
    }
}

#[async_trait]
impl BlobStore for InMemoryBlobStore {
    async fn upload(&self, name: &str, content_type: &str, bytes: &[u8]) -> BehemothResult<String> {
        self.blobs
            .lock()
            .unwrap()
            .push((name.to_string(), content_type.to_string(), bytes.to_vec()));
        Ok(format!("http://blobs.test/avatars/{}", name))
    }

    async fn ensure_container(&self) -> BehemothResult<()> {
        Ok(())
    }
}
