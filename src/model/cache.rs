//! Bounded in-memory cache of fetched tracks, keyed by track id

use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use lru::LruCache;

use super::types::Track;

/// LRU cache of tracks. Inserting an id that is already present overwrites it.
#[derive(Clone)]
pub struct TrackCache {
    tracks: Arc<Mutex<LruCache<String, Track>>>,
}

impl TrackCache {
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            tracks: Arc::new(Mutex::new(LruCache::new(capacity))),
        }
    }

    fn lock(&self) -> MutexGuard<'_, LruCache<String, Track>> {
        // A panic mid-insert cannot leave a half-written entry behind
        self.tracks.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn insert(&self, track: Track) {
        self.lock().put(track.id.clone(), track);
    }

    pub fn insert_all<'a>(&self, tracks: impl IntoIterator<Item = &'a Track>) {
        let mut cache = self.lock();
        for track in tracks {
            cache.put(track.id.clone(), track.clone());
        }
    }

    pub fn get(&self, track_id: &str) -> Option<Track> {
        self.lock().get(track_id).cloned()
    }

    pub fn contains(&self, track_id: &str) -> bool {
        self.lock().contains(track_id)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.lock().cap().get()
    }
}

impl Default for TrackCache {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_CACHE_CAPACITY)
    }
}
