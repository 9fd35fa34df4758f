use log::debug;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

type KeyFn = Box<dyn Fn(&str) -> String + Send + Sync>;

struct Entry<V> {
    value: V,
    stored_at: Instant,
}

/// In-memory cache of fetched payloads with a fixed time-to-live.
///
/// Owned by its caller; nothing is shared between instances.
pub struct TtlCache<V> {
    ttl: Duration,
    key_fn: KeyFn,
    entries: Mutex<HashMap<String, Entry<V>>>,
}

impl<V: Clone> TtlCache<V> {
    /// Cache keyed by the lower-cased identity
    pub fn new(ttl: Duration) -> Self {
        Self::with_key_fn(ttl, |identity| identity.to_lowercase())
    }

    pub fn with_key_fn<F>(ttl: Duration, key_fn: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        Self {
            ttl,
            key_fn: Box::new(key_fn),
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn get(&self, identity: &str) -> Option<V> {
        self.get_at(identity, Instant::now())
    }

    pub fn insert(&self, identity: &str, value: V) {
        self.insert_at(identity, value, Instant::now());
    }

    /// Look up as of `now`; a stale entry is evicted and reported as a miss
    pub fn get_at(&self, identity: &str, now: Instant) -> Option<V> {
        let key = (self.key_fn)(identity);
        let mut entries = self.lock();

        let fresh = entries
            .get(&key)
            .map(|entry| self.is_fresh(entry, now))?;
        if !fresh {
            debug!("Cache entry for {} expired", key);
            entries.remove(&key);
            return None;
        }
        entries.get(&key).map(|entry| entry.value.clone())
    }

    /// Store as of `now`, dropping every entry already stale at that point
    pub fn insert_at(&self, identity: &str, value: V, now: Instant) {
        let key = (self.key_fn)(identity);
        let mut entries = self.lock();

        let before = entries.len();
        entries.retain(|_, entry| self.is_fresh(entry, now));
        let purged = before - entries.len();
        if purged > 0 {
            debug!("Purged {} expired cache entries", purged);
        }

        entries.insert(key, Entry { value, stored_at: now });
    }

    /// Drop every stale entry, returning how many were removed
    pub fn purge_expired(&self) -> usize {
        self.purge_expired_at(Instant::now())
    }

    pub fn purge_expired_at(&self, now: Instant) -> usize {
        let mut entries = self.lock();
        let before = entries.len();
        entries.retain(|_, entry| self.is_fresh(entry, now));
        before - entries.len()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn is_fresh(&self, entry: &Entry<V>, now: Instant) -> bool {
        now.saturating_duration_since(entry.stored_at) < self.ttl
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, Entry<V>>> {
        // A poisoned map still holds consistent entries
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
