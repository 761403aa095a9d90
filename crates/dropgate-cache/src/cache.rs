//! TTL cache with lazy expiry and a single background sweep

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};
use std::time::Duration;

use parking_lot::RwLock;
use tokio::time::{self, Instant};

use crate::entry::CacheEntry;
use crate::metrics::{CacheMetrics, CacheStats};

/// Lifetime given to entries when no TTL is configured
pub const DEFAULT_TTL: Duration = Duration::from_secs(60 * 60);

/// Period of the background sweep
pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(30 * 60);

/// Concurrent key/value store whose entries expire after a TTL.
///
/// The whole table sits behind one reader/writer lock: lookups share it, while
/// stores, clears and removals take it exclusively. Clones share the same table.
pub struct ResponseCache<K, V> {
    inner: Arc<Inner<K, V>>,
}

struct Inner<K, V> {
    entries: RwLock<HashMap<K, CacheEntry<V>>>,
    ttl: RwLock<Duration>,
    sweep_interval: Duration,
    sweeper_started: AtomicBool,
    metrics: CacheMetrics,
}

impl<K, V> Clone for ResponseCache<K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K, V> ResponseCache<K, V>
where
    K: Eq + Hash + Clone + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self::with_settings(DEFAULT_TTL, DEFAULT_SWEEP_INTERVAL)
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self::with_settings(ttl, DEFAULT_SWEEP_INTERVAL)
    }

    pub fn with_settings(ttl: Duration, sweep_interval: Duration) -> Self {
        Self {
            inner: Arc::new(Inner {
                entries: RwLock::new(HashMap::new()),
                ttl: RwLock::new(ttl),
                sweep_interval,
                sweeper_started: AtomicBool::new(false),
                metrics: CacheMetrics::new(),
            }),
        }
    }

    /// Look up a live entry. An expired entry counts as a miss and is removed.
    pub fn get(&self, key: &K) -> Option<V> {
        let now = Instant::now();
        {
            let entries = self.inner.entries.read();
            match entries.get(key) {
                None => {
                    self.inner.metrics.record_miss();
                    return None;
                }
                Some(entry) if !entry.is_expired_at(now) => {
                    self.inner.metrics.record_hit();
                    return Some(entry.value.clone());
                }
                Some(_) => {}
            }
        }

        // The entry may have been replaced between the two locks.
        let mut entries = self.inner.entries.write();
        if entries
            .get(key)
            .is_some_and(|entry| entry.is_expired_at(now))
        {
            entries.remove(key);
            self.inner.metrics.record_expired();
        }
        self.inner.metrics.record_miss();
        None
    }

    /// Store a value expiring one TTL from now
    pub fn set(&self, key: K, value: V) {
        let ttl = *self.inner.ttl.read();
        self.inner
            .entries
            .write()
            .insert(key, CacheEntry::new(value, ttl));
        self.start_sweeper();
    }

    /// Drop every entry
    pub fn clear(&self) {
        self.inner.entries.write().clear();
    }

    /// Change the TTL used by later `set` calls. Existing entries keep their expiry.
    pub fn set_ttl(&self, ttl: Duration) {
        *self.inner.ttl.write() = ttl;
    }

    pub fn ttl(&self) -> Duration {
        *self.inner.ttl.read()
    }

    /// Number of stored entries, including expired ones not yet removed
    pub fn len(&self) -> usize {
        self.inner.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn stats(&self) -> CacheStats {
        self.inner.metrics.snapshot(self.len())
    }

    /// Remove every expired entry, returning how many were dropped
    pub fn sweep_expired(&self) -> usize {
        self.inner.sweep()
    }

    /// Start the background sweep task.
    ///
    /// Only the first successful call per cache spawns a task; it returns `true`.
    /// Without a running Tokio runtime nothing is spawned and a later call may retry.
    pub fn start_sweeper(&self) -> bool {
        if self
            .inner
            .sweeper_started
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return false;
        }

        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            self.inner.sweeper_started.store(false, Ordering::Release);
            return false;
        };

        let weak = Arc::downgrade(&self.inner);
        let period = self.inner.sweep_interval;
        handle.spawn(sweep_loop(weak, period));
        tracing::debug!(interval_secs = period.as_secs(), "Cache sweep task started");
        true
    }

    pub fn sweeper_running(&self) -> bool {
        self.inner.sweeper_started.load(Ordering::Acquire)
    }
}

impl<K, V> Default for ResponseCache<K, V>
where
    K: Eq + Hash + Clone + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Eq + Hash, V> Inner<K, V> {
    fn sweep(&self) -> usize {
        let now = Instant::now();
        let mut entries = self.entries.write();
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired_at(now));
        let removed = before - entries.len();
        drop(entries);
        self.metrics.record_swept(removed);
        removed
    }
}

/// Runs until the cache it sweeps is dropped
async fn sweep_loop<K: Eq + Hash, V>(cache: Weak<Inner<K, V>>, period: Duration) {
    let mut ticker = time::interval_at(Instant::now() + period, period);
    loop {
        ticker.tick().await;
        let Some(inner) = cache.upgrade() else {
            break;
        };
        let removed = inner.sweep();
        if removed > 0 {
            tracing::debug!(removed, "Swept expired cache entries");
        }
    }
}
