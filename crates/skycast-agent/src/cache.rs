//! In-memory TTL cache with an injectable clock.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

/// Zero-argument time source. Injectable so tests can simulate expiry
/// without real delays.
pub type Clock = Box<dyn Fn() -> Instant + Send + Sync>;

struct Entry<V> {
    value: V,
    inserted_at: Instant,
}

/// Minimal key/value cache with time-based expiry.
///
/// No size bound and no eviction policy beyond TTL; this is an accepted
/// limitation at the per-process scale it serves, not a bug. An entry whose
/// age reaches the TTL behaves as absent; `get` evicts it lazily on access,
/// which does not change observable behavior.
///
/// The map is guarded by a mutex, so concurrent `get`/`set` calls from
/// simultaneous agent invocations are safe.
pub struct TtlCache<V> {
    ttl: Duration,
    now: Clock,
    entries: Mutex<HashMap<String, Entry<V>>>,
}

impl<V: Clone> TtlCache<V> {
    /// Cache backed by the real monotonic clock.
    pub fn new(ttl: Duration) -> Self {
        Self::with_clock(ttl, Box::new(Instant::now))
    }

    /// Cache with an explicit clock, for deterministic tests.
    pub fn with_clock(ttl: Duration, now: Clock) -> Self {
        Self {
            ttl,
            now,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Return the stored value if it is still fresh.
    pub fn get(&self, key: &str) -> Option<V> {
        let now = (self.now)();
        let mut entries = self.entries.lock();
        match entries.get(key) {
            Some(entry) if now.duration_since(entry.inserted_at) < self.ttl => {
                Some(entry.value.clone())
            }
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    /// Insert or replace a value, stamping it with the current time.
    pub fn set(&self, key: &str, value: V) {
        let entry = Entry {
            value,
            inserted_at: (self.now)(),
        };
        self.entries.lock().insert(key.to_string(), entry);
    }
}

impl<V> std::fmt::Debug for TtlCache<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TtlCache")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}
