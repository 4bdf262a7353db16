//! Memoized digests shared across callers.
//!
//! The cache maps `"<name>.<format>"` to a digest, separately for each lookup mode:
//! `users/show` and the `users/_show` partial it renders are different templates
//! with one cache key. A whole top-level digest request,
//! including every recursive sub-digest it triggers, runs while holding the single
//! cache lock. Recursion receives the already-locked map and never locks again, so
//! the lock does not need to be reentrant.
//!
//! # Lifetime
//!
//! [`DigestCache::global`] lives for the process. Nothing in this crate clears it;
//! hosts that reload templates call [`DigestCache::clear`].
//!
//! # Contention
//!
//! A miss on one key blocks every other caller, reads included, until the whole
//! recursive computation finishes. Digesting is expected to be rare compared with
//! rendering, so a single lock is used instead of per-key tracking.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, OnceLock};

use crate::core::LookupMode;

/// Memoized digests keyed by cache key and lookup mode.
pub(crate) type Entries = HashMap<(String, LookupMode), String>;

static GLOBAL: OnceLock<Arc<DigestCache>> = OnceLock::new();

/// Process-lifetime memo of template digests.
#[derive(Debug, Default)]
pub struct DigestCache {
    entries: Mutex<Entries>,
}

impl DigestCache {
    /// Create an empty, independent cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide cache.
    pub fn global() -> Arc<Self> {
        Arc::clone(GLOBAL.get_or_init(|| Arc::new(Self::new())))
    }

    /// Acquire the cache for a whole check-compute-store sequence.
    ///
    /// Entries are only ever inserted whole, so a lock poisoned by a panicking
    /// caller still guards a consistent map and is recovered.
    pub(crate) fn lock(&self) -> MutexGuard<'_, Entries> {
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// The memoized digest for a cache key, if any.
    ///
    /// A full-lookup digest is preferred over a partial one stored under the same key.
    pub fn get(&self, key: &str) -> Option<String> {
        let entries = self.lock();
        [LookupMode::Full, LookupMode::Partial]
            .into_iter()
            .find_map(|mode| entries.get(&(key.to_string(), mode)).cloned())
    }

    /// The memoized digest for a cache key in one lookup mode.
    pub fn get_with_mode(&self, key: &str, mode: LookupMode) -> Option<String> {
        self.lock().get(&(key.to_string(), mode)).cloned()
    }

    /// Number of memoized digests.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether nothing has been memoized yet.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Forget every memoized digest.
    pub fn clear(&self) {
        let mut entries = self.lock();
        tracing::debug!("Clearing {} memoized template digests", entries.len());
        entries.clear();
    }
}

/// Store `digest` under `(key, mode)` unless a value is already present.
///
/// Returns the value that ends up in the map.
pub(crate) fn insert_if_absent(
    entries: &mut Entries,
    key: String,
    mode: LookupMode,
    digest: String,
) -> String {
    entries.entry((key, mode)).or_insert(digest).clone()
}
