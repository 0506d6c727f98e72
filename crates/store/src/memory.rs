//! Bounded in-process cache backend.
//!
//! [`MemoryTicketStore`] keeps entries in a [`moka::sync::Cache`] with
//! sliding expire-after-access semantics: every successful
//! [`retrieve`](crate::TicketStore::retrieve) resets the entry's idle
//! clock. Capacity is bounded; eviction beyond the maximum follows the
//! cache's recency policy (approximate LRU).

use std::time::Duration;

use moka::sync::Cache;
use serde::Deserialize;

use crate::{
    error::StoreResult,
    identity::AuthorizationIdentity,
    store::{DEFAULT_EXPIRE_SECS, TicketStore},
};

/// Default initial capacity of the cache.
pub const DEFAULT_INITIAL_CAPACITY: usize = 100;

/// Default maximum number of entries.
pub const DEFAULT_MAXIMUM_SIZE: u64 = 2_000;

/// Tuning knobs for [`MemoryTicketStore`].
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct MemoryStoreOptions {
    /// Initial capacity hint for the cache.
    pub initial_capacity: usize,
    /// Maximum number of live entries before eviction kicks in.
    pub maximum_size: u64,
    /// Idle lifetime, in seconds. An entry untouched for this long expires.
    pub expire_secs: u64,
}

impl Default for MemoryStoreOptions {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
            maximum_size: DEFAULT_MAXIMUM_SIZE,
            expire_secs: DEFAULT_EXPIRE_SECS,
        }
    }
}

/// In-process ticket store backed by a bounded sliding-expiry cache.
///
/// # Concurrency
///
/// The underlying cache is lock-free on reads and safe for concurrent use
/// from many threads; a `store` racing a `retrieve` for the same key
/// yields either the old or the new entry, never a torn one.
///
/// # Cloning
///
/// `MemoryTicketStore` is cheaply cloneable; all clones share the same
/// underlying cache.
#[derive(Clone)]
pub struct MemoryTicketStore {
    cache: Cache<String, AuthorizationIdentity>,
}

impl MemoryTicketStore {
    /// Creates a store from the given options.
    #[must_use]
    pub fn new(options: MemoryStoreOptions) -> Self {
        let cache = Cache::builder()
            .initial_capacity(options.initial_capacity)
            .max_capacity(options.maximum_size)
            .time_to_idle(Duration::from_secs(options.expire_secs))
            .build();
        Self { cache }
    }

    /// Number of live entries, after flushing pending cache maintenance.
    ///
    /// Intended for tests and diagnostics; the count is approximate under
    /// concurrent mutation.
    #[must_use]
    pub fn entry_count(&self) -> u64 {
        self.cache.run_pending_tasks();
        self.cache.entry_count()
    }
}

impl Default for MemoryTicketStore {
    fn default() -> Self {
        Self::new(MemoryStoreOptions::default())
    }
}

impl TicketStore for MemoryTicketStore {
    fn store(&self, identity: &AuthorizationIdentity) -> StoreResult<()> {
        let key = identity.identity.clone();
        // Replace, not merge: drop any live entry first so the expiry
        // clock restarts and at most one entry exists per key.
        self.cache.invalidate(&key);
        self.cache.insert(key, identity.clone());
        Ok(())
    }

    fn retrieve(&self, key: &str) -> StoreResult<Option<AuthorizationIdentity>> {
        // Reading through the cache resets the idle clock.
        Ok(self.cache.get(key))
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        self.cache.invalidate(key);
        Ok(())
    }
}
