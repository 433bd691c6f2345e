//! Document cache: persisted dataset blobs plus one shared refresh stamp.
//!
//! Storage sits behind [DocumentStore]; [DocumentCache] layers the freshness policy on top.
//! The stamp is global, not per key: all datasets expire together or not at all.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Duration, SubsecRound, TimeZone, Utc};
use thiserror::Error;

use crate::data::dataset::DatasetKey;

/// Reserved key holding the last refresh instant (Unix milliseconds).
pub const REFRESH_INSTANT_KEY: &str = "instant";
pub const FRESHNESS_WINDOW_HOURS: i64 = 24;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("cache I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid cache key '{0}'")]
    InvalidKey(String),
}

/// Key-value storage medium for cache records.
pub trait DocumentStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn put(&self, key: &str, value: &str) -> Result<(), StoreError>;
    /// Remove every record, including the refresh stamp.
    fn clear(&self) -> Result<(), StoreError>;
}

/// Snapshot taken once at the start of a refresh pass. Every dataset fetched during the pass
/// is stamped with `instant`; commits are refused once `generation` is stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshPass {
    pub instant: DateTime<Utc>,
    pub generation: u64,
}

/// Freshness policy over a [DocumentStore].
pub struct DocumentCache {
    store: Box<dyn DocumentStore>,
    window: Duration,
    /// Bumped by every clear; guards put + stamp against a concurrent purge.
    generation: Mutex<u64>,
}

impl DocumentCache {
    pub fn new(store: Box<dyn DocumentStore>) -> Self {
        Self::with_window(store, Duration::hours(FRESHNESS_WINDOW_HOURS))
    }

    pub fn with_window(store: Box<dyn DocumentStore>, window: Duration) -> Self {
        DocumentCache {
            store,
            window,
            generation: Mutex::new(0),
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    fn lock_generation(&self) -> MutexGuard<'_, u64> {
        self.generation
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Cached blob for `key`. Store failures are logged and read as absent.
    pub fn get(&self, key: DatasetKey) -> Option<String> {
        match self.store.get(key.as_str()) {
            Ok(blob) => blob,
            Err(err) => {
                tracing::warn!(dataset = %key, error = %err, "cache read failed; treating as absent");
                None
            }
        }
    }

    pub fn put(&self, key: DatasetKey, blob: &str) -> Result<(), StoreError> {
        let _guard = self.lock_generation();
        self.store.put(key.as_str(), blob)
    }

    pub fn stamp_refresh(&self, instant: DateTime<Utc>) -> Result<(), StoreError> {
        let _guard = self.lock_generation();
        self.write_stamp(instant)
    }

    fn write_stamp(&self, instant: DateTime<Utc>) -> Result<(), StoreError> {
        self.store
            .put(REFRESH_INSTANT_KEY, &instant.timestamp_millis().to_string())
    }

    /// Last refresh instant. A missing or unparsable stamp reads as `None`.
    pub fn last_refresh(&self) -> Option<DateTime<Utc>> {
        let raw = match self.store.get(REFRESH_INSTANT_KEY) {
            Ok(raw) => raw?,
            Err(err) => {
                tracing::warn!(error = %err, "could not read refresh stamp");
                return None;
            }
        };
        let millis = raw.trim().parse::<i64>().ok()?;
        Utc.timestamp_millis_opt(millis).single()
    }

    /// True iff a stamp exists and `now - stamp` exceeds the freshness window.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.last_refresh()
            .map_or(false, |stamp| now.signed_duration_since(stamp) > self.window)
    }

    /// Purge every record and the stamp. The next load of every dataset goes to the source.
    pub fn clear_all(&self) -> Result<(), StoreError> {
        let mut generation = self.lock_generation();
        *generation += 1;
        self.store.clear()
    }

    /// Startup check: clear everything when the stamp is past the window. Returns true if cleared.
    pub fn expire_if_stale(&self, now: DateTime<Utc>) -> bool {
        if !self.is_expired(now) {
            return false;
        }
        tracing::info!("document cache expired; clearing all datasets");
        if let Err(err) = self.clear_all() {
            tracing::warn!(error = %err, "failed to clear expired cache");
        }
        true
    }

    /// The pass instant is truncated to milliseconds, the resolution the stamp is stored at.
    pub fn begin_refresh(&self, now: DateTime<Utc>) -> RefreshPass {
        RefreshPass {
            instant: now.trunc_subsecs(3),
            generation: *self.lock_generation(),
        }
    }

    /// Store `blob` and stamp the pass instant as one step. Returns `Ok(false)` without writing
    /// when the cache was cleared after `pass` began.
    pub fn commit(&self, pass: &RefreshPass, key: DatasetKey, blob: &str) -> Result<bool, StoreError> {
        let generation = self.lock_generation();
        if *generation != pass.generation {
            tracing::debug!(dataset = %key, "cache cleared during refresh; dropping stale write");
            return Ok(false);
        }
        self.store.put(key.as_str(), blob)?;
        self.write_stamp(pass.instant)?;
        Ok(true)
    }
}

impl std::fmt::Debug for DocumentCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentCache")
            .field("window", &self.window)
            .field("generation", &*self.lock_generation())
            .finish()
    }
}
