//! Weak-reference cache of device converters.
//!
//! Pairing two color spaces into a [`DeviceConverter`] is the expensive
//! part of a conversion session, so converters are deduplicated per
//! `(src, dst)` identity pair. The cache holds [`Weak`] references only:
//! once every session that used a converter is gone, the converter drops
//! and its slot is reclaimed on a later lookup.
//!
//! Lookup-and-build happens under one lock, so two threads asking for the
//! same missing pair never build it twice.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock, Weak};

use tracing::trace;

use crate::device::{DeviceConverter, SharedConverter};
use crate::space::{SharedSpace, SpaceId};

/// Cache effectiveness counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Lookups answered by a live cached converter.
    pub hits: u64,
    /// Lookups that found no live converter.
    pub misses: u64,
    /// Converters actually constructed. Equals `misses`; kept separate so
    /// tests can assert on construction count directly.
    pub built: u64,
}

impl CacheStats {
    /// Hit ratio in [0, 1]; zero when nothing was looked up yet.
    pub fn hit_ratio(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// Deduplicating cache of [`DeviceConverter`]s keyed by space identity.
#[derive(Debug, Default)]
pub struct ConverterCache {
    entries: Mutex<HashMap<(SpaceId, SpaceId), Weak<DeviceConverter>>>,
    stats: RwLock<CacheStats>,
}

impl ConverterCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the converter for `(src, dst)`, building it when no live
    /// instance exists.
    ///
    /// The entries lock is held across construction: concurrent callers
    /// asking for the same missing pair serialize and share one instance.
    /// Dead entries for the requested key are replaced in place; a full
    /// sweep of other dead entries happens on every miss.
    pub fn get_or_build(&self, src: &SharedSpace, dst: &SharedSpace) -> SharedConverter {
        let key = (src.id(), dst.id());
        let mut entries = self
            .entries
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);

        if let Some(live) = entries.get(&key).and_then(Weak::upgrade) {
            trace!(src = ?key.0, dst = ?key.1, "converter cache hit");
            self.bump(|s| s.hits += 1);
            return live;
        }

        entries.retain(|_, weak| weak.strong_count() > 0);

        trace!(src = ?key.0, dst = ?key.1, "converter cache miss, building");
        let converter = Arc::new(DeviceConverter::new(src.clone(), dst.clone()));
        entries.insert(key, Arc::downgrade(&converter));
        self.bump(|s| {
            s.misses += 1;
            s.built += 1;
        });
        converter
    }

    /// Number of entries currently held, dead or alive.
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .len()
    }

    /// Whether the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of the effectiveness counters.
    pub fn stats(&self) -> CacheStats {
        *self
            .stats
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn bump(&self, f: impl FnOnce(&mut CacheStats)) {
        let mut stats = self
            .stats
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        f(&mut stats);
    }
}
