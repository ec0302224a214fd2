//! Locator cache
//!
//! Remembers what the remote directories answered for each slug so that
//! repeated exports do not query wordpress.org again. Entries are grouped
//! into namespaces; a namespace is written as a whole and shares one
//! timestamp, so any write extends the freshness of every slug in it.

use crate::core::path::ensure_dir;
use crate::core::{BlueprintError, BlueprintResult};
use crate::di::Clock;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// File name of the persisted cache inside the cache directory
pub const CACHE_FILE: &str = "transients.json";

/// A cached value and the time it was written
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry<T> {
    pub value: T,
    pub fetched_at: DateTime<Utc>,
}

impl<T> CacheEntry<T> {
    pub fn is_fresh(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        now.signed_duration_since(self.fetched_at) < ttl
    }
}

type Namespace = BTreeMap<String, Value>;

/// Namespaced slug -> value cache with a freshness window
pub struct LocatorCache {
    path: Option<PathBuf>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
    transients: BTreeMap<String, CacheEntry<Namespace>>,
}

impl LocatorCache {
    /// Open the cache persisted in `dir`
    ///
    /// A missing or unreadable cache file starts an empty cache.
    pub fn open(dir: &Path, ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        let path = dir.join(CACHE_FILE);
        let transients = match fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(transients) => transients,
                Err(e) => {
                    tracing::warn!("Ignoring corrupt cache file {}: {}", path.display(), e);
                    BTreeMap::new()
                }
            },
            Err(_) => BTreeMap::new(),
        };

        Self {
            path: Some(path),
            ttl,
            clock,
            transients,
        }
    }

    /// A cache that is never written to disk
    pub fn in_memory(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            path: None,
            ttl,
            clock,
            transients: BTreeMap::new(),
        }
    }

    /// Fresh value for `key` in `namespace`
    pub fn get(&self, namespace: &str, key: &str) -> Option<&Value> {
        let entry = self.transients.get(namespace)?;
        if !entry.is_fresh(self.clock.now(), self.ttl) {
            return None;
        }
        entry.value.get(key)
    }

    /// Record a value and refresh the namespace
    ///
    /// An expired namespace is discarded before the write. Persistence
    /// failures are logged; the in-memory value is kept either way.
    pub fn set(&mut self, namespace: &str, key: &str, value: Value) {
        let now = self.clock.now();
        let ttl = self.ttl;
        let entry = self
            .transients
            .entry(namespace.to_string())
            .or_insert_with(|| CacheEntry {
                value: Namespace::new(),
                fetched_at: now,
            });
        if !entry.is_fresh(now, ttl) {
            entry.value.clear();
        }
        entry.value.insert(key.to_string(), value);
        entry.fetched_at = now;

        if let Err(e) = self.persist() {
            tracing::warn!("Failed to persist locator cache: {}", e);
        }
    }

    /// Drop every entry, on disk included
    pub fn clear(&mut self) -> BlueprintResult<()> {
        self.transients.clear();
        if let Some(ref path) = self.path {
            if path.exists() {
                fs::remove_file(path).map_err(|e| {
                    BlueprintError::Cache(format!(
                        "Failed to remove cache file {}: {}",
                        path.display(),
                        e
                    ))
                })?;
            }
        }
        Ok(())
    }

    /// Number of cached slugs across namespaces, fresh or not
    pub fn len(&self) -> usize {
        self.transients.values().map(|e| e.value.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn persist(&self) -> BlueprintResult<()> {
        let Some(ref path) = self.path else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            ensure_dir(parent)?;
        }
        let content = serde_json::to_string_pretty(&self.transients)?;
        fs::write(path, content).map_err(|e| {
            BlueprintError::Cache(format!(
                "Failed to write cache file {}: {}",
                path.display(),
                e
            ))
        })
    }
}
