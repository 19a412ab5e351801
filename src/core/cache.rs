//! Rendered-view cache and path revalidation
//!
//! Views are cached per logical path (e.g. `/dashboard/invoices`). A
//! mutation marks the path stale through [`CacheInvalidator`]; the next read
//! through [`ViewCache::get_or_render`] regenerates it.

use anyhow::Result;
use serde_json::Value;
use std::collections::HashMap;
use std::future::Future;
use std::sync::{PoisonError, RwLock};

/// Marks cached renderings of a path stale
///
/// Fire-and-forget: revalidation cannot fail from the caller's point of view.
pub trait CacheInvalidator: Send + Sync {
    fn revalidate_path(&self, path: &str);
}

#[derive(Debug, Clone, Default)]
struct CacheEntry {
    view: Option<Value>,
    stale: bool,
    revalidations: u64,
}

/// In-process cache of rendered views keyed by path
#[derive(Debug, Default)]
pub struct ViewCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
}

impl ViewCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fresh cached view for `path`, if any
    pub fn get(&self, path: &str) -> Option<Value> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries
            .get(path)
            .filter(|entry| !entry.stale)
            .and_then(|entry| entry.view.clone())
    }

    /// Store a freshly rendered view
    pub fn put(&self, path: &str, view: Value) {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        let entry = entries.entry(path.to_string()).or_default();
        entry.view = Some(view);
        entry.stale = false;
    }

    /// Store a view rendered after `generation` revalidations
    ///
    /// A revalidation that landed while rendering makes the view outdated:
    /// it is dropped and the entry stays stale.
    fn put_rendered(&self, path: &str, view: Value, generation: u64) -> bool {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        let entry = entries.entry(path.to_string()).or_default();
        if entry.revalidations != generation {
            return false;
        }
        entry.view = Some(view);
        entry.stale = false;
        true
    }

    /// Whether the next read of `path` must re-render (missing counts as stale)
    pub fn is_stale(&self, path: &str) -> bool {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries
            .get(path)
            .is_none_or(|entry| entry.stale || entry.view.is_none())
    }

    /// How many times `path` has been revalidated
    pub fn revalidation_count(&self, path: &str) -> u64 {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries.get(path).map_or(0, |entry| entry.revalidations)
    }

    /// Return the cached view, rendering it first when missing or stale
    ///
    /// A failed render leaves the entry untouched so the next read retries.
    /// A render overtaken by a revalidation is returned to this caller but
    /// not cached.
    pub async fn get_or_render<F, Fut>(&self, path: &str, render: F) -> Result<Value>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Value>>,
    {
        if let Some(view) = self.get(path) {
            return Ok(view);
        }

        let generation = self.revalidation_count(path);
        tracing::debug!(path, generation, "rendering view");
        let view = render().await?;
        if !self.put_rendered(path, view.clone(), generation) {
            tracing::debug!(path, "view revalidated while rendering, not cached");
        }
        Ok(view)
    }
}

impl CacheInvalidator for ViewCache {
    fn revalidate_path(&self, path: &str) {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        let entry = entries.entry(path.to_string()).or_default();
        entry.stale = true;
        entry.revalidations += 1;
        tracing::debug!(path, revalidations = entry.revalidations, "path revalidated");
    }
}
