//! Process-wide store of live analysis builders.
//!
//! Builders are created on first reference to an (analysis, account) pair and
//! live until they are removed explicitly or evicted after sitting idle longer
//! than the configured TTL. Each builder sits behind its own async mutex:
//! operations on one key are serialized while different keys proceed in
//! parallel. The map lock is only held for lookups and inserts, never across
//! a builder operation.

use crate::builder::{AnalysisBuilder, BuilderOptions};
use crate::ids::{AccountId, AnalysisId, BuilderKey};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{Mutex, RwLock};

/// Shared handle to one builder
pub type BuilderHandle = Arc<Mutex<AnalysisBuilder>>;

struct Entry {
    builder: BuilderHandle,
    last_access: Instant,
}

/// Keyed store of [`AnalysisBuilder`]s
pub struct BuilderRegistry {
    entries: RwLock<HashMap<BuilderKey, Entry>>,
    idle_ttl: Option<Duration>,
}

impl BuilderRegistry {
    /// Registry without idle eviction
    pub fn new() -> Self {
        Self::with_idle_ttl(None)
    }

    /// Registry that evicts builders idle for at least `idle_ttl`
    pub fn with_idle_ttl(idle_ttl: Option<Duration>) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            idle_ttl,
        }
    }

    pub fn idle_ttl(&self) -> Option<Duration> {
        self.idle_ttl
    }

    /// Return the builder for this pair, creating an empty one if needed.
    ///
    /// Idle builders for other keys are evicted first when a TTL is set.
    pub async fn get_or_create(
        &self,
        analysis_id: &AnalysisId,
        account_id: &AccountId,
        options: &BuilderOptions,
    ) -> BuilderHandle {
        let key = BuilderKey::derive(analysis_id, account_id);
        let mut entries = self.entries.write().await;
        if let Some(ttl) = self.idle_ttl {
            evict_from(&mut entries, ttl, Some(&key));
        }

        let entry = entries.entry(key.clone()).or_insert_with(|| {
            log::debug!("Created builder '{}'", key);
            Entry {
                builder: Arc::new(Mutex::new(AnalysisBuilder::new(
                    analysis_id.clone(),
                    account_id.clone(),
                    options.clone(),
                ))),
                last_access: Instant::now(),
            }
        });
        entry.last_access = Instant::now();
        Arc::clone(&entry.builder)
    }

    /// Return an existing builder without creating one
    pub async fn get(&self, key: &BuilderKey) -> Option<BuilderHandle> {
        let mut entries = self.entries.write().await;
        let entry = entries.get_mut(key)?;
        entry.last_access = Instant::now();
        Some(Arc::clone(&entry.builder))
    }

    /// Drop a builder. Handles already given out stay usable.
    pub async fn remove(&self, key: &BuilderKey) -> bool {
        let removed = self.entries.write().await.remove(key).is_some();
        if removed {
            log::debug!("Removed builder '{}'", key);
        }
        removed
    }

    /// Evict every builder idle for at least the TTL and not currently locked.
    ///
    /// Returns the evicted keys. Without a TTL nothing is evicted.
    pub async fn evict_idle(&self) -> Vec<BuilderKey> {
        let Some(ttl) = self.idle_ttl else {
            return Vec::new();
        };
        let mut entries = self.entries.write().await;
        evict_from(&mut entries, ttl, None)
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// Keys of all live builders, sorted
    pub async fn keys(&self) -> Vec<BuilderKey> {
        let mut keys: Vec<BuilderKey> = self.entries.read().await.keys().cloned().collect();
        keys.sort();
        keys
    }
}

impl Default for BuilderRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn evict_from(
    entries: &mut HashMap<BuilderKey, Entry>,
    ttl: Duration,
    keep: Option<&BuilderKey>,
) -> Vec<BuilderKey> {
    let now = Instant::now();
    let expired: Vec<BuilderKey> = entries
        .iter()
        .filter(|(key, entry)| {
            Some(*key) != keep
                && now.duration_since(entry.last_access) >= ttl
                // a locked builder is mid-operation
                && entry.builder.try_lock().is_ok()
        })
        .map(|(key, _)| key.clone())
        .collect();

    for key in &expired {
        entries.remove(key);
        log::warn!("Evicted builder '{}' after {:?} idle", key, ttl);
    }
    expired
}

#[cfg(test)]
#[path = "registry_test.rs"]
mod tests;
