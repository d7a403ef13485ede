//! Registry of what this manager has attached to the engine.

use std::collections::{BTreeMap, BTreeSet};

/// Attached toggle keys and per-source reference counts.
///
/// Owned by exactly one [`LayerManager`](super::LayerManager); the engine is
/// never re-queried to rebuild it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisteredLayerState {
    attached: BTreeSet<String>,
    source_refs: BTreeMap<String, usize>,
    /// Sources left on the engine after a failed removal or rollback.
    stray_sources: BTreeSet<String>,
}

impl RegisteredLayerState {
    pub fn is_attached(&self, key: &str) -> bool {
        self.attached.contains(key)
    }

    /// Attached toggle keys, sorted.
    pub fn attached_keys(&self) -> impl Iterator<Item = &str> {
        self.attached.iter().map(String::as_str)
    }

    /// Number of attached toggles drawing from `source_id`.
    pub fn source_refs(&self, source_id: &str) -> usize {
        self.source_refs.get(source_id).copied().unwrap_or(0)
    }

    /// True when the source is on the engine, referenced or not.
    pub fn is_source_present(&self, source_id: &str) -> bool {
        self.source_refs(source_id) > 0 || self.stray_sources.contains(source_id)
    }

    pub fn stray_sources(&self) -> impl Iterator<Item = &str> {
        self.stray_sources.iter().map(String::as_str)
    }

    pub(super) fn register(&mut self, key: &str, source_id: &str) {
        self.attached.insert(key.to_string());
        *self.source_refs.entry(source_id.to_string()).or_insert(0) += 1;
        self.stray_sources.remove(source_id);
    }

    /// Drop `key` and return the remaining reference count of its source.
    pub(super) fn unregister(&mut self, key: &str, source_id: &str) -> usize {
        self.attached.remove(key);
        match self.source_refs.get_mut(source_id) {
            Some(refs) if *refs > 1 => {
                *refs -= 1;
                *refs
            }
            Some(_) => {
                self.source_refs.remove(source_id);
                0
            }
            None => 0,
        }
    }

    pub(super) fn mark_stray(&mut self, source_id: &str) {
        self.stray_sources.insert(source_id.to_string());
    }

    pub(super) fn clear_stray(&mut self, source_id: &str) {
        self.stray_sources.remove(source_id);
    }
}
