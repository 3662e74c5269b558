use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use crate::assets::frame::FrameHandle;
use crate::foundation::core::FrameId;

/// Shared identifier -> frame map.
///
/// Writes are insert-if-absent: the first successful load of an identifier wins and later puts are
/// no-ops. Entries are never evicted, so the map is bounded by the manifest length. Clones share
/// the same storage.
#[derive(Clone, Debug, Default)]
pub struct FrameCache {
    frames: Arc<RwLock<HashMap<FrameId, FrameHandle>>>,
}

impl FrameCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return `true` when `id` is resident.
    pub fn has(&self, id: &str) -> bool {
        self.frames
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(id)
    }

    /// Resident frame for `id`, if any.
    pub fn get(&self, id: &str) -> Option<FrameHandle> {
        self.frames
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
            .cloned()
    }

    /// Insert `frame` unless `id` is already resident. Returns `true` when inserted.
    pub fn put(&self, id: FrameId, frame: FrameHandle) -> bool {
        let mut frames = self.frames.write().unwrap_or_else(PoisonError::into_inner);
        if frames.contains_key(id.as_str()) {
            return false;
        }
        frames.insert(id, frame);
        true
    }

    /// Number of resident frames.
    pub fn len(&self) -> usize {
        self.frames
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Return `true` when nothing is resident.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/cache.rs"]
mod tests;
