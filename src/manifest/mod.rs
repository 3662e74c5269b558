//! Frame manifests: the ordered list of frame identifiers that defines a timeline.
//!
//! The wire form is a bare JSON array of file names. Array order is timeline order.

/// Build manifests from a directory of frame images.
pub mod generate;

use std::fs::File;
use std::io::BufReader;
use std::ops::RangeInclusive;
use std::path::Path;

use crate::assets::source::FrameSource;
use crate::foundation::core::FrameId;
use crate::foundation::error::{FilmError, FilmResult};

/// Ordered, immutable frame timeline.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Manifest {
    frames: Vec<FrameId>,
}

impl Manifest {
    /// Build a manifest from identifiers already in timeline order.
    pub fn new<I, S>(frames: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<FrameId>,
    {
        Self {
            frames: frames.into_iter().map(Into::into).collect(),
        }
    }

    /// Parse a manifest from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> FilmResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| FilmError::manifest(format!("parse manifest JSON: {e}")))
    }

    /// Parse a manifest from JSON bytes.
    pub fn from_json_slice(bytes: &[u8]) -> FilmResult<Self> {
        serde_json::from_slice(bytes)
            .map_err(|e| FilmError::manifest(format!("parse manifest JSON: {e}")))
    }

    /// Parse a manifest from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> FilmResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            FilmError::manifest(format!("open manifest '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Fetch and parse the manifest stored at `path` in `source`.
    pub fn fetch(source: &dyn FrameSource, path: &str) -> FilmResult<Self> {
        let bytes = source
            .fetch(path)
            .map_err(|e| FilmError::manifest(format!("fetch manifest '{path}': {e}")))?;
        Self::from_json_slice(&bytes)
    }

    /// Serialize as pretty-printed JSON (two-space indent).
    pub fn to_json_pretty(&self) -> FilmResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| FilmError::serde(e.to_string()))
    }

    /// Number of frames.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Return `true` when the timeline has no frames.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Identifier at timeline position `idx`.
    pub fn get(&self, idx: usize) -> Option<&FrameId> {
        self.frames.get(idx)
    }

    /// First frame of the timeline, shown before any scrolling happens.
    pub fn first(&self) -> Option<&FrameId> {
        self.frames.first()
    }

    /// All identifiers in timeline order.
    pub fn frames(&self) -> &[FrameId] {
        &self.frames
    }

    /// Symmetric index window `[center - half_width, center + half_width]` clipped to the timeline.
    ///
    /// Returns `None` for an empty manifest. `center` past the end is clamped to the last frame.
    pub fn window(&self, center: usize, half_width: usize) -> Option<RangeInclusive<usize>> {
        let last = self.frames.len().checked_sub(1)?;
        let center = center.min(last);
        let start = center.saturating_sub(half_width);
        let end = center.saturating_add(half_width).min(last);
        Some(start..=end)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/manifest/model.rs"]
mod tests;
