use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;

use crate::foundation::core::FrameId;
use crate::foundation::error::{FilmError, FilmResult};

/// Byte source for manifests and frame images.
///
/// Paths are `/`-separated and relative to whatever root the source serves from. Implementations
/// are called from worker threads and must not assume any call ordering.
pub trait FrameSource: Send + Sync {
    /// Fetch the raw bytes stored at `path`.
    fn fetch(&self, path: &str) -> FilmResult<Vec<u8>>;
}

impl<T: FrameSource + ?Sized> FrameSource for Arc<T> {
    fn fetch(&self, path: &str) -> FilmResult<Vec<u8>> {
        (**self).fetch(path)
    }
}

/// [`FrameSource`] reading from a directory on the local filesystem.
#[derive(Clone, Debug)]
pub struct FsSource {
    root: PathBuf,
}

impl FsSource {
    /// Serve files below `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory this source serves from.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl FrameSource for FsSource {
    fn fetch(&self, path: &str) -> FilmResult<Vec<u8>> {
        let rel = normalize_rel_path(path)?;
        let full = self.root.join(&rel);
        let bytes = std::fs::read(&full).with_context(|| format!("read '{}'", full.display()))?;
        Ok(bytes)
    }
}

/// Canonical form of a source-relative path: `/` separators, no empty or `.` segments.
///
/// Absolute paths, parent traversals and paths that name nothing are rejected.
pub(crate) fn normalize_rel_path(path: &str) -> FilmResult<String> {
    let unified = path.replace('\\', "/");
    if unified.starts_with('/') {
        return Err(FilmError::validation(format!(
            "source path '{path}' is absolute"
        )));
    }

    let segments = unified
        .split('/')
        .filter(|seg| !seg.is_empty() && *seg != ".")
        .map(|seg| match seg {
            ".." => Err(FilmError::validation(format!(
                "source path '{path}' leaves the source root"
            ))),
            _ => Ok(seg),
        })
        .collect::<FilmResult<Vec<&str>>>()?;

    if segments.is_empty() {
        return Err(FilmError::validation(format!(
            "source path '{path}' names no file"
        )));
    }
    Ok(segments.join("/"))
}

/// Reject frame identifiers that are not already canonical relative paths.
pub(crate) fn check_frame_id(id: &FrameId) -> FilmResult<()> {
    let canonical = normalize_rel_path(id.as_str())
        .map_err(|e| FilmError::load(format!("frame id '{id}': {e}")))?;
    if canonical != id.as_str() {
        return Err(FilmError::load(format!(
            "frame id '{id}' is not canonical (expected '{canonical}')"
        )));
    }
    Ok(())
}

/// Resolve `id` under `base` (`""` means the source root).
pub(crate) fn join_base(base: &str, id: &str) -> String {
    let base = base.trim_end_matches('/');
    if base.is_empty() {
        id.to_string()
    } else {
        format!("{base}/{id}")
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/source.rs"]
mod tests;
