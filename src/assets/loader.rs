use crate::assets::frame::FrameHandle;
use crate::assets::source::{FrameSource, check_frame_id, join_base};
use crate::foundation::core::FrameId;
use crate::foundation::error::FilmResult;

/// Turns a frame identifier into a paintable [`FrameHandle`].
///
/// Called from spawned load tasks; a call may block for as long as fetching takes.
pub trait FrameLoader: Send + Sync {
    /// Load one frame.
    fn load(&self, id: &FrameId) -> FilmResult<FrameHandle>;
}

/// [`FrameLoader`] that fetches `base/<id>` from a [`FrameSource`] and probes the image header.
#[derive(Clone, Debug)]
pub struct SourceLoader<S> {
    source: S,
    base: String,
}

impl<S: FrameSource> SourceLoader<S> {
    /// Load frames from `source`, prefixing every identifier with `base` (may be empty).
    pub fn new(source: S, base: impl Into<String>) -> Self {
        Self {
            source,
            base: base.into(),
        }
    }

    /// Path a given frame is fetched from.
    pub fn path_for(&self, id: &FrameId) -> String {
        join_base(&self.base, id.as_str())
    }
}

impl<S: FrameSource> FrameLoader for SourceLoader<S> {
    fn load(&self, id: &FrameId) -> FilmResult<FrameHandle> {
        check_frame_id(id)?;
        let bytes = self.source.fetch(&self.path_for(id))?;
        FrameHandle::probe(bytes)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/loader.rs"]
mod tests;
