//! Frame bytes: where they come from, how they are loaded, and where loaded frames live.

/// Shared frame cache.
pub mod cache;
/// Loaded frame handles.
pub mod frame;
/// Frame loaders.
pub mod loader;
/// Byte sources.
pub mod source;
