//! Filmstrip plays an image sequence scrubbed by scroll position.
//!
//! A timeline is a manifest of frame files. As the host scrolls a tall container, the player maps
//! scroll progress to a frame, eases toward it, and swaps the displayed image. Frames are loaded in
//! the background by a warm-up sweep and, when playback outruns the sweep, by windowed bursts around
//! the missing frame.
//!
//! - Build a [`ScrollPlayer`] over a [`FrameSource`], a [`Spawn`] executor and a [`PlayerHost`]
//! - [`ScrollPlayer::mount`] it, report visibility, and forward animation-frame callbacks
//! - Generate manifests from a directory of frames with [`manifest::generate`]
#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod foundation;

/// Frame sources, loaders, handles and the shared cache.
pub mod assets;
/// Frame manifests.
pub mod manifest;
/// Per-tick playback stages.
pub mod playback;
/// The scroll player and its host abstractions.
pub mod player;
/// Warm-up sweep, bursts and load executors.
pub mod prefetch;

pub use crate::foundation::core::{FrameId, clamp_unit};
pub use crate::foundation::error::{FilmError, FilmResult};

pub use crate::assets::cache::FrameCache;
pub use crate::assets::frame::FrameHandle;
pub use crate::assets::loader::{FrameLoader, SourceLoader};
pub use crate::assets::source::{FrameSource, FsSource};
pub use crate::manifest::Manifest;
pub use crate::playback::scroll::{ScrollContainer, ScrollGeometry, SharedGeometry};
pub use crate::playback::select::{FrameSelector, Selection, frame_index};
pub use crate::playback::smooth::MotionSmoother;
pub use crate::playback::style::FrameStyle;
pub use crate::player::host::{
    FrameRequest, FrameScheduler, FrameSurface, PlayerHost, QueuedFrames, RecordingSurface,
};
pub use crate::player::opts::PlayerOpts;
pub use crate::player::scroll_player::{LoopState, Progress, ScrollPlayer, TickOutcome, TickReport};
pub use crate::prefetch::scheduler::{BurstOutcome, PrefetchOpts, PrefetchStats, Prefetcher};
pub use crate::prefetch::spawn::{QueuedSpawner, RayonSpawner, Spawn, Task};
