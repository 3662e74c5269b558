//! Player lifecycle: mounting, the visibility gate and the tick loop, plus host abstractions.

/// Host traits and in-process host implementations.
pub mod host;
/// Player options.
pub mod opts;
/// The player itself.
pub mod scroll_player;
