//! The per-tick pipeline: scroll sampling, smoothing, frame selection and styling.

/// Scroll geometry and progress sampling.
pub mod scroll;
/// Frame index selection.
pub mod select;
/// Motion smoothing.
pub mod smooth;
/// Progress-driven styling.
pub mod style;
