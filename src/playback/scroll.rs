use std::sync::{Arc, Mutex, PoisonError};

use crate::foundation::core::clamp_unit;

/// Scroll container geometry relative to the viewport, in CSS pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScrollGeometry {
    /// Container top edge relative to the viewport top (negative once scrolled past).
    pub top: f64,
    /// Full container height.
    pub height: f64,
    /// Viewport height.
    pub viewport_height: f64,
}

impl ScrollGeometry {
    /// Extra scrollable height beyond one viewport, over which progress goes 0 -> 1.
    pub fn scrub_distance(self) -> f64 {
        self.height - self.viewport_height
    }

    /// Geometry of a container `scrub_factor` viewports taller than the viewport, scrolled to
    /// `progress` of its scrub distance.
    pub fn at_progress(viewport_height: f64, scrub_factor: f64, progress: f64) -> Self {
        let scrub = viewport_height * scrub_factor;
        Self {
            top: -(scrub * progress),
            height: viewport_height + scrub,
            viewport_height,
        }
    }

    /// Raw scroll progress: `clamp(-top / scrub_distance, 0, 1)`.
    ///
    /// A container no taller than the viewport, or non-finite geometry, yields `0`.
    pub fn raw_progress(self) -> f64 {
        let scrub = self.scrub_distance();
        if !scrub.is_finite() || scrub <= 0.0 || !self.top.is_finite() {
            return 0.0;
        }
        clamp_unit(-self.top / scrub)
    }
}

/// Host handle to the element whose scrolling drives playback.
///
/// Acquired once at setup and held for the player's lifetime; geometry is re-read every tick
/// because layout may change between ticks.
pub trait ScrollContainer: Send {
    /// Current geometry.
    fn geometry(&self) -> ScrollGeometry;
}

/// [`ScrollContainer`] whose geometry is set by the owner. Clones share the same value.
#[derive(Clone, Debug, Default)]
pub struct SharedGeometry {
    geometry: Arc<Mutex<ScrollGeometry>>,
}

impl SharedGeometry {
    /// Start from `geometry`.
    pub fn new(geometry: ScrollGeometry) -> Self {
        Self {
            geometry: Arc::new(Mutex::new(geometry)),
        }
    }

    /// Replace the whole geometry.
    pub fn set(&self, geometry: ScrollGeometry) {
        *self.geometry.lock().unwrap_or_else(PoisonError::into_inner) = geometry;
    }

    /// Move the container's top edge (i.e. scroll).
    pub fn set_top(&self, top: f64) {
        self.geometry
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .top = top;
    }
}

impl ScrollContainer for SharedGeometry {
    fn geometry(&self) -> ScrollGeometry {
        *self.geometry.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/playback/scroll.rs"]
mod tests;
