use crate::foundation::core::clamp_unit;

/// Distance below which `current` snaps onto `target`.
const SETTLE_EPSILON: f64 = 1e-9;

/// One-pole low-pass filter easing displayed progress toward scroll progress.
///
/// Each [`MotionSmoother::step`] moves `current` by `ease` of the remaining distance to `target`.
/// For a fixed target the sequence is monotonic and converges geometrically without overshoot,
/// settling exactly on the target once within `1e-9` of it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MotionSmoother {
    target: f64,
    current: f64,
    ease: f64,
}

impl MotionSmoother {
    /// Start at rest at progress `0`.
    ///
    /// `ease` above `1` is clamped to `1`; non-finite or non-positive values also mean `1` (no
    /// smoothing).
    pub fn new(ease: f64) -> Self {
        let ease = if ease.is_finite() && ease > 0.0 {
            ease.min(1.0)
        } else {
            1.0
        };
        Self {
            target: 0.0,
            current: 0.0,
            ease,
        }
    }

    /// Set the raw progress to ease toward.
    pub fn set_target(&mut self, target: f64) {
        self.target = clamp_unit(target);
    }

    /// Advance one tick and return the new smoothed progress.
    pub fn step(&mut self) -> f64 {
        let remaining = self.target - self.current;
        if remaining.abs() < SETTLE_EPSILON {
            self.current = self.target;
        } else {
            self.current += remaining * self.ease;
        }
        self.current
    }

    /// Latest raw progress.
    pub fn target(&self) -> f64 {
        self.target
    }

    /// Smoothed progress.
    pub fn current(&self) -> f64 {
        self.current
    }

    /// Ease factor in use.
    pub fn ease(&self) -> f64 {
        self.ease
    }
}

#[cfg(test)]
#[path = "../../tests/unit/playback/smooth.rs"]
mod tests;
