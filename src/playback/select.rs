use crate::foundation::core::clamp_unit;

/// Map smoothed progress to a timeline index: `floor(progress * (frame_count - 1))`.
///
/// Always within `[0, frame_count - 1]`; `None` when the timeline is empty.
pub fn frame_index(progress: f64, frame_count: usize) -> Option<usize> {
    let last = frame_count.checked_sub(1)?;
    let idx = (clamp_unit(progress) * last as f64).floor() as usize;
    Some(idx.min(last))
}

/// What the renderer should do this tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Selection {
    /// The selected frame is already on screen.
    Unchanged,
    /// The index moved to a new frame.
    Changed(usize),
    /// The index did not move but its frame has not been shown yet (it was missing).
    Pending(usize),
}

/// Tracks the selected and displayed frame indices so repeated ticks on the same frame are free.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameSelector {
    selected: Option<usize>,
    displayed: Option<usize>,
}

impl FrameSelector {
    /// Nothing selected or displayed yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `index` as the selection for this tick.
    pub fn select(&mut self, index: usize) -> Selection {
        if self.selected != Some(index) {
            self.selected = Some(index);
            return Selection::Changed(index);
        }
        if self.displayed == Some(index) {
            Selection::Unchanged
        } else {
            Selection::Pending(index)
        }
    }

    /// Record that `index` is now on screen.
    pub fn mark_displayed(&mut self, index: usize) {
        self.displayed = Some(index);
    }

    /// Most recently selected index.
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Index currently on screen.
    pub fn displayed(&self) -> Option<usize> {
        self.displayed
    }
}

#[cfg(test)]
#[path = "../../tests/unit/playback/select.rs"]
mod tests;
