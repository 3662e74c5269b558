use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::assets::frame::FrameHandle;
use crate::foundation::core::FrameId;
use crate::playback::scroll::ScrollContainer;
use crate::playback::style::FrameStyle;

/// Handle for one pending animation-frame callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameRequest(pub u64);

/// Host animation-frame scheduling.
///
/// The player keeps at most one request outstanding. When a request fires, the host calls
/// [`crate::ScrollPlayer::on_frame`] with the callback timestamp. Both methods are invoked while the
/// player holds its internal lock, so implementations must not call back into the player.
pub trait FrameScheduler: Send {
    /// Ask for one callback on the next frame.
    fn request_frame(&mut self) -> FrameRequest;
    /// Withdraw a request that has not fired yet.
    fn cancel_frame(&mut self, req: FrameRequest);
}

/// Display target for frames. Invoked under the player's lock, like [`FrameScheduler`].
pub trait FrameSurface: Send {
    /// Swap the displayed image to `frame` (timeline position `index`).
    fn show(&mut self, index: usize, id: &FrameId, frame: &FrameHandle);
    /// Apply progress-derived styling. Called on every processed tick.
    fn apply_style(&mut self, style: FrameStyle);
}

/// Everything the player needs from its embedding environment.
pub struct PlayerHost {
    /// Element whose scroll position drives playback.
    pub container: Box<dyn ScrollContainer>,
    /// Animation-frame scheduling.
    pub scheduler: Box<dyn FrameScheduler>,
    /// Where frames are shown.
    pub surface: Box<dyn FrameSurface>,
}

/// [`FrameScheduler`] that records requests for the host loop to pump by hand.
///
/// Clones share state, so the host keeps one clone and hands another to the player.
#[derive(Clone, Debug, Default)]
pub struct QueuedFrames {
    state: Arc<Mutex<QueuedFramesState>>,
}

#[derive(Debug, Default)]
struct QueuedFramesState {
    next_id: u64,
    pending: Option<FrameRequest>,
    requested: u64,
    cancelled: u64,
}

impl QueuedFrames {
    /// No requests yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the pending request, if any, as the host does when a frame fires.
    pub fn take_pending(&self) -> Option<FrameRequest> {
        self.lock().pending.take()
    }

    /// Return `true` when a callback is pending.
    pub fn is_pending(&self) -> bool {
        self.lock().pending.is_some()
    }

    /// Total requests made.
    pub fn requested(&self) -> u64 {
        self.lock().requested
    }

    /// Total requests cancelled before firing.
    pub fn cancelled(&self) -> u64 {
        self.lock().cancelled
    }

    fn lock(&self) -> MutexGuard<'_, QueuedFramesState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl FrameScheduler for QueuedFrames {
    fn request_frame(&mut self) -> FrameRequest {
        let mut st = self.lock();
        st.next_id += 1;
        st.requested += 1;
        let req = FrameRequest(st.next_id);
        st.pending = Some(req);
        req
    }

    fn cancel_frame(&mut self, req: FrameRequest) {
        let mut st = self.lock();
        if st.pending == Some(req) {
            st.pending = None;
            st.cancelled += 1;
        }
    }
}

/// [`FrameSurface`] that remembers what it was asked to show.
///
/// Clones share state.
#[derive(Clone, Debug, Default)]
pub struct RecordingSurface {
    state: Arc<Mutex<SurfaceState>>,
}

#[derive(Debug, Default)]
struct SurfaceState {
    shown: Vec<(usize, FrameId)>,
    current: Option<(usize, FrameId, FrameHandle)>,
    style: Option<FrameStyle>,
    style_updates: u64,
}

impl RecordingSurface {
    /// Nothing shown yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every swap so far, oldest first.
    pub fn shown(&self) -> Vec<(usize, FrameId)> {
        self.lock().shown.clone()
    }

    /// Identifier currently displayed.
    pub fn current_id(&self) -> Option<FrameId> {
        self.lock().current.as_ref().map(|(_, id, _)| id.clone())
    }

    /// Timeline index and frame currently displayed.
    pub fn current_frame(&self) -> Option<(usize, FrameHandle)> {
        self.lock()
            .current
            .as_ref()
            .map(|(idx, _, frame)| (*idx, frame.clone()))
    }

    /// Last applied style.
    pub fn style(&self) -> Option<FrameStyle> {
        self.lock().style
    }

    /// Number of style updates received.
    pub fn style_updates(&self) -> u64 {
        self.lock().style_updates
    }

    fn lock(&self) -> MutexGuard<'_, SurfaceState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl FrameSurface for RecordingSurface {
    fn show(&mut self, index: usize, id: &FrameId, frame: &FrameHandle) {
        let mut st = self.lock();
        st.shown.push((index, id.clone()));
        st.current = Some((index, id.clone(), frame.clone()));
    }

    fn apply_style(&mut self, style: FrameStyle) {
        let mut st = self.lock();
        st.style = Some(style);
        st.style_updates += 1;
    }
}
