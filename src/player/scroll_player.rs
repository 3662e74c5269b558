use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::assets::cache::FrameCache;
use crate::assets::loader::{FrameLoader, SourceLoader};
use crate::assets::source::FrameSource;
use crate::foundation::error::{FilmError, FilmResult};
use crate::manifest::Manifest;
use crate::playback::select::{FrameSelector, Selection, frame_index};
use crate::playback::smooth::MotionSmoother;
use crate::playback::style::FrameStyle;
use crate::player::host::{FrameRequest, PlayerHost};
use crate::player::opts::PlayerOpts;
use crate::prefetch::scheduler::{BurstOutcome, PrefetchStats, Prefetcher};
use crate::prefetch::spawn::Spawn;

/// Tick-loop state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopState {
    /// Not mounted, manifest not ready, or manifest unavailable.
    Idle,
    /// Manifest ready, container off-screen.
    Armed,
    /// Container visible; an animation frame is requested.
    Running,
}

/// Raw and smoothed progress.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Progress {
    /// Progress read from scroll geometry on the last processed tick.
    pub target: f64,
    /// Smoothed progress currently displayed.
    pub current: f64,
}

/// What one processed tick did.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TickReport {
    /// Progress after the tick.
    pub progress: Progress,
    /// Frame selected for the smoothed progress.
    pub frame_index: usize,
    /// `true` when the surface was swapped to a new frame.
    pub swapped: bool,
    /// Burst issued because the selected frame was not cached.
    pub burst: Option<BurstOutcome>,
    /// Style pushed to the surface.
    pub style: FrameStyle,
}

/// Result of [`ScrollPlayer::on_frame`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TickOutcome {
    /// The loop is not running; the callback was ignored.
    Inactive,
    /// Too soon after the previous processed tick; only the next frame was requested.
    Throttled,
    /// Work was done.
    Processed(TickReport),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Lifecycle {
    Fresh,
    Mounted,
    Unmounted,
}

/// Scroll-scrubbed image sequence player.
///
/// Lifecycle: [`ScrollPlayer::mount`] loads the manifest in the background, primes the first frame
/// and the warm-up sweep, and arms the tick loop. The host reports visibility with
/// [`ScrollPlayer::set_visible`] and forwards animation-frame callbacks to
/// [`ScrollPlayer::on_frame`]. [`ScrollPlayer::unmount`] (also run on drop) cancels the pending
/// callback and stops background loading.
///
/// Failures never reach the host after construction: a missing manifest leaves the player inert and
/// failed frames are simply not shown.
pub struct ScrollPlayer {
    core: Arc<Mutex<PlayerCore>>,
    prefetch: Prefetcher,
    source: Arc<dyn FrameSource>,
    spawner: Arc<dyn Spawn>,
    opts: PlayerOpts,
}

struct PlayerCore {
    lifecycle: Lifecycle,
    state: LoopState,
    visible: bool,
    manifest: Option<Arc<Manifest>>,
    pending: Option<FrameRequest>,
    last_tick_ms: Option<f64>,
    min_tick_interval_ms: f64,
    smoother: MotionSmoother,
    selector: FrameSelector,
    host: PlayerHost,
}

impl ScrollPlayer {
    /// Player reading the manifest and frames from `source`.
    ///
    /// Frames are fetched from `opts.frame_base/<id>` and probed before caching.
    pub fn new(
        opts: PlayerOpts,
        source: Arc<dyn FrameSource>,
        spawner: Arc<dyn Spawn>,
        host: PlayerHost,
    ) -> FilmResult<Self> {
        let loader = Arc::new(SourceLoader::new(
            Arc::clone(&source),
            opts.frame_base.clone(),
        ));
        Self::with_loader(opts, source, loader, spawner, host)
    }

    /// Player with a custom frame loader; the manifest still comes from `source`.
    pub fn with_loader(
        opts: PlayerOpts,
        source: Arc<dyn FrameSource>,
        loader: Arc<dyn FrameLoader>,
        spawner: Arc<dyn Spawn>,
        host: PlayerHost,
    ) -> FilmResult<Self> {
        opts.validate()?;
        let prefetch = Prefetcher::new(
            FrameCache::new(),
            loader,
            Arc::clone(&spawner),
            opts.prefetch(),
        );
        let core = PlayerCore {
            lifecycle: Lifecycle::Fresh,
            state: LoopState::Idle,
            visible: false,
            manifest: None,
            pending: None,
            last_tick_ms: None,
            min_tick_interval_ms: opts.min_tick_interval_ms,
            smoother: MotionSmoother::new(opts.ease_factor),
            selector: FrameSelector::new(),
            host,
        };
        Ok(Self {
            core: Arc::new(Mutex::new(core)),
            prefetch,
            source,
            spawner,
            opts,
        })
    }

    /// Start loading the manifest. A player mounts once; later calls are rejected.
    #[tracing::instrument(skip(self), fields(manifest = %self.opts.manifest_path))]
    pub fn mount(&self) -> FilmResult<()> {
        {
            let mut core = lock(&self.core);
            let lifecycle = core.lifecycle;
            match lifecycle {
                Lifecycle::Fresh => core.lifecycle = Lifecycle::Mounted,
                Lifecycle::Mounted => return Err(FilmError::validation("player already mounted")),
                Lifecycle::Unmounted => {
                    return Err(FilmError::validation("player cannot be mounted again"));
                }
            }
        }

        let weak = Arc::downgrade(&self.core);
        let source = Arc::clone(&self.source);
        let prefetch = self.prefetch.clone();
        let path = self.opts.manifest_path.clone();
        self.spawner.spawn(Box::new(move || {
            let result = Manifest::fetch(source.as_ref(), &path);
            let Some(core) = weak.upgrade() else {
                return;
            };
            lock(&core).manifest_loaded(result, &prefetch);
        }));
        Ok(())
    }

    /// Report whether the container intersects the viewport.
    pub fn set_visible(&self, visible: bool) -> LoopState {
        let mut core = lock(&self.core);
        core.visible = visible;
        match (core.state, visible) {
            (LoopState::Armed, true) => core.start_running(),
            (LoopState::Running, false) => core.stop_running(),
            _ => {}
        }
        tracing::debug!(visible, state = ?core.state, "visibility changed");
        core.state
    }

    /// Animation-frame callback. `now_ms` is the host's frame timestamp in milliseconds.
    pub fn on_frame(&self, now_ms: f64) -> TickOutcome {
        let mut core = lock(&self.core);
        if core.state != LoopState::Running {
            return TickOutcome::Inactive;
        }
        core.pending = None;

        let interval = core.min_tick_interval_ms;
        if core
            .last_tick_ms
            .is_some_and(|last| now_ms - last < interval)
        {
            core.request_next();
            return TickOutcome::Throttled;
        }

        let report = core.tick(now_ms, &self.prefetch);
        core.request_next();
        match report {
            Some(report) => TickOutcome::Processed(report),
            None => TickOutcome::Inactive,
        }
    }

    /// Cancel the pending callback and stop background loading. Idempotent.
    pub fn unmount(&self) {
        {
            let mut core = lock(&self.core);
            if core.lifecycle != Lifecycle::Mounted {
                core.lifecycle = Lifecycle::Unmounted;
                return;
            }
            if let Some(req) = core.pending.take() {
                core.host.scheduler.cancel_frame(req);
            }
            core.state = LoopState::Idle;
            core.lifecycle = Lifecycle::Unmounted;
        }
        self.prefetch.shutdown();
        tracing::debug!("player unmounted");
    }

    /// Current tick-loop state.
    pub fn state(&self) -> LoopState {
        lock(&self.core).state
    }

    /// Raw and smoothed progress as of the last processed tick.
    pub fn progress(&self) -> Progress {
        let core = lock(&self.core);
        Progress {
            target: core.smoother.target(),
            current: core.smoother.current(),
        }
    }

    /// Frame index selected on the last processed tick.
    pub fn frame_index(&self) -> Option<usize> {
        lock(&self.core).selector.selected()
    }

    /// Frame index currently on the surface.
    pub fn displayed_index(&self) -> Option<usize> {
        lock(&self.core).selector.displayed()
    }

    /// Loaded manifest, once available.
    pub fn manifest(&self) -> Option<Arc<Manifest>> {
        lock(&self.core).manifest.clone()
    }

    /// Frames resident so far.
    pub fn cache(&self) -> &FrameCache {
        self.prefetch.cache()
    }

    /// Prefetch load counters.
    pub fn prefetch_stats(&self) -> PrefetchStats {
        self.prefetch.stats()
    }

    /// Options in use.
    pub fn opts(&self) -> &PlayerOpts {
        &self.opts
    }
}

impl Drop for ScrollPlayer {
    fn drop(&mut self) {
        self.unmount();
    }
}

impl PlayerCore {
    fn manifest_loaded(&mut self, result: FilmResult<Manifest>, prefetch: &Prefetcher) {
        if self.lifecycle != Lifecycle::Mounted {
            tracing::debug!("manifest arrived after unmount; ignored");
            return;
        }
        let manifest = match result {
            Ok(m) if m.is_empty() => {
                tracing::info!("manifest is empty; player stays inert");
                return;
            }
            Ok(m) => m,
            Err(err) => {
                tracing::warn!(error = %err, "manifest unavailable; player stays inert");
                return;
            }
        };

        tracing::info!(frames = manifest.len(), "manifest loaded");
        prefetch.prime(&manifest);
        self.manifest = Some(Arc::new(manifest));
        self.state = LoopState::Armed;
        if self.visible {
            self.start_running();
        }
    }

    fn start_running(&mut self) {
        self.state = LoopState::Running;
        self.request_next();
    }

    fn stop_running(&mut self) {
        if let Some(req) = self.pending.take() {
            self.host.scheduler.cancel_frame(req);
        }
        self.state = LoopState::Armed;
    }

    fn request_next(&mut self) {
        if self.pending.is_none() {
            self.pending = Some(self.host.scheduler.request_frame());
        }
    }

    fn tick(&mut self, now_ms: f64, prefetch: &Prefetcher) -> Option<TickReport> {
        let manifest = Arc::clone(self.manifest.as_ref()?);
        self.last_tick_ms = Some(now_ms);

        let geometry = self.host.container.geometry();
        self.smoother.set_target(geometry.raw_progress());
        let current = self.smoother.step();
        let index = frame_index(current, manifest.len())?;

        let mut swapped = false;
        let mut burst = None;
        let selection = self.selector.select(index);
        if let Selection::Changed(idx) | Selection::Pending(idx) = selection {
            if let Some(id) = manifest.get(idx) {
                match prefetch.cache().get(id.as_str()) {
                    Some(frame) => {
                        self.host.surface.show(idx, id, &frame);
                        self.selector.mark_displayed(idx);
                        swapped = true;
                    }
                    None => {
                        // The selected frame itself is always fetched, even while bursts cool down.
                        let outcome = prefetch.burst(&manifest, idx, now_ms);
                        if outcome == BurstOutcome::CoolingDown {
                            prefetch.request(id.clone());
                        }
                        burst = Some(outcome);
                    }
                }
            }
        }

        let style = FrameStyle::from_progress(current);
        self.host.surface.apply_style(style);

        tracing::trace!(target_progress = self.smoother.target(), current, index, swapped, "tick");
        Some(TickReport {
            progress: Progress {
                target: self.smoother.target(),
                current,
            },
            frame_index: index,
            swapped,
            burst,
            style,
        })
    }
}

fn lock(core: &Mutex<PlayerCore>) -> MutexGuard<'_, PlayerCore> {
    core.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
#[path = "../../tests/unit/player/scroll_player.rs"]
mod tests;
