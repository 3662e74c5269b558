use std::collections::{HashSet, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use crate::assets::cache::FrameCache;
use crate::assets::frame::FrameHandle;
use crate::assets::loader::FrameLoader;
use crate::foundation::core::FrameId;
use crate::foundation::error::FilmResult;
use crate::manifest::Manifest;
use crate::prefetch::spawn::Spawn;

/// Tuning for on-demand bursts.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PrefetchOpts {
    /// Frames requested on each side of the missing frame.
    pub burst_half_width: usize,
    /// Minimum time between two bursts, in the tick clock's milliseconds.
    pub burst_cooldown_ms: f64,
}

impl Default for PrefetchOpts {
    fn default() -> Self {
        Self {
            burst_half_width: 8,
            burst_cooldown_ms: 100.0,
        }
    }
}

/// Load counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PrefetchStats {
    /// Loads handed to the spawner.
    pub issued: u64,
    /// Loads that produced a cached frame.
    pub completed: u64,
    /// Loads that failed (the frame stays uncached and may be requested again).
    pub failed: u64,
}

/// Result of a burst request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BurstOutcome {
    /// Loads were issued for `requested` frames of the window (possibly zero).
    Fired {
        /// Number of loads issued.
        requested: usize,
    },
    /// A previous burst is still inside its cooldown.
    CoolingDown,
    /// The prefetcher was shut down.
    ShutDown,
}

/// Issues frame loads into a [`FrameCache`].
///
/// Two policies share one in-flight set, so an identifier is never loaded twice at the same time:
///
/// - the warm-up sweep walks the timeline one load at a time, issuing the next load from the
///   completion of the previous one;
/// - bursts fire parallel loads for a window around a frame the tick loop could not find.
///
/// Clones share state.
#[derive(Clone)]
pub struct Prefetcher {
    shared: Arc<Shared>,
}

struct Shared {
    cache: FrameCache,
    loader: Arc<dyn FrameLoader>,
    spawner: Arc<dyn Spawn>,
    opts: PrefetchOpts,
    state: Mutex<PrefetchState>,
}

#[derive(Default)]
struct PrefetchState {
    in_flight: HashSet<FrameId>,
    sweep: VecDeque<FrameId>,
    sweep_loading: Option<FrameId>,
    burst_blocked_until_ms: Option<f64>,
    shut_down: bool,
    stats: PrefetchStats,
}

impl std::fmt::Debug for Prefetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Prefetcher")
            .field("opts", &self.shared.opts)
            .field("stats", &self.stats())
            .finish()
    }
}

impl Prefetcher {
    /// Create a prefetcher writing into `cache`.
    pub fn new(
        cache: FrameCache,
        loader: Arc<dyn FrameLoader>,
        spawner: Arc<dyn Spawn>,
        opts: PrefetchOpts,
    ) -> Self {
        Self {
            shared: Arc::new(Shared {
                cache,
                loader,
                spawner,
                opts,
                state: Mutex::new(PrefetchState::default()),
            }),
        }
    }

    /// Cache the loads are written into.
    pub fn cache(&self) -> &FrameCache {
        &self.shared.cache
    }

    /// Load the first frame ahead of everything else, then sweep the rest of the timeline.
    ///
    /// The sweep starts once the first load completes, whether or not it succeeded.
    pub fn prime(&self, manifest: &Manifest) {
        let Some(first) = manifest.first().cloned() else {
            return;
        };
        let rest: Vec<FrameId> = manifest.frames()[1..].to_vec();
        let weak = Arc::downgrade(&self.shared);
        let issued = Shared::issue(&self.shared, first, move || {
            if let Some(shared) = weak.upgrade() {
                Shared::start_sweep(&shared, rest);
            }
        });
        if let Err(then) = issued {
            then();
        }
    }

    /// Request a single frame unless it is cached or already loading. Returns `true` if a load was
    /// issued.
    pub fn request(&self, id: FrameId) -> bool {
        Shared::issue(&self.shared, id, || {}).is_ok()
    }

    /// Fire parallel loads for the uncached frames within `burst_half_width` of `center`.
    ///
    /// `now_ms` is the tick timestamp; bursts inside the cooldown of the previous one are refused.
    #[tracing::instrument(skip(self, manifest), fields(frames = manifest.len()))]
    pub fn burst(&self, manifest: &Manifest, center: usize, now_ms: f64) -> BurstOutcome {
        let shared = &self.shared;
        let mut wanted = Vec::<FrameId>::new();
        {
            let mut st = shared.lock();
            if st.shut_down {
                return BurstOutcome::ShutDown;
            }
            if st.burst_blocked_until_ms.is_some_and(|until| now_ms < until) {
                return BurstOutcome::CoolingDown;
            }
            st.burst_blocked_until_ms = Some(now_ms + shared.opts.burst_cooldown_ms);

            let Some(window) = manifest.window(center, shared.opts.burst_half_width) else {
                return BurstOutcome::Fired { requested: 0 };
            };
            for idx in window {
                let Some(id) = manifest.get(idx) else {
                    continue;
                };
                if shared.cache.has(id.as_str()) || st.in_flight.contains(id) {
                    continue;
                }
                st.in_flight.insert(id.clone());
                st.stats.issued += 1;
                wanted.push(id.clone());
            }
        }

        let requested = wanted.len();
        tracing::debug!(requested, "burst fired");
        for id in wanted {
            Shared::spawn_load(shared, id, || {});
        }
        BurstOutcome::Fired { requested }
    }

    /// Stop issuing sweep loads. Loads already in flight still complete into the cache.
    pub fn shutdown(&self) {
        let mut st = self.shared.lock();
        st.shut_down = true;
        st.sweep.clear();
    }

    /// Snapshot of the load counters.
    pub fn stats(&self) -> PrefetchStats {
        self.shared.lock().stats
    }

    /// Number of loads currently in flight.
    pub fn in_flight(&self) -> usize {
        self.shared.lock().in_flight.len()
    }

    /// Identifiers still waiting in the warm-up sweep (excluding the one loading).
    pub fn sweep_remaining(&self) -> usize {
        self.shared.lock().sweep.len()
    }

    /// Return `true` while a sweep load is outstanding.
    pub fn sweep_active(&self) -> bool {
        self.shared.lock().sweep_loading.is_some()
    }
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, PrefetchState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Issue a load for `id` and run `then` after it completes.
    ///
    /// When the frame is already cached or loading, nothing is issued and `then` is handed back.
    fn issue<F>(this: &Arc<Self>, id: FrameId, then: F) -> Result<(), F>
    where
        F: FnOnce() + Send + 'static,
    {
        {
            let mut st = this.lock();
            if st.shut_down || this.cache.has(id.as_str()) || st.in_flight.contains(&id) {
                return Err(then);
            }
            st.in_flight.insert(id.clone());
            st.stats.issued += 1;
        }
        Self::spawn_load(this, id, then);
        Ok(())
    }

    /// Spawn a load already registered as in flight.
    fn spawn_load<F>(this: &Arc<Self>, id: FrameId, then: F)
    where
        F: FnOnce() + Send + 'static,
    {
        let weak: Weak<Self> = Arc::downgrade(this);
        this.spawner.spawn(Box::new(move || {
            let Some(shared) = weak.upgrade() else {
                return;
            };
            let result = shared.loader.load(&id);
            shared.complete(id, result);
            drop(shared);
            then();
        }));
    }

    fn complete(&self, id: FrameId, result: FilmResult<FrameHandle>) {
        // Insert before clearing the in-flight mark so the id is never in neither set.
        let ok = match result {
            Ok(frame) => {
                self.cache.put(id.clone(), frame);
                true
            }
            Err(err) => {
                tracing::debug!(frame = %id, error = %err, "frame load failed");
                false
            }
        };
        let mut st = self.lock();
        st.in_flight.remove(&id);
        if ok {
            st.stats.completed += 1;
        } else {
            st.stats.failed += 1;
        }
    }

    fn start_sweep(this: &Arc<Self>, ids: Vec<FrameId>) {
        {
            let mut st = this.lock();
            if st.shut_down {
                return;
            }
            st.sweep = ids.into();
        }
        tracing::debug!(queued = this.lock().sweep.len(), "warm-up sweep started");
        Self::advance_sweep(this);
    }

    /// Issue the next sweep load, skipping frames that are cached or already loading.
    fn advance_sweep(this: &Arc<Self>) {
        let next = {
            let mut st = this.lock();
            st.sweep_loading = None;
            let mut next = None;
            while !st.shut_down {
                let Some(id) = st.sweep.pop_front() else {
                    break;
                };
                if this.cache.has(id.as_str()) || st.in_flight.contains(&id) {
                    continue;
                }
                st.in_flight.insert(id.clone());
                st.stats.issued += 1;
                st.sweep_loading = Some(id.clone());
                next = Some(id);
                break;
            }
            next
        };

        match next {
            Some(id) => {
                let weak = Arc::downgrade(this);
                Self::spawn_load(this, id, move || {
                    if let Some(shared) = weak.upgrade() {
                        Self::advance_sweep(&shared);
                    }
                });
            }
            None => tracing::debug!("warm-up sweep drained"),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/prefetch/scheduler.rs"]
mod tests;
