use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};

use crate::foundation::error::{FilmError, FilmResult};

/// Fire-and-forget unit of work (one manifest or frame load).
pub type Task = Box<dyn FnOnce() + Send + 'static>;

/// Executor for load tasks.
///
/// Tasks complete independently and in any order. The player never waits on a task; results are
/// observed through the frame cache.
pub trait Spawn: Send + Sync {
    /// Submit a task for execution.
    fn spawn(&self, task: Task);
}

/// [`Spawn`] backed by a dedicated rayon thread pool.
#[derive(Clone, Debug)]
pub struct RayonSpawner {
    pool: Arc<rayon::ThreadPool>,
}

impl RayonSpawner {
    /// Build a pool with `threads` workers (`None` uses rayon defaults).
    pub fn new(threads: Option<usize>) -> FilmResult<Self> {
        if threads == Some(0) {
            return Err(FilmError::validation("spawner 'threads' must be >= 1 when set"));
        }
        let mut builder =
            rayon::ThreadPoolBuilder::new().thread_name(|i| format!("filmstrip-load-{i}"));
        if let Some(n) = threads {
            builder = builder.num_threads(n);
        }
        let pool = builder
            .build()
            .map_err(|e| FilmError::validation(format!("failed to build rayon thread pool: {e}")))?;
        Ok(Self {
            pool: Arc::new(pool),
        })
    }
}

impl Spawn for RayonSpawner {
    fn spawn(&self, task: Task) {
        self.pool.spawn(task);
    }
}

/// [`Spawn`] that only queues tasks; the owner decides when and in which order they run.
///
/// Used by deterministic hosts (the CLI) and tests. Clones share the same queue.
#[derive(Clone, Default)]
pub struct QueuedSpawner {
    queue: Arc<Mutex<VecDeque<Task>>>,
}

impl std::fmt::Debug for QueuedSpawner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueuedSpawner")
            .field("pending", &self.pending())
            .finish()
    }
}

impl QueuedSpawner {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of queued tasks.
    pub fn pending(&self) -> usize {
        self.lock().len()
    }

    /// Run the oldest queued task. Returns `false` when the queue was empty.
    pub fn run_next(&self) -> bool {
        let task = self.lock().pop_front();
        match task {
            Some(task) => {
                task();
                true
            }
            None => false,
        }
    }

    /// Run the newest queued task, completing work out of submission order.
    pub fn run_newest(&self) -> bool {
        let task = self.lock().pop_back();
        match task {
            Some(task) => {
                task();
                true
            }
            None => false,
        }
    }

    /// Run tasks (including ones queued while running) until the queue is empty.
    ///
    /// Returns how many tasks ran.
    pub fn run_until_idle(&self) -> usize {
        let mut ran = 0;
        while self.run_next() {
            ran += 1;
        }
        ran
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, VecDeque<Task>> {
        self.queue.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Spawn for QueuedSpawner {
    fn spawn(&self, task: Task) {
        self.lock().push_back(task);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/prefetch/spawn.rs"]
mod tests;
