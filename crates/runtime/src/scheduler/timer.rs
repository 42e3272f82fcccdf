use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::runtime::{Handle, TryCurrentError};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

use super::{PeriodicScheduler, Task, TaskHandle};

/// Scheduler backed by tokio timers.
///
/// Each schedule spawns one task on the captured runtime handle. Ticks that
/// fall behind are skipped rather than replayed in a burst.
pub struct TokioScheduler {
    runtime: Handle,
    next_id: AtomicU64,
    tasks: Mutex<HashMap<TaskHandle, JoinHandle<()>>>,
}

impl TokioScheduler {
    pub fn new(runtime: Handle) -> Self {
        Self {
            runtime,
            next_id: AtomicU64::new(1),
            tasks: Mutex::new(HashMap::new()),
        }
    }

    /// Binds to the tokio runtime of the calling context.
    pub fn current() -> Result<Self, TryCurrentError> {
        Handle::try_current().map(Self::new)
    }

    fn tasks(&self) -> MutexGuard<'_, HashMap<TaskHandle, JoinHandle<()>>> {
        self.tasks.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl PeriodicScheduler for TokioScheduler {
    fn schedule(&self, interval: Duration, mut task: Task) -> TaskHandle {
        let handle = TaskHandle::new(self.next_id.fetch_add(1, Ordering::Relaxed));
        // tokio intervals panic on a zero period.
        let interval = interval.max(Duration::from_millis(1));

        let join = self.runtime.spawn(async move {
            let mut ticker = time::interval_at(Instant::now() + interval, interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                ticker.tick().await;
                task();
            }
        });

        tracing::debug!(task = handle.id(), ?interval, "scheduled periodic task");
        self.tasks().insert(handle, join);
        handle
    }

    fn cancel(&self, handle: TaskHandle) {
        if let Some(join) = self.tasks().remove(&handle) {
            join.abort();
            tracing::debug!(task = handle.id(), "cancelled periodic task");
        }
    }
}

impl Drop for TokioScheduler {
    fn drop(&mut self) {
        for (_, join) in self.tasks().drain() {
            join.abort();
        }
    }
}
