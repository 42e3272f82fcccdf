use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use super::{PeriodicScheduler, Task, TaskHandle};

/// Deterministic scheduler driven by [`ManualScheduler::advance`].
///
/// Time only moves when the owner advances it; due ticks run on the calling
/// thread in deadline order (ties in scheduling order). Clones share the
/// same clock.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    clock: Arc<Mutex<Clock>>,
}

#[derive(Default)]
struct Clock {
    now: Duration,
    next_id: u64,
    entries: BTreeMap<TaskHandle, Entry>,
}

struct Entry {
    interval: Duration,
    next_due: Duration,
    task: Arc<Mutex<Task>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Time elapsed since the scheduler was created.
    pub fn now(&self) -> Duration {
        self.clock().now
    }

    /// Number of tasks that have not been cancelled.
    pub fn active_tasks(&self) -> usize {
        self.clock().entries.len()
    }

    /// Moves the clock forward, running every tick that falls due.
    ///
    /// The clock lock is released while a task runs, so tasks may schedule
    /// or cancel freely.
    pub fn advance(&self, by: Duration) {
        let deadline = self.now() + by;

        while let Some(task) = self.pop_due(deadline) {
            let mut guard = task.lock().unwrap_or_else(PoisonError::into_inner);
            (&mut *guard)();
        }

        let mut clock = self.clock();
        clock.now = clock.now.max(deadline);
    }

    /// Advances the clock to the earliest tick at or before `deadline` and
    /// re-arms that entry.
    fn pop_due(&self, deadline: Duration) -> Option<Arc<Mutex<Task>>> {
        let mut clock = self.clock();

        let (handle, due) = clock
            .entries
            .iter()
            .filter(|(_, entry)| entry.next_due <= deadline)
            .map(|(handle, entry)| (*handle, entry.next_due))
            .min_by_key(|(handle, due)| (*due, *handle))?;

        clock.now = due;
        let entry = clock.entries.get_mut(&handle)?;
        entry.next_due += entry.interval;
        Some(Arc::clone(&entry.task))
    }

    fn clock(&self) -> MutexGuard<'_, Clock> {
        self.clock.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl PeriodicScheduler for ManualScheduler {
    fn schedule(&self, interval: Duration, task: Task) -> TaskHandle {
        // A zero period would never let `advance` make progress.
        let interval = interval.max(Duration::from_millis(1));

        let mut clock = self.clock();
        clock.next_id += 1;
        let handle = TaskHandle::new(clock.next_id);
        let next_due = clock.now + interval;
        clock.entries.insert(
            handle,
            Entry {
                interval,
                next_due,
                task: Arc::new(Mutex::new(task)),
            },
        );
        handle
    }

    fn cancel(&self, handle: TaskHandle) {
        self.clock().entries.remove(&handle);
    }
}
