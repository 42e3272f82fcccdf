//! Periodic task scheduling.
//!
//! The runtime never touches a clock directly. It asks an injected
//! [`PeriodicScheduler`] to run the target jump every interval:
//! - [`TokioScheduler`] uses tokio timers on a runtime handle
//! - [`ManualScheduler`] is a fake clock advanced explicitly, for tests and
//!   frame-driven hosts

mod manual;
mod timer;

use std::time::Duration;

pub use manual::ManualScheduler;
pub use timer::TokioScheduler;

/// Callback invoked on every tick.
pub type Task = Box<dyn FnMut() + Send + 'static>;

/// Identifies a scheduled task for cancellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TaskHandle(u64);

impl TaskHandle {
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    pub const fn id(self) -> u64 {
        self.0
    }
}

/// Cancellable repeating timer.
pub trait PeriodicScheduler: Send + Sync {
    /// Runs `task` every `interval`, first after one full interval.
    fn schedule(&self, interval: Duration, task: Task) -> TaskHandle;

    /// Stops a task. No further ticks start once this returns.
    ///
    /// Cancelling an unknown or already cancelled handle is a no-op.
    fn cancel(&self, handle: TaskHandle);
}
