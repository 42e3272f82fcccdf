//! Worker tasks that back the runtime orchestration.
//!
//! The jump worker is the only activity that mutates the game without a
//! caller: it runs on the scheduler's tick and relocates the target.

mod jump;

pub(crate) use jump::TargetJumpWorker;
