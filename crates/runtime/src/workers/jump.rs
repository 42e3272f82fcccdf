//! Timer-driven target relocation.

use std::sync::{Mutex, Weak};

use game_core::GameEngine;
use tracing::{debug, trace, warn};

use crate::events::{EventBus, GameEvent, RelocationCause};
use crate::runtime::{Session, lock_session};
use crate::scheduler::Task;

/// Relocates the target once per scheduler tick.
///
/// Holds the session weakly so a dropped runtime is never kept alive by a
/// timer that outlived it. Each tick runs under the session lock, so it
/// cannot interleave with a move.
///
/// A failing jump is reported with `warn!` once; repeats of the same streak
/// (every tick on a grid with no free cell) drop to `debug!`.
pub(crate) struct TargetJumpWorker {
    session: Weak<Mutex<Session>>,
    event_bus: EventBus,
    failed_ticks: u64,
}

impl TargetJumpWorker {
    pub(crate) fn new(session: Weak<Mutex<Session>>, event_bus: EventBus) -> Self {
        Self {
            session,
            event_bus,
            failed_ticks: 0,
        }
    }

    pub(crate) fn into_task(mut self) -> Task {
        Box::new(move || self.tick())
    }

    fn tick(&mut self) {
        let Some(session) = self.session.upgrade() else {
            trace!("jump tick after runtime was dropped");
            return;
        };

        let mut guard = lock_session(&session);
        let Session {
            config, state, rng, ..
        } = &mut *guard;

        match GameEngine::new(state, config).jump_target(rng.as_mut()) {
            Ok((previous, current)) => {
                self.failed_ticks = 0;
                debug!(from = %previous.position, to = %current.position, "target jumped");
                self.event_bus.publish(GameEvent::TargetRelocated {
                    from: previous.position,
                    to: current.position,
                    cause: RelocationCause::Timer,
                });
            }
            Err(err) if err.is_rejection() => {
                trace!(%err, "jump tick ignored");
            }
            Err(err) => {
                self.failed_ticks += 1;
                if self.failed_ticks == 1 {
                    warn!(%err, "target jump failed; target stays in place");
                } else {
                    debug!(%err, failed_ticks = self.failed_ticks, "target jump still failing");
                }
            }
        }
    }
}
