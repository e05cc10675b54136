//! A [`RuntimeMonitor`] that discards everything. The crate-wide default.

use crate::monitoring::RuntimeMonitor;

/// Discards every event. Used where no observability sink is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopMonitor;

impl RuntimeMonitor for NoopMonitor {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monitoring::events::LifecycleEvent;
    use crate::actor::ActorState;
    use crate::util::ActorId;
    use chrono::Utc;

    #[test]
    fn noop_monitor_does_not_panic() {
        let monitor = NoopMonitor;
        monitor.on_lifecycle(LifecycleEvent {
            actor: ActorId::new(),
            from: ActorState::New,
            to: ActorState::Initializing,
            at: Utc::now(),
        });
    }
}
