//! Typed event payloads recorded by a [`crate::monitoring::RuntimeMonitor`].

// Layer 1: Standard library imports
// (none)

// Layer 2: Third-party crate imports
use chrono::{DateTime, Utc}; // ยง3.2 MANDATORY

// Layer 3: Internal module imports
use crate::actor::ActorState;
use crate::error::ShutdownReason;
use crate::util::{ActorId, Address, RequestId};

/// Severity attached to every event, used by sinks that filter (SPEC_FULL ยง4.9).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    /// Routine progress (a transition that always happens).
    Info,
    /// Something a supervisor/operator would want to know about promptly.
    Warn,
    /// A failure that escalated into a shutdown cascade.
    Error,
}

/// An actor moved from one [`ActorState`] to another.
#[derive(Debug, Clone, Copy)]
pub struct LifecycleEvent {
    pub actor: ActorId,
    pub from: ActorState,
    pub to: ActorState,
    pub at: DateTime<Utc>,
}

impl LifecycleEvent {
    /// `Warn` for an abandoned init (INITIALIZING → SHUTTING_DOWN), `Info` otherwise.
    pub fn severity(&self) -> Severity {
        if self.from == ActorState::Initializing && self.to == ActorState::ShuttingDown {
            Severity::Warn
        } else {
            Severity::Info
        }
    }
}

/// A subscription point was added or removed from the delivery index.
#[derive(Debug, Clone, Copy)]
pub enum SubscriptionEvent {
    /// A point was registered.
    Added { owner: ActorId, address: Address, at: DateTime<Utc> },
    /// A point was removed, `external` matching spec ยง4.7's local/external distinction.
    Removed { owner: ActorId, address: Address, external: bool, at: DateTime<Utc> },
}

impl SubscriptionEvent {
    pub fn severity(&self) -> Severity {
        Severity::Info
    }
}

/// A timer was armed, fired, or cancelled (spec C4).
#[derive(Debug, Clone, Copy)]
pub enum TimerEvent {
    Armed { request_id: RequestId, at: DateTime<Utc> },
    Fired { request_id: RequestId, at: DateTime<Utc> },
    Cancelled { request_id: RequestId, at: DateTime<Utc> },
    /// A fire/cancel arrived for a request id no longer tracked (spec ยง5, ยง9).
    Stale { request_id: RequestId, at: DateTime<Utc> },
}

impl TimerEvent {
    pub fn severity(&self) -> Severity {
        match self {
            TimerEvent::Stale { .. } => Severity::Warn,
            _ => Severity::Info,
        }
    }
}

/// A supervision decision made by the child manager (spec ยง4.4).
#[derive(Debug, Clone, Copy)]
pub enum SupervisionEvent {
    ChildCreated { supervisor: ActorId, child: Address, at: DateTime<Utc> },
    ChildInitialized { supervisor: ActorId, child: Address, at: DateTime<Utc> },
    ChildStarted { supervisor: ActorId, child: Address, at: DateTime<Utc> },
    ChildShutdown { supervisor: ActorId, child: Address, reason: ShutdownReason, at: DateTime<Utc> },
    /// A child's shutdown response carried a non-success error code (spec ยง9
    /// Open Questions: invoked whenever the response carries a non-success
    /// code, including `cancelled`).
    ShutdownFailed { supervisor: ActorId, child: Address, at: DateTime<Utc> },
    PolicyEscalation { supervisor: ActorId, reason: ShutdownReason, at: DateTime<Utc> },
}

impl SupervisionEvent {
    pub fn severity(&self) -> Severity {
        match self {
            SupervisionEvent::ShutdownFailed { .. } | SupervisionEvent::PolicyEscalation { .. } => Severity::Error,
            _ => Severity::Info,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn abandoned_init_is_a_warning() {
        let event = LifecycleEvent {
            actor: ActorId::new(),
            from: ActorState::Initializing,
            to: ActorState::ShuttingDown,
            at: Utc::now(),
        };
        assert_eq!(event.severity(), Severity::Warn);
    }

    #[test]
    fn normal_transition_is_info() {
        let event = LifecycleEvent {
            actor: ActorId::new(),
            from: ActorState::New,
            to: ActorState::Initializing,
            at: Utc::now(),
        };
        assert_eq!(event.severity(), Severity::Info);
    }
}
