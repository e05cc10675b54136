//! Timer registry: request-id → pending handler, with fire/cancel arbitration.

// Layer 1: Standard library imports
use std::collections::HashMap;

// Layer 2: Third-party crate imports
use chrono::{DateTime, Utc}; // ยง3.2 MANDATORY

// Layer 3: Internal module imports
use crate::util::RequestId;

/// Outcome of a timer resolving, passed to whatever called `fire`/`cancel`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerOutcome {
    /// The timer fired and a pending entry was found and removed.
    Fired,
    /// The timer was cancelled and a pending entry was found and removed.
    Cancelled,
    /// No entry was found for the request id — a no-op (spec ยง5, ยง9).
    Stale,
}

#[derive(Debug, Clone)]
struct PendingTimer {
    armed_at: DateTime<Utc>,
}

/// Maps `request_id` → pending timer entry (spec C4).
///
/// Fire and cancel are arbitrated so that whichever happens first for a
/// given `request_id` wins; the other becomes a no-op, because both paths
/// remove the entry before acting on it. This is the same discipline
/// `cpp-rotor`'s `request_map`/`request_timeout` pairing expects from its
/// host scheduler, carried over explicitly for the single-delivery
/// guarantee in spec ยง5.
///
/// # Examples
///
/// ```rust
/// use nodal_rt::timer::{TimerOutcome, TimerRegistry};
/// use nodal_rt::util::RequestId;
///
/// let mut registry = TimerRegistry::new();
/// let request_id = RequestId::new();
/// registry.arm(request_id);
///
/// assert_eq!(registry.fire(request_id), TimerOutcome::Fired);
/// // The race is already resolved: a later cancel is a no-op.
/// assert_eq!(registry.cancel(request_id), TimerOutcome::Stale);
/// ```
#[derive(Debug, Default)]
pub struct TimerRegistry {
    pending: HashMap<RequestId, PendingTimer>,
}

impl TimerRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm a new timer for `request_id`.
    pub fn arm(&mut self, request_id: RequestId) {
        self.pending.insert(
            request_id,
            PendingTimer {
                armed_at: Utc::now(), // ยง3.2
            },
        );
    }

    /// True while `request_id` is still armed and unresolved.
    pub fn is_armed(&self, request_id: RequestId) -> bool {
        self.pending.contains_key(&request_id)
    }

    /// The timer for `request_id` fired. Removes the entry if present.
    pub fn fire(&mut self, request_id: RequestId) -> TimerOutcome {
        if self.pending.remove(&request_id).is_some() {
            TimerOutcome::Fired
        } else {
            TimerOutcome::Stale
        }
    }

    /// The request for `request_id` was answered before its timer fired;
    /// cancel it. Removes the entry if present.
    pub fn cancel(&mut self, request_id: RequestId) -> TimerOutcome {
        if self.pending.remove(&request_id).is_some() {
            TimerOutcome::Cancelled
        } else {
            TimerOutcome::Stale
        }
    }

    /// Number of still-armed timers. An actor asserts this is zero on
    /// entering SHUT_DOWN (spec ยง3 lifecycle invariants).
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// True once every armed timer has resolved.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fire_then_cancel_race_cancel_is_a_no_op() {
        let mut registry = TimerRegistry::new();
        let request_id = RequestId::new();
        registry.arm(request_id);

        assert_eq!(registry.fire(request_id), TimerOutcome::Fired);
        assert_eq!(registry.cancel(request_id), TimerOutcome::Stale);
        assert!(registry.is_empty());
    }

    #[test]
    fn cancel_then_fire_race_fire_is_a_no_op() {
        let mut registry = TimerRegistry::new();
        let request_id = RequestId::new();
        registry.arm(request_id);

        assert_eq!(registry.cancel(request_id), TimerOutcome::Cancelled);
        assert_eq!(registry.fire(request_id), TimerOutcome::Stale);
    }

    #[test]
    fn unknown_request_id_is_always_stale() {
        let mut registry = TimerRegistry::new();
        let request_id = RequestId::new();
        assert_eq!(registry.fire(request_id), TimerOutcome::Stale);
        assert_eq!(registry.cancel(request_id), TimerOutcome::Stale);
    }

    #[test]
    fn len_tracks_outstanding_timers() {
        let mut registry = TimerRegistry::new();
        let a = RequestId::new();
        let b = RequestId::new();
        registry.arm(a);
        registry.arm(b);
        assert_eq!(registry.len(), 2);
        registry.fire(a);
        assert_eq!(registry.len(), 1);
    }
}
