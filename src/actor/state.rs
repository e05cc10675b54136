//! The actor lifecycle state machine (spec ยง3, ยง4.3).

// Layer 1: Standard library imports
// (none)

// Layer 2: Third-party crate imports
// (none)

// Layer 3: Internal module imports
// (none)

/// One actor's position in its lifecycle.
///
/// Ordering matters: `NEW < INITIALIZING < INITIALIZED < OPERATIONAL <
/// SHUTTING_DOWN < SHUT_DOWN` in declaration order, and the child manager's
/// `has_initializing` predicate compares with `<=` against `INITIALIZING`
/// (SPEC_FULL ยง3). Progress is monotone except that `INITIALIZING →
/// SHUTTING_DOWN` is permitted (an abandoned init).
///
/// # Examples
///
/// ```rust
/// use nodal_rt::actor::ActorState;
///
/// assert!(ActorState::New < ActorState::Initializing);
/// assert!(ActorState::Initializing < ActorState::ShuttingDown);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ActorState {
    /// Constructed, plugins not yet activated.
    New,
    /// Plugin activation loop is running; init reaction bits may be set.
    Initializing,
    /// Every plugin's INIT bit has cleared; waiting for the start trigger.
    Initialized,
    /// The start trigger has been delivered; processing user messages.
    Operational,
    /// Plugin deactivation loop is running in reverse.
    ShuttingDown,
    /// Terminal. No timers, no subscriptions, no pending requests remain.
    ShutDown,
}

impl ActorState {
    /// True once this actor will accept no further user messages.
    pub fn is_terminal(self) -> bool {
        matches!(self, ActorState::ShutDown)
    }

    /// True while this actor is still bringing its plugin pipeline up.
    pub fn is_initializing(self) -> bool {
        self <= ActorState::Initializing
    }
}

impl Default for ActorState {
    fn default() -> Self {
        ActorState::New
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_matches_the_declared_progression() {
        let ordered = [
            ActorState::New,
            ActorState::Initializing,
            ActorState::Initialized,
            ActorState::Operational,
            ActorState::ShuttingDown,
            ActorState::ShutDown,
        ];
        for pair in ordered.windows(2) {
            assert!(pair[0] < pair[1], "{:?} should precede {:?}", pair[0], pair[1]);
        }
    }

    #[test]
    fn has_initializing_predicate_shape() {
        assert!(ActorState::New.is_initializing());
        assert!(ActorState::Initializing.is_initializing());
        assert!(!ActorState::Initialized.is_initializing());
    }

    #[test]
    fn only_shut_down_is_terminal() {
        assert!(!ActorState::Operational.is_terminal());
        assert!(ActorState::ShutDown.is_terminal());
    }
}
