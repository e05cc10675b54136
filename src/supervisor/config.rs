//! Supervisor configuration: an [`ActorConfig`] plus the supervision policy
//! knobs spec ยง6 lists alongside it (`policy`, `synchronize_start`).

// Layer 1: Standard library imports
use std::time::Duration;

// Layer 2: Third-party crate imports
// (none)

// Layer 3: Internal module imports
use crate::actor::ActorConfig;
use crate::error::NodalError;
use crate::plugin::child_manager::SupervisorPolicy;
use crate::util::LocalityId;

/// Configuration recognized on supervisor construction (spec ยง6, SPEC_FULL
/// ยง4.10). Extends [`ActorConfig`] with the two knobs only a supervisor
/// reads: `policy` and `synchronize_start`.
///
/// # Examples
///
/// ```rust
/// use nodal_rt::supervisor::{SupervisorConfig, SupervisorPolicy};
/// use std::time::Duration;
///
/// let config = SupervisorConfig::default()
///     .timeout(Duration::from_millis(1000))
///     .policy(SupervisorPolicy::ShutdownFailed)
///     .synchronize_start(true);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct SupervisorConfig {
    actor: ActorConfig,
    policy: SupervisorPolicy,
    synchronize_start: bool,
}

impl SupervisorConfig {
    /// Set both `init_timeout` and `shutdown_timeout` to `d`.
    pub fn timeout(mut self, d: Duration) -> Self {
        self.actor = self.actor.timeout(d);
        self
    }

    /// Override just the init timeout.
    pub fn init_timeout(mut self, d: Duration) -> Self {
        self.actor = self.actor.init_timeout(d);
        self
    }

    /// Override just the shutdown timeout.
    pub fn shutdown_timeout(mut self, d: Duration) -> Self {
        self.actor = self.actor.shutdown_timeout(d);
        self
    }

    /// Pin this supervisor to a specific locality.
    pub fn locality(mut self, id: LocalityId) -> Self {
        self.actor = self.actor.locality(id);
        self
    }

    /// How this supervisor reacts to a child's init failure (spec ยง4.4 "Policies").
    pub fn policy(mut self, policy: SupervisorPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Defer every child's `start_actor_t` until this supervisor itself
    /// receives `start_trigger_t` (spec ยง4.4 "Start synchronization").
    pub fn synchronize_start(mut self, synchronize_start: bool) -> Self {
        self.synchronize_start = synchronize_start;
        self
    }

    /// The embedded actor-level configuration.
    pub fn actor_config(&self) -> &ActorConfig {
        &self.actor
    }

    /// The configured policy.
    pub fn policy_value(&self) -> SupervisorPolicy {
        self.policy
    }

    /// The configured start-synchronization flag.
    pub fn synchronize_start_value(&self) -> bool {
        self.synchronize_start
    }

    /// Delegate to the embedded [`ActorConfig::validate`] (spec ยง7.1).
    pub fn validate(&self) -> Result<(), NodalError> {
        self.actor.validate()
    }
}

impl Default for SupervisorConfig {
    fn default() -> Self {
        Self {
            actor: ActorConfig::default(),
            policy: SupervisorPolicy::ShutdownSelf,
            synchronize_start: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        assert!(SupervisorConfig::default().validate().is_ok());
    }

    #[test]
    fn builder_overrides_policy_and_synchronize_start() {
        let config = SupervisorConfig::default().policy(SupervisorPolicy::ShutdownFailed).synchronize_start(true);
        assert_eq!(config.policy_value(), SupervisorPolicy::ShutdownFailed);
        assert!(config.synchronize_start_value());
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let config = SupervisorConfig::default().timeout(Duration::from_millis(0));
        assert!(config.validate().is_err());
    }
}
