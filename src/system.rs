//! Crate-wide defaults a locality's actors are constructed against (spec
//! ยง1's "interface those external config builders would target", SPEC_FULL
//! ยง4.10/ยง6), modeled on `airssys_rt::system::SystemConfig`.
//!
//! Nothing in spec.md names a "system" type explicitly, but every actor
//! still needs a locality and a set of process-wide defaults to be
//! constructed against — this is that ambient home.

// Layer 1: Standard library imports
use std::time::Duration;

// Layer 2: Third-party crate imports
use serde::{Deserialize, Serialize};

// Layer 3: Internal module imports
use crate::error::NodalError;

/// Default init/shutdown timeout handed to [`crate::actor::ActorConfig`] and
/// [`crate::supervisor::SupervisorConfig`] when neither overrides it.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(5000);

/// Advisory hint for a locality's queue capacity. `Locality`'s own queue is
/// an unbounded `VecDeque` (spec ยง5 names no backpressure mechanism), so
/// this is carried for API parity with the teacher's mailbox-capacity
/// default rather than enforced anywhere.
pub const DEFAULT_QUEUE_CAPACITY_HINT: usize = 1000;

/// Process-wide defaults for constructing supervisors and actors.
///
/// # Examples
///
/// ```rust
/// use nodal_rt::system::SystemConfig;
///
/// let config = SystemConfig::default();
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfig {
    /// Default init/shutdown timeout for actors constructed without an
    /// explicit `.timeout(d)`.
    pub default_timeout: Duration,
    /// Advisory queue-capacity hint (see [`DEFAULT_QUEUE_CAPACITY_HINT`]).
    pub queue_capacity_hint: usize,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            default_timeout: DEFAULT_TIMEOUT,
            queue_capacity_hint: DEFAULT_QUEUE_CAPACITY_HINT,
        }
    }
}

impl SystemConfig {
    /// Reject a zero timeout or capacity hint.
    pub fn validate(&self) -> Result<(), NodalError> {
        if self.default_timeout.is_zero() {
            return Err(NodalError::InvalidTimeout("default_timeout must be non-zero".into()));
        }
        if self.queue_capacity_hint == 0 {
            return Err(NodalError::Misconfigured("queue_capacity_hint must be non-zero".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        assert!(SystemConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let config = SystemConfig { default_timeout: Duration::ZERO, ..SystemConfig::default() };
        assert!(config.validate().is_err());
    }
}
