//! Actor configuration, validated at `finish()` time (spec ยง6, ยง7.1).

// Layer 1: Standard library imports
use std::time::Duration;

// Layer 2: Third-party crate imports
// (none)

// Layer 3: Internal module imports
use crate::error::NodalError;
use crate::util::LocalityId;

/// Configuration recognized on actor construction (spec ยง6).
///
/// `timeout(d)` sets both `init_timeout` and `shutdown_timeout` unless they
/// are set independently afterwards. `finish()` on the builder that
/// consumes this config calls [`ActorConfig::validate`] and returns
/// `Err(NodalError)` without inserting the actor into any children map on
/// failure (spec ยง7.1).
///
/// # Examples
///
/// ```rust
/// use nodal_rt::actor::ActorConfig;
/// use std::time::Duration;
///
/// let config = ActorConfig::default().timeout(Duration::from_millis(1000));
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct ActorConfig {
    init_timeout: Duration,
    shutdown_timeout: Duration,
    locality: Option<LocalityId>,
}

impl ActorConfig {
    /// Set both `init_timeout` and `shutdown_timeout` to `d`.
    pub fn timeout(mut self, d: Duration) -> Self {
        self.init_timeout = d;
        self.shutdown_timeout = d;
        self
    }

    /// Override just the init timeout.
    pub fn init_timeout(mut self, d: Duration) -> Self {
        self.init_timeout = d;
        self
    }

    /// Override just the shutdown timeout.
    pub fn shutdown_timeout(mut self, d: Duration) -> Self {
        self.shutdown_timeout = d;
        self
    }

    /// Pin this actor to a specific locality instead of inheriting its
    /// supervisor's.
    pub fn locality(mut self, id: LocalityId) -> Self {
        self.locality = Some(id);
        self
    }

    /// The configured init timeout.
    pub fn init_timeout_value(&self) -> Duration {
        self.init_timeout
    }

    /// The configured shutdown timeout.
    pub fn shutdown_timeout_value(&self) -> Duration {
        self.shutdown_timeout
    }

    /// The explicitly configured locality, if any.
    pub fn locality_value(&self) -> Option<LocalityId> {
        self.locality
    }

    /// Reject a zero timeout (spec ยง7.1 configuration errors).
    pub fn validate(&self) -> Result<(), NodalError> {
        if self.init_timeout.is_zero() {
            return Err(NodalError::InvalidTimeout("init_timeout must be non-zero".into()));
        }
        if self.shutdown_timeout.is_zero() {
            return Err(NodalError::InvalidTimeout("shutdown_timeout must be non-zero".into()));
        }
        Ok(())
    }
}

impl Default for ActorConfig {
    fn default() -> Self {
        Self {
            init_timeout: Duration::from_millis(5000),
            shutdown_timeout: Duration::from_millis(5000),
            locality: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        assert!(ActorConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let config = ActorConfig::default().timeout(Duration::from_millis(0));
        assert!(config.validate().is_err());
    }

    #[test]
    fn timeout_sets_both_init_and_shutdown() {
        let config = ActorConfig::default().timeout(Duration::from_millis(250));
        assert_eq!(config.init_timeout_value(), Duration::from_millis(250));
        assert_eq!(config.shutdown_timeout_value(), Duration::from_millis(250));
    }

    #[test]
    fn split_timeouts_override_independently() {
        let config = ActorConfig::default()
            .timeout(Duration::from_millis(250))
            .init_timeout(Duration::from_millis(100));
        assert_eq!(config.init_timeout_value(), Duration::from_millis(100));
        assert_eq!(config.shutdown_timeout_value(), Duration::from_millis(250));
    }
}
