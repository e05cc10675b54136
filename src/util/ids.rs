//! Identifier types: addresses, actor ids, locality ids, message/request ids.

// Layer 1: Standard library imports
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

// Layer 2: Third-party crate imports
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// Layer 3: Internal module imports
// (none)

/// Identifies one locality (a single-threaded message loop, spec ยง5).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LocalityId(Uuid);

impl LocalityId {
    /// Mint a fresh locality id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for LocalityId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for LocalityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "locality-{}", self.0)
    }
}

/// Identifies one actor instance, independent of its current address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActorId(Uuid);

impl ActorId {
    /// Mint a fresh actor id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ActorId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "actor-{}", self.0)
    }
}

/// A mailing address bound to exactly one locality.
///
/// Equality is identity equality on the underlying endpoint, not on the
/// actor id — two addresses referring to the same actor after a restart
/// would be distinct `Address` values, matching the spec's model of
/// addresses as the sole delivery coordinate (spec ยง3).
///
/// # Examples
///
/// ```rust
/// use nodal_rt::util::{Address, LocalityId};
///
/// let locality = LocalityId::new();
/// let addr = Address::new(locality);
/// assert_eq!(addr.locality(), locality);
/// assert_eq!(addr, addr.clone());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Address {
    endpoint: Uuid,
    locality: LocalityId,
}

impl Address {
    /// Mint a fresh address bound to `locality`.
    pub fn new(locality: LocalityId) -> Self {
        Self {
            endpoint: Uuid::new_v4(),
            locality,
        }
    }

    /// The locality this address is bound to.
    pub fn locality(&self) -> LocalityId {
        self.locality
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "addr-{}@{}", self.endpoint, self.locality)
    }
}

/// Identifies one message envelope, for tracing and monitoring purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageId(u64);

impl MessageId {
    fn next() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for MessageId {
    fn default() -> Self {
        Self::next()
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "msg-{}", self.0)
    }
}

/// Correlates a request with its eventual response, and a pending timer
/// entry in [`crate::timer::TimerRegistry`] with the request it guards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestId(u64);

impl RequestId {
    /// Mint a fresh, process-unique request id.
    pub fn new() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "req-{}", self.0)
    }
}
