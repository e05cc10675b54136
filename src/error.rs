//! Crate-wide error codes and shutdown reasons.
//!
//! These are the codes that travel *inside* response envelopes (spec ยง7) —
//! they are never raised as Rust exceptions or `panic!`s. A handler that
//! fails hands back one of these through the normal message pathway; the
//! lifecycle stage that receives it decides whether to retry, give up, or
//! ignore it.

// Layer 1: Standard library imports
use std::fmt;

// Layer 2: Third-party crate imports
use thiserror::Error;

// Layer 3: Internal module imports
// (none)

/// Error codes carried in response envelopes.
///
/// # Examples
///
/// ```rust
/// use nodal_rt::ErrorCode;
///
/// let code = ErrorCode::Success;
/// assert!(code.is_success());
///
/// let failed = ErrorCode::RequestTimeout;
/// assert!(!failed.is_success());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// The operation completed normally.
    Success,
    /// The request was cancelled before it could complete.
    Cancelled,
    /// No response arrived before the armed timer fired.
    RequestTimeout,
    /// A supervisor has already been attached where none was expected.
    SupervisorDefined,
    /// The subscription point or service name is already registered.
    AlreadyRegistered,
    /// The actor's configuration failed validation.
    ActorMisconfigured,
    /// The target actor does not support linking.
    ActorNotLinkable,
    /// A link to this address already exists.
    AlreadyLinked,
    /// The requested service name has no registered handler.
    UnknownService,
}

impl ErrorCode {
    /// True only for [`ErrorCode::Success`].
    ///
    /// Mirrors the "falsy empty error code means success" convention of the
    /// original `std::error_code`-based design.
    pub fn is_success(self) -> bool {
        matches!(self, ErrorCode::Success)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            ErrorCode::Success => "success",
            ErrorCode::Cancelled => "request has been cancelled",
            ErrorCode::RequestTimeout => "request timeout",
            ErrorCode::SupervisorDefined => "supervisor is already defined",
            ErrorCode::AlreadyRegistered => "service name is already registered",
            ErrorCode::ActorMisconfigured => "actor is misconfigured",
            ErrorCode::ActorNotLinkable => "actor is not linkable",
            ErrorCode::AlreadyLinked => "already linked",
            ErrorCode::UnknownService => "the requested service name is not registered",
        };
        write!(f, "{msg}")
    }
}

/// Reasons an actor or supervisor can give for shutting down.
///
/// # Examples
///
/// ```rust
/// use nodal_rt::ShutdownReason;
///
/// let reason = ShutdownReason::ChildInitFailed;
/// assert_eq!(reason.to_string(), "child failed to initialize");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShutdownReason {
    /// A normal, user-requested shutdown.
    Normal,
    /// Propagated because the owning supervisor is shutting down.
    SupervisorShutdown,
    /// A child actor was removed (e.g. failed during operation).
    ChildDown,
    /// A child actor failed to initialize and the policy escalated.
    ChildInitFailed,
    /// An unlink was requested by the linked peer.
    UnlinkRequested,
    /// A link request failed or was refused.
    LinkFailed,
    /// An armed request timed out.
    RequestTimeout,
}

impl fmt::Display for ShutdownReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            ShutdownReason::Normal => "normal shutdown",
            ShutdownReason::SupervisorShutdown => "supervisor is shutting down",
            ShutdownReason::ChildDown => "child actor is down",
            ShutdownReason::ChildInitFailed => "child failed to initialize",
            ShutdownReason::UnlinkRequested => "unlink was requested",
            ShutdownReason::LinkFailed => "link request failed",
            ShutdownReason::RequestTimeout => "request timed out",
        };
        write!(f, "{msg}")
    }
}

/// Errors surfaced synchronously at actor/supervisor construction time
/// (spec ยง7.1).
///
/// `create_actor(...).finish()` returns `Err(NodalError)` (and no actor is
/// inserted into the supervisor's children map) when configuration fails
/// validation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NodalError {
    /// A required timeout was zero or otherwise out of range.
    #[error("invalid timeout: {0}")]
    InvalidTimeout(String),
    /// The plugin pipeline override was empty or otherwise invalid.
    #[error("invalid plugin pipeline: {0}")]
    InvalidPluginPipeline(String),
    /// Generic configuration failure with a human-readable reason.
    #[error("actor misconfigured: {0}")]
    Misconfigured(String),
}
