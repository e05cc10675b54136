//! Prelude module for convenient imports.
//!
//! Re-exports the types most actor/supervisor authors reach for. Import this
//! module to get started quickly:
//!
//! ```rust
//! use nodal_rt::prelude::*;
//! ```
//!
//! # What's Included
//!
//! ## Core Actor System
//! - [`ActorCell`] - per-actor lifecycle state
//! - [`ActorConfig`] - actor construction configuration
//! - [`ActorHandle`] - the handle user code holds to address one actor
//! - [`ActorState`] - lifecycle state enum
//!
//! ## Messaging
//! - [`Message`] - core trait for payload types
//! - [`Envelope`] - the typed wrapper every payload travels in
//! - [`Request`] / [`Response`] - request/response pairing
//!
//! ## Supervision
//! - [`Supervisor`] - the supervision facade
//! - [`SupervisorConfig`] - supervisor construction configuration
//! - [`SupervisorPolicy`] - child init-failure escalation policy
//!
//! ## Monitoring
//! - [`RuntimeMonitor`] - the event sink trait
//! - [`InMemoryMonitor`] - bounded ring-buffer sink
//! - [`NoopMonitor`] - zero-overhead default sink
//!
//! ## System
//! - [`SystemConfig`] - process-wide construction defaults
//!
//! ## Utilities
//! - [`Address`] - mailing address bound to a locality
//! - [`ActorId`] - actor identifier
//! - [`LocalityId`] - locality identifier
//! - [`RequestId`] - request/timer correlation identifier

// Core actor system
pub use crate::actor::{ActorCell, ActorConfig, ActorHandle, ActorState};

// Messaging
pub use crate::message::{Envelope, Message, Request, Response};

// Locality
pub use crate::locality::{Locality, LocalityDirectory};

// Supervision
pub use crate::supervisor::{Supervisor, SupervisorConfig, SupervisorPolicy};

// Monitoring
pub use crate::monitoring::{InMemoryMonitor, NoopMonitor, RuntimeMonitor};

// Errors
pub use crate::error::{ErrorCode, NodalError, ShutdownReason};

// System
pub use crate::system::SystemConfig;

// Utilities
pub use crate::util::{ActorId, Address, LocalityId, RequestId};
