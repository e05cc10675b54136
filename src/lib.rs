//! # nodal-rt — typed, hierarchical, message-passing actor runtime core
//!
//! A single-threaded, cooperative actor runtime: every actor is a plugin
//! pipeline driven through a fixed lifecycle (`NEW → INITIALIZING →
//! INITIALIZED → OPERATIONAL → SHUTTING_DOWN → SHUT_DOWN`), every locality
//! is an independent FIFO message loop, and supervision is itself just one
//! more plugin slot in that pipeline rather than a separate subsystem.
//!
//! # Quick Start
//!
//! ```rust
//! use nodal_rt::locality::{Locality, LocalityDirectory};
//! use nodal_rt::supervisor::{Supervisor, SupervisorConfig};
//! use nodal_rt::util::LocalityId;
//! use std::sync::Arc;
//!
//! let locality = Arc::new(Locality::new(LocalityId::new()));
//! let directory = Arc::new(LocalityDirectory::new());
//! let root = Supervisor::root(locality, directory, SupervisorConfig::default())
//!     .expect("valid configuration");
//! assert_eq!(root.state(), nodal_rt::actor::ActorState::Operational);
//!
//! let child = root.create_actor().finish().expect("valid configuration");
//! root.do_process();
//! assert_eq!(child.state(), nodal_rt::actor::ActorState::Operational);
//! ```
//!
//! # Module Organization
//!
//! ## Core Runtime
//! - [`actor`] — lifecycle state machine, per-actor cell, and the handle
//!   user code holds
//! - [`plugin`] — the ordered plugin pipeline and its ten canonical slots
//! - [`locality`] — the single-threaded FIFO message loop and the
//!   cross-locality address directory
//! - [`message`] — typed envelopes and request/response pairing
//! - [`subscription`] — subscription points, per-actor/per-supervisor
//!   containers, and the delivery fabric they plug into
//!
//! ## Supervision
//! - [`supervisor`] — the supervisor construction facade and its
//!   `create_actor`/`create_supervisor` builders
//!
//! ## Supporting Infrastructure
//! - [`timer`] — the request-id-keyed arming/firing/cancellation registry
//! - [`monitoring`] — structured lifecycle/subscription/timer/supervision
//!   event capture
//! - [`system`] — process-wide construction defaults
//! - [`protocol`] — the internal message vocabulary plugins exchange
//! - [`error`] — error codes, shutdown reasons, and construction-time errors
//! - [`util`] — identifiers: `ActorId`, `Address`, `LocalityId`,
//!   `RequestId`, `MessageId`
//!
//! # Standards
//!
//! - 3-layer import organization (standard library → third-party → internal)
//!   throughout every module.
//! - `chrono::DateTime<Utc>` for every timestamp carried in a monitoring event.
//! - No `unwrap`/`expect`/`panic!` outside test code; construction-time
//! failures surface as `Result<_, NodalError>`, not exceptions.

pub mod actor;
pub mod error;
pub mod locality;
pub mod message;
pub mod monitoring;
pub mod plugin;
pub mod prelude;
pub mod protocol;
pub mod subscription;
pub mod supervisor;
pub mod system;
pub mod timer;
pub mod util;

// Re-export commonly used types
pub use actor::{ActorCell, ActorConfig, ActorHandle, ActorState};
pub use error::{ErrorCode, NodalError, ShutdownReason};
pub use locality::{Locality, LocalityDirectory};
pub use message::{Envelope, Message, Request, Response};
pub use monitoring::{InMemoryMonitor, NoopMonitor, RuntimeMonitor};
pub use supervisor::{Supervisor, SupervisorConfig, SupervisorPolicy};
pub use system::SystemConfig;
pub use util::{ActorId, Address, LocalityId, MessageId, RequestId};
