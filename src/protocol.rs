//! Internal lifecycle protocol messages (spec ยง4.4, ยง4.5, ยง4.6).
//!
//! These payload types never leave the crate's own plugins: they are the
//! envelopes the init/shutdown plumbing, the child manager, the starter,
//! and the link plugins exchange with each other and with their peers. User
//! code never constructs these directly; it only sees their effects through
//! [`crate::actor::ActorHandle`]'s public surface.

// Layer 1: Standard library imports
// (none)

// Layer 2: Third-party crate imports
// (none)

// Layer 3: Internal module imports
use crate::actor::ActorState;
use crate::error::ShutdownReason;
use crate::message::Message;
use crate::util::Address;

/// Request payload: "bring this actor up to INITIALIZED" (spec ยง4.4 `create_actor_t`/`initialize_actor_t`).
#[derive(Debug, Clone, Copy)]
pub struct InitializeActor;
impl Message for InitializeActor {
    const MESSAGE_TYPE: &'static str = "initialize_actor";
}

/// Successful response payload to [`InitializeActor`].
#[derive(Debug, Clone, Copy)]
pub struct InitAck;
impl Message for InitAck {
    const MESSAGE_TYPE: &'static str = "init_ack";
}

/// Request payload: "shut this actor down with `reason`" (spec `shutdown_request_t`).
#[derive(Debug, Clone, Copy)]
pub struct ShutdownSignal {
    pub reason: ShutdownReason,
}
impl Message for ShutdownSignal {
    const MESSAGE_TYPE: &'static str = "shutdown_signal";
}

/// Successful response payload to [`ShutdownSignal`].
#[derive(Debug, Clone, Copy)]
pub struct ShutdownAck;
impl Message for ShutdownAck {
    const MESSAGE_TYPE: &'static str = "shutdown_ack";
}

/// Plain message: "I want to shut down", routed to the supervisor's address
/// (spec `shutdown_trigger_t`). Carries no request id — it is not a
/// request/response pair, just a fire-and-forget notice.
#[derive(Debug, Clone, Copy)]
pub struct ShutdownTrigger {
    pub actor: Address,
    pub reason: ShutdownReason,
}
impl Message for ShutdownTrigger {
    const MESSAGE_TYPE: &'static str = "shutdown_trigger";
}

/// Plain message: "you may begin processing user messages now" (spec
/// `start_actor_t`/`start_trigger_t` — unified into one payload here, see
/// DESIGN.md).
#[derive(Debug, Clone, Copy)]
pub struct StartTrigger;
impl Message for StartTrigger {
    const MESSAGE_TYPE: &'static str = "start_trigger";
}

/// Request payload: "what state is the actor at `subject`?" (spec `state_request_t`).
#[derive(Debug, Clone, Copy)]
pub struct StateRequest {
    pub subject: Address,
}
impl Message for StateRequest {
    const MESSAGE_TYPE: &'static str = "state_request";
}

/// Response payload to [`StateRequest`]; `None` means UNKNOWN (not found).
#[derive(Debug, Clone, Copy)]
pub struct StateResponse {
    pub state: Option<ActorState>,
}
impl Message for StateResponse {
    const MESSAGE_TYPE: &'static str = "state_response";
}

/// Request payload: "link to me" (spec ยง4.5 `link_request_t`).
#[derive(Debug, Clone, Copy)]
pub struct LinkRequest {
    pub operational_only: bool,
}
impl Message for LinkRequest {
    const MESSAGE_TYPE: &'static str = "link_request";
}

/// Successful response payload to [`LinkRequest`].
#[derive(Debug, Clone, Copy)]
pub struct LinkAck;
impl Message for LinkAck {
    const MESSAGE_TYPE: &'static str = "link_ack";
}

/// Plain message: "I am shutting down, forget our link" (spec `unlink_notify_t`).
#[derive(Debug, Clone, Copy)]
pub struct UnlinkNotify {
    pub source: Address,
}
impl Message for UnlinkNotify {
    const MESSAGE_TYPE: &'static str = "unlink_notify";
}

/// Request payload: a client asking a server to release its link (spec `unlink_request_t`).
#[derive(Debug, Clone, Copy)]
pub struct UnlinkRequest {
    pub server: Address,
}
impl Message for UnlinkRequest {
    const MESSAGE_TYPE: &'static str = "unlink_request";
}

/// Response payload to [`UnlinkRequest`]; echoes the replying actor's address.
#[derive(Debug, Clone, Copy)]
pub struct UnlinkAck {
    pub address: Address,
}
impl Message for UnlinkAck {
    const MESSAGE_TYPE: &'static str = "unlink_ack";
}
