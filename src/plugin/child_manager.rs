//! Child manager plugin: the supervisor-only router of child lifecycle
//! events (spec ยง4.2 canonical order #7, ยง4.4 "Child Manager (C8)").
//!
//! The "owned reference" spec ยง3's actor-record names lives one level up,
//! in the not-yet-built `Supervisor` type's own children map — duplicating
//! an `Arc` here would just be a second, easily-desynced copy of the same
//! ownership. This plugin's `actors_map` tracks only the bookkeeping flags
//! (`initialized`, `started`, `shutdown`) keyed by address, plus the handle
//! needed to answer `state_request_t` and to identify a point's owner in
//! the address mapping.

// Layer 1: Standard library imports
use std::collections::HashMap;
use std::time::Duration;

// Layer 2: Third-party crate imports
use chrono::Utc; // ยง3.2 MANDATORY

// Layer 3: Internal module imports
use crate::actor::{ActorHandle, ActorCell};
use crate::error::ShutdownReason;
use crate::message::{Envelope, Request, Response};
use crate::monitoring::events::SupervisionEvent;
use crate::plugin::{Plugin, PluginKind, ReactionBits};
use crate::protocol::{InitAck, InitializeActor, ShutdownAck, ShutdownSignal, ShutdownTrigger, StartTrigger, StateRequest, StateResponse};
use crate::subscription::{AddressMapping, OwnerTag, SubscriptionOutcome, SubscriptionPoint};
use crate::util::{Address, RequestId};

/// How a supervisor reacts to a child failing to initialize (spec ยง4.4 "Policies").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupervisorPolicy {
    /// Any child's init failure shuts down the whole supervisor.
    ShutdownSelf,
    /// Only the failed child is removed; surviving children keep
    /// initializing (or stay OPERATIONAL).
    ShutdownFailed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ShutdownState {
    None,
    Sent,
    Confirmed,
}

struct ActorRecord {
    handle: ActorHandle,
    init_request: RequestId,
    initialized: bool,
    started: bool,
    shutdown: ShutdownState,
    shutdown_request: Option<RequestId>,
}

/// Supervisor-only plugin maintaining `actors_map: address -> actor-record`
/// (spec ยง4.4).
pub struct ChildManagerPlugin {
    policy: SupervisorPolicy,
    synchronize_start: bool,
    own_started: bool,
    actors_map: HashMap<Address, ActorRecord>,
    address_mapping: AddressMapping,
    reaction: ReactionBits,
}

impl ChildManagerPlugin {
    /// A fresh, inactive instance under the given policy.
    pub fn new(policy: SupervisorPolicy, synchronize_start: bool) -> Self {
        Self {
            policy,
            synchronize_start,
            own_started: false,
            actors_map: HashMap::new(),
            address_mapping: AddressMapping::new(),
            reaction: ReactionBits::NONE,
        }
    }

    /// Send `start_actor_t` to `record`'s dedicated starter address and mark
    /// it started (spec ยง4.6: `start_trigger_t` is addressed there, never to
    /// the child's primary address).
    fn start_child(cell: &mut ActorCell, child: Address, record: &mut ActorRecord) {
        if let Some(starter) = record.handle.starter_address() {
            cell.send(starter, StartTrigger);
        }
        record.started = true;
        cell.monitor().on_supervision(SupervisionEvent::ChildStarted { supervisor: cell.id(), child, at: Utc::now() });
    }

    /// React to this supervisor itself reaching OPERATIONAL (spec ยง4.4
    /// "Start synchronization"): broadcast `start_actor_t` to every child
    /// already initialized but not yet started. Children that initialize
    /// afterwards are started immediately by [`Self::on_child_initialized`].
    fn on_own_start(&mut self, cell: &mut ActorCell) {
        if self.own_started {
            return;
        }
        self.own_started = true;
        if !self.synchronize_start {
            return;
        }
        let pending: Vec<Address> = self
            .actors_map
            .iter()
            .filter(|(_, r)| r.initialized && !r.started)
            .map(|(addr, _)| *addr)
            .collect();
        for child in pending {
            if let Some(record) = self.actors_map.get_mut(&child) {
                Self::start_child(cell, child, record);
            }
        }
    }

    /// Register `handle` as a child, send it `initialize_actor_t`, and arm
    /// a timer for `timeout` (spec ยง6 `create_actor`'s side effect: "the
    /// new actor is inserted into the supervisor's children map and an init
    /// request is enqueued"). `timeout` itself is carried for API fidelity
    /// with `.timeout(d)`; arming a concrete wall-clock deadline is the
    /// external timer driver's job (spec ยง1).
    pub fn create_child(&mut self, cell: &mut ActorCell, handle: ActorHandle, timeout: Duration) {
        let _ = timeout;
        let child = handle.address();
        let request_id = RequestId::new();
        cell.timers_mut().arm(request_id);
        cell.send(child, Request::new(request_id, cell.address(), InitializeActor));
        self.actors_map.insert(
            child,
            ActorRecord {
                handle,
                init_request: request_id,
                initialized: false,
                started: false,
                shutdown: ShutdownState::None,
                shutdown_request: None,
            },
        );
        self.reaction = self.reaction.union(ReactionBits::INIT);
        cell.monitor().on_supervision(SupervisionEvent::ChildCreated { supervisor: cell.id(), child, at: Utc::now() });
    }

    /// Drive a child's init timer to expiry directly, without a concrete
    /// timer driver (spec ยง8 E2E scenarios 3/4: "Manually fire C's init timer").
    pub fn simulate_init_timeout(&mut self, cell: &mut ActorCell, child: Address) {
        if let Some(record) = self.actors_map.get(&child) {
            cell.timers_mut().fire(record.init_request);
        }
        self.on_child_init_failed(cell, child);
    }

    fn on_child_initialized(&mut self, cell: &mut ActorCell, child: Address) {
        let Some(record) = self.actors_map.get_mut(&child) else { return };
        record.initialized = true;
        cell.timers_mut().cancel(record.init_request);
        cell.monitor().on_supervision(SupervisionEvent::ChildInitialized { supervisor: cell.id(), child, at: Utc::now() });

        if !self.synchronize_start || self.own_started {
            Self::start_child(cell, child, record);
        }
    }

    /// `shutdown_self` escalates on any child init failure, not just one
    /// observed while `cell.state()` is still `INITIALIZING` (spec ยง4.4's
    /// literal wording) — a root supervisor with no children yet reaches
    /// `OPERATIONAL` at construction, before `create_actor` ever runs (spec
    /// ยง6's "the new actor is inserted ... and an init request is enqueued"
    /// happens strictly after `finish()`), so a child's own init is always
    /// still outstanding by the time this fires regardless of the
    /// supervisor's own state. Gating on the supervisor's state would make
    /// `shutdown_self` a no-op for every child added after construction,
    /// which is the only way children are ever added in this crate (see
    /// DESIGN.md).
    fn on_child_init_failed(&mut self, cell: &mut ActorCell, child: Address) {
        // A real error response leaves the init timer still armed; a
        // simulated timeout already removed it via `TimerRegistry::fire`.
        // Cancelling here is a no-op (`Stale`) in the latter case.
        if let Some(record) = self.actors_map.get(&child) {
            cell.timers_mut().cancel(record.init_request);
        }
        if self.policy == SupervisorPolicy::ShutdownSelf {
            cell.monitor().on_supervision(SupervisionEvent::PolicyEscalation {
                supervisor: cell.id(),
                reason: ShutdownReason::ChildInitFailed,
                at: Utc::now(),
            });
            cell.assign_reason(ShutdownReason::ChildInitFailed);
            cell.begin_shutdown();
            return;
        }
        if let Some(record) = self.actors_map.get_mut(&child) {
            if record.shutdown == ShutdownState::None {
                let request_id = RequestId::new();
                cell.timers_mut().arm(request_id);
                cell.send(child, Request::new(request_id, cell.address(), ShutdownSignal { reason: ShutdownReason::ChildInitFailed }));
                record.shutdown = ShutdownState::Sent;
                record.shutdown_request = Some(request_id);
            }
        }
    }

    fn on_shutdown_trigger(&mut self, cell: &mut ActorCell, addr: Address, reason: ShutdownReason) {
        if addr == cell.address() {
            // Unreachable in practice: a root supervisor handles its own
            // trigger inline in `ActorCell::do_shutdown`, and a non-root
            // supervisor's trigger is addressed to its parent, not itself.
            // Kept for literal parity with spec ยง4.4's table.
            cell.do_shutdown(reason);
            return;
        }
        if let Some(record) = self.actors_map.get_mut(&addr) {
            if record.shutdown == ShutdownState::None {
                let request_id = RequestId::new();
                cell.timers_mut().arm(request_id);
                cell.send(addr, Request::new(request_id, cell.address(), ShutdownSignal { reason }));
                record.shutdown = ShutdownState::Sent;
                record.shutdown_request = Some(request_id);
            }
        }
    }

    fn on_child_shutdown_response(&mut self, cell: &mut ActorCell, child: Address, failed: bool) {
        let Some(record) = self.actors_map.get_mut(&child) else { return };
        record.shutdown = ShutdownState::Confirmed;
        if let Some(request_id) = record.shutdown_request.take() {
            cell.timers_mut().cancel(request_id);
        }
        if failed {
            cell.monitor().on_supervision(SupervisionEvent::ShutdownFailed { supervisor: cell.id(), child, at: Utc::now() });
        }
        cell.monitor().on_supervision(SupervisionEvent::ChildShutdown {
            supervisor: cell.id(),
            child,
            reason: cell.shutdown_reason().unwrap_or(ShutdownReason::SupervisorShutdown),
            at: Utc::now(),
        });

        let owner = record.handle.id();
        if self.address_mapping.has_subscriptions_for(owner) {
            for point in self.address_mapping.take_for_owner(owner) {
                cell.unsubscribe(&point, true);
            }
        } else {
            self.actors_map.remove(&child);
        }
    }
}

impl Plugin for ChildManagerPlugin {
    fn kind(&self) -> PluginKind {
        PluginKind::ChildManager
    }

    fn activate(&mut self, cell: &mut ActorCell) {
        self.reaction = self.reaction.union(ReactionBits::SHUTDOWN).union(ReactionBits::SUBSCRIPTION);
        cell.route_to_plugin::<Response<InitAck>>(PluginKind::ChildManager);
        cell.route_to_plugin::<Response<ShutdownAck>>(PluginKind::ChildManager);
        cell.route_to_plugin::<ShutdownTrigger>(PluginKind::ChildManager);
        cell.route_to_plugin::<Request<StateRequest>>(PluginKind::ChildManager);
        // Listens on its own starter address alongside the starter plugin
        // (#1 already minted it) so it learns when this supervisor itself
        // reaches OPERATIONAL, to release any deferred child starts (spec
        // ยง4.4 "Start synchronization").
        let starter_address = cell.starter_address();
        cell.route_to_plugin_at::<StartTrigger>(starter_address, PluginKind::ChildManager);
    }

    fn deactivate(&mut self, _cell: &mut ActorCell) {}

    fn reaction(&self) -> ReactionBits {
        self.reaction
    }

    fn reaction_on(&mut self, bits: ReactionBits) {
        self.reaction = self.reaction.union(bits);
    }

    fn reaction_off(&mut self, bits: ReactionBits) {
        self.reaction = self.reaction.remove(bits);
    }

    /// True iff every tracked child is initialized (spec ยง4.4 "handle_init
    /// returns true iff no child other than self is still initializing").
    fn handle_init(&mut self, _cell: &mut ActorCell) -> bool {
        self.actors_map.values().all(|r| r.initialized)
    }

    /// Send every not-yet-shutting-down child a `shutdown_request`, and
    /// report done once none remain (spec ยง4.4 `handle_shutdown`).
    fn handle_shutdown(&mut self, cell: &mut ActorCell) -> bool {
        for (&child, record) in self.actors_map.iter_mut() {
            if record.shutdown == ShutdownState::None {
                let request_id = RequestId::new();
                cell.timers_mut().arm(request_id);
                cell.send(child, Request::new(request_id, cell.address(), ShutdownSignal { reason: ShutdownReason::SupervisorShutdown }));
                record.shutdown = ShutdownState::Sent;
                record.shutdown_request = Some(request_id);
            }
        }
        self.actors_map.is_empty()
    }

    fn handle_subscription(&mut self, _cell: &mut ActorCell, point: &SubscriptionPoint) -> SubscriptionOutcome {
        if point.owner_tag() == OwnerTag::Supervisor {
            self.address_mapping.insert(point.clone());
            SubscriptionOutcome::Consumed
        } else {
            SubscriptionOutcome::Ignored
        }
    }

    fn handle_unsubscription(&mut self, _cell: &mut ActorCell, point: &SubscriptionPoint, _external: bool) -> bool {
        if !self.address_mapping.remove(point) {
            return false;
        }
        let owner = point.owner();
        if !self.address_mapping.has_subscriptions_for(owner) {
            if let Some(addr) = self
                .actors_map
                .iter()
                .find(|(_, r)| r.handle.id() == owner && r.shutdown == ShutdownState::Confirmed)
                .map(|(addr, _)| *addr)
            {
                self.actors_map.remove(&addr);
            }
        }
        true
    }

    fn receive(&mut self, cell: &mut ActorCell, envelope: &Envelope) {
        if let Some(response) = envelope.downcast::<Response<InitAck>>() {
            let child = response.origin();
            match response.outcome() {
                Ok(_) => self.on_child_initialized(cell, child),
                Err(_) => self.on_child_init_failed(cell, child),
            }
            return;
        }
        if let Some(response) = envelope.downcast::<Response<ShutdownAck>>() {
            let child = response.origin();
            let failed = response.outcome().is_err();
            self.on_child_shutdown_response(cell, child, failed);
            return;
        }
        if let Some(trigger) = envelope.downcast::<ShutdownTrigger>() {
            self.on_shutdown_trigger(cell, trigger.actor, trigger.reason);
            return;
        }
        if let Some(request) = envelope.downcast::<Request<StateRequest>>() {
            let subject = request.payload().subject;
            let state = self.actors_map.get(&subject).map(|r| r.handle.state());
            cell.send(request.origin(), Response::success(request.request_id(), cell.address(), StateResponse { state }));
            return;
        }
        if envelope.downcast::<StartTrigger>().is_some() {
            self.on_own_start(cell);
        }
    }

    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }
}
