//! `ActorCell`: the per-actor state every plugin is activated against.

// Layer 1: Standard library imports
use std::mem;
use std::sync::{Arc, Weak};

// Layer 2: Third-party crate imports
use chrono::Utc; // ยง3.2 MANDATORY

// Layer 3: Internal module imports
use crate::actor::config::ActorConfig;
use crate::actor::state::ActorState;
use crate::error::ShutdownReason;
use crate::locality::{Locality, LocalityDirectory};
use crate::message::{Envelope, Message, Response};
use crate::monitoring::events::LifecycleEvent;
use crate::monitoring::{NoopMonitor, RuntimeMonitor};
use crate::plugin::{Pipeline, PluginKind};
use crate::protocol::{InitAck, ShutdownAck};
use crate::subscription::{Handler, OwnerTag, SubscriptionContainer, SubscriptionPoint};
use crate::timer::TimerRegistry;
use crate::util::{ActorId, Address, RequestId};
use parking_lot::Mutex;
use std::any::TypeId;

/// An outstanding request this actor must eventually answer: who asked, and
/// under which `request_id` (spec ยง3 "Request/response pairing").
#[derive(Debug, Clone, Copy)]
struct PendingRequest {
    request_id: RequestId,
    origin: Address,
}

/// The state one actor carries through its lifecycle (spec ยง3 "ActorCell").
///
/// Plugins never hold a pointer back to their owning cell. Every method that
/// needs to run the pipeline `mem::take`s `pipeline` out of `self` first, so
/// the pipeline's hooks receive an ordinary, uniquely-borrowed `&mut
/// ActorCell` — the cell just happens to be pipeline-less for the duration
/// of the call. This is the sound alternative to a raw-pointer back
/// reference (see DESIGN.md).
pub struct ActorCell {
    id: ActorId,
    address: Address,
    supervisor_address: Option<Address>,
    locality: Arc<Locality>,
    directory: Arc<LocalityDirectory>,
    config: ActorConfig,
    state: ActorState,
    pipeline: Pipeline,
    subscriptions: SubscriptionContainer,
    timers: TimerRegistry,
    init_request: Option<PendingRequest>,
    shutdown_request: Option<PendingRequest>,
    shutdown_reason: Option<ShutdownReason>,
    monitor: Arc<dyn RuntimeMonitor>,
    /// A dedicated address the starter plugin (C10) waits on for its start
    /// trigger, minted by the address-maker plugin (spec ยง4.6 "each actor
    /// self-addresses its starter").
    starter_address: Option<Address>,
    /// Non-owning back reference to the `Arc<Mutex<ActorCell>>` wrapping
    /// this cell, bound once by the builder that constructs it (spec ยง9
    /// "back-pointers from plugin to actor"). Plugins that register a
    /// subscription whose handler must re-enter the pipeline once an
    /// envelope is delivered (the only way a free-standing `Handler`
    /// closure can reach back into its own actor) capture this weak
    /// reference rather than a raw pointer.
    self_ref: Weak<Mutex<ActorCell>>,
    /// Resource counter guarding shutdown progress (spec ยง4.3 "Resource
    /// guard"): while non-zero, `shutdown_continue` keeps re-stalling
    /// regardless of plugin completion.
    resource_count: u32,
}

impl ActorCell {
    /// Construct a new cell in state `NEW`, with an empty pipeline. A fresh
    /// primary address is minted immediately, bound to `locality`'s id — an
    /// actor's identity exists the moment it is constructed, before any
    /// plugin has activated (spec ยง3, ยง4.1).
    pub fn new(
        id: ActorId,
        locality: Arc<Locality>,
        directory: Arc<LocalityDirectory>,
        config: ActorConfig,
        supervisor_address: Option<Address>,
    ) -> Self {
        let address = Address::new(locality.id());
        Self {
            id,
            address,
            supervisor_address,
            locality,
            directory,
            config,
            state: ActorState::New,
            pipeline: Pipeline::default(),
            subscriptions: SubscriptionContainer::new(),
            timers: TimerRegistry::new(),
            init_request: None,
            shutdown_request: None,
            shutdown_reason: None,
            monitor: Arc::new(NoopMonitor),
            starter_address: None,
            self_ref: Weak::new(),
            resource_count: 0,
        }
    }

    /// Bind the weak back-reference to the `Arc<Mutex<ActorCell>>` that
    /// wraps this cell. Called once by the builder immediately after
    /// construction, before `install_pipeline`/`activate_plugins` run.
    pub fn bind_self_ref(&mut self, self_ref: Weak<Mutex<ActorCell>>) {
        self.self_ref = self_ref;
    }

    /// A clone of this cell's weak back-reference, for handler closures
    /// that must re-enter the pipeline when their envelope is delivered.
    pub fn self_ref(&self) -> Weak<Mutex<ActorCell>> {
        self.self_ref.clone()
    }

    /// Mint a fresh address bound to this actor's own locality, not yet
    /// registered in any directory (spec ยง3 "an actor may own more than one
    /// address").
    pub fn mint_address(&self) -> Address {
        Address::new(self.locality.id())
    }

    /// The starter plugin's dedicated address, once the address-maker
    /// plugin has minted it.
    pub fn starter_address(&self) -> Option<Address> {
        self.starter_address
    }

    /// Record the starter plugin's dedicated address (spec ยง4.6).
    pub fn set_starter_address(&mut self, address: Address) {
        self.starter_address = Some(address);
    }

    /// Attach a monitor sink, replacing the default no-op one.
    pub fn with_monitor(mut self, monitor: Arc<dyn RuntimeMonitor>) -> Self {
        self.monitor = monitor;
        self
    }

    /// Install the plugin pipeline. Called once, before `activate_plugins`.
    pub fn install_pipeline(&mut self, pipeline: Pipeline) {
        self.pipeline = pipeline;
    }

    /// This actor's stable identity.
    pub fn id(&self) -> ActorId {
        self.id
    }

    /// This actor's primary address.
    pub fn address(&self) -> Address {
        self.address
    }

    /// The supervisor's address, if this actor has one (root supervisors do not).
    pub fn supervisor_address(&self) -> Option<Address> {
        self.supervisor_address
    }

    /// This actor's current lifecycle state.
    pub fn state(&self) -> ActorState {
        self.state
    }

    /// The locality this actor's own address is bound to.
    pub fn locality(&self) -> &Arc<Locality> {
        &self.locality
    }

    /// The cross-locality address directory.
    pub fn directory(&self) -> &Arc<LocalityDirectory> {
        &self.directory
    }

    /// This actor's validated configuration.
    pub fn config(&self) -> &ActorConfig {
        &self.config
    }

    /// The monitor sink events are reported to.
    pub fn monitor(&self) -> &Arc<dyn RuntimeMonitor> {
        &self.monitor
    }

    /// The set of subscription points this actor owns.
    pub fn subscriptions(&self) -> &SubscriptionContainer {
        &self.subscriptions
    }

    /// Mutable access to the subscription container, for plugins that
    /// create or remove points on this actor's behalf.
    pub fn subscriptions_mut(&mut self) -> &mut SubscriptionContainer {
        &mut self.subscriptions
    }

    /// The timer registry guarding this actor's outstanding requests.
    pub fn timers_mut(&mut self) -> &mut TimerRegistry {
        &mut self.timers
    }

    /// The reason given for this actor's shutdown, once one has been assigned.
    pub fn shutdown_reason(&self) -> Option<ShutdownReason> {
        self.shutdown_reason
    }

    /// Set the reason this actor is shutting down, first-wins (spec ยง3
    /// `assign_reason`/original `assing_shutdown_reason`).
    pub fn assign_reason(&mut self, reason: ShutdownReason) {
        if self.shutdown_reason.is_none() {
            self.shutdown_reason = Some(reason);
        }
    }

    /// Move to `to`, emitting a [`LifecycleEvent`]. Progress is expected to
    /// be monotone except for the permitted `INITIALIZING -> SHUTTING_DOWN`
    /// abort path; callers are responsible for only calling this on a valid
    /// edge (spec ยง3).
    fn transition(&mut self, to: ActorState) {
        let from = self.state;
        if from == to {
            return;
        }
        self.state = to;
        self.monitor.on_lifecycle(LifecycleEvent { actor: self.id, from, to, at: Utc::now() });
    }

    /// Record that `request_id`/`origin` is waiting on this actor's init to finish.
    pub fn set_init_request(&mut self, request_id: RequestId, origin: Address) {
        self.init_request = Some(PendingRequest { request_id, origin });
    }

    /// Record that `request_id`/`origin` is waiting on this actor's shutdown to finish.
    pub fn set_shutdown_request(&mut self, request_id: RequestId, origin: Address) {
        self.shutdown_request = Some(PendingRequest { request_id, origin });
    }

    /// Enqueue `payload` addressed to `destination`, resolving the owning
    /// locality through the directory (or the local one, if `destination`
    /// happens to share it).
    pub fn send<M: Message + Send + Sync>(&self, destination: Address, payload: M) {
        let envelope = Envelope::new(destination, payload);
        if destination.locality() == self.locality.id() {
            self.locality.enqueue(envelope);
        } else if let Some(target) = self.directory.resolve(destination) {
            target.enqueue(envelope);
        }
    }

    fn reply_success<M: Message + Send + Sync>(&self, request_id: RequestId, origin: Address, payload: M) {
        self.send(origin, Response::success(request_id, self.address, payload));
    }

    /// Register a subscription point for payload type `M` at `address`
    /// (defaulting to this actor's own address), and notify every
    /// SUBSCRIPTION-reacting plugin of the new point (spec ยง4.2, ยง4.7).
    ///
    /// Registration always goes through the directory rather than the
    /// local locality directly whenever `address` is not this actor's own
    /// locality — this is the foreigners-support forwarding path (spec
    /// ยง4.7), simplified here to a direct cross-locality registration
    /// rather than an envelope round trip, since both localities are
    /// reachable in-process.
    pub fn subscribe<M: crate::message::Message>(
        &mut self,
        address: Option<Address>,
        owner_tag: OwnerTag,
        handler: Arc<Mutex<dyn Handler>>,
    ) -> SubscriptionPoint {
        let address = address.unwrap_or(self.address);
        let point = SubscriptionPoint::new(address, TypeId::of::<M>(), self.id, owner_tag, handler);

        if address.locality() == self.locality.id() {
            self.locality.register_subscription(point.clone());
        } else if let Some(target) = self.directory.resolve(address) {
            target.register_subscription(point.clone());
        }

        if owner_tag == OwnerTag::Plain {
            self.subscriptions.insert(point.clone());
        }

        self.monitor.on_subscription(crate::monitoring::events::SubscriptionEvent::Added {
            owner: self.id,
            address,
            at: Utc::now(),
        });

        self.dispatch_subscription(&point);
        point
    }

    /// Remove `point` from the delivery index and this actor's own
    /// container (if it was owned here), and notify plugins (spec ยง4.2,
    /// ยง4.7). `external` distinguishes an unsubscription requested by a
    /// peer locality from one this actor initiated itself.
    pub fn unsubscribe(&mut self, point: &SubscriptionPoint, external: bool) -> bool {
        let address = point.address();
        if address.locality() == self.locality.id() {
            self.locality.unregister_subscription(point);
        } else if let Some(target) = self.directory.resolve(address) {
            target.unregister_subscription(point);
        }
        self.subscriptions.remove(point);

        self.monitor.on_subscription(crate::monitoring::events::SubscriptionEvent::Removed {
            owner: self.id,
            address,
            external,
            at: Utc::now(),
        });

        self.dispatch_unsubscription(point, external)
    }

    /// Remove every subscription point this actor owns, directly, without
    /// re-entering the plugin pipeline (unlike [`ActorCell::unsubscribe`]).
    /// Used by the lifetime plugin's `handle_shutdown`, which itself runs
    /// from inside a pipeline traversal: the pipeline has already been
    /// `mem::take`n out of `self` by the caller, so a dispatching
    /// `unsubscribe` call here would silently see an empty pipeline rather
    /// than notify sibling plugins (spec ยง4.7 "container is empty in
    /// SHUT_DOWN" is still upheld; only the subscription-reaction broadcast
    /// is skipped for this bulk teardown path).
    pub fn drain_subscriptions(&mut self) {
        for point in self.subscriptions.drain_all() {
            let address = point.address();
            if address.locality() == self.locality.id() {
                self.locality.unregister_subscription(&point);
            } else if let Some(target) = self.directory.resolve(address) {
                target.unregister_subscription(&point);
            }
            self.monitor.on_subscription(crate::monitoring::events::SubscriptionEvent::Removed {
                owner: self.id,
                address,
                external: false,
                at: Utc::now(),
            });
        }
    }

    /// Run every installed plugin's `activate` hook, in forward pipeline
    /// order (spec ยง4.3 `activate_plugins`).
    pub fn activate_plugins(&mut self) {
        let mut pipeline = mem::take(&mut self.pipeline);
        pipeline.activate_all(self);
        self.pipeline = pipeline;
    }

    /// Locate the single plugin of concrete type `P`, if installed, and run
    /// `f` against it (spec ยง9 `with_casted`).
    pub fn with_plugin<P: crate::plugin::Plugin + 'static, F: FnOnce(&mut P)>(&mut self, f: F) {
        let mut pipeline = mem::take(&mut self.pipeline);
        pipeline.with_casted::<P, F>(f);
        self.pipeline = pipeline;
    }

    /// Route an internal-protocol envelope to the plugin identified by
    /// `kind`, then re-attempt whichever lifecycle walk is in progress.
    ///
    /// The resume happens here, once, after the pipeline has been restored
    /// — not inside the plugin's own `receive()` — because `self.pipeline`
    /// is `mem::take`n for the duration of this call. A plugin that called
    /// [`ActorCell::resume_pipeline`] on itself would reach back into this
    /// same cell while its pipeline field is still the empty placeholder,
    /// vacuously "completing" a walk that never actually ran.
    pub fn dispatch_to_plugin(&mut self, kind: PluginKind, envelope: &Envelope) {
        let mut pipeline = mem::take(&mut self.pipeline);
        pipeline.receive(kind, self, envelope);
        self.pipeline = pipeline;
        self.resume_pipeline();
    }

    /// Notify every SUBSCRIPTION-reacting plugin, in reverse pipeline
    /// order, that `point` was just created (spec ยง4.2).
    pub fn dispatch_subscription(&mut self, point: &crate::subscription::SubscriptionPoint) {
        let mut pipeline = mem::take(&mut self.pipeline);
        pipeline.dispatch_subscription(self, point);
        self.pipeline = pipeline;
    }

    /// Notify plugins, in reverse pipeline order, that `point` is being
    /// unsubscribed; stops at the first plugin that claims it (spec ยง4.2).
    /// Resumes whichever lifecycle walk is in progress once the pipeline is
    /// back in place, for the same reason [`ActorCell::dispatch_to_plugin`]
    /// does.
    pub fn dispatch_unsubscription(&mut self, point: &crate::subscription::SubscriptionPoint, external: bool) -> bool {
        let mut pipeline = mem::take(&mut self.pipeline);
        let handled = pipeline.dispatch_unsubscription(self, point, external);
        self.pipeline = pipeline;
        self.resume_pipeline();
        handled
    }

    /// Locate the single plugin of concrete type `P`, if installed, and run
    /// `f` against it with simultaneous access to this cell (spec ยง9
    /// `access<Tag>` capability record): unlike [`ActorCell::with_plugin`],
    /// `f` also receives `&mut ActorCell` so the plugin can send envelopes,
    /// arm timers, or touch any other cell state while mutating itself.
    ///
    /// Re-attempts the in-progress lifecycle walk once `f` returns and the
    /// pipeline is back in place, for the same reason
    /// [`ActorCell::dispatch_to_plugin`] does: `f` itself must not call
    /// [`ActorCell::resume_pipeline`] while still nested in here, since the
    /// pipeline it would walk is the empty placeholder left by this call's
    /// own `mem::take`.
    pub fn with_plugin_cell<P: crate::plugin::Plugin + 'static, F: FnOnce(&mut P, &mut ActorCell)>(&mut self, f: F) {
        let mut pipeline = mem::take(&mut self.pipeline);
        pipeline.with_casted_cell::<P, F>(self, f);
        self.pipeline = pipeline;
        self.resume_pipeline();
    }

    /// Register a subscription, on this actor's own address, that re-enters
    /// the plugin pipeline whenever an envelope of type `M` is delivered
    /// (spec ยง9: the sound replacement for a raw back-pointer). The
    /// registered handler upgrades [`ActorCell::self_ref`] and, if the cell
    /// is still alive, dispatches the envelope to the plugin identified by
    /// `kind` and then calls [`ActorCell::resume_pipeline`].
    pub fn route_to_plugin<M: Message + Send + Sync>(&mut self, kind: PluginKind) {
        self.route_to_plugin_at::<M>(None, kind);
    }

    /// As [`ActorCell::route_to_plugin`], but at an explicit `address`
    /// rather than this actor's own primary one — used by the starter
    /// plugin, which waits on its dedicated address (spec ยง4.6).
    pub fn route_to_plugin_at<M: Message + Send + Sync>(&mut self, address: Option<Address>, kind: PluginKind) {
        let weak = self.self_ref.clone();
        let handler: Arc<Mutex<dyn Handler>> = Arc::new(Mutex::new(move |envelope: &Envelope| {
            if let Some(strong) = weak.upgrade() {
                let mut cell = strong.lock();
                cell.dispatch_to_plugin(kind, envelope);
            }
        }));
        self.subscribe::<M>(address, OwnerTag::Plain, handler);
    }

    /// Re-attempt whichever lifecycle walk this actor is currently in the
    /// middle of. Safe to call after any event a plugin might have been
    /// waiting on (spec control flow: "Lifecycle progress is re-attempted
    /// by calling init_continue/shutdown_continue whenever an event that a
    /// plugin was waiting on arrives"). A no-op once SHUT_DOWN.
    pub fn resume_pipeline(&mut self) {
        if self.state.is_initializing() {
            self.init_continue();
        } else if self.state == ActorState::ShuttingDown {
            self.shutdown_continue();
        }
    }

    /// Move this actor into `SHUTTING_DOWN` if it is not already there or
    /// past it (spec ยง4.4 `shutdown_request_t` handling: the transition a
    /// supervisor drives on a child directly, as opposed to
    /// [`ActorCell::do_shutdown`]'s self-initiated trigger path).
    pub fn begin_shutdown(&mut self) {
        if self.state < ActorState::ShuttingDown {
            self.transition(ActorState::ShuttingDown);
        }
    }

    /// Acquire one resource unit, blocking shutdown progress while held
    /// (spec ยง4.3 "Resource guard").
    pub fn acquire_resource(&mut self) {
        self.resource_count += 1;
    }

    /// Release one resource unit. Once the count reaches zero, re-attempts
    /// `shutdown_continue` (spec ยง4.3).
    pub fn release_resource(&mut self) {
        self.resource_count = self.resource_count.saturating_sub(1);
        if self.resource_count == 0 && self.state == ActorState::ShuttingDown {
            self.shutdown_continue();
        }
    }

    /// True while a resource unit is still outstanding.
    pub fn has_outstanding_resources(&self) -> bool {
        self.resource_count > 0
    }

    /// Advance the forward init walk. Transitions to `INITIALIZED` and
    /// replies to the pending init request once every plugin's INIT bit has
    /// cleared (spec ยง4.2, ยง4.3).
    pub fn init_continue(&mut self) {
        let mut pipeline = mem::take(&mut self.pipeline);
        let finished = pipeline.drive_init(self);
        self.pipeline = pipeline;
        if finished {
            self.init_finish();
        }
    }

    /// Advance the reverse shutdown walk. Transitions to `SHUT_DOWN` and
    /// replies to the pending shutdown request once every plugin has
    /// deactivated (spec ยง4.2, ยง4.3).
    pub fn shutdown_continue(&mut self) {
        if self.resource_count > 0 {
            return;
        }
        let mut pipeline = mem::take(&mut self.pipeline);
        let finished = pipeline.drive_shutdown(self);
        self.pipeline = pipeline;
        if finished {
            self.shutdown_finish();
        }
    }

    fn init_finish(&mut self) {
        self.transition(ActorState::Initialized);
        if let Some(pending) = self.init_request.take() {
            self.reply_success(pending.request_id, pending.origin, InitAck);
        }
    }

    fn shutdown_finish(&mut self) {
        debug_assert!(self.timers.is_empty(), "timers must be drained before SHUT_DOWN");
        debug_assert!(self.subscriptions.is_empty(), "subscriptions must be drained before SHUT_DOWN");
        self.transition(ActorState::ShutDown);
        if let Some(pending) = self.shutdown_request.take() {
            self.reply_success(pending.request_id, pending.origin, ShutdownAck);
        }
    }

    /// The actor is entering (or already in) `INITIALIZING`. Called by the
    /// init/shutdown plugin on receiving `InitializeActor`.
    pub fn begin_init(&mut self) {
        if self.state == ActorState::New {
            self.transition(ActorState::Initializing);
        }
    }

    /// The actor is entering (or already in) `OPERATIONAL`. Called by the
    /// starter plugin once the start trigger fires.
    pub fn begin_operational(&mut self) {
        if self.state == ActorState::Initialized {
            self.transition(ActorState::Operational);
        }
    }

    /// Request this actor shut down for `reason`. Idempotent: once the
    /// actor is at or past `SHUTTING_DOWN`, later calls are no-ops (spec
    /// ยง3's `do_shutdown` clarification — the transition itself happens
    /// only when the resulting trigger is processed, not here).
    ///
    /// A root supervisor (no `supervisor_address`) handles its own trigger
    /// inline rather than forwarding it to a non-existent parent (spec ยง3).
    pub fn do_shutdown(&mut self, reason: ShutdownReason) {
        if self.state >= ActorState::ShuttingDown {
            return;
        }
        self.assign_reason(reason);
        match self.supervisor_address {
            Some(supervisor) => {
                self.send(supervisor, crate::protocol::ShutdownTrigger { actor: self.address, reason });
            }
            None => {
                self.transition(ActorState::ShuttingDown);
                self.shutdown_continue();
            }
        }
    }
}
