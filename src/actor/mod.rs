//! The actor lifecycle engine: state machine, per-actor cell, and the
//! handle user code actually holds (spec C7, ยง6 External Interfaces).

pub mod cell;
pub mod config;
pub mod state;

pub use cell::ActorCell;
pub use config::ActorConfig;
pub use state::ActorState;

// Layer 1: Standard library imports
use std::sync::Arc;

// Layer 2: Third-party crate imports
use parking_lot::Mutex;

// Layer 3: Internal module imports
use crate::error::{ErrorCode, ShutdownReason};
use crate::message::{Envelope, Message, Request, Response};
use crate::protocol::ShutdownSignal;
use crate::subscription::{Handler, OwnerTag, SubscriptionPoint};
use crate::util::{ActorId, Address, RequestId};

/// Shared ownership of one actor's cell, reachable from subscription
/// handlers registered on its behalf (spec ยง9 "Supervisor↔child ownership":
/// children never hold a pointer back to their supervisor, but the cell
/// itself must be reachable from the handler closures its own plugins
/// register).
pub type SharedCell = Arc<Mutex<ActorCell>>;

/// The handle user code and plugins hold to address one actor (spec ยง6).
///
/// This is the Rust expression of `ref<T>` from spec ยง6: rather than being
/// generic over a user-defined behavior trait (out of scope per spec ยง1
/// "handler-to-callback binding machinery"), `ActorHandle` exposes the
/// lifecycle/messaging primitives and leaves all actor-specific behavior to
/// closures registered through [`ActorHandle::subscribe`].
#[derive(Clone)]
pub struct ActorHandle {
    cell: SharedCell,
}

impl ActorHandle {
    /// Wrap an already-constructed cell.
    pub fn new(cell: SharedCell) -> Self {
        Self { cell }
    }

    /// Shared access to the underlying cell, for plugin/internal use.
    pub fn cell(&self) -> &SharedCell {
        &self.cell
    }

    /// This actor's stable identity.
    pub fn id(&self) -> ActorId {
        self.cell.lock().id()
    }

    /// This actor's primary address.
    pub fn address(&self) -> Address {
        self.cell.lock().address()
    }

    /// This actor's dedicated starter address, once the address-maker
    /// plugin has minted one (spec ยง4.6). `start_actor_t` must be sent
    /// here, not to [`ActorHandle::address`] — the starter plugin only
    /// listens on its own dedicated address.
    pub fn starter_address(&self) -> Option<Address> {
        self.cell.lock().starter_address()
    }

    /// This actor's current lifecycle state.
    pub fn state(&self) -> ActorState {
        self.cell.lock().state()
    }

    /// Enqueue `payload` addressed to `destination` (spec ยง6 `actor.send`).
    pub fn send<M: Message + Send + Sync>(&self, destination: Address, payload: M) {
        self.cell.lock().send(destination, payload);
    }

    /// Send a request, arming a timer for `timeout` keyed by the freshly
    /// minted `request_id` (spec ยง6 `actor.request(...).send(timeout)`).
    /// Returns the `request_id` so the caller can later match the response
    /// or the timeout firing against it.
    pub fn request<M: Message + Send + Sync>(&self, destination: Address, payload: M, timeout: std::time::Duration) -> RequestId {
        let request_id = RequestId::new();
        let mut cell = self.cell.lock();
        let origin = cell.address();
        cell.send(destination, Request::new(request_id, origin, payload));
        cell.timers_mut().arm(request_id);
        let _ = timeout; // concrete timer-driver integration is an external collaborator (spec ยง1)
        request_id
    }

    /// Reply to `request` with a successful payload, using its embedded
    /// `request_id` and `origin` (spec ยง6 `actor.reply_to`).
    pub fn reply_to<M: Message, R: Message + Send + Sync>(&self, request: &Request<M>, payload: R) {
        let cell = self.cell.lock();
        let response = Response::success(request.request_id(), cell.address(), payload);
        cell.send(request.origin(), response);
    }

    /// Reply to `request` with an [`ErrorCode`] (spec ยง6 `actor.reply_with_error`).
    pub fn reply_with_error<M: Message, R: Message + Send + Sync>(&self, request: &Request<M>, code: ErrorCode) {
        let cell = self.cell.lock();
        let response: Response<R> = Response::failure(request.request_id(), cell.address(), code);
        cell.send(request.origin(), response);
    }

    /// Register a subscription point reacting to payload type `M`, at
    /// `address` (defaulting to this actor's own) (spec ยง6 `actor.subscribe`).
    pub fn subscribe<M, F>(&self, address: Option<Address>, handler: F) -> SubscriptionPoint
    where
        M: Message,
        F: FnMut(&Envelope) + Send + 'static,
    {
        let handler: Arc<Mutex<dyn Handler>> = Arc::new(Mutex::new(handler));
        self.cell.lock().subscribe::<M>(address, OwnerTag::Plain, handler)
    }

    /// Remove a previously registered point (spec ยง4.7 lifetime plugin).
    pub fn unsubscribe(&self, point: &SubscriptionPoint) -> bool {
        self.cell.lock().unsubscribe(point, false)
    }

    /// Request this actor shut down for `reason` (spec ยง6 `actor.do_shutdown`).
    ///
    /// `error` in spec ยง6's signature is the shutdown reason, not a Rust
    /// `Result` — `ShutdownReason::Normal` is the "no error" case.
    pub fn do_shutdown(&self, reason: ShutdownReason) {
        self.cell.lock().do_shutdown(reason);
    }

    /// Deliver the internal `shutdown_signal` request directly, bypassing
    /// the supervisor round trip — used by the init/shutdown plugin once
    /// the child manager (or a root supervisor) has decided to actually
    /// shut this actor down (spec ยง4.4 `shutdown_request_t`).
    pub fn signal_shutdown(&self, request_id: RequestId, origin: Address, reason: ShutdownReason) {
        let envelope = Envelope::new(self.address(), Request::new(request_id, origin, ShutdownSignal { reason }));
        let mut cell = self.cell.lock();
        cell.dispatch_to_plugin(crate::plugin::PluginKind::InitShutdown, &envelope);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locality::{Locality, LocalityDirectory};
    use crate::util::LocalityId;

    fn sample_handle() -> ActorHandle {
        let locality_id = LocalityId::new();
        let locality = Arc::new(Locality::new(locality_id));
        let directory = Arc::new(LocalityDirectory::new());
        let cell = ActorCell::new(ActorId::new(), locality, directory, ActorConfig::default(), None);
        ActorHandle::new(Arc::new(Mutex::new(cell)))
    }

    #[derive(Debug, Clone)]
    struct Ping;
    impl Message for Ping {
        const MESSAGE_TYPE: &'static str = "ping";
    }

    #[test]
    fn subscribe_then_send_delivers_locally() {
        let handle = sample_handle();
        let counter = Arc::new(std::sync::atomic::AtomicU32::new(0));
        let counter_clone = Arc::clone(&counter);
        handle.subscribe::<Ping, _>(None, move |_env| {
            counter_clone.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        });
        let address = handle.address();
        handle.send(address, Ping);
        handle.cell().lock().locality().do_process();
        assert_eq!(counter.load(std::sync::atomic::Ordering::SeqCst), 1);
    }

    #[test]
    fn do_shutdown_on_root_reaches_shut_down() {
        let handle = sample_handle();
        handle.do_shutdown(ShutdownReason::Normal);
        assert_eq!(handle.state(), ActorState::ShutDown);
    }
}
