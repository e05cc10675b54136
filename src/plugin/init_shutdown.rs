//! Init/shutdown plugin: the lifecycle plumbing that turns
//! `initialize_actor_t`/`shutdown_request_t` envelopes into state-machine
//! progress (spec ยง4.2 canonical order #5, ยง4.3, ยง4.4).

// Layer 1: Standard library imports
use std::any::Any;

// Layer 2: Third-party crate imports
// (none)

// Layer 3: Internal module imports
use crate::actor::cell::ActorCell;
use crate::message::{Envelope, Request};
use crate::plugin::{Plugin, PluginKind, ReactionBits};
use crate::protocol::{InitializeActor, ShutdownSignal};

/// Subscribes, on the actor's own address, for the two requests that drive
/// it through `NEW -> INITIALIZING` and into `SHUTTING_DOWN`. Carries no
/// reaction bits of its own — it never stalls the forward or reverse walk,
/// it only records the pending request and nudges the state machine; every
/// other plugin's INIT/SHUTDOWN bits are what actually gates progress.
#[derive(Debug, Default)]
pub struct InitShutdownPlugin;

impl InitShutdownPlugin {
    /// A fresh, inactive instance.
    pub fn new() -> Self {
        Self
    }
}

impl Plugin for InitShutdownPlugin {
    fn kind(&self) -> PluginKind {
        PluginKind::InitShutdown
    }

    fn activate(&mut self, cell: &mut ActorCell) {
        cell.route_to_plugin::<Request<InitializeActor>>(PluginKind::InitShutdown);
        cell.route_to_plugin::<Request<ShutdownSignal>>(PluginKind::InitShutdown);
    }

    fn deactivate(&mut self, _cell: &mut ActorCell) {}

    fn reaction(&self) -> ReactionBits {
        ReactionBits::NONE
    }

    fn reaction_on(&mut self, _bits: ReactionBits) {}
    fn reaction_off(&mut self, _bits: ReactionBits) {}

    fn receive(&mut self, cell: &mut ActorCell, envelope: &Envelope) {
        if let Some(request) = envelope.downcast::<Request<InitializeActor>>() {
            cell.set_init_request(request.request_id(), request.origin());
            cell.begin_init();
            return;
        }
        if let Some(request) = envelope.downcast::<Request<ShutdownSignal>>() {
            cell.assign_reason(request.payload().reason);
            cell.set_shutdown_request(request.request_id(), request.origin());
            cell.begin_shutdown();
        }
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::config::ActorConfig;
    use crate::actor::state::ActorState;
    use crate::error::ShutdownReason;
    use crate::locality::{Locality, LocalityDirectory};
    use crate::util::{ActorId, LocalityId, RequestId};
    use std::sync::{Arc, Weak};

    fn sample_cell() -> (Arc<parking_lot::Mutex<ActorCell>>, ()) {
        let locality_id = LocalityId::new();
        let locality = Arc::new(Locality::new(locality_id));
        let directory = Arc::new(LocalityDirectory::new());
        let cell = ActorCell::new(ActorId::new(), locality, directory, ActorConfig::default(), None);
        let shared = Arc::new(parking_lot::Mutex::new(cell));
        let weak: Weak<parking_lot::Mutex<ActorCell>> = Arc::downgrade(&shared);
        shared.lock().bind_self_ref(weak);
        (shared, ())
    }

    #[test]
    fn initialize_actor_request_begins_init_and_records_it() {
        let (shared, _) = sample_cell();
        let mut plugin = InitShutdownPlugin::new();
        let origin = Address_for_test(&shared);
        {
            let mut cell = shared.lock();
            plugin.activate(&mut cell);
            let request_id = RequestId::new();
            let envelope = Envelope::new(cell.address(), Request::new(request_id, origin, InitializeActor));
            plugin.receive(&mut cell, &envelope);
            assert_eq!(cell.state(), ActorState::Initializing);
        }
    }

    #[test]
    fn shutdown_signal_assigns_reason_and_begins_shutdown() {
        let (shared, _) = sample_cell();
        let mut plugin = InitShutdownPlugin::new();
        let origin = Address_for_test(&shared);
        let mut cell = shared.lock();
        plugin.activate(&mut cell);
        let request_id = RequestId::new();
        let envelope = Envelope::new(
            cell.address(),
            Request::new(request_id, origin, ShutdownSignal { reason: ShutdownReason::ChildDown }),
        );
        plugin.receive(&mut cell, &envelope);
        assert_eq!(cell.state(), ActorState::ShuttingDown);
        assert_eq!(cell.shutdown_reason(), Some(ShutdownReason::ChildDown));
    }

    #[allow(non_snake_case)]
    fn Address_for_test(shared: &Arc<parking_lot::Mutex<ActorCell>>) -> crate::util::Address {
        shared.lock().address()
    }
}
