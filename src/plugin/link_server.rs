//! Link server plugin: tracks linked clients, blocks its own shutdown while
//! any remain (spec ยง4.2 canonical order #8b, ยง4.5).

// Layer 1: Standard library imports
use std::any::Any;
use std::collections::HashSet;

// Layer 2: Third-party crate imports
// (none)

// Layer 3: Internal module imports
use crate::actor::cell::ActorCell;
use crate::actor::ActorState;
use crate::error::ErrorCode;
use crate::message::{Envelope, Request, Response};
use crate::plugin::{Plugin, PluginKind, ReactionBits};
use crate::protocol::{LinkAck, LinkRequest, StartTrigger, UnlinkAck, UnlinkNotify, UnlinkRequest};
use crate::util::{Address, RequestId};

/// Server side of cross-actor linkage (spec ยง4.5).
///
/// An `operational_only` link request arriving before this actor itself is
/// `OPERATIONAL` is queued rather than refused: spec ยง4.5 calls this "wait
/// until operational" from the client's perspective, so the server side
/// must hold the request open and answer it once it reaches `OPERATIONAL`,
/// not reject it outright (see DESIGN.md).
#[derive(Debug, Default)]
pub struct LinkServerPlugin {
    clients: HashSet<Address>,
    pending: Vec<(Address, RequestId)>,
    reaction: ReactionBits,
}

impl LinkServerPlugin {
    /// A fresh, inactive instance.
    pub fn new() -> Self {
        Self::default()
    }

    /// True while at least one client still considers itself linked here.
    pub fn has_clients(&self) -> bool {
        !self.clients.is_empty()
    }

    fn grant(&mut self, cell: &mut ActorCell, client: Address, request_id: RequestId) {
        self.clients.insert(client);
        cell.send(client, Response::success(request_id, cell.address(), LinkAck));
    }

    fn on_link_request(&mut self, cell: &mut ActorCell, request: &Request<LinkRequest>) {
        let client = request.origin();
        if self.clients.contains(&client) {
            let response: Response<LinkAck> = Response::failure(request.request_id(), cell.address(), ErrorCode::AlreadyLinked);
            cell.send(client, response);
            return;
        }
        if request.payload().operational_only && cell.state() != ActorState::Operational {
            self.pending.push((client, request.request_id()));
            return;
        }
        self.grant(cell, client, request.request_id());
    }

    /// Release every queued `operational_only` request once this actor
    /// itself reaches `OPERATIONAL` (spec ยง4.5 "wait until operational").
    fn on_own_operational(&mut self, cell: &mut ActorCell) {
        for (client, request_id) in std::mem::take(&mut self.pending) {
            self.grant(cell, client, request_id);
        }
    }

    fn on_unlink_request(&mut self, cell: &mut ActorCell, request: &Request<UnlinkRequest>) {
        let client = request.origin();
        self.clients.remove(&client);
        cell.send(client, Response::success(request.request_id(), cell.address(), UnlinkAck { address: cell.address() }));
        if self.clients.is_empty() && cell.state() == ActorState::ShuttingDown {
            cell.resume_pipeline();
        }
    }

    fn on_unlink_notify(&mut self, cell: &mut ActorCell, notify: &UnlinkNotify) {
        self.clients.remove(&notify.source);
        if self.clients.is_empty() && cell.state() == ActorState::ShuttingDown {
            cell.resume_pipeline();
        }
    }
}

impl Plugin for LinkServerPlugin {
    fn kind(&self) -> PluginKind {
        PluginKind::LinkServer
    }

    fn activate(&mut self, cell: &mut ActorCell) {
        self.reaction = self.reaction.union(ReactionBits::SHUTDOWN);
        cell.route_to_plugin::<Request<LinkRequest>>(PluginKind::LinkServer);
        cell.route_to_plugin::<Request<UnlinkRequest>>(PluginKind::LinkServer);
        cell.route_to_plugin::<UnlinkNotify>(PluginKind::LinkServer);
        // Listens on its own starter address alongside the starter plugin
        // so it learns when this actor itself reaches OPERATIONAL, to
        // release any queued `operational_only` link requests.
        let starter_address = cell.starter_address();
        cell.route_to_plugin_at::<StartTrigger>(starter_address, PluginKind::LinkServer);
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

    fn handle_shutdown(&mut self, cell: &mut ActorCell) -> bool {
        for (client, request_id) in std::mem::take(&mut self.pending) {
            let response: Response<LinkAck> = Response::failure(request_id, cell.address(), ErrorCode::ActorNotLinkable);
            cell.send(client, response);
        }
        self.clients.is_empty()
    }

    fn receive(&mut self, cell: &mut ActorCell, envelope: &Envelope) {
        if let Some(request) = envelope.downcast::<Request<LinkRequest>>() {
            self.on_link_request(cell, request);
            return;
        }
        if let Some(request) = envelope.downcast::<Request<UnlinkRequest>>() {
            self.on_unlink_request(cell, request);
            return;
        }
        if let Some(notify) = envelope.downcast::<UnlinkNotify>() {
            self.on_unlink_notify(cell, notify);
            return;
        }
        if envelope.downcast::<StartTrigger>().is_some() {
            self.on_own_operational(cell);
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
    use crate::locality::{Locality, LocalityDirectory};
    use crate::util::{ActorId, LocalityId, RequestId};
    use parking_lot::Mutex;
    use std::sync::Arc;

    fn sample_cell() -> Arc<Mutex<ActorCell>> {
        let locality = Arc::new(Locality::new(LocalityId::new()));
        let directory = Arc::new(LocalityDirectory::new());
        let cell = ActorCell::new(ActorId::new(), locality, directory, ActorConfig::default(), None);
        let shared = Arc::new(Mutex::new(cell));
        let weak = Arc::downgrade(&shared);
        shared.lock().bind_self_ref(weak);
        shared
    }

    #[test]
    fn link_request_registers_the_client() {
        let shared = sample_cell();
        let mut plugin = LinkServerPlugin::new();
        let mut cell = shared.lock();
        let client = cell.mint_address();
        let request = Request::new(RequestId::new(), client, LinkRequest { operational_only: false });
        plugin.on_link_request(&mut cell, &request);
        assert!(plugin.has_clients());
    }

    #[test]
    fn duplicate_link_request_is_refused() {
        let shared = sample_cell();
        let mut plugin = LinkServerPlugin::new();
        let mut cell = shared.lock();
        let client = cell.mint_address();
        let request = Request::new(RequestId::new(), client, LinkRequest { operational_only: false });
        plugin.on_link_request(&mut cell, &request);
        let second = Request::new(RequestId::new(), client, LinkRequest { operational_only: false });
        plugin.on_link_request(&mut cell, &second);
        assert_eq!(plugin.clients.len(), 1);
    }

    #[test]
    fn operational_only_request_is_queued_not_refused_before_operational() {
        let shared = sample_cell();
        let mut plugin = LinkServerPlugin::new();
        let mut cell = shared.lock();
        assert_ne!(cell.state(), ActorState::Operational);
        let client = cell.mint_address();
        let request = Request::new(RequestId::new(), client, LinkRequest { operational_only: true });
        plugin.on_link_request(&mut cell, &request);
        assert!(!plugin.has_clients());
        assert_eq!(plugin.pending.len(), 1);

        plugin.on_own_operational(&mut cell);
        assert!(plugin.has_clients());
        assert!(plugin.pending.is_empty());
    }

    #[test]
    fn handle_shutdown_blocks_while_clients_remain() {
        let shared = sample_cell();
        let mut plugin = LinkServerPlugin::new();
        let mut cell = shared.lock();
        let client = cell.mint_address();
        let request = Request::new(RequestId::new(), client, LinkRequest { operational_only: false });
        plugin.on_link_request(&mut cell, &request);
        assert!(!plugin.handle_shutdown(&mut cell));

        let unlink = UnlinkNotify { source: client };
        plugin.on_unlink_notify(&mut cell, &unlink);
        assert!(plugin.handle_shutdown(&mut cell));
    }
}
