//! Link client plugin: `servers_map: address -> {callback, state}` (spec
//! ยง4.2 canonical order #8a, ยง4.5 "Link Client / Link Server").

// Layer 1: Standard library imports
use std::any::Any;
use std::collections::HashMap;

// Layer 2: Third-party crate imports
// (none)

// Layer 3: Internal module imports
use crate::actor::cell::ActorCell;
use crate::error::{ErrorCode, ShutdownReason};
use crate::message::{Envelope, Request, Response};
use crate::plugin::{Plugin, PluginKind, ReactionBits};
use crate::protocol::{LinkAck, LinkRequest, UnlinkNotify};
use crate::util::{Address, RequestId};

/// Told the link's outcome: `Ok(())` once OPERATIONAL, `Err(code)` if the
/// server refused or the request otherwise failed.
pub type LinkCallback = Box<dyn FnMut(Address, Result<(), ErrorCode>) + Send>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LinkState {
    Linking,
    Operational,
}

struct ServerRecord {
    callback: LinkCallback,
    state: LinkState,
    request_id: RequestId,
}

/// Client side of cross-actor linkage: issues `link_request_t`, blocks init
/// while any server is still LINKING (spec ยง4.5).
#[derive(Default)]
pub struct LinkClientPlugin {
    servers_map: HashMap<Address, ServerRecord>,
    reaction: ReactionBits,
}

impl LinkClientPlugin {
    /// A fresh, inactive instance.
    pub fn new() -> Self {
        Self::default()
    }

    /// Link to `server`, invoking `callback` once the link resolves (spec
    /// ยง4.5 `link(address, operational_only, callback)`).
    pub fn link(&mut self, cell: &mut ActorCell, server: Address, operational_only: bool, callback: LinkCallback) {
        let request_id = RequestId::new();
        cell.timers_mut().arm(request_id);
        cell.send(server, Request::new(request_id, cell.address(), LinkRequest { operational_only }));
        self.servers_map.insert(
            server,
            ServerRecord {
                callback,
                state: LinkState::Linking,
                request_id,
            },
        );
        self.reaction = self.reaction.union(ReactionBits::INIT);
    }

    fn on_link_response(&mut self, cell: &mut ActorCell, server: Address, outcome: Result<(), ErrorCode>) {
        let Some(mut record) = self.servers_map.remove(&server) else { return };
        cell.timers_mut().cancel(record.request_id);
        match outcome {
            Ok(()) => {
                record.state = LinkState::Operational;
                (record.callback)(server, Ok(()));
                self.servers_map.insert(server, record);
                if cell.state().is_initializing() {
                    cell.resume_pipeline();
                }
            }
            Err(code) => {
                (record.callback)(server, Err(code));
                if cell.state().is_initializing() {
                    cell.assign_reason(ShutdownReason::LinkFailed);
                    cell.begin_shutdown();
                    cell.resume_pipeline();
                } else if cell.state() == crate::actor::ActorState::ShuttingDown {
                    cell.resume_pipeline();
                }
            }
        }
    }
}

impl Plugin for LinkClientPlugin {
    fn kind(&self) -> PluginKind {
        PluginKind::LinkClient
    }

    fn activate(&mut self, cell: &mut ActorCell) {
        self.reaction = self.reaction.union(ReactionBits::SHUTDOWN);
        cell.route_to_plugin::<Response<LinkAck>>(PluginKind::LinkClient);
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

    /// Blocks while any server is still LINKING (spec ยง4.5).
    fn handle_init(&mut self, _cell: &mut ActorCell) -> bool {
        !self.servers_map.values().any(|r| r.state == LinkState::Linking)
    }

    /// Notify every linked server we are disconnecting, then let shutdown
    /// proceed — `unlink_notify_t` is fire-and-forget, so this never stalls
    /// (spec ยง4.5 "broadcast unlink_notify_t to every server and drop the
    /// records; when empty, release the shutdown stall").
    fn handle_shutdown(&mut self, cell: &mut ActorCell) -> bool {
        for server in self.servers_map.keys().copied().collect::<Vec<_>>() {
            cell.send(server, UnlinkNotify { source: cell.address() });
        }
        self.servers_map.clear();
        true
    }

    fn receive(&mut self, cell: &mut ActorCell, envelope: &Envelope) {
        if let Some(response) = envelope.downcast::<Response<LinkAck>>() {
            // `response.origin()` is the replying server's own address — the
            // server stamps it in, symmetrically with how a child stamps
            // its own address replying to `initialize_actor_t` (spec ยง3
            // request/response pairing).
            let server = response.origin();
            let outcome = response.outcome().map(|_| ());
            self.on_link_response(cell, server, outcome);
        }
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::actor::config::ActorConfig;
    use crate::locality::{Locality, LocalityDirectory};
    use crate::util::{ActorId, LocalityId};
    use parking_lot::Mutex;
    use std::sync::atomic::{AtomicU32, Ordering};
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
    fn handle_init_blocks_while_linking() {
        let shared = sample_cell();
        let mut plugin = LinkClientPlugin::new();
        let mut cell = shared.lock();
        let server = cell.mint_address();
        plugin.link(&mut cell, server, false, Box::new(|_, _| {}));
        assert!(!plugin.handle_init(&mut cell));
    }

    #[test]
    fn successful_link_response_unblocks_init() {
        let shared = sample_cell();
        let mut plugin = LinkClientPlugin::new();
        let mut cell = shared.lock();
        let server = cell.mint_address();
        let resolved = Arc::new(AtomicU32::new(0));
        let resolved_clone = Arc::clone(&resolved);
        plugin.link(
            &mut cell,
            server,
            false,
            Box::new(move |_, outcome| {
                if outcome.is_ok() {
                    resolved_clone.fetch_add(1, Ordering::SeqCst);
                }
            }),
        );
        let request_id = plugin.servers_map.values().next().unwrap().request_id;
        let response = Envelope::new(cell.address(), Response::success(request_id, server, LinkAck));
        plugin.receive(&mut cell, &response);
        assert!(plugin.handle_init(&mut cell));
        assert_eq!(resolved.load(Ordering::SeqCst), 1);
    }
}
