//! Starter plugin: the terminal pipeline slot that turns a `start_trigger_t`
//! into OPERATIONAL (spec ยง4.2 canonical order #9, ยง4.6).

// Layer 1: Standard library imports
use std::any::Any;

// Layer 2: Third-party crate imports
// (none)

// Layer 3: Internal module imports
use crate::actor::cell::ActorCell;
use crate::message::Envelope;
use crate::plugin::{Plugin, PluginKind, ReactionBits};
use crate::protocol::StartTrigger;

/// Invoked once [`ActorCell::begin_operational`] may fire: the user's
/// `on_start` hook (spec ยง4.6 "call `on_start()` on the actor").
pub type OnStart = Box<dyn FnMut(&mut ActorCell) + Send>;

/// Activates last. Mints its own dedicated address (via the address-maker
/// plugin, see [`ActorCell::set_starter_address`]) and waits on it for
/// `start_trigger_t` (spec ยง4.6).
#[derive(Default)]
pub struct StarterPlugin {
    on_start: Option<OnStart>,
    started: bool,
    reaction: ReactionBits,
}

impl StarterPlugin {
    /// A fresh, inactive instance with no `on_start` hook.
    pub fn new() -> Self {
        Self::default()
    }

    /// An instance that calls `on_start` once the trigger arrives.
    pub fn with_on_start(on_start: OnStart) -> Self {
        Self {
            on_start: Some(on_start),
            started: false,
            reaction: ReactionBits::NONE,
        }
    }

    fn on_start_trigger(&mut self, cell: &mut ActorCell) {
        if self.started {
            return;
        }
        self.started = true;
        cell.begin_operational();
        if let Some(hook) = self.on_start.as_mut() {
            hook(cell);
        }
        cell.resume_pipeline();
    }
}

impl Plugin for StarterPlugin {
    fn kind(&self) -> PluginKind {
        PluginKind::Starter
    }

    fn activate(&mut self, cell: &mut ActorCell) {
        self.reaction = ReactionBits::START;
        // The address-maker plugin (#1) already minted this actor's
        // dedicated starter address, well before this plugin's own turn to
        // activate (#9 — last).
        let starter_address = cell.starter_address();
        cell.route_to_plugin_at::<StartTrigger>(starter_address, PluginKind::Starter);
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

    /// Never stalls the forward walk on its own — OPERATIONAL is reached
    /// asynchronously, once `start_trigger_t` is actually delivered, not as
    /// a condition of `init_continue` finishing (spec ยง4.6: starter
    /// "activates last" but init still completes at INITIALIZED).
    fn handle_init(&mut self, _cell: &mut ActorCell) -> bool {
        true
    }

    fn handle_shutdown(&mut self, _cell: &mut ActorCell) -> bool {
        true
    }

    fn receive(&mut self, cell: &mut ActorCell, envelope: &Envelope) {
        if envelope.downcast::<StartTrigger>().is_some() {
            self.on_start_trigger(cell);
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
    use crate::locality::{Locality, LocalityDirectory};
    use crate::util::{ActorId, LocalityId};
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
    fn start_trigger_moves_initialized_actor_to_operational() {
        let shared = sample_cell();
        let mut plugin = StarterPlugin::new();
        let mut cell = shared.lock();
        plugin.activate(&mut cell);
        cell.begin_init();
        // Drive straight to INITIALIZED for this unit test's purposes.
        cell.init_continue();
        let envelope = Envelope::new(cell.address(), StartTrigger);
        plugin.receive(&mut cell, &envelope);
        assert_eq!(cell.state(), ActorState::Operational);
    }

    #[test]
    fn start_trigger_is_idempotent() {
        let shared = sample_cell();
        let mut plugin = StarterPlugin::new();
        let mut cell = shared.lock();
        plugin.activate(&mut cell);
        cell.begin_init();
        cell.init_continue();
        let envelope = Envelope::new(cell.address(), StartTrigger);
        plugin.receive(&mut cell, &envelope);
        plugin.receive(&mut cell, &envelope);
        assert_eq!(cell.state(), ActorState::Operational);
    }
}
