//! Lifetime plugin: owns the shutdown-time subscription teardown protocol
//! (spec ยง4.2 canonical order #4, ยง4.7 "Lifetime plugin").

// Layer 1: Standard library imports
use std::any::Any;

// Layer 2: Third-party crate imports
// (none)

// Layer 3: Internal module imports
use crate::actor::cell::ActorCell;
use crate::plugin::{Plugin, PluginKind, ReactionBits};

/// Guarantees the actor's [`crate::subscription::SubscriptionContainer`] is
/// empty by the time it reaches `SHUT_DOWN` (spec ยง3 "Subscription
/// container... Invariant: during SHUT_DOWN the container is empty").
///
/// Sits early in pipeline order, so during the reverse shutdown walk it
/// deactivates late — only after every later plugin (child manager, link
/// client/server, starter) has released whatever subscriptions of its own
/// it created, mirroring the "late plugins release first" rationale of
/// spec ยง4.2.
#[derive(Debug, Default)]
pub struct LifetimePlugin {
    reaction: ReactionBits,
}

impl LifetimePlugin {
    /// A fresh, inactive instance.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Plugin for LifetimePlugin {
    fn kind(&self) -> PluginKind {
        PluginKind::Lifetime
    }

    fn activate(&mut self, _cell: &mut ActorCell) {
        self.reaction = ReactionBits::SHUTDOWN;
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
        cell.drain_subscriptions();
        true
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
    use crate::message::Message;
    use crate::subscription::{Handler, OwnerTag};
    use crate::util::{ActorId, LocalityId};
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[derive(Debug, Clone)]
    struct Ping;
    impl Message for Ping {
        const MESSAGE_TYPE: &'static str = "ping";
    }

    #[test]
    fn handle_shutdown_drains_every_owned_subscription() {
        let locality_id = LocalityId::new();
        let locality = Arc::new(Locality::new(locality_id));
        let directory = Arc::new(LocalityDirectory::new());
        let mut cell = ActorCell::new(ActorId::new(), locality, directory, ActorConfig::default(), None);
        let handler: Arc<Mutex<dyn Handler>> = Arc::new(Mutex::new(|_env: &crate::message::Envelope| {}));
        let address = cell.address();
        cell.subscribe::<Ping>(Some(address), OwnerTag::Plain, handler);
        assert_eq!(cell.subscriptions().len(), 1);

        let mut plugin = LifetimePlugin::new();
        plugin.activate(&mut cell);
        assert!(plugin.handle_shutdown(&mut cell));
        assert!(cell.subscriptions().is_empty());
    }
}
