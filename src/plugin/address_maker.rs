//! Address-maker plugin: mints the addresses an actor needs beyond its
//! primary one (spec ยง4.2 canonical order #1).

// Layer 1: Standard library imports
use std::any::Any;

// Layer 2: Third-party crate imports
// (none)

// Layer 3: Internal module imports
use crate::actor::cell::ActorCell;
use crate::plugin::{Plugin, PluginKind, ReactionBits};

/// Mints the starter plugin's dedicated address (spec ยง4.6 "each actor
/// self-addresses its starter") before any later plugin activates and might
/// need it. Never stalls init or shutdown.
#[derive(Debug, Default)]
pub struct AddressMakerPlugin;

impl AddressMakerPlugin {
    /// A fresh, inactive instance.
    pub fn new() -> Self {
        Self
    }
}

impl Plugin for AddressMakerPlugin {
    fn kind(&self) -> PluginKind {
        PluginKind::AddressMaker
    }

    fn activate(&mut self, cell: &mut ActorCell) {
        let starter_address = cell.mint_address();
        cell.set_starter_address(starter_address);
    }

    fn deactivate(&mut self, _cell: &mut ActorCell) {}

    fn reaction(&self) -> ReactionBits {
        ReactionBits::NONE
    }

    fn reaction_on(&mut self, _bits: ReactionBits) {}
    fn reaction_off(&mut self, _bits: ReactionBits) {}

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
    use std::sync::Arc;

    #[test]
    fn activate_mints_a_distinct_starter_address() {
        let locality_id = LocalityId::new();
        let locality = Arc::new(Locality::new(locality_id));
        let directory = Arc::new(LocalityDirectory::new());
        let mut cell = ActorCell::new(ActorId::new(), locality, directory, ActorConfig::default(), None);
        let mut plugin = AddressMakerPlugin::new();

        plugin.activate(&mut cell);

        let starter = cell.starter_address().expect("starter address minted");
        assert_ne!(starter, cell.address());
        assert_eq!(starter.locality(), cell.address().locality());
    }
}
