//! Locality-binding plugin: registers an actor's addresses into its
//! locality's cross-thread directory (spec ยง4.2 canonical order #2).

// Layer 1: Standard library imports
use std::any::Any;

// Layer 2: Third-party crate imports
// (none)

// Layer 3: Internal module imports
use crate::actor::cell::ActorCell;
use crate::plugin::{Plugin, PluginKind, ReactionBits};
use std::sync::Arc;

/// Binds the actor's primary address (and starter address, if the
/// address-maker plugin minted one) into [`crate::locality::LocalityDirectory`],
/// so other localities can resolve deliveries to it, and unbinds both on
/// deactivation. Never stalls init or shutdown — directory registration is
/// synchronous and local.
#[derive(Debug, Default)]
pub struct LocalityBindingPlugin;

impl LocalityBindingPlugin {
    /// A fresh, inactive instance.
    pub fn new() -> Self {
        Self
    }
}

impl Plugin for LocalityBindingPlugin {
    fn kind(&self) -> PluginKind {
        PluginKind::LocalityBinding
    }

    fn activate(&mut self, cell: &mut ActorCell) {
        cell.directory().register(cell.address(), Arc::clone(cell.locality()));
        if let Some(starter) = cell.starter_address() {
            cell.directory().register(starter, Arc::clone(cell.locality()));
        }
    }

    fn deactivate(&mut self, cell: &mut ActorCell) {
        cell.directory().unregister(cell.address());
        if let Some(starter) = cell.starter_address() {
            cell.directory().unregister(starter);
        }
    }

    fn reaction(&self) -> ReactionBits {
        ReactionBits::NONE
    }

    fn reaction_on(&mut self, _bits: ReactionBits) {}
    fn reaction_off(&mut self, _bits: ReactionBits) {}

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
