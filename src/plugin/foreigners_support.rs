//! Foreigners-support plugin: a pure pipeline-order marker (spec ยง4.2
//! canonical order #6, ยง4.7 "Foreigners-support").
//!
//! The actual cross-locality forwarding this plugin is named for is
//! performed directly by [`crate::actor::cell::ActorCell::subscribe`]/
//! [`crate::actor::cell::ActorCell::unsubscribe`], which resolve a foreign
//! address through the directory rather than touching the local locality's
//! delivery index (see DESIGN.md for why the envelope round trip the spec
//! describes collapses to a direct directory call here). This slot exists
//! so later plugins (child manager, link client/server, starter) still run
//! after cross-locality subscription concerns in the canonical order.

// Layer 1: Standard library imports
use std::any::Any;

// Layer 2: Third-party crate imports
// (none)

// Layer 3: Internal module imports
use crate::actor::cell::ActorCell;
use crate::plugin::{Plugin, PluginKind, ReactionBits};

/// Marker plugin occupying the foreigners-support slot in the canonical pipeline.
#[derive(Debug, Default)]
pub struct ForeignersSupportPlugin;

impl ForeignersSupportPlugin {
    /// A fresh, inactive instance.
    pub fn new() -> Self {
        Self
    }
}

impl Plugin for ForeignersSupportPlugin {
    fn kind(&self) -> PluginKind {
        PluginKind::ForeignersSupport
    }

    fn activate(&mut self, _cell: &mut ActorCell) {}
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
