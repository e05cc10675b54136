//! Delivery plugin: a pure pipeline-order marker (spec ยง4.2 canonical
//! order #3).
//!
//! Envelope delivery itself is performed by [`crate::locality::Locality`]
//! directly against its delivery index, not by any plugin hook — this
//! slot exists only so the canonical ordering documented in spec ยง4.2 has
//! a concrete pipeline position between locality-binding and lifetime, for
//! any future plugin that needs to run strictly after addresses are bound
//! but before subscriptions are tracked.

// Layer 1: Standard library imports
use std::any::Any;

// Layer 2: Third-party crate imports
// (none)

// Layer 3: Internal module imports
use crate::actor::cell::ActorCell;
use crate::plugin::{Plugin, PluginKind, ReactionBits};

/// Marker plugin occupying the delivery slot in the canonical pipeline.
#[derive(Debug, Default)]
pub struct DeliveryPlugin;

impl DeliveryPlugin {
    /// A fresh, inactive instance.
    pub fn new() -> Self {
        Self
    }
}

impl Plugin for DeliveryPlugin {
    fn kind(&self) -> PluginKind {
        PluginKind::Delivery
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
