//! Plugin pipeline: ordered behavior modules installed per actor (spec C6).
//!
//! Every hook a [`Plugin`] exposes is driven from [`crate::actor::cell::ActorCell`]
//! through [`Pipeline`]'s forward/reverse traversal, or by direct message
//! dispatch through [`crate::actor::cell::ActorCell::dispatch_to_plugin`].
//! Each call site first `mem::take`s the pipeline out of the owning cell so
//! every plugin hook receives an ordinary `&mut ActorCell` — no raw
//! back-pointers are needed to reach the activating actor (see DESIGN.md
//! for why this supersedes the raw-pointer back-reference spec ยง9 suggests).

pub mod address_maker;
pub mod child_manager;
pub mod delivery;
pub mod foreigners_support;
pub mod init_shutdown;
pub mod lifetime;
pub mod link_client;
pub mod link_server;
pub mod locality_binding;
pub mod pipeline;
pub mod starter;

pub use pipeline::Pipeline;

// Layer 1: Standard library imports
use std::any::Any;

// Layer 2: Third-party crate imports
// (none)

// Layer 3: Internal module imports
use crate::actor::cell::ActorCell;
use crate::message::Envelope;
use crate::subscription::{SubscriptionOutcome, SubscriptionPoint};

/// Stable identity token for a plugin slot (spec ยง3 "Plugin").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PluginKind {
    /// Mints fresh addresses for the actor (component #1 of the canonical order).
    AddressMaker,
    /// Binds the actor's addresses into its locality's directory (#2).
    LocalityBinding,
    /// Pure marker for the delivery stage the locality itself performs (#3).
    Delivery,
    /// Owns the actor's subscription container and (un)subscription protocol (#4).
    Lifetime,
    /// Lifecycle plumbing: `initialize_actor_t`/`shutdown_request_t` handling (#5).
    InitShutdown,
    /// Cross-locality subscription forwarding (#6).
    ForeignersSupport,
    /// Supervisor-only: child creation, tracking, and cascading shutdown (#7).
    ChildManager,
    /// Cross-actor linkage, client side (#8a).
    LinkClient,
    /// Cross-actor linkage, server side (#8b).
    LinkServer,
    /// Terminal: issues the start trigger (#9).
    Starter,
}

/// Reaction bitset over {INIT, SHUTDOWN, SUBSCRIPTION, START} (spec ยง3/ยง4.2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReactionBits(u8);

impl ReactionBits {
    /// No reaction pending.
    pub const NONE: Self = Self(0);
    /// This plugin may stall the init pass.
    pub const INIT: Self = Self(1 << 0);
    /// This plugin may stall the shutdown pass.
    pub const SHUTDOWN: Self = Self(1 << 1);
    /// This plugin reacts to subscription/unsubscription events.
    pub const SUBSCRIPTION: Self = Self(1 << 2);
    /// This plugin reacts to the start trigger.
    pub const START: Self = Self(1 << 3);

    /// Set `other`'s bits in addition to this one's.
    pub fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Clear `other`'s bits from this one.
    pub fn remove(self, other: Self) -> Self {
        Self(self.0 & !other.0)
    }

    /// True if every bit in `other` is set here.
    pub fn has(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

/// A composable behavior module installed into an actor's lifecycle pipeline
/// (spec ยง4.2).
pub trait Plugin: Send {
    /// This plugin's stable identity token.
    fn kind(&self) -> PluginKind;

    /// Bind this plugin to its activating actor and register its internal
    /// subscriptions. Called once, in forward pipeline order, when the
    /// actor leaves NEW.
    fn activate(&mut self, cell: &mut ActorCell);

    /// Release anything this plugin holds. Called once, in reverse pipeline
    /// order, right after this plugin's SHUTDOWN reaction bit (if it had
    /// one) clears.
    fn deactivate(&mut self, cell: &mut ActorCell);

    /// The reaction bits still pending for this plugin.
    fn reaction(&self) -> ReactionBits;
    /// Turn on the given reaction bits.
    fn reaction_on(&mut self, bits: ReactionBits);
    /// Turn off the given reaction bits.
    fn reaction_off(&mut self, bits: ReactionBits);

    /// React to the init pass. Return `true` to clear the INIT bit and let
    /// the forward walk continue; `false` stalls the walk at this plugin
    /// until something re-triggers `init_continue`.
    fn handle_init(&mut self, _cell: &mut ActorCell) -> bool {
        true
    }

    /// React to the shutdown pass. Same stall contract as `handle_init`,
    /// walked in reverse.
    fn handle_shutdown(&mut self, _cell: &mut ActorCell) -> bool {
        true
    }

    /// React to a newly created subscription point. Traversed in reverse;
    /// unlike init/shutdown this never stalls the overall walk — every
    /// plugin with the SUBSCRIPTION bit set gets a look unless one of them
    /// reports `Finished`.
    fn handle_subscription(&mut self, _cell: &mut ActorCell, _point: &SubscriptionPoint) -> SubscriptionOutcome {
        SubscriptionOutcome::Ignored
    }

    /// React to a point being unsubscribed. The first plugin (in reverse
    /// order) that returns `true` stops the walk.
    fn handle_unsubscription(&mut self, _cell: &mut ActorCell, _point: &SubscriptionPoint, _external: bool) -> bool {
        false
    }

    /// Handle an envelope routed to this plugin by
    /// [`ActorCell::dispatch_to_plugin`] — the internal lifecycle protocol
    /// (spec ยง4.4-ยง4.6 message tables).
    fn receive(&mut self, _cell: &mut ActorCell, _envelope: &Envelope) {}

    /// Type-erased self, backing the `with_casted` combinator (spec ยง9).
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reaction_bits_union_and_remove() {
        let bits = ReactionBits::INIT.union(ReactionBits::SHUTDOWN);
        assert!(bits.has(ReactionBits::INIT));
        assert!(bits.has(ReactionBits::SHUTDOWN));
        let cleared = bits.remove(ReactionBits::INIT);
        assert!(!cleared.has(ReactionBits::INIT));
        assert!(cleared.has(ReactionBits::SHUTDOWN));
    }

    #[test]
    fn none_has_nothing() {
        assert!(!ReactionBits::NONE.has(ReactionBits::INIT));
    }
}
