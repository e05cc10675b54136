//! The ordered plugin sequence and its forward/reverse traversal (spec ยง4.2).

// Layer 1: Standard library imports
// (none)

// Layer 2: Third-party crate imports
// (none)

// Layer 3: Internal module imports
use crate::actor::cell::ActorCell;
use crate::message::Envelope;
use crate::plugin::{Plugin, PluginKind, ReactionBits};
use crate::subscription::{SubscriptionOutcome, SubscriptionPoint};

/// The fixed-at-construction sequence of plugins an actor runs (spec ยง4.2).
///
/// Every traversal method takes `cell: &mut ActorCell` as an explicit
/// parameter. Callers first `mem::take` the pipeline out of the owning
/// cell's `pipeline` field so that parameter is an ordinary, uniquely-owned
/// reference for the duration of the call — no aliasing, no raw pointers.
#[derive(Default)]
pub struct Pipeline {
    plugins: Vec<Box<dyn Plugin>>,
    deactivated: Vec<bool>,
}

impl Pipeline {
    /// Build a pipeline from `plugins`, in the order they will be traversed
    /// forward (init) and reverse (shutdown).
    pub fn new(plugins: Vec<Box<dyn Plugin>>) -> Self {
        let deactivated = vec![false; plugins.len()];
        Self { plugins, deactivated }
    }

    /// The identity tokens of every installed plugin, in pipeline order.
    pub fn kinds(&self) -> Vec<PluginKind> {
        self.plugins.iter().map(|p| p.kind()).collect()
    }

    /// True once every plugin has been deactivated (spec ยง3 "deactivating set is empty").
    pub fn fully_deactivated(&self) -> bool {
        self.deactivated.iter().all(|d| *d)
    }

    /// Activate every plugin in forward order (spec ยง4.3 "activate_plugins").
    pub fn activate_all(&mut self, cell: &mut ActorCell) {
        for plugin in self.plugins.iter_mut() {
            plugin.activate(cell);
        }
    }

    /// Locate the single plugin of concrete type `P`, if installed, and run
    /// `f` against it (spec ยง9's `with_casted` combinator).
    pub fn with_casted<P: Plugin + 'static, F: FnOnce(&mut P)>(&mut self, f: F) {
        for plugin in self.plugins.iter_mut() {
            if let Some(p) = plugin.as_any_mut().downcast_mut::<P>() {
                f(p);
                return;
            }
        }
    }

    /// Locate the single plugin of concrete type `P`, if installed, and run
    /// `f` against it with simultaneous access to `cell` (spec ยง9
    /// `access<Tag>` capability record). Used for synchronous external
    /// driving of a specific plugin's own protocol methods — e.g. a
    /// supervisor creating a child, or a test harness simulating a timer
    /// firing — as opposed to [`Pipeline::receive`], which routes an
    /// already-in-flight envelope.
    pub fn with_casted_cell<P: Plugin + 'static, F: FnOnce(&mut P, &mut ActorCell)>(&mut self, cell: &mut ActorCell, f: F) {
        for plugin in self.plugins.iter_mut() {
            if let Some(p) = plugin.as_any_mut().downcast_mut::<P>() {
                f(p, cell);
                return;
            }
        }
    }

    /// Forward walk: call `handle_init` on every plugin with the INIT bit
    /// set, stopping at the first stall. Returns `true` once the walk
    /// reaches the end with nothing left pending (spec ยง4.2).
    pub fn drive_init(&mut self, cell: &mut ActorCell) -> bool {
        for plugin in self.plugins.iter_mut() {
            if plugin.reaction().has(ReactionBits::INIT) {
                if plugin.handle_init(cell) {
                    plugin.reaction_off(ReactionBits::INIT);
                    continue;
                }
                return false;
            }
        }
        true
    }

    /// Reverse walk: call `handle_shutdown` on every plugin with the
    /// SHUTDOWN bit set (reverse order), stopping at the first stall. Once a
    /// plugin's SHUTDOWN bit clears (or it never had one), it is
    /// deactivated immediately — this is where "late plugins release
    /// first" (spec ยง4.2 rationale) actually happens. Returns `true` once
    /// every plugin has been deactivated.
    pub fn drive_shutdown(&mut self, cell: &mut ActorCell) -> bool {
        for idx in (0..self.plugins.len()).rev() {
            if self.deactivated[idx] {
                continue;
            }
            let plugin = &mut self.plugins[idx];
            if plugin.reaction().has(ReactionBits::SHUTDOWN) {
                if plugin.handle_shutdown(cell) {
                    plugin.reaction_off(ReactionBits::SHUTDOWN);
                } else {
                    return false;
                }
            }
            plugin.deactivate(cell);
            self.deactivated[idx] = true;
        }
        true
    }

    /// Reverse walk over every SUBSCRIPTION-reacting plugin for a newly
    /// created point. Unlike init/shutdown, this never stalls: every
    /// reacting plugin gets a look unless one reports `Finished` (spec ยง4.2).
    pub fn dispatch_subscription(&mut self, cell: &mut ActorCell, point: &SubscriptionPoint) {
        for plugin in self.plugins.iter_mut().rev() {
            if plugin.reaction().has(ReactionBits::SUBSCRIPTION) {
                match plugin.handle_subscription(cell, point) {
                    SubscriptionOutcome::Consumed => plugin.reaction_off(ReactionBits::SUBSCRIPTION),
                    SubscriptionOutcome::Finished => {
                        plugin.reaction_off(ReactionBits::SUBSCRIPTION);
                        break;
                    }
                    SubscriptionOutcome::Ignored => {}
                }
            }
        }
    }

    /// Reverse walk that stops at the first plugin willing to handle the
    /// unsubscription (spec ยง4.2).
    pub fn dispatch_unsubscription(&mut self, cell: &mut ActorCell, point: &SubscriptionPoint, external: bool) -> bool {
        for plugin in self.plugins.iter_mut().rev() {
            if plugin.handle_unsubscription(cell, point, external) {
                return true;
            }
        }
        false
    }

    /// Route an internal-protocol envelope to the one plugin identified by
    /// `kind`, if installed.
    pub fn receive(&mut self, kind: PluginKind, cell: &mut ActorCell, envelope: &Envelope) {
        if let Some(plugin) = self.plugins.iter_mut().find(|p| p.kind() == kind) {
            plugin.receive(cell, envelope);
        }
    }
}
