//! Per-actor subscription container: the ledger of points an actor owns.

// Layer 1: Standard library imports
use std::any::TypeId;

// Layer 2: Third-party crate imports
// (none)

// Layer 3: Internal module imports
use crate::subscription::point::SubscriptionPoint;
use crate::util::Address;

/// The ordered multiset of subscription points one actor has created
/// (spec ยง3). Invariant upheld by the lifetime plugin: during SHUT_DOWN
/// this container is empty.
#[derive(Debug, Default)]
pub struct SubscriptionContainer {
    points: Vec<SubscriptionPoint>,
}

impl SubscriptionContainer {
    /// An empty container.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a newly created point.
    pub fn insert(&mut self, point: SubscriptionPoint) {
        self.points.push(point);
    }

    /// Remove a point by identity equality, returning whether it was
    /// present.
    pub fn remove(&mut self, point: &SubscriptionPoint) -> bool {
        if let Some(idx) = self.points.iter().position(|p| p == point) {
            self.points.remove(idx);
            true
        } else {
            false
        }
    }

    /// Remove and return every point, leaving the container empty. Used by
    /// the lifetime plugin when unwinding at shutdown.
    pub fn drain_all(&mut self) -> Vec<SubscriptionPoint> {
        std::mem::take(&mut self.points)
    }

    /// True once every point has been removed (the SHUT_DOWN invariant).
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Number of points currently owned.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Points registered at `address` for payload type `type_id`.
    pub fn matching(&self, address: Address, type_id: TypeId) -> impl Iterator<Item = &SubscriptionPoint> {
        self.points
            .iter()
            .filter(move |p| p.address() == address && p.type_id() == type_id)
    }

    /// Iterate over every point currently owned.
    pub fn iter(&self) -> impl Iterator<Item = &SubscriptionPoint> {
        self.points.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::subscription::handler::Handler;
    use crate::subscription::point::OwnerTag;
    use crate::util::{ActorId, LocalityId};
    use parking_lot::Mutex;
    use std::sync::Arc;

    fn sample_point(address: Address) -> SubscriptionPoint {
        let handler: Arc<Mutex<dyn Handler>> = Arc::new(Mutex::new(|_env: &crate::message::Envelope| {}));
        SubscriptionPoint::new(address, TypeId::of::<u8>(), ActorId::new(), OwnerTag::Plain, handler)
    }

    #[test]
    fn insert_then_remove_empties_the_container() {
        let mut container = SubscriptionContainer::new();
        let addr = Address::new(LocalityId::new());
        let point = sample_point(addr);
        container.insert(point.clone());
        assert_eq!(container.len(), 1);
        assert!(container.remove(&point));
        assert!(container.is_empty());
    }

    #[test]
    fn removing_an_absent_point_is_a_no_op() {
        let mut container = SubscriptionContainer::new();
        let addr = Address::new(LocalityId::new());
        let point = sample_point(addr);
        assert!(!container.remove(&point));
    }

    #[test]
    fn drain_all_clears_everything() {
        let mut container = SubscriptionContainer::new();
        let addr = Address::new(LocalityId::new());
        container.insert(sample_point(addr));
        container.insert(sample_point(addr));
        let drained = container.drain_all();
        assert_eq!(drained.len(), 2);
        assert!(container.is_empty());
    }
}
