//! Supervisor-side address mapping: address → subscription points, by owner.

// Layer 1: Standard library imports
use std::collections::HashMap;

// Layer 2: Third-party crate imports
// (none)

// Layer 3: Internal module imports
use crate::subscription::point::SubscriptionPoint;
use crate::util::{ActorId, Address};

/// Per-supervisor index of subscription points registered on the
/// supervisor's own addresses, segmented by the child actor that owns each
/// point (spec ยง3 "Address mapping").
///
/// Queried when a child terminates: the supervisor unsubscribes every
/// point whose owner is that child before declaring the child removed
/// (spec ยง4.4, ยง4.7).
#[derive(Debug, Default)]
pub struct AddressMapping {
    by_address: HashMap<Address, Vec<SubscriptionPoint>>,
}

impl AddressMapping {
    /// An empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `point` under its address.
    pub fn insert(&mut self, point: SubscriptionPoint) {
        self.by_address.entry(point.address()).or_default().push(point);
    }

    /// Remove `point` from its address's list.
    pub fn remove(&mut self, point: &SubscriptionPoint) -> bool {
        if let Some(points) = self.by_address.get_mut(&point.address()) {
            if let Some(idx) = points.iter().position(|p| p == point) {
                points.remove(idx);
                if points.is_empty() {
                    self.by_address.remove(&point.address());
                }
                return true;
            }
        }
        false
    }

    /// Every point on any address whose owner is `child`, removing them
    /// from the mapping in the process.
    pub fn take_for_owner(&mut self, child: ActorId) -> Vec<SubscriptionPoint> {
        let mut taken = Vec::new();
        self.by_address.retain(|_, points| {
            let (owned, rest): (Vec<_>, Vec<_>) = points.drain(..).partition(|p| p.owner() == child);
            taken.extend(owned);
            *points = rest;
            !points.is_empty()
        });
        taken
    }

    /// True if `child` still has any outstanding subscription points on
    /// this supervisor's addresses.
    pub fn has_subscriptions_for(&self, child: ActorId) -> bool {
        self.by_address
            .values()
            .any(|points| points.iter().any(|p| p.owner() == child))
    }

    /// Points registered at `address`.
    pub fn at(&self, address: Address) -> &[SubscriptionPoint] {
        self.by_address.get(&address).map_or(&[], |v| v.as_slice())
    }

    /// True if this mapping holds no subscription points at all.
    pub fn is_empty(&self) -> bool {
        self.by_address.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::subscription::handler::Handler;
    use crate::subscription::point::OwnerTag;
    use crate::util::LocalityId;
    use parking_lot::Mutex;
    use std::any::TypeId;
    use std::sync::Arc;

    fn point_for(owner: ActorId, address: Address) -> SubscriptionPoint {
        let handler: Arc<Mutex<dyn Handler>> = Arc::new(Mutex::new(|_env: &crate::message::Envelope| {}));
        SubscriptionPoint::new(address, TypeId::of::<u8>(), owner, OwnerTag::Supervisor, handler)
    }

    #[test]
    fn take_for_owner_removes_only_that_childs_points() {
        let addr = Address::new(LocalityId::new());
        let child_a = ActorId::new();
        let child_b = ActorId::new();

        let mut mapping = AddressMapping::new();
        mapping.insert(point_for(child_a, addr));
        mapping.insert(point_for(child_b, addr));

        let taken = mapping.take_for_owner(child_a);
        assert_eq!(taken.len(), 1);
        assert!(!mapping.has_subscriptions_for(child_a));
        assert!(mapping.has_subscriptions_for(child_b));
    }

    #[test]
    fn removing_the_last_point_drops_the_address_entry() {
        let addr = Address::new(LocalityId::new());
        let child = ActorId::new();
        let mut mapping = AddressMapping::new();
        let point = point_for(child, addr);
        mapping.insert(point.clone());
        assert!(mapping.remove(&point));
        assert!(mapping.at(addr).is_empty());
    }
}
