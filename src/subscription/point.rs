//! Subscription points: the (address, type, owner, handler) binding tuple.

// Layer 1: Standard library imports
use std::any::TypeId;
use std::sync::Arc;

// Layer 2: Third-party crate imports
use parking_lot::Mutex;

// Layer 3: Internal module imports
use crate::subscription::handler::Handler;
use crate::util::{ActorId, Address};

/// Who registered a subscription point: a plain actor, or the supervisor
/// acting on behalf of a child (spec ยง3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OwnerTag {
    /// Registered directly by the owning actor.
    Plain,
    /// Registered by a supervisor plugin on behalf of a child.
    Supervisor,
}

/// The tuple `(address, message-type-token, owning actor, handler, owner-tag)`
/// that delivery keys on (spec ยง3). Two points compare equal on all fields,
/// including handler identity (not handler behavior).
#[derive(Clone)]
pub struct SubscriptionPoint {
    address: Address,
    type_id: TypeId,
    owner: ActorId,
    owner_tag: OwnerTag,
    handler: Arc<Mutex<dyn Handler>>,
}

impl SubscriptionPoint {
    /// Bind `handler` to deliveries of `type_id` at `address`, owned by
    /// `owner`.
    pub fn new(
        address: Address,
        type_id: TypeId,
        owner: ActorId,
        owner_tag: OwnerTag,
        handler: Arc<Mutex<dyn Handler>>,
    ) -> Self {
        Self {
            address,
            type_id,
            owner,
            owner_tag,
            handler,
        }
    }

    /// The address this point is registered at.
    pub fn address(&self) -> Address {
        self.address
    }

    /// The payload type this point reacts to.
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// The actor that owns this subscription.
    pub fn owner(&self) -> ActorId {
        self.owner
    }

    /// How this point was registered.
    pub fn owner_tag(&self) -> OwnerTag {
        self.owner_tag
    }

    /// Deliver `envelope` to the bound handler.
    ///
    /// A dropped subscription point (handler `Arc` with a single remaining
    /// strong reference scheduled for removal) is never reachable through
    /// this path once the container removes it — delivery only happens
    /// while the point is still indexed, satisfying spec ยง3's guarantee
    /// that a dropped point's handler is never called.
    pub fn deliver(&self, envelope: &crate::message::Envelope) {
        self.handler.lock().handle(envelope);
    }
}

impl PartialEq for SubscriptionPoint {
    fn eq(&self, other: &Self) -> bool {
        self.address == other.address
            && self.type_id == other.type_id
            && self.owner == other.owner
            && self.owner_tag == other.owner_tag
            && Arc::ptr_eq(&self.handler, &other.handler)
    }
}

impl Eq for SubscriptionPoint {}

impl std::fmt::Debug for SubscriptionPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubscriptionPoint")
            .field("address", &self.address)
            .field("owner", &self.owner)
            .field("owner_tag", &self.owner_tag)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::LocalityId;
    use std::any::TypeId;

    #[test]
    fn equality_requires_same_handler_identity() {
        let addr = Address::new(LocalityId::new());
        let owner = ActorId::new();
        let handler_a: Arc<Mutex<dyn Handler>> = Arc::new(Mutex::new(|_env: &crate::message::Envelope| {}));
        let handler_b: Arc<Mutex<dyn Handler>> = Arc::new(Mutex::new(|_env: &crate::message::Envelope| {}));

        let point_a = SubscriptionPoint::new(addr, TypeId::of::<u8>(), owner, OwnerTag::Plain, Arc::clone(&handler_a));
        let point_a2 = SubscriptionPoint::new(addr, TypeId::of::<u8>(), owner, OwnerTag::Plain, handler_a);
        let point_b = SubscriptionPoint::new(addr, TypeId::of::<u8>(), owner, OwnerTag::Plain, handler_b);

        assert_eq!(point_a, point_a2);
        assert_ne!(point_a, point_b);
    }
}
