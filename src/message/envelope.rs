//! Envelopes: a destination address plus an immutable, type-erased payload.

// Layer 1: Standard library imports
use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;

// Layer 2: Third-party crate imports
// (none)

// Layer 3: Internal module imports
use crate::message::traits::Message;
use crate::util::{Address, MessageId};

/// An envelope in flight: a destination address, a type-erased payload, and
/// the payload's routing-relevant type identity (spec ยง3).
///
/// The envelope is consumed on delivery — once a handler has taken the
/// payload out via [`Envelope::downcast`], the envelope itself is gone;
/// there is no way to observe an in-flight envelope from outside the
/// locality that holds it.
pub struct Envelope {
    id: MessageId,
    destination: Address,
    type_id: TypeId,
    type_name: &'static str,
    payload: Arc<dyn Any + Send + Sync>,
}

impl Envelope {
    /// Wrap `payload` addressed to `destination`.
    pub fn new<M: Message + Send + Sync>(destination: Address, payload: M) -> Self {
        Self {
            id: MessageId::default(),
            destination,
            type_id: TypeId::of::<M>(),
            type_name: M::MESSAGE_TYPE,
            payload: Arc::new(payload),
        }
    }

    /// This envelope's unique id (diagnostics only, not part of routing).
    pub fn id(&self) -> MessageId {
        self.id
    }

    /// The address this envelope is addressed to.
    pub fn destination(&self) -> Address {
        self.destination
    }

    /// The `TypeId` of the payload; delivery keys subscription points on
    /// `(destination, type_id)`.
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// The payload's human-readable type name (monitoring only).
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Borrow the payload as a concrete message type, if it matches.
    pub fn downcast<M: Message>(&self) -> Option<&M> {
        self.payload.downcast_ref::<M>()
    }
}

impl fmt::Debug for Envelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Envelope")
            .field("id", &self.id)
            .field("destination", &self.destination)
            .field("type_name", &self.type_name)
            .finish()
    }
}

impl Clone for Envelope {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            destination: self.destination,
            type_id: self.type_id,
            type_name: self.type_name,
            payload: Arc::clone(&self.payload),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::LocalityId;

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Ping(u32);

    impl Message for Ping {
        const MESSAGE_TYPE: &'static str = "ping";
    }

    #[test]
    fn downcast_returns_the_payload() {
        let locality = LocalityId::new();
        let addr = Address::new(locality);
        let envelope = Envelope::new(addr, Ping(7));
        assert_eq!(envelope.downcast::<Ping>(), Some(&Ping(7)));
    }

    #[test]
    fn downcast_to_the_wrong_type_is_none() {
        #[derive(Debug, Clone)]
        struct Pong;
        impl Message for Pong {
            const MESSAGE_TYPE: &'static str = "pong";
        }

        let locality = LocalityId::new();
        let addr = Address::new(locality);
        let envelope = Envelope::new(addr, Ping(1));
        assert!(envelope.downcast::<Pong>().is_none());
    }

    #[test]
    fn clone_shares_the_same_payload() {
        let locality = LocalityId::new();
        let addr = Address::new(locality);
        let envelope = Envelope::new(addr, Ping(3));
        let cloned = envelope.clone();
        assert_eq!(cloned.downcast::<Ping>(), Some(&Ping(3)));
        assert_eq!(envelope.id(), cloned.id());
    }
}
