//! The cooperative, single-threaded message loop (spec C5).

pub mod directory;

pub use directory::LocalityDirectory;

// Layer 1: Standard library imports
use std::collections::VecDeque;

// Layer 2: Third-party crate imports
use parking_lot::Mutex;

// Layer 3: Internal module imports
use crate::message::Envelope;
use crate::subscription::AddressMapping;
use crate::util::LocalityId;

/// A single cooperative scheduler: one FIFO queue of envelopes, drained by
/// exactly one logical worker at a time (spec ยง5).
///
/// The queue and the delivery index are the only state a `Locality`
/// mutates during `do_process`; both are guarded by the same
/// `parking_lot::Mutex`, which is the sole thread-safety boundary
/// `enqueue` crosses (spec ยง5's "Shared resources" paragraph). Handler
/// invocation itself happens with the lock released, so a handler that
/// enqueues back to its own locality does not deadlock.
pub struct Locality {
    id: LocalityId,
    queue: Mutex<VecDeque<Envelope>>,
    delivery_index: Mutex<AddressMapping>,
}

impl Locality {
    /// Create an empty locality identified by `id`.
    pub fn new(id: LocalityId) -> Self {
        Self {
            id,
            queue: Mutex::new(VecDeque::new()),
            delivery_index: Mutex::new(AddressMapping::new()),
        }
    }

    /// This locality's id.
    pub fn id(&self) -> LocalityId {
        self.id
    }

    /// Append `envelope` to the FIFO queue. This is the only operation
    /// callable from a different locality/thread; it never blocks on
    /// `do_process` for longer than the brief push itself.
    pub fn enqueue(&self, envelope: Envelope) {
        self.queue.lock().push_back(envelope);
    }

    /// Register `point` so future deliveries to its address/type reach it.
    pub fn register_subscription(&self, point: crate::subscription::SubscriptionPoint) {
        self.delivery_index.lock().insert(point);
    }

    /// Remove `point` from the delivery index.
    pub fn unregister_subscription(&self, point: &crate::subscription::SubscriptionPoint) -> bool {
        self.delivery_index.lock().remove(point)
    }

    /// True if the queue currently holds no envelopes.
    pub fn is_queue_empty(&self) -> bool {
        self.queue.lock().is_empty()
    }

    /// True if the delivery index currently holds no subscriptions.
    pub fn is_subscriptions_empty(&self) -> bool {
        self.delivery_index.lock().is_empty()
    }

    /// Drain the queue until empty, delivering each envelope to every
    /// subscription point registered for its destination/type (spec ยง4.1).
    ///
    /// A handler invoked during drain may enqueue further envelopes; they
    /// are processed within this same call, because the loop re-checks the
    /// queue after each delivery rather than snapshotting its length.
    pub fn do_process(&self) {
        loop {
            let next = self.queue.lock().pop_front();
            let Some(envelope) = next else { break };
            let targets: Vec<_> = {
                let index = self.delivery_index.lock();
                index
                    .at(envelope.destination())
                    .iter()
                    .filter(|p| p.type_id() == envelope.type_id())
                    .cloned()
                    .collect()
            };
            for point in targets {
                point.deliver(&envelope);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::Message;
    use crate::subscription::{Handler, OwnerTag, SubscriptionPoint};
    use crate::util::ActorId;
    use std::any::TypeId;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    #[derive(Debug, Clone)]
    struct Ping;
    impl Message for Ping {
        const MESSAGE_TYPE: &'static str = "ping";
    }

    #[test]
    fn do_process_delivers_to_a_registered_point() {
        let locality_id = LocalityId::new();
        let locality = Locality::new(locality_id);
        let addr = crate::util::Address::new(locality_id);

        let counter = Arc::new(AtomicU32::new(0));
        let counter_clone = Arc::clone(&counter);
        let handler: Arc<parking_lot::Mutex<dyn Handler>> =
            Arc::new(parking_lot::Mutex::new(move |_env: &Envelope| {
                counter_clone.fetch_add(1, Ordering::SeqCst);
            }));
        let point = SubscriptionPoint::new(addr, TypeId::of::<Ping>(), ActorId::new(), OwnerTag::Plain, handler);
        locality.register_subscription(point);

        locality.enqueue(Envelope::new(addr, Ping));
        locality.do_process();

        assert_eq!(counter.load(Ordering::SeqCst), 1);
        assert!(locality.is_queue_empty());
    }

    #[test]
    fn handler_enqueuing_during_drain_is_processed_in_the_same_call() {
        let locality_id = LocalityId::new();
        let locality = Arc::new(Locality::new(locality_id));
        let addr = crate::util::Address::new(locality_id);

        let counter = Arc::new(AtomicU32::new(0));
        let counter_clone = Arc::clone(&counter);
        let locality_clone = Arc::clone(&locality);
        let handler: Arc<parking_lot::Mutex<dyn Handler>> =
            Arc::new(parking_lot::Mutex::new(move |_env: &Envelope| {
                let n = counter_clone.fetch_add(1, Ordering::SeqCst);
                if n == 0 {
                    locality_clone.enqueue(Envelope::new(addr, Ping));
                }
            }));
        let point = SubscriptionPoint::new(addr, TypeId::of::<Ping>(), ActorId::new(), OwnerTag::Plain, handler);
        locality.register_subscription(point);

        locality.enqueue(Envelope::new(addr, Ping));
        locality.do_process();

        assert_eq!(counter.load(Ordering::SeqCst), 2);
    }
}
