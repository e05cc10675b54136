//! The handler contract a subscription point binds to.

// Layer 1: Standard library imports
// (none)

// Layer 2: Third-party crate imports
// (none)

// Layer 3: Internal module imports
use crate::message::Envelope;

/// What a plugin's subscription reaction decided to do with an incoming
/// `subscription_t`/`unsubscription_t` event (spec ยง4.2).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscriptionOutcome {
    /// This plugin handled the event; later plugins in the traversal still
    /// get a look.
    Consumed,
    /// This plugin had nothing to say about the event.
    Ignored,
    /// This plugin handled the event and no later plugin should see it.
    Finished,
}

/// The callback bound at a subscription point.
///
/// The binding of a concrete actor's method to this contract is explicitly
/// out of scope (spec ยง1): this crate only describes and enforces the
/// contract a handler must satisfy — that it can be invoked with an
/// [`Envelope`] and nothing else. Concrete actors implement this trait (or
/// the runtime wraps a closure) when they subscribe.
pub trait Handler: Send {
    /// Deliver `envelope` to this handler.
    fn handle(&mut self, envelope: &Envelope);
}

impl<F> Handler for F
where
    F: FnMut(&Envelope) + Send,
{
    fn handle(&mut self, envelope: &Envelope) {
        self(envelope)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::Message;
    use crate::util::{Address, LocalityId};

    #[derive(Debug, Clone)]
    struct Ping;
    impl Message for Ping {
        const MESSAGE_TYPE: &'static str = "ping";
    }

    #[test]
    fn closures_satisfy_the_handler_trait() {
        let mut count = 0u32;
        let mut handler = |_env: &Envelope| count += 1;
        let addr = Address::new(LocalityId::new());
        let envelope = Envelope::new(addr, Ping);
        Handler::handle(&mut handler, &envelope);
        assert_eq!(count, 1);
    }
}
