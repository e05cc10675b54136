//! Observability layer: structured lifecycle/subscription/timer/supervision
//! events, modeled on `airssys_rt::monitoring` (SPEC_FULL ยง4.9).
//!
//! Diagnostics and demangled type names stay out of scope (spec ยง1); this
//! only covers structured event capture so a host application can wire in
//! its own sink.

pub mod events;
pub mod in_memory;
pub mod noop;

pub use events::{LifecycleEvent, SubscriptionEvent, SupervisionEvent, TimerEvent};
pub use in_memory::InMemoryMonitor;
pub use noop::NoopMonitor;

/// A sink for runtime events. Object-safe so `ActorCell`/`Supervisor` can
/// hold `Arc<dyn RuntimeMonitor>` without being generic over the sink.
///
/// Every method has a no-op default, so a sink can subscribe to only the
/// event categories it cares about.
pub trait RuntimeMonitor: Send + Sync {
    /// An actor lifecycle state transition occurred.
    fn on_lifecycle(&self, _event: LifecycleEvent) {}
    /// A subscription point was added or removed.
    fn on_subscription(&self, _event: SubscriptionEvent) {}
    /// A timer was armed, fired, or cancelled.
    fn on_timer(&self, _event: TimerEvent) {}
    /// A supervision decision was made.
    fn on_supervision(&self, _event: SupervisionEvent) {}
}
