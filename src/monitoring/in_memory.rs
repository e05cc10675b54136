//! A bounded ring-buffer [`RuntimeMonitor`] for tests and diagnostics.

// Layer 1: Standard library imports
use std::collections::VecDeque;

// Layer 2: Third-party crate imports
use parking_lot::Mutex;

// Layer 3: Internal module imports
use crate::monitoring::events::{LifecycleEvent, SubscriptionEvent, SupervisionEvent, TimerEvent};
use crate::monitoring::RuntimeMonitor;

/// Captures every event it is sent, up to `capacity` per category; the
/// oldest entry is dropped once a category is full. Mirrors
/// `airssys_rt::monitoring::InMemoryMonitor`'s ring-buffer shape.
pub struct InMemoryMonitor {
    capacity: usize,
    lifecycle: Mutex<VecDeque<LifecycleEvent>>,
    subscription: Mutex<VecDeque<SubscriptionEvent>>,
    timer: Mutex<VecDeque<TimerEvent>>,
    supervision: Mutex<VecDeque<SupervisionEvent>>,
}

impl InMemoryMonitor {
    /// A monitor retaining up to `capacity` events per category.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            lifecycle: Mutex::new(VecDeque::new()),
            subscription: Mutex::new(VecDeque::new()),
            timer: Mutex::new(VecDeque::new()),
            supervision: Mutex::new(VecDeque::new()),
        }
    }

    fn push<T>(buffer: &Mutex<VecDeque<T>>, capacity: usize, event: T) {
        let mut guard = buffer.lock();
        if guard.len() >= capacity {
            guard.pop_front();
        }
        guard.push_back(event);
    }

    /// A snapshot of every lifecycle event currently retained, oldest first.
    pub fn lifecycle_snapshot(&self) -> Vec<LifecycleEvent> {
        self.lifecycle.lock().iter().copied().collect()
    }

    /// A snapshot of every supervision event currently retained, oldest first.
    pub fn supervision_snapshot(&self) -> Vec<SupervisionEvent> {
        self.supervision.lock().iter().copied().collect()
    }

    /// A snapshot of every timer event currently retained, oldest first.
    pub fn timer_snapshot(&self) -> Vec<TimerEvent> {
        self.timer.lock().iter().copied().collect()
    }

    /// A snapshot of every subscription event currently retained, oldest first.
    pub fn subscription_snapshot(&self) -> Vec<SubscriptionEvent> {
        self.subscription.lock().iter().copied().collect()
    }
}

impl Default for InMemoryMonitor {
    fn default() -> Self {
        Self::new(256)
    }
}

impl RuntimeMonitor for InMemoryMonitor {
    fn on_lifecycle(&self, event: LifecycleEvent) {
        Self::push(&self.lifecycle, self.capacity, event);
    }

    fn on_subscription(&self, event: SubscriptionEvent) {
        Self::push(&self.subscription, self.capacity, event);
    }

    fn on_timer(&self, event: TimerEvent) {
        Self::push(&self.timer, self.capacity, event);
    }

    fn on_supervision(&self, event: SupervisionEvent) {
        Self::push(&self.supervision, self.capacity, event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::ActorState;
    use crate::util::ActorId;
    use chrono::Utc;

    #[test]
    fn records_events_in_order() {
        let monitor = InMemoryMonitor::new(4);
        let actor = ActorId::new();
        monitor.on_lifecycle(LifecycleEvent { actor, from: ActorState::New, to: ActorState::Initializing, at: Utc::now() });
        monitor.on_lifecycle(LifecycleEvent { actor, from: ActorState::Initializing, to: ActorState::Initialized, at: Utc::now() });
        let snapshot = monitor.lifecycle_snapshot();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot[0].to, ActorState::Initializing);
        assert_eq!(snapshot[1].to, ActorState::Initialized);
    }

    #[test]
    fn ring_buffer_drops_oldest_once_full() {
        let monitor = InMemoryMonitor::new(2);
        let actor = ActorId::new();
        for _ in 0..3 {
            monitor.on_lifecycle(LifecycleEvent { actor, from: ActorState::New, to: ActorState::Initializing, at: Utc::now() });
        }
        assert_eq!(monitor.lifecycle_snapshot().len(), 2);
    }
}
