//! Subscription points, the per-actor container, and the supervisor-side
//! address mapping (spec C2/C3).

pub mod container;
pub mod handler;
pub mod mapping;
pub mod point;

pub use container::SubscriptionContainer;
pub use handler::{Handler, SubscriptionOutcome};
pub use mapping::AddressMapping;
pub use point::{OwnerTag, SubscriptionPoint};
