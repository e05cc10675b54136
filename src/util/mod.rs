//! Identifier and addressing primitives shared across the crate.

pub mod ids;

pub use ids::{ActorId, Address, LocalityId, MessageId, RequestId};
