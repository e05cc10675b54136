//! The request-id-keyed timer registry (spec C4).

pub mod registry;

pub use registry::{TimerOutcome, TimerRegistry};
