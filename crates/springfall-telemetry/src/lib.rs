//! # springfall-telemetry
//!
//! Event bus for simulation telemetry. Frame drivers emit structured
//! events (frame timing, contacts, energy, stability incidents, user
//! commands) that pluggable sinks consume.

pub mod bus;
pub mod events;
pub mod sinks;

pub use bus::EventBus;
pub use events::{EventKind, SimulationEvent};
pub use sinks::{EventSink, SharedEvents, TracingSink, VecSink};
