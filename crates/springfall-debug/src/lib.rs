//! # springfall-debug
//!
//! Inspection hooks, frame snapshots and the snapshot exchange a render
//! thread reads from.
//!
//! Snapshots are inspection artifacts: they are serialized with `bincode`
//! for the `inspect` tool, not for resuming a run.

pub mod exchange;
pub mod hooks;
pub mod snapshot;

pub use exchange::SnapshotExchange;
pub use hooks::{InspectionHook, TelemetryHook};
pub use snapshot::{FrameSnapshot, SnapshotSummary};
