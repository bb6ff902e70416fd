//! Simulation event types.
//!
//! Structured events emitted by the frame driver once per frame. Events
//! are small value types carrying just enough to monitor a run.

use serde::{Deserialize, Serialize};

/// An event tagged with the frame it belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationEvent {
    /// Frame number (0-indexed).
    pub frame: u32,
    pub kind: EventKind,
}

/// Event payload variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EventKind {
    /// Frame started.
    FrameBegin {
        /// Simulated time at the start of the frame (seconds).
        sim_time: f64,
    },

    /// Frame completed.
    FrameEnd {
        /// Wall-clock time for the frame's sub-steps (seconds).
        wall_time: f64,
        substeps: u32,
    },

    /// Contact work summed over the frame.
    Contacts {
        contact_count: u32,
        candidate_pairs: u32,
        /// Springs or pairs skipped for coincident endpoints.
        degenerate: u32,
    },

    /// Energy snapshot at the end of the frame.
    Energy {
        /// Kinetic energy of unit masses (0.5 * v²).
        kinetic: f64,
        max_speed: f32,
    },

    /// The stability guard corrected points during the frame.
    Instability { clamped: u32 },

    /// A driver command was applied (`reset`, `toggle_wind`, ...).
    Command { name: String },
}

impl SimulationEvent {
    pub fn new(frame: u32, kind: EventKind) -> Self {
        Self { frame, kind }
    }

    /// Short label of the payload variant.
    pub fn label(&self) -> &'static str {
        match self.kind {
            EventKind::FrameBegin { .. } => "frame_begin",
            EventKind::FrameEnd { .. } => "frame_end",
            EventKind::Contacts { .. } => "contacts",
            EventKind::Energy { .. } => "energy",
            EventKind::Instability { .. } => "instability",
            EventKind::Command { .. } => "command",
        }
    }
}
