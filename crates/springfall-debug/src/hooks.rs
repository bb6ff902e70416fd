//! Inspection hooks for the frame loop.
//!
//! Hooks are called by the frame driver at fixed points (frame begin,
//! frame end, driver commands) to capture state without touching the
//! solvers.

use springfall_solver::{PointState, StepResult};
use springfall_telemetry::events::{EventKind, SimulationEvent};

/// Trait for frame-loop inspection hooks.
///
/// # Lifecycle
///
/// ```text
/// for each frame:
///   hook.on_frame_begin(...)
///   (optional) hook.on_command(...)
///   hook.on_frame_end(...)
/// hook.on_run_end()
/// ```
pub trait InspectionHook: Send {
    fn on_frame_begin(&mut self, frame: u32, sim_time: f64) {
        let _ = (frame, sim_time);
    }

    /// Called after the frame's sub-steps with their accumulated result.
    fn on_frame_end(&mut self, frame: u32, result: &StepResult, substeps: u32, state: &PointState) {
        let _ = (frame, result, substeps, state);
    }

    /// Called when the driver applies a command such as `reset`.
    fn on_command(&mut self, frame: u32, name: &str) {
        let _ = (frame, name);
    }

    fn on_run_end(&mut self) {}

    fn name(&self) -> &str;
}

/// Hook that translates frame-loop calls into telemetry events.
#[derive(Default)]
pub struct TelemetryHook {
    events: Vec<SimulationEvent>,
}

impl TelemetryHook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drains collected events for dispatch.
    pub fn drain_events(&mut self) -> Vec<SimulationEvent> {
        std::mem::take(&mut self.events)
    }
}

impl InspectionHook for TelemetryHook {
    fn on_frame_begin(&mut self, frame: u32, sim_time: f64) {
        self.events
            .push(SimulationEvent::new(frame, EventKind::FrameBegin { sim_time }));
    }

    fn on_frame_end(&mut self, frame: u32, result: &StepResult, substeps: u32, state: &PointState) {
        self.events.push(SimulationEvent::new(
            frame,
            EventKind::Contacts {
                contact_count: result.contacts,
                candidate_pairs: result.candidate_pairs,
                degenerate: result.degenerate,
            },
        ));
        self.events.push(SimulationEvent::new(
            frame,
            EventKind::Energy {
                kinetic: state.kinetic_energy(),
                max_speed: state.max_speed(),
            },
        ));
        if result.clamped > 0 {
            self.events.push(SimulationEvent::new(
                frame,
                EventKind::Instability {
                    clamped: result.clamped,
                },
            ));
        }
        self.events.push(SimulationEvent::new(
            frame,
            EventKind::FrameEnd {
                wall_time: result.wall_time,
                substeps,
            },
        ));
    }

    fn on_command(&mut self, frame: u32, name: &str) {
        self.events.push(SimulationEvent::new(
            frame,
            EventKind::Command { name: name.into() },
        ));
    }

    fn name(&self) -> &str {
        "telemetry_hook"
    }
}
