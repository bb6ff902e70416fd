//! Frame driver — runs a simulator one display frame at a time.
//!
//! Each frame executes `substeps` sub-steps of `dt`, applies scheduled
//! commands, informs inspection hooks, forwards telemetry to the event
//! bus and optionally publishes a snapshot for another thread.

use std::sync::Arc;

use tracing::debug;

use springfall_debug::{FrameSnapshot, InspectionHook, SnapshotExchange, TelemetryHook};
use springfall_solver::{Simulator, StepResult};
use springfall_telemetry::EventBus;
use springfall_types::SpringfallResult;

use crate::scenarios::Scenario;

/// What one call to [`FrameDriver::advance_frame`] did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    pub frame: u32,
    /// Accumulated result of the frame's sub-steps.
    pub result: StepResult,
    /// The simulator was reset after this frame.
    pub reset: bool,
}

pub struct FrameDriver {
    simulator: Box<dyn Simulator>,
    source: String,
    dt: f32,
    substeps: u32,
    reset_after: Option<f64>,
    wind_toggles: Vec<u32>,
    frame: u32,
    sim_time: f64,
    since_reset: f64,
    telemetry: TelemetryHook,
    hooks: Vec<Box<dyn InspectionHook>>,
    bus: Option<EventBus>,
    exchange: Option<Arc<SnapshotExchange>>,
}

impl FrameDriver {
    /// Validates and builds the scenario's simulator.
    pub fn new(scenario: &Scenario) -> SpringfallResult<Self> {
        scenario.validate()?;
        let simulator = scenario.build()?;
        debug!(
            scenario = scenario.kind.name(),
            points = simulator.point_count(),
            dt = scenario.dt(),
            substeps = scenario.substeps(),
            "frame driver ready"
        );
        Ok(Self {
            simulator,
            source: scenario.kind.name().to_string(),
            dt: scenario.dt(),
            substeps: scenario.substeps(),
            reset_after: scenario.frame.reset_after,
            wind_toggles: scenario.wind_toggles.clone(),
            frame: 0,
            sim_time: 0.0,
            since_reset: 0.0,
            telemetry: TelemetryHook::new(),
            hooks: Vec::new(),
            bus: None,
            exchange: None,
        })
    }

    /// Forwards telemetry events to `bus` after every frame.
    pub fn with_bus(mut self, bus: EventBus) -> Self {
        self.bus = Some(bus);
        self
    }

    /// Publishes a snapshot to `exchange` after every frame.
    pub fn with_exchange(mut self, exchange: Arc<SnapshotExchange>) -> Self {
        self.exchange = Some(exchange);
        self
    }

    pub fn add_hook(&mut self, hook: Box<dyn InspectionHook>) {
        self.hooks.push(hook);
    }

    pub fn simulator(&self) -> &dyn Simulator {
        self.simulator.as_ref()
    }

    pub fn dt(&self) -> f32 {
        self.dt
    }

    pub fn substeps(&self) -> u32 {
        self.substeps
    }

    /// Index of the next frame to run.
    pub fn frame(&self) -> u32 {
        self.frame
    }

    /// Simulated time since the driver started (seconds).
    pub fn sim_time(&self) -> f64 {
        self.sim_time
    }

    /// Snapshot of the current state.
    pub fn snapshot(&self) -> FrameSnapshot {
        FrameSnapshot::capture(self.frame, self.sim_time, self.source.clone(), self.simulator.state())
    }

    /// Resets the simulator now.
    pub fn reset(&mut self) {
        self.simulator.reset();
        self.since_reset = 0.0;
        self.command("reset");
    }

    /// Flips wind now.
    pub fn toggle_wind(&mut self) {
        self.simulator.toggle_wind();
        self.command("toggle_wind");
    }

    fn command(&mut self, name: &str) {
        let frame = self.frame;
        self.telemetry.on_command(frame, name);
        for hook in &mut self.hooks {
            hook.on_command(frame, name);
        }
    }

    /// Runs one display frame.
    pub fn advance_frame(&mut self) -> SpringfallResult<FrameReport> {
        let frame = self.frame;
        if self.wind_toggles.contains(&frame) {
            self.toggle_wind();
        }

        self.telemetry.on_frame_begin(frame, self.sim_time);
        for hook in &mut self.hooks {
            hook.on_frame_begin(frame, self.sim_time);
        }

        let result = self.simulator.step_frame(self.substeps, self.dt)?;
        let elapsed = self.substeps as f64 * self.dt as f64;
        self.sim_time += elapsed;
        self.since_reset += elapsed;

        let state = self.simulator.state();
        self.telemetry.on_frame_end(frame, &result, self.substeps, state);
        for hook in &mut self.hooks {
            hook.on_frame_end(frame, &result, self.substeps, state);
        }
        if let Some(exchange) = &self.exchange {
            exchange.publish(FrameSnapshot::capture(
                frame,
                self.sim_time,
                self.source.clone(),
                state,
            ));
        }

        let reset = matches!(self.reset_after, Some(limit) if self.since_reset > limit);
        if reset {
            self.reset();
        }

        self.flush_telemetry();
        self.frame += 1;
        Ok(FrameReport {
            frame,
            result,
            reset,
        })
    }

    fn flush_telemetry(&mut self) {
        let events = self.telemetry.drain_events();
        if let Some(bus) = &mut self.bus {
            for event in events {
                bus.emit(event);
            }
            bus.flush();
        }
    }

    /// Ends the run: notifies hooks and finalizes the bus.
    pub fn finish(&mut self) {
        for hook in &mut self.hooks {
            hook.on_run_end();
        }
        self.flush_telemetry();
        if let Some(bus) = &mut self.bus {
            bus.finalize();
        }
    }
}
