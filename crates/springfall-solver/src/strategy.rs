//! Simulator trait — the interface frame drivers and tools program against.
//!
//! Both simulators own their state and expose the same small command
//! surface, so a driver can run either one without knowing which it has.

use serde::{Deserialize, Serialize};
use springfall_types::SpringfallResult;

use crate::state::PointState;

/// Result of one sub-step (or the sum over a frame's sub-steps).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StepResult {
    /// Wall-clock time spent stepping (seconds).
    pub wall_time: f64,
    /// Contact corrections applied (obstacle, pair sides and boundary faces).
    pub contacts: u32,
    /// Broad-phase candidate pairs examined.
    pub candidate_pairs: u32,
    /// Springs or pairs skipped for coincident endpoints.
    pub degenerate: u32,
    /// Points the stability guard corrected.
    pub clamped: u32,
}

impl StepResult {
    /// Adds another result into this one.
    pub fn accumulate(&mut self, other: &StepResult) {
        self.wall_time += other.wall_time;
        self.contacts += other.contacts;
        self.candidate_pairs += other.candidate_pairs;
        self.degenerate += other.degenerate;
        self.clamped += other.clamped;
    }
}

/// Trait for the explicit simulators.
///
/// A frame driver calls these methods in order:
///
/// ```text
/// let mut sim = ClothSolver::new(config)?;
/// loop {
///     sim.step_frame(substeps, dt)?;
///     render(sim.positions_flat());
/// }
/// ```
pub trait Simulator: Send {
    /// Returns every point to its initial configuration with zero velocity.
    /// Buffer lengths are preserved.
    fn reset(&mut self);

    /// Advances the simulation by one sub-step of `dt` seconds.
    fn step(&mut self, dt: f32) -> SpringfallResult<StepResult>;

    /// Runs `substeps` sub-steps and returns their accumulated result.
    fn step_frame(&mut self, substeps: u32, dt: f32) -> SpringfallResult<StepResult> {
        let mut total = StepResult::default();
        for _ in 0..substeps {
            total.accumulate(&self.step(dt)?);
        }
        Ok(total)
    }

    /// Flips wind on or off.
    fn toggle_wind(&mut self);

    fn wind_enabled(&self) -> bool;

    /// Read-only view of the current state.
    fn state(&self) -> &PointState;

    /// Render-ready positions `[x0, y0, z0, x1, ...]`.
    fn positions_flat(&self) -> Vec<f32> {
        self.state().positions_flat()
    }

    fn point_count(&self) -> usize {
        self.state().len()
    }

    /// Returns the simulator's name.
    fn name(&self) -> &str;
}
