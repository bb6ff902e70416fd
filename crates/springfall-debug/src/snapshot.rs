//! Frame snapshots for inspection.
//!
//! A snapshot captures the flat position and velocity buffers after a
//! frame's sub-steps. Serialized with `bincode` for compact output.

use std::path::Path;

use serde::{Deserialize, Serialize};
use springfall_solver::PointState;
use springfall_types::{SpringfallError, SpringfallResult};

/// Post-frame state of one simulator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameSnapshot {
    /// Frame index when this snapshot was taken.
    pub frame: u32,
    /// Simulation time in seconds.
    pub sim_time: f64,
    /// Name of the simulator or scenario that produced it.
    pub source: String,
    /// Positions (flat: [x0, y0, z0, x1, y1, z1, ...]).
    pub positions: Vec<f32>,
    /// Velocities (flat: [vx0, vy0, vz0, ...]).
    pub velocities: Vec<f32>,
    pub point_count: usize,
}

/// Aggregate numbers printed by the inspector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapshotSummary {
    pub min: [f32; 3],
    pub max: [f32; 3],
    pub kinetic_energy: f64,
    pub max_speed: f32,
}

impl FrameSnapshot {
    /// Copies the state's buffers into a new snapshot.
    pub fn capture(frame: u32, sim_time: f64, source: impl Into<String>, state: &PointState) -> Self {
        Self {
            frame,
            sim_time,
            source: source.into(),
            positions: state.positions_flat(),
            velocities: state.velocities_flat(),
            point_count: state.len(),
        }
    }

    /// Checks that both buffers hold `3 * point_count` values.
    pub fn validate(&self) -> SpringfallResult<()> {
        let expected = self.point_count * 3;
        if self.positions.len() != expected || self.velocities.len() != expected {
            return Err(SpringfallError::InvariantViolation(format!(
                "snapshot of {} points carries {} position and {} velocity values",
                self.point_count,
                self.positions.len(),
                self.velocities.len()
            )));
        }
        Ok(())
    }

    /// Bounding box, kinetic energy (unit masses) and top speed.
    pub fn summary(&self) -> SnapshotSummary {
        let mut min = [f32::INFINITY; 3];
        let mut max = [f32::NEG_INFINITY; 3];
        for p in self.positions.chunks_exact(3) {
            for axis in 0..3 {
                min[axis] = min[axis].min(p[axis]);
                max[axis] = max[axis].max(p[axis]);
            }
        }

        let mut kinetic_energy = 0.0;
        let mut max_speed = 0.0f32;
        for v in self.velocities.chunks_exact(3) {
            let speed_sq = v[0] * v[0] + v[1] * v[1] + v[2] * v[2];
            kinetic_energy += 0.5 * speed_sq as f64;
            max_speed = max_speed.max(speed_sq.sqrt());
        }

        SnapshotSummary {
            min,
            max,
            kinetic_energy,
            max_speed,
        }
    }

    /// Serializes to compact binary format.
    pub fn to_bytes(&self) -> SpringfallResult<Vec<u8>> {
        bincode::serialize(self).map_err(|e| SpringfallError::Serialization(e.to_string()))
    }

    /// Deserializes from binary format and validates buffer lengths.
    pub fn from_bytes(data: &[u8]) -> SpringfallResult<Self> {
        let snapshot: Self = bincode::deserialize(data)
            .map_err(|e| SpringfallError::Serialization(format!("snapshot decode failed: {e}")))?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    pub fn write_to(&self, path: &Path) -> SpringfallResult<()> {
        std::fs::write(path, self.to_bytes()?)?;
        tracing::debug!(path = %path.display(), frame = self.frame, "snapshot written");
        Ok(())
    }

    pub fn read_from(path: &Path) -> SpringfallResult<Self> {
        Self::from_bytes(&std::fs::read(path)?)
    }
}
