//! Simulation state — position and velocity buffers of unit-mass points.
//!
//! This is the primary mutable data structure during simulation.
//! Buffers are allocated once at solver construction; `reset()` rewrites
//! them in place so the length (and the index → body mapping) never
//! changes for the lifetime of a solver.

use springfall_math::{flatten, Vec3};
use springfall_types::{SpringfallError, SpringfallResult};

/// Per-point mutable state. Every point has unit mass.
#[derive(Debug, Clone, PartialEq)]
pub struct PointState {
    /// Current positions.
    pub positions: Vec<Vec3>,
    /// Current velocities.
    pub velocities: Vec<Vec3>,
}

impl PointState {
    /// Allocates `count` points at the origin, at rest.
    pub fn new(count: usize) -> Self {
        Self {
            positions: vec![Vec3::ZERO; count],
            velocities: vec![Vec3::ZERO; count],
        }
    }

    /// Builds state from positions; velocities start at zero.
    pub fn from_positions(positions: Vec<Vec3>) -> Self {
        let velocities = vec![Vec3::ZERO; positions.len()];
        Self {
            positions,
            velocities,
        }
    }

    /// Number of points.
    #[inline]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Overwrites positions in place from `positions` and zeroes every
    /// velocity. Extra items are ignored; missing items leave the tail
    /// positions untouched.
    pub fn reinitialize<I>(&mut self, positions: I)
    where
        I: IntoIterator<Item = Vec3>,
    {
        for (x, p) in self.positions.iter_mut().zip(positions) {
            *x = p;
        }
        self.velocities.fill(Vec3::ZERO);
    }

    /// Render-ready positions `[x0, y0, z0, x1, ...]`.
    pub fn positions_flat(&self) -> Vec<f32> {
        flatten(&self.positions)
    }

    /// Velocities `[vx0, vy0, vz0, ...]`.
    pub fn velocities_flat(&self) -> Vec<f32> {
        flatten(&self.velocities)
    }

    /// Compute total kinetic energy: 0.5 * Σ ||v_i||² (unit mass).
    pub fn kinetic_energy(&self) -> f64 {
        self.velocities
            .iter()
            .map(|v| 0.5 * v.length_squared() as f64)
            .sum()
    }

    /// Largest speed of any point.
    pub fn max_speed(&self) -> f32 {
        self.velocities
            .iter()
            .map(|v| v.length())
            .fold(0.0, f32::max)
    }

    /// Checks that every position and velocity is finite and no speed
    /// exceeds `max_speed`.
    pub fn validate(&self, max_speed: f32) -> SpringfallResult<()> {
        if self.velocities.len() != self.positions.len() {
            return Err(SpringfallError::InvariantViolation(format!(
                "velocity buffer length ({}) != position buffer length ({})",
                self.velocities.len(),
                self.positions.len()
            )));
        }
        for (i, (x, v)) in self.positions.iter().zip(&self.velocities).enumerate() {
            if !x.is_finite() || !v.is_finite() {
                return Err(SpringfallError::InvariantViolation(format!(
                    "point {i} is not finite (x = {x:?}, v = {v:?})"
                )));
            }
            if v.length() > max_speed {
                return Err(SpringfallError::InvariantViolation(format!(
                    "point {i} moves at {} m/s (bound {max_speed})",
                    v.length()
                )));
            }
        }
        Ok(())
    }
}
