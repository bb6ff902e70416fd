//! Stability guard for explicit integration.
//!
//! Explicit Euler diverges when `dt` is too large for the spring
//! stiffness. The guard keeps the state finite and bounded so a bad
//! sub-step degrades a frame instead of corrupting the simulation.

use serde::{Deserialize, Serialize};
use springfall_math::{clamp_speed, Vec3};
use springfall_types::constants::DEFAULT_MAX_SPEED;

/// Bounds enforced on every integrated point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StabilityGuard {
    /// Speed above which velocities are clamped (m/s).
    pub max_speed: f32,
}

impl StabilityGuard {
    pub fn new(max_speed: f32) -> Self {
        Self { max_speed }
    }

    /// Zeroes a non-finite velocity and clamps an excessive one.
    /// Returns the guarded velocity and whether it was changed.
    #[inline]
    pub fn velocity(&self, velocity: Vec3) -> (Vec3, bool) {
        if !velocity.is_finite() {
            return (Vec3::ZERO, true);
        }
        clamp_speed(velocity, self.max_speed)
    }

    /// Keeps `previous` when `next` is not finite.
    #[inline]
    pub fn position(&self, previous: Vec3, next: Vec3) -> (Vec3, bool) {
        if next.is_finite() {
            (next, false)
        } else {
            (previous, true)
        }
    }
}

impl Default for StabilityGuard {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_SPEED)
    }
}
