//! Analytical sphere obstacle.
//!
//! A one-way non-penetration constraint for cloth nodes. Nodes inside the
//! sphere lose the inward normal component of their velocity; positions
//! are left to the integrator.

use serde::{Deserialize, Serialize};
use springfall_math::{remove_inward, separation, Vec3};
use springfall_types::constants::OBSTACLE_RADIUS;
use springfall_types::{SpringfallError, SpringfallResult};

/// Static sphere obstacle. The center can be moved between steps.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SphereObstacle {
    /// Center of the sphere.
    pub center: Vec3,
    /// Radius of the sphere.
    pub radius: f32,
}

impl SphereObstacle {
    /// Creates a new sphere obstacle.
    pub fn new(center: Vec3, radius: f32) -> SpringfallResult<Self> {
        let obstacle = Self { center, radius };
        obstacle.validate()?;
        Ok(obstacle)
    }

    /// Checks that the radius is positive and every value finite.
    pub fn validate(&self) -> SpringfallResult<()> {
        if !(self.radius.is_finite() && self.radius > 0.0) || !self.center.is_finite() {
            return Err(SpringfallError::InvalidConfig(format!(
                "sphere obstacle needs a finite center and positive radius (got {:?}, {})",
                self.center, self.radius
            )));
        }
        Ok(())
    }

    /// Moves the obstacle.
    pub fn set_center(&mut self, center: Vec3) {
        self.center = center;
    }

    /// Returns true if `position` is on or inside the sphere.
    #[inline]
    pub fn contains(&self, position: Vec3) -> bool {
        (position - self.center).length_squared() <= self.radius * self.radius
    }

    /// Returns `velocity` with the inward normal component removed when
    /// `position` is inside the sphere, plus whether a contact was resolved.
    ///
    /// A node exactly at the center has no defined normal and is left alone.
    #[inline]
    pub fn resolve(&self, position: Vec3, velocity: Vec3) -> (Vec3, bool) {
        if !self.contains(position) {
            return (velocity, false);
        }
        match separation(position, self.center) {
            Some(s) => (remove_inward(velocity, s.normal), true),
            None => (velocity, false),
        }
    }
}

impl Default for SphereObstacle {
    /// The cloth demo's ball: radius 0.3 at the origin.
    fn default() -> Self {
        Self {
            center: Vec3::ZERO,
            radius: OBSTACLE_RADIUS,
        }
    }
}
