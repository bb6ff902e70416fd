//! Axis-aligned bounding box for the particle system.
//!
//! The box has a floor at `y = 0` and four vertical walls at
//! `±size * wall_margin` along X and Z. A particle moving into a face it
//! has reached gets that velocity component reflected and scaled by the
//! coefficient of restitution. There is no ceiling; `height` only
//! describes the visible walls.

use serde::{Deserialize, Serialize};
use springfall_math::Vec3;
use springfall_types::constants::{FLOOR_OFFSET, RESTITUTION, WALL_HEIGHT, WALL_MARGIN};
use springfall_types::{SpringfallError, SpringfallResult};

/// Axis-aligned box boundary with restitution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoundingBox {
    /// Half extent along X and Z.
    pub size: f32,
    /// Height of the walls (informational).
    pub height: f32,
    /// Walls sit at `±size * wall_margin`.
    pub wall_margin: f32,
    /// Contact height above the floor, added to the particle radius.
    pub floor_offset: f32,
    /// Fraction of normal speed kept after a bounce, in `[0, 1]`.
    pub restitution: f32,
}

impl BoundingBox {
    /// Creates a box with default margin, floor offset and restitution.
    pub fn new(size: f32, height: f32) -> Self {
        Self {
            size,
            height,
            wall_margin: WALL_MARGIN,
            floor_offset: FLOOR_OFFSET,
            restitution: RESTITUTION,
        }
    }

    /// Sets the coefficient of restitution.
    pub fn with_restitution(mut self, restitution: f32) -> Self {
        self.restitution = restitution;
        self
    }

    /// Validates extents and restitution.
    pub fn validate(&self) -> SpringfallResult<()> {
        if !(self.size.is_finite() && self.size > 0.0) {
            return Err(SpringfallError::InvalidConfig(format!(
                "bounding box size must be positive (got {})",
                self.size
            )));
        }
        if !(0.0..=1.0).contains(&self.restitution) {
            return Err(SpringfallError::InvalidConfig(format!(
                "restitution must be in [0, 1] (got {})",
                self.restitution
            )));
        }
        if !(self.wall_margin.is_finite() && self.wall_margin > 0.0)
            || !self.floor_offset.is_finite()
            || !self.height.is_finite()
        {
            return Err(SpringfallError::InvalidConfig(
                "bounding box margins must be finite".into(),
            ));
        }
        Ok(())
    }

    /// Wall coordinate along X and Z.
    #[inline]
    pub fn wall(&self) -> f32 {
        self.size * self.wall_margin
    }

    /// Reflects the velocity components that drive a particle of `radius`
    /// at `position` into the floor or a wall. Returns the new velocity and
    /// the number of faces hit.
    pub fn reflect(&self, position: Vec3, mut velocity: Vec3, radius: f32) -> (Vec3, u32) {
        let e = self.restitution;
        let wall = self.wall();
        let mut hits = 0;

        if position.y < self.floor_offset + radius && velocity.y < 0.0 {
            velocity.y = -e * velocity.y;
            hits += 1;
        }

        if (position.x > wall && velocity.x > 0.0) || (position.x < -wall && velocity.x < 0.0) {
            velocity.x = -e * velocity.x;
            hits += 1;
        }

        if (position.z > wall && velocity.z > 0.0) || (position.z < -wall && velocity.z < 0.0) {
            velocity.z = -e * velocity.z;
            hits += 1;
        }

        (velocity, hits)
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::new(springfall_types::constants::SCENE_SIZE, WALL_HEIGHT)
    }
}
