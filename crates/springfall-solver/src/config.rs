//! Solver configuration.
//!
//! Parameters that control the two simulators. Defaults reproduce the
//! cloth-on-sphere and free-fall scenes; every field can be overridden
//! from a TOML scene file (missing fields fall back to the default).

use serde::{Deserialize, Serialize};
use springfall_contact::{BoundingBox, SphereObstacle};
use springfall_mesh::StencilKinds;
use springfall_types::constants::{
    CLOTH_DROP_HEIGHT, CLOTH_GRID_SIZE, CLOTH_JITTER, CLOTH_WIND, CONTACT_EPSILON, DASHPOT_DAMPING,
    DEFAULT_MAX_SPEED, DRAG_DAMPING, DT_SCALE, GRAVITY, GRID_BROAD_PHASE_THRESHOLD,
    PARTICLE_DROP_HEIGHT, PARTICLE_GRID_SIDE, PARTICLE_RADIUS, PARTICLE_SCATTER,
    PARTICLE_WIND, SPRING_STIFFNESS, TARGET_FRAME_RATE,
};
use springfall_types::{SpringfallError, SpringfallResult};

/// Number of sub-steps that fit in one display frame at `dt` (at least 1).
pub fn substeps_for(dt: f32) -> u32 {
    ((1.0 / TARGET_FRAME_RATE) / dt).floor().max(1.0) as u32
}

/// Rejects a non-positive or non-finite time step.
pub fn validate_dt(dt: f32) -> SpringfallResult<()> {
    if dt.is_finite() && dt > 0.0 {
        Ok(())
    } else {
        Err(SpringfallError::InvalidConfig(format!(
            "time step must be positive and finite (got {dt})"
        )))
    }
}

fn check_finite(name: &str, value: &[f32]) -> SpringfallResult<()> {
    if value.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(SpringfallError::InvalidConfig(format!(
            "{name} must be finite (got {value:?})"
        )))
    }
}

fn check_positive(name: &str, value: f32) -> SpringfallResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SpringfallError::InvalidConfig(format!(
            "{name} must be positive (got {value})"
        )))
    }
}

fn check_non_negative(name: &str, value: f32) -> SpringfallResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(SpringfallError::InvalidConfig(format!(
            "{name} must be non-negative (got {value})"
        )))
    }
}

// ─── Cloth ────────────────────────────────────────────────────

/// Configuration for [`ClothSolver`](crate::ClothSolver).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClothConfig {
    /// Nodes per side (n × n grid).
    pub grid_size: usize,

    /// Rest distance between adjacent nodes (m).
    pub spacing: f32,

    /// Height of the sheet after a reset (m).
    pub drop_height: f32,

    /// Random in-plane offset applied to the whole sheet on reset,
    /// as a fraction of `spacing`.
    pub jitter: f32,

    /// Spring stiffness `k`.
    pub stiffness: f32,

    /// Dashpot damping; the per-link coefficient is `dashpot * spacing`.
    pub dashpot: f32,

    /// Exponential air drag rate (1/s).
    pub drag: f32,

    /// Gravity vector [gx, gy, gz] in m/s².
    pub gravity: [f32; 3],

    /// Wind force [wx, wy, wz] applied while wind is on.
    pub wind: [f32; 3],

    /// Whether wind starts enabled.
    pub wind_enabled: bool,

    /// Which spring families are connected.
    pub springs: StencilKinds,

    /// Sphere the cloth falls onto.
    pub obstacle: SphereObstacle,

    /// Speed bound enforced by the stability guard (m/s).
    pub max_speed: f32,

    /// Seed for the reset jitter. `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl Default for ClothConfig {
    fn default() -> Self {
        Self {
            grid_size: CLOTH_GRID_SIZE,
            spacing: 1.0 / CLOTH_GRID_SIZE as f32,
            drop_height: CLOTH_DROP_HEIGHT,
            jitter: CLOTH_JITTER,
            stiffness: SPRING_STIFFNESS,
            dashpot: DASHPOT_DAMPING,
            drag: DRAG_DAMPING,
            gravity: [0.0, -GRAVITY, 0.0],
            wind: CLOTH_WIND,
            wind_enabled: false,
            springs: StencilKinds::default(),
            obstacle: SphereObstacle::default(),
            max_speed: DEFAULT_MAX_SPEED,
            seed: None,
        }
    }
}

impl ClothConfig {
    /// Unit-sized sheet with `n` nodes per side (`spacing = 1 / n`).
    pub fn with_grid_size(n: usize) -> Self {
        Self {
            grid_size: n,
            spacing: 1.0 / n.max(1) as f32,
            ..Default::default()
        }
    }

    /// Adds bend springs (two-apart axial links) to the default stencil.
    pub fn bending() -> Self {
        Self {
            springs: StencilKinds::all(),
            ..Default::default()
        }
    }

    /// Sub-step used by the cloth demo: `4e-2 / n`.
    pub fn default_dt(&self) -> f32 {
        DT_SCALE / self.grid_size.max(1) as f32
    }

    /// Sub-steps per frame at [`default_dt`](Self::default_dt).
    pub fn default_substeps(&self) -> u32 {
        substeps_for(self.default_dt())
    }

    pub fn validate(&self) -> SpringfallResult<()> {
        if self.grid_size < 2 {
            return Err(SpringfallError::InvalidConfig(format!(
                "cloth grid needs at least 2 nodes per side (got {})",
                self.grid_size
            )));
        }
        if self.grid_size.saturating_mul(self.grid_size) > u32::MAX as usize {
            return Err(SpringfallError::InvalidConfig(format!(
                "cloth grid of {} nodes per side overflows u32 indices",
                self.grid_size
            )));
        }
        check_positive("spacing", self.spacing)?;
        check_positive("max_speed", self.max_speed)?;
        check_finite("drop_height", &[self.drop_height])?;
        check_non_negative("jitter", self.jitter)?;
        check_non_negative("stiffness", self.stiffness)?;
        check_non_negative("dashpot", self.dashpot)?;
        check_non_negative("drag", self.drag)?;
        check_finite("gravity", &self.gravity)?;
        check_finite("wind", &self.wind)?;
        self.obstacle.validate()
    }
}

// ─── Particles ────────────────────────────────────────────────

/// Broad-phase strategy for particle–particle contacts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BroadPhaseKind {
    /// Uniform grid above `grid_threshold` particles, all pairs below.
    #[default]
    Auto,
    /// Test every pair.
    AllPairs,
    /// Uniform spatial hash with cells of one contact distance.
    UniformGrid,
}

/// Configuration for [`ParticleCollisionSolver`](crate::ParticleCollisionSolver).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticleConfig {
    /// Number of particles.
    pub count: usize,

    /// Radius shared by all particles (m).
    pub radius: f32,

    /// Floor and walls.
    pub bounds: BoundingBox,

    /// Lowest spawn height (m).
    pub drop_height: f32,

    /// Spawn spread as a fraction of `bounds.size`.
    pub scatter: f32,

    /// Slack added to `2r` when testing for contact.
    pub contact_epsilon: f32,

    /// Gravity vector [gx, gy, gz] in m/s².
    pub gravity: [f32; 3],

    /// Wind force [wx, wy, wz] applied while wind is on.
    pub wind: [f32; 3],

    /// Whether wind starts enabled.
    pub wind_enabled: bool,

    pub broad_phase: BroadPhaseKind,

    /// Particle count above which `Auto` switches to the uniform grid.
    pub grid_threshold: usize,

    /// Speed bound enforced by the stability guard (m/s).
    pub max_speed: f32,

    /// Seed for spawn positions. `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            count: PARTICLE_GRID_SIDE * PARTICLE_GRID_SIDE,
            radius: PARTICLE_RADIUS,
            bounds: BoundingBox::default(),
            drop_height: PARTICLE_DROP_HEIGHT,
            scatter: PARTICLE_SCATTER,
            contact_epsilon: CONTACT_EPSILON,
            gravity: [0.0, -GRAVITY, 0.0],
            wind: PARTICLE_WIND,
            wind_enabled: false,
            broad_phase: BroadPhaseKind::Auto,
            grid_threshold: GRID_BROAD_PHASE_THRESHOLD,
            max_speed: DEFAULT_MAX_SPEED,
            seed: None,
        }
    }
}

impl ParticleConfig {
    /// A few dozen particles in a small box, for debugging.
    pub fn small() -> Self {
        Self {
            count: 64,
            bounds: BoundingBox::new(2.0, 1.0),
            drop_height: 1.0,
            scatter: 1.0,
            ..Default::default()
        }
    }

    /// Sub-step used by the free-fall demo: `4e-2 / sqrt(count)`.
    pub fn default_dt(&self) -> f32 {
        DT_SCALE / (self.count.max(1) as f32).sqrt()
    }

    /// Sub-steps per frame at [`default_dt`](Self::default_dt).
    pub fn default_substeps(&self) -> u32 {
        substeps_for(self.default_dt())
    }

    /// Resolves `Auto` against the particle count.
    pub fn effective_broad_phase(&self) -> BroadPhaseKind {
        match self.broad_phase {
            BroadPhaseKind::Auto if self.count > self.grid_threshold => BroadPhaseKind::UniformGrid,
            BroadPhaseKind::Auto => BroadPhaseKind::AllPairs,
            kind => kind,
        }
    }

    pub fn validate(&self) -> SpringfallResult<()> {
        if self.count == 0 {
            return Err(SpringfallError::InvalidConfig(
                "particle count must be at least 1".into(),
            ));
        }
        if self.count > u32::MAX as usize {
            return Err(SpringfallError::InvalidConfig(format!(
                "particle count {} overflows u32 indices",
                self.count
            )));
        }
        check_positive("radius", self.radius)?;
        check_positive("max_speed", self.max_speed)?;
        check_finite("drop_height", &[self.drop_height])?;
        check_non_negative("scatter", self.scatter)?;
        check_non_negative("contact_epsilon", self.contact_epsilon)?;
        check_finite("gravity", &self.gravity)?;
        check_finite("wind", &self.wind)?;
        self.bounds.validate()
    }
}
