//! Scenarios — simulator config plus frame settings for each demo.
//!
//! 1. **Cloth drape** — 128 × 128 cloth falls onto a ball; resets itself
//!    every 1.5 s of simulated time.
//! 2. **Free fall** — 33² spheres dropped into a box.
//! 3. **Windy free fall** — the same, with wind switched on at frame 0.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use springfall_solver::config::{substeps_for, validate_dt};
use springfall_solver::{ClothConfig, ClothSolver, ParticleCollisionSolver, ParticleConfig, Simulator};
use springfall_types::{SpringfallError, SpringfallResult};

/// Seconds of simulated time after which the cloth demo starts over.
pub const CLOTH_RESET_AFTER: f64 = 1.5;

/// Which scenario to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioKind {
    ClothDrape,
    FreeFall,
    WindyFreeFall,
}

impl ScenarioKind {
    pub fn all() -> &'static [ScenarioKind] {
        &[
            ScenarioKind::ClothDrape,
            ScenarioKind::FreeFall,
            ScenarioKind::WindyFreeFall,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            ScenarioKind::ClothDrape => "cloth_drape",
            ScenarioKind::FreeFall => "free_fall",
            ScenarioKind::WindyFreeFall => "windy_free_fall",
        }
    }
}

impl fmt::Display for ScenarioKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ScenarioKind {
    type Err = SpringfallError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| {
                let names: Vec<&str> = Self::all().iter().map(|k| k.name()).collect();
                SpringfallError::InvalidConfig(format!(
                    "unknown scenario '{s}' (available: {})",
                    names.join(", ")
                ))
            })
    }
}

/// Frame loop settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameConfig {
    /// Display frames to run.
    pub frames: u32,
    /// Sub-step size. `None` uses the simulator's default.
    pub dt: Option<f32>,
    /// Sub-steps per frame. `None` fills one 60 Hz frame.
    pub substeps: Option<u32>,
    /// Reset the simulator after this much simulated time (seconds).
    pub reset_after: Option<f64>,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            frames: 180,
            dt: None,
            substeps: None,
            reset_after: None,
        }
    }
}

impl FrameConfig {
    pub fn validate(&self) -> SpringfallResult<()> {
        if let Some(dt) = self.dt {
            validate_dt(dt)?;
        }
        if self.substeps == Some(0) {
            return Err(SpringfallError::InvalidConfig(
                "substeps per frame must be at least 1".into(),
            ));
        }
        if let Some(t) = self.reset_after {
            if !(t.is_finite() && t > 0.0) {
                return Err(SpringfallError::InvalidConfig(format!(
                    "reset_after must be positive (got {t})"
                )));
            }
        }
        Ok(())
    }
}

/// Configuration of the simulator a scenario drives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SimulatorConfig {
    Cloth(ClothConfig),
    Particles(ParticleConfig),
}

impl SimulatorConfig {
    pub fn validate(&self) -> SpringfallResult<()> {
        match self {
            SimulatorConfig::Cloth(c) => c.validate(),
            SimulatorConfig::Particles(p) => p.validate(),
        }
    }

    pub fn default_dt(&self) -> f32 {
        match self {
            SimulatorConfig::Cloth(c) => c.default_dt(),
            SimulatorConfig::Particles(p) => p.default_dt(),
        }
    }

    /// Number of simulated points.
    pub fn point_count(&self) -> usize {
        match self {
            SimulatorConfig::Cloth(c) => c.grid_size * c.grid_size,
            SimulatorConfig::Particles(p) => p.count,
        }
    }

    pub fn set_seed(&mut self, seed: Option<u64>) {
        match self {
            SimulatorConfig::Cloth(c) => c.seed = seed,
            SimulatorConfig::Particles(p) => p.seed = seed,
        }
    }
}

/// A fully specified scenario.
#[derive(Debug, Clone, PartialEq)]
pub struct Scenario {
    pub kind: ScenarioKind,
    pub model: SimulatorConfig,
    pub frame: FrameConfig,
    /// Frames at which the driver toggles wind.
    pub wind_toggles: Vec<u32>,
}

impl Scenario {
    /// The cloth demo: a 128 × 128 sheet dropped onto a ball.
    pub fn cloth_drape() -> Self {
        Self {
            kind: ScenarioKind::ClothDrape,
            model: SimulatorConfig::Cloth(ClothConfig::default()),
            frame: FrameConfig {
                reset_after: Some(CLOTH_RESET_AFTER),
                ..Default::default()
            },
            wind_toggles: Vec::new(),
        }
    }

    /// The free-fall demo: 33² spheres in a 40 m box.
    pub fn free_fall() -> Self {
        Self {
            kind: ScenarioKind::FreeFall,
            model: SimulatorConfig::Particles(ParticleConfig::default()),
            frame: FrameConfig::default(),
            wind_toggles: Vec::new(),
        }
    }

    /// Free fall with wind switched on before the first frame.
    pub fn windy_free_fall() -> Self {
        Self {
            kind: ScenarioKind::WindyFreeFall,
            wind_toggles: vec![0],
            ..Self::free_fall()
        }
    }

    pub fn from_kind(kind: ScenarioKind) -> Self {
        match kind {
            ScenarioKind::ClothDrape => Self::cloth_drape(),
            ScenarioKind::FreeFall => Self::free_fall(),
            ScenarioKind::WindyFreeFall => Self::windy_free_fall(),
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.model.set_seed(Some(seed));
        self
    }

    pub fn with_frames(mut self, frames: u32) -> Self {
        self.frame.frames = frames;
        self
    }

    /// Sub-step size actually used.
    pub fn dt(&self) -> f32 {
        self.frame.dt.unwrap_or_else(|| self.model.default_dt())
    }

    /// Sub-steps per frame actually used.
    pub fn substeps(&self) -> u32 {
        self.frame.substeps.unwrap_or_else(|| substeps_for(self.dt()))
    }

    pub fn validate(&self) -> SpringfallResult<()> {
        self.model.validate()?;
        self.frame.validate()
    }

    /// Constructs the simulator this scenario describes.
    pub fn build(&self) -> SpringfallResult<Box<dyn Simulator>> {
        Ok(match &self.model {
            SimulatorConfig::Cloth(c) => Box::new(ClothSolver::new(c.clone())?),
            SimulatorConfig::Particles(p) => Box::new(ParticleCollisionSolver::new(p.clone())?),
        })
    }
}

/// TOML scene file.
///
/// ```toml
/// scenario = "cloth_drape"
///
/// [cloth]
/// grid_size = 64
/// spacing = 0.015625
///
/// [frame]
/// frames = 300
/// reset_after = 2.0
/// ```
///
/// `[cloth]` and `[particles]` replace the scenario's simulator config;
/// `[frame]` replaces its frame settings. Omitted keys inside a table take
/// their default values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SceneFile {
    pub scenario: Option<ScenarioKind>,
    pub cloth: Option<ClothConfig>,
    pub particles: Option<ParticleConfig>,
    pub frame: Option<FrameConfig>,
}

impl SceneFile {
    pub fn parse(text: &str) -> SpringfallResult<Self> {
        toml::from_str(text).map_err(|e| SpringfallError::InvalidConfig(format!("scene file: {e}")))
    }

    pub fn load(path: &Path) -> SpringfallResult<Self> {
        Self::parse(&std::fs::read_to_string(path)?)
    }

    /// Validates every section present in the file.
    pub fn validate(&self) -> SpringfallResult<()> {
        if let Some(cloth) = &self.cloth {
            cloth.validate()?;
        }
        if let Some(particles) = &self.particles {
            particles.validate()?;
        }
        if let Some(frame) = &self.frame {
            frame.validate()?;
        }
        Ok(())
    }

    /// Resolves the file against `fallback` (used when it names no scenario).
    pub fn into_scenario(self, fallback: ScenarioKind) -> SpringfallResult<Scenario> {
        self.validate()?;
        let mut scenario = Scenario::from_kind(self.scenario.unwrap_or(fallback));

        match (&mut scenario.model, self.cloth, self.particles) {
            (SimulatorConfig::Cloth(current), Some(cloth), _) => *current = cloth,
            (SimulatorConfig::Particles(current), _, Some(particles)) => *current = particles,
            (SimulatorConfig::Cloth(_), None, Some(_)) | (SimulatorConfig::Particles(_), Some(_), None) => {
                tracing::warn!(
                    scenario = scenario.kind.name(),
                    "scene file configures a simulator the scenario does not use"
                );
            }
            _ => {}
        }
        if let Some(frame) = self.frame {
            scenario.frame = frame;
        }

        scenario.validate()?;
        Ok(scenario)
    }
}
