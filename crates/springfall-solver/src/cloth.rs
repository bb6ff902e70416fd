//! Mass-spring cloth solver.
//!
//! An `n × n` grid of unit masses connected by a spring stencil, falling
//! under gravity (and optional wind) onto a sphere. The row `j == 0` is
//! pinned and never moves.
//!
//! ## Algorithm (per sub-step)
//!
//! 1. **Forces** (parallel): every node reads the pre-step snapshot and
//!    computes its next velocity from gravity, wind and spring/dashpot
//!    forces into a scratch buffer. No node writes shared state.
//! 2. **Constrain + integrate** (parallel, after the force pass): air drag,
//!    sphere contact, position update for free nodes, stability guard.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use tracing::{debug, warn};

use springfall_contact::SphereObstacle;
use springfall_math::{separation, Vec3};
use springfall_mesh::generators::flat_sheet;
use springfall_mesh::{GridTopology, SpringStencil};
use springfall_types::{GridCoord, SpringfallResult};

use crate::config::{validate_dt, ClothConfig};
use crate::guard::StabilityGuard;
use crate::integrator::{advance_velocity, SymplecticEuler};
use crate::state::PointState;
use crate::strategy::{Simulator, StepResult};
use crate::wind::WindState;

/// Force of one spring with a parallel dashpot, acting on endpoint `i`.
///
/// `F = -k·d·(|x_i - x_j| / rest - 1) - ((v_i - v_j)·d)·d·damping`
/// with `d` the unit direction from `j` to `i`. Returns `None` when the
/// endpoints coincide.
#[inline]
pub fn spring_force(
    xi: Vec3,
    vi: Vec3,
    xj: Vec3,
    vj: Vec3,
    rest_length: f32,
    stiffness: f32,
    damping: f32,
) -> Option<Vec3> {
    let s = separation(xi, xj)?;
    let d = s.normal;
    let elastic = -stiffness * d * (s.distance / rest_length - 1.0);
    let dashpot = -(vi - vj).dot(d) * d * damping;
    Some(elastic + dashpot)
}

/// True for nodes of the pinned row.
#[inline]
pub fn is_pinned(index: usize, n: usize) -> bool {
    index % n == 0
}

/// Mass-spring cloth over a sphere obstacle.
pub struct ClothSolver {
    config: ClothConfig,
    topology: GridTopology,
    stencil: SpringStencil,
    state: PointState,
    obstacle: SphereObstacle,
    gravity: Vec3,
    wind: WindState,
    integrator: SymplecticEuler,
    rng: StdRng,
    /// Next velocity and degenerate-link count per node.
    scratch: Vec<(Vec3, u32)>,
}

impl ClothSolver {
    /// Validates `config`, builds topology and stencil, and places the sheet.
    pub fn new(config: ClothConfig) -> SpringfallResult<Self> {
        config.validate()?;

        let n = config.grid_size;
        let topology = GridTopology::build(n)?;
        let stencil = SpringStencil::new(config.springs, config.spacing)?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut solver = Self {
            topology,
            stencil,
            state: PointState::new(n * n),
            obstacle: config.obstacle,
            gravity: Vec3::from(config.gravity),
            wind: WindState::new(Vec3::from(config.wind), config.wind_enabled),
            integrator: SymplecticEuler::new(StabilityGuard::new(config.max_speed)),
            rng,
            scratch: vec![(Vec3::ZERO, 0); n * n],
            config,
        };
        solver.reset();

        debug!(
            nodes = n * n,
            links = solver.stencil.links().len(),
            triangles = solver.topology.triangle_count(),
            "cloth solver initialized"
        );
        Ok(solver)
    }

    /// Re-places the sheet using an external random source.
    pub fn reset_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        place_sheet(&self.config, &mut self.state, rng);
    }

    /// Replaces the owned random source.
    pub fn reseed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    pub fn config(&self) -> &ClothConfig {
        &self.config
    }

    /// Triangle indices and checkerboard tags, computed once.
    pub fn topology(&self) -> &GridTopology {
        &self.topology
    }

    pub fn stencil(&self) -> &SpringStencil {
        &self.stencil
    }

    pub fn grid_size(&self) -> usize {
        self.config.grid_size
    }

    pub fn obstacle(&self) -> &SphereObstacle {
        &self.obstacle
    }

    /// Moves the sphere. Takes effect on the next sub-step.
    pub fn set_obstacle_center(&mut self, center: Vec3) {
        self.obstacle.set_center(center);
    }

    pub fn set_wind_enabled(&mut self, enabled: bool) {
        self.wind.enabled = enabled;
    }

    /// Mutable access for tools that seed a custom configuration.
    pub fn state_mut(&mut self) -> &mut PointState {
        &mut self.state
    }

    fn force_pass(&mut self, dt: f32) {
        let n = self.config.grid_size;
        let k = self.config.stiffness;
        let damping = self.config.dashpot * self.config.spacing;
        let external = self.gravity + self.wind.acceleration();
        let links = self.stencil.links();
        let positions = &self.state.positions;
        let velocities = &self.state.velocities;

        self.scratch
            .par_iter_mut()
            .enumerate()
            .for_each(|(index, slot)| {
                let coord = GridCoord::from_flat(index, n);
                let xi = positions[index];
                let vi = velocities[index];
                let mut force = external;
                let mut degenerate = 0;

                for link in links {
                    let Some(neighbor) = coord.offset(link.di, link.dj, n) else {
                        continue;
                    };
                    let j = neighbor.flat(n);
                    match spring_force(xi, vi, positions[j], velocities[j], link.rest_length, k, damping) {
                        Some(f) => force += f,
                        None => degenerate += 1,
                    }
                }

                *slot = (advance_velocity(vi, force, dt), degenerate);
            });
    }

    fn integrate_pass(&mut self, dt: f32) -> (u32, u32) {
        let n = self.config.grid_size;
        let drag = (-self.config.drag * dt).exp();
        let obstacle = self.obstacle;
        let integrator = self.integrator;

        self.state
            .positions
            .par_iter_mut()
            .zip(self.state.velocities.par_iter_mut())
            .zip(self.scratch.par_iter())
            .enumerate()
            .map(|(index, ((x, v), &(next, _)))| {
                let (velocity, hit) = obstacle.resolve(*x, next * drag);
                let drift = integrator.drift(*x, velocity, dt, is_pinned(index, n));
                *x = drift.position;
                *v = drift.velocity;
                (hit as u32, drift.corrected as u32)
            })
            .reduce(|| (0, 0), |a, b| (a.0 + b.0, a.1 + b.1))
    }
}

/// Lays the sheet flat at the drop height with one shared random offset.
fn place_sheet<R: Rng + ?Sized>(config: &ClothConfig, state: &mut PointState, rng: &mut R) {
    let amplitude = config.jitter * config.spacing;
    let offset = [
        (rng.gen::<f32>() - 0.5) * amplitude,
        (rng.gen::<f32>() - 0.5) * amplitude,
    ];
    state.reinitialize(flat_sheet(
        config.grid_size,
        config.spacing,
        config.drop_height,
        offset,
    ));
    debug!(offset_x = offset[0], offset_z = offset[1], "cloth reset");
}

impl Simulator for ClothSolver {
    fn reset(&mut self) {
        place_sheet(&self.config, &mut self.state, &mut self.rng);
    }

    fn step(&mut self, dt: f32) -> SpringfallResult<StepResult> {
        validate_dt(dt)?;
        let start = std::time::Instant::now();

        self.force_pass(dt);
        let (contacts, clamped) = self.integrate_pass(dt);
        let degenerate = self.scratch.par_iter().map(|&(_, d)| d).sum();

        if clamped > 0 {
            warn!(clamped, "cloth stability guard corrected nodes");
        }

        Ok(StepResult {
            wall_time: start.elapsed().as_secs_f64(),
            contacts,
            candidate_pairs: 0,
            degenerate,
            clamped,
        })
    }

    fn toggle_wind(&mut self) {
        let enabled = self.wind.toggle();
        debug!(enabled, "cloth wind toggled");
    }

    fn wind_enabled(&self) -> bool {
        self.wind.enabled
    }

    fn state(&self) -> &PointState {
        &self.state
    }

    fn name(&self) -> &str {
        "cloth"
    }
}
