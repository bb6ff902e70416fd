//! Free-falling particle system with sphere–sphere contacts.
//!
//! Equal spheres fall under gravity (and optional wind) inside a box with
//! a restitutive floor and walls.
//!
//! ## Algorithm (per sub-step)
//!
//! 1. Gravity and wind added to every velocity.
//! 2. Broad phase rebuilt from current positions; each particle removes
//!    the approaching component of its own velocity against every neighbor
//!    in contact, visiting neighbors in ascending index order. Each particle
//!    reads only the post-gravity snapshot, so the pass is parallel and
//!    order-independent across particles.
//! 3. Floor and wall reflection, then position update and stability guard.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use tracing::{debug, warn};

use springfall_contact::{AllPairs, BoundingBox, BroadPhase, ContactResult, PairResponse, SpatialHash};
use springfall_math::Vec3;
use springfall_types::SpringfallResult;

use crate::config::{validate_dt, BroadPhaseKind, ParticleConfig};
use crate::guard::StabilityGuard;
use crate::integrator::SymplecticEuler;
use crate::state::PointState;
use crate::strategy::{Simulator, StepResult};
use crate::wind::WindState;

/// Builds the broad phase a config asks for.
pub fn make_broad_phase(config: &ParticleConfig) -> Box<dyn BroadPhase> {
    match config.effective_broad_phase() {
        BroadPhaseKind::UniformGrid => Box::new(SpatialHash::new(
            PairResponse::new(config.radius, config.contact_epsilon).contact_distance,
        )),
        _ => Box::new(AllPairs::new()),
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct PairOutcome {
    velocity: Vec3,
    contacts: ContactResult,
    candidates: u32,
}

/// Colliding spheres inside a bounding box.
pub struct ParticleCollisionSolver {
    config: ParticleConfig,
    state: PointState,
    response: PairResponse,
    broad_phase: Box<dyn BroadPhase>,
    gravity: Vec3,
    wind: WindState,
    integrator: SymplecticEuler,
    rng: StdRng,
    scratch: Vec<PairOutcome>,
}

impl ParticleCollisionSolver {
    /// Validates `config` and spawns the particles.
    pub fn new(config: ParticleConfig) -> SpringfallResult<Self> {
        config.validate()?;

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut solver = Self {
            state: PointState::new(config.count),
            response: PairResponse::new(config.radius, config.contact_epsilon),
            broad_phase: make_broad_phase(&config),
            gravity: Vec3::from(config.gravity),
            wind: WindState::new(Vec3::from(config.wind), config.wind_enabled),
            integrator: SymplecticEuler::new(StabilityGuard::new(config.max_speed)),
            rng,
            scratch: vec![PairOutcome::default(); config.count],
            config,
        };
        solver.reset();

        debug!(
            count = solver.config.count,
            broad_phase = solver.broad_phase.name(),
            "particle solver initialized"
        );
        Ok(solver)
    }

    /// Re-spawns the particles using an external random source.
    pub fn reset_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        scatter(&self.config, &mut self.state, rng);
    }

    /// Replaces the owned random source.
    pub fn reseed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    pub fn config(&self) -> &ParticleConfig {
        &self.config
    }

    pub fn bounds(&self) -> &BoundingBox {
        &self.config.bounds
    }

    pub fn radius(&self) -> f32 {
        self.config.radius
    }

    /// Name of the active broad phase.
    pub fn broad_phase_name(&self) -> &str {
        self.broad_phase.name()
    }

    /// Swaps the broad phase. Contacts are identical either way.
    pub fn set_broad_phase(&mut self, kind: BroadPhaseKind) {
        self.config.broad_phase = kind;
        self.broad_phase = make_broad_phase(&self.config);
    }

    pub fn set_wind_enabled(&mut self, enabled: bool) {
        self.wind.enabled = enabled;
    }

    /// Mutable access for tools that seed a custom configuration.
    pub fn state_mut(&mut self) -> &mut PointState {
        &mut self.state
    }

    fn contact_pass(&mut self) -> SpringfallResult<()> {
        self.broad_phase.update(&self.state.positions)?;

        let broad_phase = &*self.broad_phase;
        let response = self.response;
        let positions = &self.state.positions;
        let velocities = &self.state.velocities;

        self.scratch
            .par_iter_mut()
            .enumerate()
            .for_each_init(Vec::new, |candidates, (index, slot)| {
                broad_phase.candidates(index, positions, candidates);
                let (velocity, contacts) =
                    response.resolve(index, positions, velocities[index], candidates);
                *slot = PairOutcome {
                    velocity,
                    contacts,
                    candidates: candidates.len() as u32,
                };
            });
        Ok(())
    }

    fn integrate_pass(&mut self, dt: f32) -> (u32, u32) {
        let bounds = self.config.bounds;
        let radius = self.config.radius;
        let integrator = self.integrator;

        self.state
            .positions
            .par_iter_mut()
            .zip(self.state.velocities.par_iter_mut())
            .zip(self.scratch.par_iter())
            .map(|((x, v), outcome)| {
                let (velocity, hits) = bounds.reflect(*x, outcome.velocity, radius);
                let drift = integrator.drift(*x, velocity, dt, false);
                *x = drift.position;
                *v = drift.velocity;
                (hits, drift.corrected as u32)
            })
            .reduce(|| (0, 0), |a, b| (a.0 + b.0, a.1 + b.1))
    }
}

/// Independent uniform spawn positions above the floor, zero velocity.
fn scatter<R: Rng + ?Sized>(config: &ParticleConfig, state: &mut PointState, rng: &mut R) {
    let spread = config.scatter * config.bounds.size;
    let height = config.drop_height;
    let positions = (0..config.count).map(|_| {
        let (u, v, w): (f32, f32, f32) = (rng.gen(), rng.gen(), rng.gen());
        Vec3::new((u - 0.5) * spread, height + v * spread, (w - 0.5) * spread)
    });
    state.reinitialize(positions);
    debug!(count = config.count, spread, "particles reset");
}

impl Simulator for ParticleCollisionSolver {
    fn reset(&mut self) {
        scatter(&self.config, &mut self.state, &mut self.rng);
    }

    fn step(&mut self, dt: f32) -> SpringfallResult<StepResult> {
        validate_dt(dt)?;
        let start = std::time::Instant::now();

        SymplecticEuler::kick(
            &mut self.state.velocities,
            self.gravity + self.wind.acceleration(),
            dt,
        );
        self.contact_pass()?;
        let (boundary_hits, clamped) = self.integrate_pass(dt);

        let pairs = self
            .scratch
            .par_iter()
            .map(|o| o.contacts)
            .reduce(ContactResult::default, ContactResult::merge);
        let candidates: u32 = self.scratch.par_iter().map(|o| o.candidates).sum();

        if clamped > 0 {
            warn!(clamped, "particle stability guard corrected particles");
        }

        Ok(StepResult {
            wall_time: start.elapsed().as_secs_f64(),
            contacts: pairs.resolved_count + boundary_hits,
            candidate_pairs: candidates / 2,
            degenerate: pairs.degenerate_count,
            clamped,
        })
    }

    fn toggle_wind(&mut self) {
        let enabled = self.wind.toggle();
        debug!(enabled, "particle wind toggled");
    }

    fn wind_enabled(&self) -> bool {
        self.wind.enabled
    }

    fn state(&self) -> &PointState {
        &self.state
    }

    fn name(&self) -> &str {
        "particles"
    }
}
