//! # springfall-solver
//!
//! Explicit time integration and the two simulators built on it.
//!
//! ## Key Types
//!
//! - [`PointState`] — Position and velocity buffers of unit-mass points
//! - [`SymplecticEuler`] — Semi-implicit Euler sub-step with a stability guard
//! - [`ClothSolver`] — Mass-spring cloth grid over a sphere obstacle
//! - [`ParticleCollisionSolver`] — Colliding spheres inside a bounding box
//! - [`Simulator`] — Command/snapshot interface the frame driver uses

pub mod cloth;
pub mod config;
pub mod guard;
pub mod integrator;
pub mod particles;
pub mod state;
pub mod strategy;
pub mod wind;

pub use cloth::ClothSolver;
pub use config::{BroadPhaseKind, ClothConfig, ParticleConfig};
pub use guard::StabilityGuard;
pub use integrator::SymplecticEuler;
pub use particles::ParticleCollisionSolver;
pub use state::PointState;
pub use strategy::{Simulator, StepResult};
pub use wind::WindState;
