//! Semi-implicit (symplectic) Euler integration.
//!
//! `v(t+dt) = v(t) + a·dt`, then `x(t+dt) = x(t) + v(t+dt)·dt`.
//! Updating velocity first makes the scheme symplectic, which is what
//! keeps the mass-spring cloth from gaining energy at moderate `dt`.

use rayon::prelude::*;
use springfall_math::Vec3;

use crate::guard::StabilityGuard;

/// `v + a·dt`.
#[inline]
pub fn advance_velocity(velocity: Vec3, acceleration: Vec3, dt: f32) -> Vec3 {
    velocity + acceleration * dt
}

/// `x + v·dt`.
#[inline]
pub fn advance_position(position: Vec3, velocity: Vec3, dt: f32) -> Vec3 {
    position + velocity * dt
}

/// Outcome of integrating one point's position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Drift {
    pub position: Vec3,
    pub velocity: Vec3,
    /// The stability guard had to intervene.
    pub corrected: bool,
}

/// Symplectic Euler integrator with a stability guard.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SymplecticEuler {
    pub guard: StabilityGuard,
}

impl SymplecticEuler {
    pub fn new(guard: StabilityGuard) -> Self {
        Self { guard }
    }

    /// Adds a uniform acceleration to every velocity.
    pub fn kick(velocities: &mut [Vec3], acceleration: Vec3, dt: f32) {
        velocities
            .par_iter_mut()
            .for_each(|v| *v = advance_velocity(*v, acceleration, dt));
    }

    /// Integrates one position from an already-updated velocity.
    ///
    /// A `fixed` point keeps its position; its velocity is still guarded.
    #[inline]
    pub fn drift(&self, position: Vec3, velocity: Vec3, dt: f32, fixed: bool) -> Drift {
        let (velocity, clamped) = self.guard.velocity(velocity);
        if fixed {
            return Drift {
                position,
                velocity,
                corrected: clamped,
            };
        }

        let (next, reverted) = self.guard.position(position, advance_position(position, velocity, dt));
        Drift {
            position: next,
            velocity: if reverted { Vec3::ZERO } else { velocity },
            corrected: clamped || reverted,
        }
    }
}
