//! Particle–particle contact response.
//!
//! Each particle is corrected on its own: for every neighbor within
//! contact distance, the component of *its* velocity pointing toward that
//! neighbor is removed. The neighbor gets the mirrored treatment when its
//! own row is processed. This is not a shared impulse; the two sides are
//! evaluated independently and may leave the pair slightly asymmetric.

use springfall_math::{remove_inward, separation, Vec3};

use crate::contact::ContactResult;

/// Velocity-projection response between equal spheres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PairResponse {
    /// Center distance at or below which two particles are in contact
    /// (`2r + epsilon`).
    pub contact_distance: f32,
}

impl PairResponse {
    /// Creates a response for spheres of `radius` with contact slack `epsilon`.
    pub fn new(radius: f32, epsilon: f32) -> Self {
        Self {
            contact_distance: 2.0 * radius + epsilon,
        }
    }

    /// Corrects the velocity of particle `index` against its `candidates`.
    ///
    /// Candidates are visited in the given order (ascending by index) and
    /// each correction sees the velocity left by the previous one.
    /// Coincident pairs have no defined normal and are skipped.
    pub fn resolve(
        &self,
        index: usize,
        positions: &[Vec3],
        mut velocity: Vec3,
        candidates: &[u32],
    ) -> (Vec3, ContactResult) {
        let mut result = ContactResult::default();
        let p = positions[index];

        for &j in candidates {
            let q = positions[j as usize];
            if (p - q).length_squared() > self.contact_distance * self.contact_distance {
                continue;
            }
            match separation(p, q) {
                Some(s) => {
                    velocity = remove_inward(velocity, s.normal);
                    result.resolved_count += 1;
                    result.max_penetration = result
                        .max_penetration
                        .max((self.contact_distance - s.distance).max(0.0));
                }
                None => result.degenerate_count += 1,
            }
        }

        (velocity, result)
    }
}
