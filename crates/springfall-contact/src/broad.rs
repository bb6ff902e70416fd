//! Broad phase collision detection trait.
//!
//! Quickly identifies *candidate* neighbors using spatial acceleration.
//! The pair response then rechecks the exact distance, so a broad phase
//! may over-report but must never miss a pair within contact distance.

use springfall_math::Vec3;
use springfall_types::SpringfallResult;

/// Trait for broad phase collision detection.
///
/// `update` runs once per sub-step; `candidates` is then called
/// concurrently for every particle, hence the `Sync` bound.
///
/// # Implementations
/// - [`AllPairs`] — every other particle; O(k²), exact for small counts
/// - [`SpatialHash`](crate::spatial_hash::SpatialHash) — uniform grid
pub trait BroadPhase: Send + Sync {
    /// Build or update the acceleration structure from current positions.
    fn update(&mut self, positions: &[Vec3]) -> SpringfallResult<()>;

    /// Writes the candidate neighbors of `index` into `out`, sorted
    /// ascending and excluding `index` itself.
    fn candidates(&self, index: usize, positions: &[Vec3], out: &mut Vec<u32>);

    /// Returns the broad phase strategy name.
    fn name(&self) -> &str;
}

/// Brute-force broad phase: every particle is a candidate of every other.
#[derive(Debug, Default)]
pub struct AllPairs {
    count: u32,
}

impl AllPairs {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BroadPhase for AllPairs {
    fn update(&mut self, positions: &[Vec3]) -> SpringfallResult<()> {
        self.count = positions.len() as u32;
        Ok(())
    }

    fn candidates(&self, index: usize, _positions: &[Vec3], out: &mut Vec<u32>) {
        out.clear();
        out.extend((0..self.count).filter(|&j| j as usize != index));
    }

    fn name(&self) -> &str {
        "all_pairs"
    }
}
