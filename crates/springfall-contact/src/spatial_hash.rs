//! Spatial hash broad phase for uniform-grid collision detection.
//!
//! Partitions space into a uniform grid and bins particles into cells.
//! Candidates are the particles in the same or the 26 adjacent cells.
//! Cells are padded slightly past the requested contact distance so a
//! pair exactly at that distance never lands two cells apart.

use std::collections::HashMap;

use springfall_math::Vec3;
use springfall_types::SpringfallResult;

use crate::broad::BroadPhase;

type CellKey = (i32, i32, i32);

/// Relative slack added to the cell edge.
const CELL_PADDING: f32 = 1e-3;

/// Spatial hash broad phase using a uniform grid.
pub struct SpatialHash {
    /// Inverse of the padded cell edge.
    inv_cell_size: f32,
    /// Hash map from cell key to list of particle indices.
    grid: HashMap<CellKey, Vec<u32>>,
}

impl SpatialHash {
    /// Create a spatial hash that reports every pair within `contact_distance`.
    pub fn new(contact_distance: f32) -> Self {
        let cell_size = contact_distance.max(1e-6) * (1.0 + CELL_PADDING);
        Self {
            inv_cell_size: 1.0 / cell_size,
            grid: HashMap::new(),
        }
    }

    /// Hash a position to a cell key.
    fn cell_key(&self, p: Vec3) -> CellKey {
        let c = (p * self.inv_cell_size).floor();
        (c.x as i32, c.y as i32, c.z as i32)
    }
}

impl BroadPhase for SpatialHash {
    fn update(&mut self, positions: &[Vec3]) -> SpringfallResult<()> {
        for bucket in self.grid.values_mut() {
            bucket.clear();
        }

        for (i, &p) in positions.iter().enumerate() {
            let key = self.cell_key(p);
            self.grid.entry(key).or_default().push(i as u32);
        }
        self.grid.retain(|_, bucket| !bucket.is_empty());

        Ok(())
    }

    fn candidates(&self, index: usize, positions: &[Vec3], out: &mut Vec<u32>) {
        out.clear();
        let (cx, cy, cz) = self.cell_key(positions[index]);

        for dx in -1..=1_i32 {
            for dy in -1..=1_i32 {
                for dz in -1..=1_i32 {
                    let key = (
                        cx.saturating_add(dx),
                        cy.saturating_add(dy),
                        cz.saturating_add(dz),
                    );
                    if let Some(bucket) = self.grid.get(&key) {
                        out.extend(bucket.iter().copied().filter(|&j| j as usize != index));
                    }
                }
            }
        }

        // Saturated keys at the i32 limits can visit a cell twice.
        out.sort_unstable();
        out.dedup();
    }

    fn name(&self) -> &str {
        "spatial_hash"
    }
}
