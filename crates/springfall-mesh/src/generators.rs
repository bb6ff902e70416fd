//! Procedural layouts for the initial cloth sheet.

use springfall_math::Vec3;
use springfall_types::GridCoord;

/// Generates a flat horizontal `n × n` sheet in the XZ plane at height `y`.
///
/// The sheet spans `[-n·q/2, n·q/2)` along X and Z; every node is shifted
/// by the same horizontal `offset` (x, z). Node `(i, j)` lands at flat index
/// `i * n + j`, with `i` along X and `j` along Z.
pub fn flat_sheet(n: usize, spacing: f32, y: f32, offset: [f32; 2]) -> Vec<Vec3> {
    let half = 0.5 * n as f32 * spacing;
    (0..n * n)
        .map(|index| {
            let c = GridCoord::from_flat(index, n);
            Vec3::new(
                -half + c.i as f32 * spacing + offset[0],
                y,
                -half + c.j as f32 * spacing + offset[1],
            )
        })
        .collect()
}
