//! Triangulated grid topology.
//!
//! Built once per cloth from the grid size alone and never mutated.
//! The renderer reads the index buffer and per-node colors; the solver
//! only needs the node count.

use serde::{Deserialize, Serialize};
use springfall_types::{GridCoord, SpringfallError, SpringfallResult};

/// Checkerboard color for tag 0 nodes.
pub const COLOR_A: [f32; 3] = [0.22, 0.72, 0.52];
/// Checkerboard color for tag 1 nodes.
pub const COLOR_B: [f32; 3] = [1.0, 0.344, 0.52];

/// Side length, in nodes, of one checkerboard square.
const CHECKER_SIZE: u32 = 4;

/// Index buffer and static per-node attributes of an `n × n` grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridTopology {
    /// Nodes per side.
    pub n: usize,
    /// Triangle indices, flat `[t0v0, t0v1, t0v2, t1v0, ...]`.
    /// Two triangles per quad, `6 * (n - 1)²` entries.
    pub indices: Vec<u32>,
    /// Checkerboard tag per node: `(i / 4 + j / 4) % 2`.
    pub tags: Vec<u8>,
    /// Render color per node, derived from the tag.
    pub colors: Vec<[f32; 3]>,
}

impl GridTopology {
    /// Build the topology of an `n × n` grid.
    ///
    /// Quad `(i, j)` emits triangles
    /// `[(i, j), (i+1, j), (i, j+1)]` and `[(i+1, j+1), (i, j+1), (i+1, j)]`,
    /// which share the same winding.
    ///
    /// # Example
    /// ```
    /// use springfall_mesh::GridTopology;
    /// let topo = GridTopology::build(3).unwrap();
    /// assert_eq!(topo.node_count(), 9);
    /// assert_eq!(topo.triangle_count(), 8);
    /// ```
    pub fn build(n: usize) -> SpringfallResult<Self> {
        if n < 2 {
            return Err(SpringfallError::InvalidTopology(format!(
                "grid needs at least 2 nodes per side (got {n})"
            )));
        }

        let quads = (n - 1) * (n - 1);
        let mut indices = Vec::with_capacity(quads * 6);

        for i in 0..n - 1 {
            for j in 0..n - 1 {
                let v00 = GridCoord::new(i as u32, j as u32).flat(n) as u32;
                let v10 = v00 + n as u32;
                let v01 = v00 + 1;
                let v11 = v10 + 1;

                indices.extend_from_slice(&[v00, v10, v01]);
                indices.extend_from_slice(&[v11, v01, v10]);
            }
        }

        let mut tags = Vec::with_capacity(n * n);
        let mut colors = Vec::with_capacity(n * n);
        for index in 0..n * n {
            let c = GridCoord::from_flat(index, n);
            let tag = ((c.i / CHECKER_SIZE + c.j / CHECKER_SIZE) % 2) as u8;
            tags.push(tag);
            colors.push(if tag == 0 { COLOR_A } else { COLOR_B });
        }

        Ok(Self {
            n,
            indices,
            tags,
            colors,
        })
    }

    /// Returns the number of nodes.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.n * self.n
    }

    /// Returns the number of triangles.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Returns the three node indices of triangle `t`.
    #[inline]
    pub fn triangle(&self, t: usize) -> [u32; 3] {
        let base = t * 3;
        [self.indices[base], self.indices[base + 1], self.indices[base + 2]]
    }

    /// Validates topology integrity.
    ///
    /// Checks:
    /// - Index count is `6 * (n - 1)²`
    /// - Every index is within `[0, n²)`
    /// - No triangle repeats a node
    /// - Tag and color buffers cover every node
    pub fn validate(&self) -> SpringfallResult<()> {
        let expected = 6 * (self.n - 1) * (self.n - 1);
        if self.indices.len() != expected {
            return Err(SpringfallError::InvalidTopology(format!(
                "index count {} != expected {}",
                self.indices.len(),
                expected
            )));
        }

        let nodes = self.node_count();
        for (i, &idx) in self.indices.iter().enumerate() {
            if idx as usize >= nodes {
                return Err(SpringfallError::InvalidTopology(format!(
                    "index {} at position {} is out of range (node count: {})",
                    idx, i, nodes
                )));
            }
        }

        for t in 0..self.triangle_count() {
            let [a, b, c] = self.triangle(t);
            if a == b || b == c || a == c {
                return Err(SpringfallError::InvalidTopology(format!(
                    "triangle {} has repeated node indices: [{}, {}, {}]",
                    t, a, b, c
                )));
            }
        }

        if self.tags.len() != nodes || self.colors.len() != nodes {
            return Err(SpringfallError::InvalidTopology(
                "tag/color buffers do not cover every node".into(),
            ));
        }

        Ok(())
    }
}
