//! Grid coordinates of cloth nodes.
//!
//! Cloth buffers are flat; a `GridCoord` names a node by its `(i, j)`
//! position so stencil offsets can be bounds-checked before indexing.

use serde::{Deserialize, Serialize};

/// Coordinate of a cloth node in the `n × n` grid.
///
/// Node `(i, j)` is stored at flat index `i * n + j`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridCoord {
    pub i: u32,
    pub j: u32,
}

impl GridCoord {
    #[inline]
    pub fn new(i: u32, j: u32) -> Self {
        Self { i, j }
    }

    /// Flat buffer index for a grid of `n` nodes per side.
    #[inline]
    pub fn flat(self, n: usize) -> usize {
        self.i as usize * n + self.j as usize
    }

    /// Inverse of [`GridCoord::flat`].
    #[inline]
    pub fn from_flat(index: usize, n: usize) -> Self {
        Self {
            i: (index / n) as u32,
            j: (index % n) as u32,
        }
    }

    /// Returns the neighbor at offset `(di, dj)` if it lies inside the grid.
    pub fn offset(self, di: i32, dj: i32, n: usize) -> Option<Self> {
        let i = self.i as i64 + di as i64;
        let j = self.j as i64 + dj as i64;
        if i < 0 || j < 0 || i >= n as i64 || j >= n as i64 {
            return None;
        }
        Some(Self::new(i as u32, j as u32))
    }
}
