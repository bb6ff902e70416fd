//! Spring stencil — the set of grid offsets each cloth node is linked to.
//!
//! Links are stored one-sided: node `(i, j)` owns a link to every
//! `(i + di, j + dj)` in the stencil, so each spring appears twice
//! (once from each end) and the force pass never writes a neighbor.

use serde::{Deserialize, Serialize};
use springfall_types::{SpringfallError, SpringfallResult};

/// Stiffness mode a spring contributes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpringKind {
    /// Grid-adjacent along one axis.
    Structural,
    /// Diagonal neighbor.
    Shear,
    /// Two apart along one axis.
    Bend,
}

/// One stencil entry: a grid offset and its rest length.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpringLink {
    pub di: i32,
    pub dj: i32,
    pub kind: SpringKind,
    /// `spacing * |(di, dj)|`, always positive.
    pub rest_length: f32,
}

/// Which spring families the stencil includes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StencilKinds {
    pub structural: bool,
    pub shear: bool,
    pub bend: bool,
}

impl Default for StencilKinds {
    /// Structural + shear: the full 8-neighborhood.
    fn default() -> Self {
        Self {
            structural: true,
            shear: true,
            bend: false,
        }
    }
}

impl StencilKinds {
    /// All three families.
    pub fn all() -> Self {
        Self {
            structural: true,
            shear: true,
            bend: true,
        }
    }
}

/// Immutable list of spring links built once per cloth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpringStencil {
    links: Vec<SpringLink>,
}

const STRUCTURAL: [(i32, i32); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
const SHEAR: [(i32, i32); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];
const BEND: [(i32, i32); 4] = [(-2, 0), (2, 0), (0, -2), (0, 2)];

impl SpringStencil {
    /// Build the stencil for the given families and lattice spacing.
    pub fn new(kinds: StencilKinds, spacing: f32) -> SpringfallResult<Self> {
        if !(spacing.is_finite() && spacing > 0.0) {
            return Err(SpringfallError::InvalidConfig(format!(
                "lattice spacing must be positive and finite (got {spacing})"
            )));
        }

        let mut links = Vec::with_capacity(12);
        let families = [
            (kinds.structural, SpringKind::Structural, &STRUCTURAL),
            (kinds.shear, SpringKind::Shear, &SHEAR),
            (kinds.bend, SpringKind::Bend, &BEND),
        ];
        for (enabled, kind, offsets) in families {
            if !enabled {
                continue;
            }
            for &(di, dj) in offsets.iter() {
                let rest_length = spacing * ((di * di + dj * dj) as f32).sqrt();
                links.push(SpringLink {
                    di,
                    dj,
                    kind,
                    rest_length,
                });
            }
        }

        if links.is_empty() {
            return Err(SpringfallError::InvalidConfig(
                "spring stencil must enable at least one spring family".into(),
            ));
        }

        Ok(Self { links })
    }

    /// Returns the links.
    #[inline]
    pub fn links(&self) -> &[SpringLink] {
        &self.links
    }

    /// Number of links of the given kind.
    pub fn count(&self, kind: SpringKind) -> usize {
        self.links.iter().filter(|l| l.kind == kind).count()
    }
}
