//! # springfall-mesh
//!
//! Rest topology of the cloth grid.
//!
//! ## Key Types
//!
//! - [`GridTopology`] — Triangle index buffer and per-node checkerboard
//!   tags/colors for an `n × n` grid. Pure function of `n`.
//! - [`SpringStencil`] — The local spring neighborhood (structural, shear,
//!   bend links) with per-link rest lengths.
//! - Sheet generator for the flat initial cloth layout.

pub mod generators;
pub mod stencil;
pub mod topology;

pub use stencil::{SpringKind, SpringLink, SpringStencil, StencilKinds};
pub use topology::GridTopology;
