//! # springfall-contact
//!
//! Collision detection and velocity-level contact response shared by the
//! cloth and particle simulators.
//!
//! Particle contacts run in two phases:
//! 1. **Broad phase** — All-pairs or uniform-grid spatial hash
//! 2. **Pair response** — Exact distance test and inward-velocity removal
//!
//! Static constraints (sphere obstacle, bounding box) act on one body at a
//! time and never touch positions; they only edit velocities, so the
//! integrator stays the single writer of positions.

pub mod boundary;
pub mod broad;
pub mod contact;
pub mod pair;
pub mod spatial_hash;
pub mod sphere;

pub use boundary::BoundingBox;
pub use broad::{AllPairs, BroadPhase};
pub use contact::ContactResult;
pub use pair::PairResponse;
pub use spatial_hash::SpatialHash;
pub use sphere::SphereObstacle;
