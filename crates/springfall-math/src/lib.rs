//! # springfall-math
//!
//! Vector math for the Springfall simulators.
//!
//! Provides:
//! - Re-exports of `glam` types (`Vec3`)
//! - Guarded normalization for contact and spring directions
//! - Velocity projection and flattening helpers

pub mod vector;

// Re-export glam types as the canonical math types for Springfall.
pub use glam::Vec3;

pub use vector::{clamp_speed, flatten, remove_inward, separation, Separation};
