//! # springfall-types
//!
//! Shared identifiers, error types, and physical constants
//! for the Springfall cloth and particle simulators.
//!
//! This crate has zero domain logic. It defines the vocabulary
//! that all other Springfall crates share.

pub mod constants;
pub mod error;
pub mod ids;

pub use error::{SpringfallError, SpringfallResult};
pub use ids::GridCoord;
