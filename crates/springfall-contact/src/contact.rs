//! Contact bookkeeping shared by every constraint.

use serde::{Deserialize, Serialize};

/// Counters describing what a contact pass did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactResult {
    /// Number of contacts whose velocity correction was evaluated.
    pub resolved_count: u32,
    /// Contacts skipped because the two bodies coincide.
    pub degenerate_count: u32,
    /// Deepest overlap seen (meters).
    pub max_penetration: f32,
}

impl ContactResult {
    /// Accumulates another result into this one.
    pub fn merge(mut self, other: ContactResult) -> Self {
        self.resolved_count += other.resolved_count;
        self.degenerate_count += other.degenerate_count;
        self.max_penetration = self.max_penetration.max(other.max_penetration);
        self
    }
}
