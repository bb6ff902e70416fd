//! Per-solver wind toggle.

use serde::{Deserialize, Serialize};
use springfall_math::Vec3;

/// On/off flag plus a fixed force (acceleration on unit masses).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindState {
    pub enabled: bool,
    pub force: Vec3,
}

impl WindState {
    pub fn new(force: Vec3, enabled: bool) -> Self {
        Self { enabled, force }
    }

    /// Flips the flag and returns the new value.
    pub fn toggle(&mut self) -> bool {
        self.enabled = !self.enabled;
        self.enabled
    }

    /// Acceleration contributed this sub-step.
    #[inline]
    pub fn acceleration(&self) -> Vec3 {
        if self.enabled {
            self.force
        } else {
            Vec3::ZERO
        }
    }
}
