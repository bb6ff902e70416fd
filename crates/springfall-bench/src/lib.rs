//! # springfall-bench
//!
//! Scenarios, the frame driver and benchmark metrics.
//!
//! Provides the cloth-drape and free-fall scenarios, TOML scene files that
//! override them, a frame driver that runs sub-steps per display frame,
//! and CSV export for regression tracking.

pub mod driver;
pub mod metrics;
pub mod runner;
pub mod scenarios;

pub use driver::{FrameDriver, FrameReport};
pub use metrics::BenchmarkMetrics;
pub use runner::BenchmarkRunner;
pub use scenarios::{FrameConfig, Scenario, ScenarioKind, SceneFile, SimulatorConfig};
