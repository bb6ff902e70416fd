//! Benchmark metrics — data collected during a run.

use std::path::Path;

use serde::{Deserialize, Serialize};
use springfall_types::SpringfallResult;

/// Metrics collected from one scenario run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkMetrics {
    pub scenario: String,
    /// Name of the simulator that ran it.
    pub simulator: String,
    pub point_count: usize,
    pub frames: u32,
    pub substeps: u32,
    /// Sub-step size (seconds).
    pub dt: f32,
    /// Total wall-clock time (seconds).
    pub total_wall_time: f64,
    /// Average wall-clock time per frame (seconds).
    pub avg_frame_time: f64,
    pub min_frame_time: f64,
    pub max_frame_time: f64,
    /// Kinetic energy at the end of the run (unit masses).
    pub final_kinetic_energy: f64,
    /// Largest speed at the end of the run.
    pub max_speed: f32,
    /// Contact corrections over the whole run.
    pub total_contacts: u64,
    /// Points the stability guard corrected over the whole run.
    pub clamped: u64,
    /// Automatic resets performed.
    pub resets: u32,
}

impl BenchmarkMetrics {
    pub fn to_csv_header() -> String {
        "scenario,simulator,point_count,frames,substeps,dt,total_wall_time_s,avg_frame_ms,min_frame_ms,max_frame_ms,final_ke,max_speed,total_contacts,clamped,resets".to_string()
    }

    /// Format this metrics instance as a CSV data row.
    pub fn to_csv_row(&self) -> String {
        format!(
            "{},{},{},{},{},{:.6e},{:.6},{:.4},{:.4},{:.4},{:.6e},{:.4},{},{},{}",
            self.scenario,
            self.simulator,
            self.point_count,
            self.frames,
            self.substeps,
            self.dt,
            self.total_wall_time,
            self.avg_frame_time * 1000.0,
            self.min_frame_time * 1000.0,
            self.max_frame_time * 1000.0,
            self.final_kinetic_energy,
            self.max_speed,
            self.total_contacts,
            self.clamped,
            self.resets,
        )
    }

    /// Header plus one row per run.
    pub fn to_csv(metrics: &[BenchmarkMetrics]) -> String {
        let mut csv = Self::to_csv_header();
        for m in metrics {
            csv.push('\n');
            csv.push_str(&m.to_csv_row());
        }
        csv
    }

    pub fn write_csv(path: &Path, metrics: &[BenchmarkMetrics]) -> SpringfallResult<()> {
        std::fs::write(path, Self::to_csv(metrics))?;
        Ok(())
    }
}
