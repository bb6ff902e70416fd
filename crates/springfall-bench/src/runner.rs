//! Benchmark runner — drives scenarios frame by frame and collects metrics.

use std::time::Instant;

use tracing::{debug, info};

use springfall_types::SpringfallResult;

use crate::driver::FrameDriver;
use crate::metrics::BenchmarkMetrics;
use crate::scenarios::{Scenario, ScenarioKind};

/// Runs scenarios and collects metrics.
pub struct BenchmarkRunner;

impl BenchmarkRunner {
    /// Run a single scenario headless.
    pub fn run(scenario: &Scenario) -> SpringfallResult<BenchmarkMetrics> {
        let mut driver = FrameDriver::new(scenario)?;
        Self::run_driver(scenario, &mut driver)
    }

    /// Run `scenario.frame.frames` frames on a prepared driver.
    pub fn run_driver(scenario: &Scenario, driver: &mut FrameDriver) -> SpringfallResult<BenchmarkMetrics> {
        let frames = scenario.frame.frames;
        let mut frame_times: Vec<f64> = Vec::with_capacity(frames as usize);
        let mut total_contacts: u64 = 0;
        let mut clamped: u64 = 0;
        let mut resets: u32 = 0;

        let total_start = Instant::now();
        for _ in 0..frames {
            let report = driver.advance_frame()?;
            frame_times.push(report.result.wall_time);
            total_contacts += report.result.contacts as u64;
            clamped += report.result.clamped as u64;
            resets += report.reset as u32;
            debug!(
                frame = report.frame,
                contacts = report.result.contacts,
                wall_ms = report.result.wall_time * 1000.0,
                "frame done"
            );
        }
        driver.finish();
        let total_wall_time = total_start.elapsed().as_secs_f64();

        let state = driver.simulator().state();
        let avg_frame_time = if frame_times.is_empty() {
            0.0
        } else {
            frame_times.iter().sum::<f64>() / frame_times.len() as f64
        };
        let min_frame_time = frame_times.iter().copied().fold(f64::INFINITY, f64::min);

        let metrics = BenchmarkMetrics {
            scenario: scenario.kind.name().to_string(),
            simulator: driver.simulator().name().to_string(),
            point_count: driver.simulator().point_count(),
            frames,
            substeps: driver.substeps(),
            dt: driver.dt(),
            total_wall_time,
            avg_frame_time,
            min_frame_time: if min_frame_time.is_finite() { min_frame_time } else { 0.0 },
            max_frame_time: frame_times.iter().copied().fold(0.0, f64::max),
            final_kinetic_energy: state.kinetic_energy(),
            max_speed: state.max_speed(),
            total_contacts,
            clamped,
            resets,
        };

        info!(
            scenario = %metrics.scenario,
            frames,
            wall_s = metrics.total_wall_time,
            avg_frame_ms = metrics.avg_frame_time * 1000.0,
            clamped,
            "scenario finished"
        );
        Ok(metrics)
    }

    /// Run every scenario with `frames` frames each.
    pub fn run_all(frames: u32, seed: Option<u64>) -> SpringfallResult<Vec<BenchmarkMetrics>> {
        ScenarioKind::all()
            .iter()
            .map(|&kind| {
                let mut scenario = Scenario::from_kind(kind).with_frames(frames);
                scenario.model.set_seed(seed);
                Self::run(&scenario)
            })
            .collect()
    }
}
