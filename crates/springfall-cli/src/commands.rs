//! CLI command implementations.

use std::path::Path;

use springfall_bench::driver::FrameDriver;
use springfall_bench::metrics::BenchmarkMetrics;
use springfall_bench::runner::BenchmarkRunner;
use springfall_bench::scenarios::{Scenario, ScenarioKind, SceneFile};
use springfall_debug::snapshot::FrameSnapshot;
use springfall_telemetry::{EventBus, TracingSink};

type CliResult = Result<(), Box<dyn std::error::Error>>;

/// Arguments of `springfall run`.
pub struct RunArgs {
    pub scenario: String,
    pub config: Option<String>,
    pub frames: Option<u32>,
    pub seed: Option<u64>,
    pub wind: bool,
    pub snapshot: Option<String>,
}

fn resolve_scenario(args: &RunArgs) -> Result<Scenario, Box<dyn std::error::Error>> {
    let kind: ScenarioKind = args.scenario.parse()?;
    let mut scenario = match &args.config {
        Some(path) => SceneFile::load(Path::new(path))?.into_scenario(kind)?,
        None => Scenario::from_kind(kind),
    };
    if let Some(frames) = args.frames {
        scenario.frame.frames = frames;
    }
    if let Some(seed) = args.seed {
        scenario = scenario.with_seed(seed);
    }
    if args.wind {
        scenario.wind_toggles.push(0);
    }
    Ok(scenario)
}

/// Run a scenario headless, logging telemetry through `tracing`.
pub fn run(args: &RunArgs) -> CliResult {
    let scenario = resolve_scenario(args)?;

    println!("Springfall Run");
    println!("──────────────");
    println!("Scenario:  {}", scenario.kind);
    println!("Points:    {}", scenario.model.point_count());
    println!("Frames:    {}", scenario.frame.frames);
    println!("Sub-steps: {} × {:.3e}s", scenario.substeps(), scenario.dt());
    println!();

    let mut bus = EventBus::new();
    bus.add_sink(Box::new(TracingSink::default()));
    let mut driver = FrameDriver::new(&scenario)?.with_bus(bus);

    let metrics = BenchmarkRunner::run_driver(&scenario, &mut driver)?;
    print_metrics(&metrics);

    if let Some(path) = &args.snapshot {
        driver.snapshot().write_to(Path::new(path))?;
        println!("Snapshot written to: {path}");
    }
    Ok(())
}

fn print_metrics(metrics: &BenchmarkMetrics) {
    println!("  Wall time:     {:.3}s", metrics.total_wall_time);
    println!("  Avg frame:     {:.3}ms", metrics.avg_frame_time * 1000.0);
    println!("  Final KE:      {:.6e}", metrics.final_kinetic_energy);
    println!("  Max speed:     {:.4}m/s", metrics.max_speed);
    println!("  Contacts:      {}", metrics.total_contacts);
    if metrics.clamped > 0 {
        println!("  Clamped:       {}", metrics.clamped);
    }
    if metrics.resets > 0 {
        println!("  Resets:        {}", metrics.resets);
    }
    println!();
}

/// Run benchmark suite.
pub fn benchmark(scenario_name: &str, frames: u32, seed: u64, output_path: Option<&str>) -> CliResult {
    println!("Springfall Benchmark Suite");
    println!("══════════════════════════");
    println!();

    let kinds: Vec<ScenarioKind> = if scenario_name == "all" {
        ScenarioKind::all().to_vec()
    } else {
        vec![scenario_name.parse()?]
    };

    let mut all_metrics = Vec::new();
    for kind in kinds {
        let scenario = Scenario::from_kind(kind).with_frames(frames).with_seed(seed);
        println!(
            "Running: {} ({} points, {} frames × {} sub-steps)",
            kind,
            scenario.model.point_count(),
            frames,
            scenario.substeps(),
        );

        let metrics =
            BenchmarkRunner::run(&scenario).map_err(|e| format!("Benchmark failed: {e}"))?;
        print_metrics(&metrics);
        all_metrics.push(metrics);
    }

    if let Some(path) = output_path {
        BenchmarkMetrics::write_csv(Path::new(path), &all_metrics)?;
        println!("Results written to: {path}");
    } else {
        println!("CSV Output:");
        println!("{}", BenchmarkMetrics::to_csv(&all_metrics));
    }

    Ok(())
}

/// Inspect a frame snapshot.
pub fn inspect(path: &str) -> CliResult {
    println!("Springfall Snapshot Inspector");
    println!("────────────────────────────");
    println!();

    let snapshot = FrameSnapshot::read_from(Path::new(path))
        .map_err(|e| format!("Failed to read snapshot: {e}"))?;
    let summary = snapshot.summary();

    println!("Source:       {}", snapshot.source);
    println!("Frame:        {}", snapshot.frame);
    println!("Sim time:     {:.4}s", snapshot.sim_time);
    println!("Points:       {}", snapshot.point_count);
    if snapshot.point_count > 0 {
        println!(
            "Bounds:       [{:.4}, {:.4}, {:.4}] – [{:.4}, {:.4}, {:.4}]",
            summary.min[0], summary.min[1], summary.min[2], summary.max[0], summary.max[1], summary.max[2]
        );
    }
    println!("Kinetic E:    {:.6e}", summary.kinetic_energy);
    println!("Max speed:    {:.4}m/s", summary.max_speed);

    Ok(())
}

/// Validate a scene file.
pub fn validate(path: &str) -> CliResult {
    println!("Springfall Validator");
    println!("────────────────────");
    println!();

    if !path.ends_with(".toml") {
        return Err("unsupported file format, expected a .toml scene file".into());
    }

    println!("Validating scene: {path}");
    let scene = SceneFile::load(Path::new(path))?;
    let fallback = if scene.cloth.is_none() && scene.particles.is_some() {
        ScenarioKind::FreeFall
    } else {
        ScenarioKind::ClothDrape
    };
    let kind = scene.scenario.unwrap_or(fallback);
    match scene.into_scenario(kind) {
        Ok(scenario) => {
            println!(
                "✅ Scene is valid ({}, {} points, {} frames).",
                scenario.kind,
                scenario.model.point_count(),
                scenario.frame.frames
            );
            Ok(())
        }
        Err(e) => {
            println!("❌ Scene validation failed: {e}");
            Err(e.into())
        }
    }
}
