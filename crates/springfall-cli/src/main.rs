//! Springfall CLI — headless runs, benchmarks and snapshot inspection.

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

mod commands;

#[derive(Parser)]
#[command(name = "springfall")]
#[command(version, about = "Springfall — explicit cloth and particle simulation")]
struct Cli {
    /// Logging verbosity (trace, debug, info, warn, error).
    #[arg(short, long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a scenario headless.
    Run {
        /// Scenario (cloth_drape, free_fall, windy_free_fall).
        #[arg(short, long, default_value = "cloth_drape")]
        scenario: String,

        /// Scene file (TOML) overriding the scenario.
        #[arg(short, long)]
        config: Option<String>,

        /// Number of frames to run.
        #[arg(short, long)]
        frames: Option<u32>,

        /// Seed for the random initial layout.
        #[arg(long)]
        seed: Option<u64>,

        /// Toggle wind before the first frame.
        #[arg(long)]
        wind: bool,

        /// Write the final frame to this snapshot file.
        #[arg(long)]
        snapshot: Option<String>,
    },

    /// Run benchmark suite.
    Benchmark {
        /// Which scenario to run (cloth_drape, free_fall, windy_free_fall, all).
        #[arg(short, long, default_value = "all")]
        scenario: String,

        /// Frames per scenario.
        #[arg(short, long, default_value_t = 60)]
        frames: u32,

        /// Seed for the random initial layouts.
        #[arg(long, default_value_t = 0)]
        seed: u64,

        /// Output CSV file path.
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Inspect a frame snapshot file.
    Inspect {
        /// Path to snapshot file.
        path: String,
    },

    /// Validate a scene file.
    Validate {
        /// Path to scene file (TOML).
        path: String,
    },
}

fn parse_level(name: &str) -> Level {
    match name.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "error" => Level::ERROR,
        _ => Level::WARN,
    }
}

fn main() {
    let cli = Cli::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(parse_level(&cli.log_level))
        .with_target(false)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Warning: logging disabled ({e})");
    }

    let result = match cli.command {
        Commands::Run {
            scenario,
            config,
            frames,
            seed,
            wind,
            snapshot,
        } => commands::run(&commands::RunArgs {
            scenario,
            config,
            frames,
            seed,
            wind,
            snapshot,
        }),
        Commands::Benchmark {
            scenario,
            frames,
            seed,
            output,
        } => commands::benchmark(&scenario, frames, seed, output.as_deref()),
        Commands::Inspect { path } => commands::inspect(&path),
        Commands::Validate { path } => commands::validate(&path),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
