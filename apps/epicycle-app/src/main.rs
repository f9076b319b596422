//! Epicycle planetary gear train CLI.
//!
//! Provides three modes of operation:
//! - `run`: Build a train from a TOML file or flags and play its clock
//! - `random`: Generate a seeded random scenario and play its clock
//! - `info`: Print workspace crate versions and defaults

use std::error::Error;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};

use epicycle_core::layout;
use epicycle_core::prelude::*;
use epicycle_core::train::{DEFAULT_PLANETS, DEFAULT_TOOTH_PITCH};
use epicycle_scenario::prelude::*;

type CliResult = Result<(), Box<dyn Error>>;

// ---------------------------------------------------------------------------
// CLI
// ---------------------------------------------------------------------------

/// Planetary gear train kinematics.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a train and print its state frame by frame.
    Run {
        /// TOML train description. Overrides the train flags.
        #[arg(short, long)]
        config: Option<PathBuf>,

        #[command(flatten)]
        train: TrainArgs,

        #[command(flatten)]
        playback: PlaybackArgs,
    },

    /// Generate a random scenario and print its state frame by frame.
    Random {
        /// Random seed. Drawn from the OS when omitted.
        #[arg(short, long)]
        seed: Option<u64>,

        /// Give up after this many rejected candidates.
        #[arg(long, default_value_t = 10_000)]
        max_attempts: u32,

        #[command(flatten)]
        playback: PlaybackArgs,
    },

    /// Print crate information.
    Info,
}

#[derive(Args)]
struct TrainArgs {
    /// 1 = sun & planet, 2 = sun & ring, 3 = planet & ring.
    #[arg(long, default_value_t = 1)]
    size_mode: u8,

    #[arg(long, default_value_t = 28)]
    size_a: u32,

    #[arg(long, default_value_t = 17)]
    size_b: u32,

    /// 1 = sun & carrier, 2 = sun & ring, 3 = carrier & ring.
    #[arg(long, default_value_t = 1)]
    speed_mode: u8,

    /// First input speed in rad/s.
    #[arg(long, default_value_t = -0.4, allow_negative_numbers = true)]
    speed_a: f64,

    /// Second input speed in rad/s.
    #[arg(long, default_value_t = 0.4, allow_negative_numbers = true)]
    speed_b: f64,

    #[arg(long, default_value_t = DEFAULT_TOOTH_PITCH)]
    tooth_pitch: f64,

    #[arg(short, long, default_value_t = DEFAULT_PLANETS)]
    planets: usize,

    /// Fail instead of warning when the planets cannot mesh.
    #[arg(long)]
    strict: bool,
}

impl TrainArgs {
    fn to_config(&self) -> TrainConfig {
        TrainConfig {
            size_mode: self.size_mode,
            size_a: self.size_a,
            size_b: self.size_b,
            speed_mode: self.speed_mode,
            speed_a: self.speed_a,
            speed_b: self.speed_b,
            tooth_pitch: self.tooth_pitch,
            number_of_planets: self.planets,
            strict_mesh: self.strict,
        }
    }
}

#[derive(Args)]
struct PlaybackArgs {
    /// Number of frames to print.
    #[arg(short, long, default_value_t = 10)]
    frames: u32,

    /// Milliseconds between frames.
    #[arg(long, default_value_t = 250.0)]
    frame_ms: f64,

    /// Print one JSON snapshot per frame instead of a text summary.
    #[arg(long)]
    json: bool,
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

fn print_summary(train: &PlanetaryGearTrain) {
    let counts = train.tooth_counts();
    let speeds = train.speeds();
    println!(
        "modes: size={:?}, speed={:?}",
        train.size_mode(),
        train.speed_mode()
    );
    println!(
        "teeth: sun={}, planet={}, ring={}, planets={}",
        counts.sun,
        counts.planet,
        counts.ring,
        train.number_of_planets()
    );
    println!(
        "speeds: sun={:.4}, planet={:.4}, ring={:.4}, carrier={:.4} rad/s",
        speeds.sun, speeds.planet, speeds.ring, speeds.carrier
    );
    println!(
        "carrier pitch={:.5}, world extent={:.5}, mesh feasible={}",
        train.carrier_pitch(),
        layout::world_extent(train),
        train.mesh_feasible()
    );
    println!();
}

fn print_frame(train: &PlanetaryGearTrain, elapsed_ms: f64) {
    let planets: Vec<String> = train
        .planets()
        .iter()
        .zip(layout::planet_centers(train))
        .map(|(planet, c)| {
            format!(
                "{:.3}@({:.4},{:.4})",
                layout::wrap_angle(planet.position()),
                c.x,
                c.y
            )
        })
        .collect();
    println!(
        "t={elapsed_ms:>8.1}ms sun={:.3} ring={:.3} carrier={:.3} planets=[{}]",
        layout::wrap_angle(train.sun().position()),
        layout::wrap_angle(train.ring().position()),
        layout::wrap_angle(train.carrier_position()),
        planets.join(", ")
    );
}

fn play(train: &mut PlanetaryGearTrain, playback: &PlaybackArgs) -> CliResult {
    if !playback.json {
        print_summary(train);
    }
    for frame in 0..playback.frames {
        let elapsed_ms = f64::from(frame) * playback.frame_ms;
        train.advance(elapsed_ms);
        if playback.json {
            println!("{}", serde_json::to_string(&train.snapshot())?);
        } else {
            print_frame(train, elapsed_ms);
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Mode implementations
// ---------------------------------------------------------------------------

fn run_train(config: Option<&Path>, args: &TrainArgs, playback: &PlaybackArgs) -> CliResult {
    let config = match config {
        Some(path) => {
            tracing::info!(path = %path.display(), "loading train config");
            TrainConfig::from_file(path)?
        }
        None => args.to_config(),
    };
    let mut train = config.build()?;
    play(&mut train, playback)
}

fn run_random(seed: Option<u64>, max_attempts: u32, playback: &PlaybackArgs) -> CliResult {
    let seed = seed.unwrap_or_else(rand::random);
    let generator =
        ScenarioGenerator::new(ScenarioBounds::default().with_max_attempts(max_attempts))?;
    let Scenario {
        spec,
        mut train,
        attempts,
    } = generator.generate_seeded(seed)?;
    tracing::info!(seed, attempts, "generated random scenario");
    if !playback.json {
        println!("seed: {seed}");
        println!(
            "inputs: speed_a={:.4}, speed_b={:.4}",
            spec.speed.a, spec.speed.b
        );
    }
    play(&mut train, playback)
}

fn run_demo() -> CliResult {
    let mut train = presets::demo().build()?;
    let playback = PlaybackArgs {
        frames: 10,
        frame_ms: 250.0,
        json: false,
    };
    play(&mut train, &playback)
}

fn run_info() {
    println!("epicycle v{}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("crates:");
    println!("  epicycle-core     {}", env!("CARGO_PKG_VERSION"));
    println!("  epicycle-scenario {}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("defaults:");
    println!("  tooth pitch       {DEFAULT_TOOTH_PITCH}");
    println!("  planets           {DEFAULT_PLANETS}");
    println!();
    println!("edition: 2024");
}

// ---------------------------------------------------------------------------
// main
// ---------------------------------------------------------------------------

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Run {
            config,
            train,
            playback,
        }) => run_train(config.as_deref(), &train, &playback),
        Some(Commands::Random {
            seed,
            max_attempts,
            playback,
        }) => run_random(seed, max_attempts, &playback),
        Some(Commands::Info) => {
            run_info();
            Ok(())
        }
        None => {
            // Default: play the demo train
            run_demo()
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
