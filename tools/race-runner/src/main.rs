//! race-runner: sail a fleet of dinghies round a windward/leeward course.
//!
//! Usage:
//!   race-runner --boats 6 --laps 2 --wind-shift 10 --shift-period 120
//!   race-runner --json > race.jsonl

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing::{error, info};

use dinghy_core::angle::Angle;
use dinghy_core::boat::{BoatMetrics, BoatPreferences};
use dinghy_core::course::Course;
use dinghy_core::flow::{OscillatingWind, UniformFlow, WindField};
use dinghy_core::state::RaceSnapshot;
use dinghy_core::types::Location;
use dinghy_sim::{FleetEntry, SimConfig, SimulationEngine};

#[derive(Parser, Debug)]
#[command(name = "race-runner", about = "Headless dinghy race simulator")]
struct Args {
    /// Number of boats in the fleet
    #[arg(long, default_value_t = 4)]
    boats: usize,
    /// Give up after this many ticks
    #[arg(long, default_value_t = 20_000)]
    ticks: u64,
    /// RNG seed for the start line
    #[arg(long, default_value_t = 42)]
    seed: u64,
    /// True wind speed (m/s)
    #[arg(long, default_value_t = 5.0)]
    wind_speed: f64,
    /// Mean wind direction, degrees the wind blows from
    #[arg(long, default_value_t = 0.0)]
    wind_from: f64,
    /// Peak wind shift either side of the mean (degrees); 0 for a steady wind
    #[arg(long, default_value_t = 0.0)]
    wind_shift: f64,
    /// Period of one full wind oscillation (seconds)
    #[arg(long, default_value_t = 120.0)]
    shift_period: f64,
    /// Current speed (m/s)
    #[arg(long, default_value_t = 0.0)]
    current: f64,
    /// Direction the current sets towards (degrees)
    #[arg(long, default_value_t = 90.0)]
    current_to: f64,
    /// Distance from leeward to windward mark (m)
    #[arg(long, default_value_t = 400.0)]
    leg_length: f64,
    /// Number of beats
    #[arg(long, default_value_t = 2)]
    laps: usize,
    /// Sail deep legs straight instead of gybing
    #[arg(long)]
    no_gybing: bool,
    /// Print every snapshot as a JSON line instead of a summary
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "race_runner=info,dinghy_sim=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let wind_from = Angle::new(args.wind_from);
    let course = Arc::new(Course::windward_leeward(
        Location::default(),
        wind_from,
        args.leg_length,
        args.laps,
    )?);

    let wind: Box<dyn WindField> = if args.wind_shift > 0.0 {
        Box::new(OscillatingWind::new(
            wind_from,
            args.wind_speed,
            args.wind_shift,
            args.shift_period,
        ))
    } else {
        Box::new(UniformFlow::new(args.wind_speed, wind_from))
    };
    let water = Box::new(UniformFlow::new(args.current, Angle::new(args.current_to)));

    let config = SimConfig {
        seed: args.seed,
        ..Default::default()
    };
    let dt = config.dt;
    let mut engine = SimulationEngine::new(config, Arc::clone(&course), wind, water)?;

    let metrics = Arc::new(BoatMetrics::dinghy());
    let prefs = BoatPreferences {
        reach_downwind: !args.no_gybing,
        ..BoatPreferences::racer()
    };
    let fleet: Vec<FleetEntry> = (0..args.boats)
        .map(|i| FleetEntry::new(format!("boat-{}", i + 1), Arc::clone(&metrics), prefs))
        .collect();
    engine.add_fleet(&fleet)?;

    info!(
        boats = args.boats,
        legs = course.len(),
        wind_speed = args.wind_speed,
        wind_shift = args.wind_shift,
        "race started"
    );

    let mut snapshot = engine.snapshot();
    for _ in 0..args.ticks {
        snapshot = engine.tick();
        if args.json {
            println!("{}", serde_json::to_string(&snapshot)?);
        }
        if snapshot.race_over() {
            break;
        }
    }

    if !args.json {
        print_summary(&snapshot, dt);
    }
    if !snapshot.race_over() {
        info!(ticks = args.ticks, "tick limit reached before every boat finished");
    }
    Ok(())
}

fn print_summary(snapshot: &RaceSnapshot, dt: f64) {
    let mut results: Vec<_> = snapshot.boats.iter().collect();
    results.sort_by_key(|b| b.finish_tick.unwrap_or(u64::MAX));

    println!("{:<4} {:<10} {:>10} {:>6}", "pos", "boat", "time (s)", "leg");
    for (place, boat) in results.iter().enumerate() {
        let time = match boat.finish_tick {
            Some(tick) => format!("{:.1}", tick as f64 * dt),
            None => "-".to_string(),
        };
        println!("{:<4} {:<10} {:>10} {:>6}", place + 1, boat.name, time, boat.leg);
    }
    println!(
        "{} of {} finished after {:.1} s",
        snapshot.finished,
        snapshot.boats.len(),
        snapshot.time.elapsed_secs
    );
}
