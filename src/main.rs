//! Headless command-line driver: loads or generates a course, putts a ball
//! and logs where it ends up.

use std::path::PathBuf;

use anyhow::{ensure, Context, Result};
use clap::Parser;
use golfram::{
    init_logging, Entity, Level, SimConfig, StepResult, TileId, Vector2, BALL_MASS,
};
use hashbrown::HashSet;
use log::{debug, info, warn};

/// Rolls a golf ball across a course without rendering it
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Level file (JSON)
    #[arg(long, conflicts_with = "random")]
    level: Option<PathBuf>,
    /// Generate a random square course with this many cells per side
    #[arg(long)]
    random: Option<usize>,
    /// Seed for the random course
    #[arg(long)]
    seed: Option<u64>,
    /// Simulation settings file (JSON)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Initial ball velocity in m/s, as `x,y`
    #[arg(long, value_parser = parse_vector, allow_hyphen_values = true, default_value = "2,1.1")]
    velocity: Vector2,
    /// Give up after this many simulated seconds
    #[arg(long, default_value_t = 60.0)]
    max_seconds: f64,
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn parse_vector(text: &str) -> Result<Vector2, String> {
    let (x, y) = text
        .split_once(',')
        .ok_or_else(|| format!("expected `x,y`, got `{text}`"))?;
    let component = |value: &str| {
        value
            .trim()
            .parse::<f64>()
            .map_err(|err| format!("invalid component `{value}`: {err}"))
    };
    Ok(Vector2::new(component(x)?, component(y)?))
}

fn load_level(args: &Args) -> Result<Level> {
    if let Some(path) = &args.level {
        return Level::load(path).with_context(|| format!("loading level {}", path.display()));
    }
    let seed = args.seed.unwrap_or_else(rand::random);
    info!("generating random course with seed {seed}");
    Ok(Level::random(args.random.unwrap_or(8), seed))
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);
    ensure!(
        args.max_seconds.is_finite() && args.max_seconds > 0.0,
        "--max-seconds must be positive"
    );

    let config = match &args.config {
        Some(path) => SimConfig::load(path)
            .with_context(|| format!("loading settings {}", path.display()))?,
        None => SimConfig::default(),
    };
    let level = load_level(&args)?;
    let grid = level.build_grid(&config).context("building course")?;
    let start = level.start_position(&grid)?;

    let mut stepper = config.stepper(grid);
    let ball = stepper
        .watch(Entity::ball(start))
        .context("placing the ball")?;
    stepper.strike(ball, args.velocity * BALL_MASS)?;

    let frame_dt = config.frame_dt();
    let mut dirty: HashSet<TileId> = HashSet::new();
    let mut elapsed = 0.0;
    let mut outcome = StepResult::Running;
    while outcome.is_running() && elapsed < args.max_seconds {
        dirty.clear();
        outcome = stepper.tick_frame(frame_dt, config.substeps, &mut dirty)?;
        elapsed += frame_dt;
        debug!("frame at {elapsed:.3}s redraws {} tiles", dirty.len());
    }

    let position = stepper.entity(ball).map_or(Vector2::ZERO, |entity| entity.position);
    match outcome {
        StepResult::Running => info!("ball still rolling after {elapsed:.2}s at {position}"),
        StepResult::Settled => info!("ball came to rest after {elapsed:.2}s at {position}"),
        StepResult::LevelComplete(id) => info!("ball {id} holed after {elapsed:.2}s"),
        StepResult::EntityOutOfBounds(id) => {
            warn!("ball {id} left the course after {elapsed:.2}s at {position}");
        }
    }
    Ok(())
}
