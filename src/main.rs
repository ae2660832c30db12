//! Command-line driver: builds a random grid, drops a rover on it and renders
//! every step to the terminal.

use anyhow::{Context, Result};
use clap::Parser;
use mars_rover::{
    ConsoleDisplay, Grid, Heading, Rover, SimulationConfig, format_commands, generate_commands,
    generate_obstacles, random_heading, random_start,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "mars-rover")]
#[command(about = "Drive a rover across a wrap-around grid of obstacles", long_about = None)]
struct Cli {
    /// Grid width in cells
    #[arg(long)]
    width: Option<u32>,

    /// Grid height in cells
    #[arg(long)]
    height: Option<u32>,

    /// Share of cells turned into obstacles, between 0 and 1
    #[arg(long)]
    obstacle_ratio: Option<f64>,

    /// Number of random commands to generate
    #[arg(long)]
    commands: Option<usize>,

    /// Explicit command string (e.g. "ffrbl"); replaces the random script
    #[arg(long)]
    script: Option<String>,

    /// Starting heading (N, E, S or W); random if omitted
    #[arg(long)]
    heading: Option<Heading>,

    /// Seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    /// Pause between frames in milliseconds
    #[arg(long)]
    delay_ms: Option<u64>,

    /// Do not clear the terminal between frames
    #[arg(long, default_value = "false")]
    no_clear: bool,

    /// Only log warnings and errors
    #[arg(long, short, default_value = "false")]
    quiet: bool,
}

impl Cli {
    fn config(&self) -> SimulationConfig {
        let mut config = SimulationConfig::default();
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(ratio) = self.obstacle_ratio {
            config.obstacle_ratio = ratio;
        }
        if let Some(count) = self.commands {
            config.command_count = count;
        }
        if let Some(ms) = self.delay_ms {
            config.frame_delay = Duration::from_millis(ms);
        }
        config.clear_screen = !self.no_clear;
        config
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.quiet { "warn" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = cli.config();
    config.validate().context("invalid simulation settings")?;

    let mut rng = cli
        .seed
        .map_or_else(ChaCha8Rng::from_entropy, ChaCha8Rng::seed_from_u64);

    let mut grid = Grid::new(config.width, config.height)?;
    generate_obstacles(&mut grid, config.obstacle_ratio, &mut rng)?;

    let start = random_start(&grid, config.start_range.clone(), &mut rng)?;
    let heading = cli.heading.unwrap_or_else(|| random_heading(&mut rng));

    let script = match &cli.script {
        Some(script) => script.clone(),
        None => format_commands(&generate_commands(
            config.command_count,
            &config.weights,
            &mut rng,
        )?),
    };

    info!(
        width = grid.width(),
        height = grid.height(),
        obstacles = grid.obstacle_count(),
        x = start.0,
        y = start.1,
        %heading,
        commands = script.len(),
        "starting simulation"
    );

    let display = ConsoleDisplay::stdout(&grid)
        .with_clear_screen(config.clear_screen)
        .with_frame_delay(config.frame_delay);

    let mut rover = Rover::new(start, heading, &grid)?;
    rover.add_observer(display);
    let report = rover.execute_commands(&script);

    match report.collision {
        Some(collision) => info!(
            applied = report.applied,
            blocked_x = collision.blocked.0,
            blocked_y = collision.blocked.1,
            command = %collision.command,
            state = %rover.state(),
            "stopped on collision"
        ),
        None => info!(applied = report.applied, state = %rover.state(), "script completed"),
    }

    Ok(())
}
