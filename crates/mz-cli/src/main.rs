//! mazebot: generate a maze and let a robot find its way out
//!
//! Headless front end. Prints the run summary, and the map on request.

use std::path::PathBuf;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::{ArgAction, Parser};
use tracing::{debug, info};
use tracing_subscriber::filter::LevelFilter;

use mz_core::config::{parse_builder, parse_driver};
use mz_core::save::{MazeRecord, load_maze};
use mz_core::{DriverKind, MazeConfig, MazeFactory, Session, SessionConfig, Turn};

/// Maze generation and robot navigation
#[derive(Parser, Debug)]
#[command(name = "mazebot")]
#[command(author, version, about = "Generate a maze and drive a robot to its exit", long_about = None)]
struct Args {
    /// Carving strategy (Dfs, Prim, Eller)
    #[arg(short = 'b', long = "builder")]
    builder: Option<String>,

    /// Skill level, 0 to 15
    #[arg(short = 's', long = "skill")]
    skill: Option<usize>,

    /// Generate a perfect maze (no rooms)
    #[arg(short = 'p', long = "perfect", conflicts_with = "imperfect")]
    perfect: bool,

    /// Generate a maze with rooms and loops
    #[arg(short = 'i', long = "imperfect")]
    imperfect: bool,

    /// Driver (Manual, WallFollower, Pledge, Wizard)
    #[arg(short = 'd', long = "driver")]
    driver: Option<String>,

    /// Seed for reproducible generation
    #[arg(long = "seed")]
    seed: Option<u64>,

    /// Initial battery level
    #[arg(long = "battery")]
    battery: Option<f32>,

    /// JSON session configuration; flags override its values
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Write the generated maze to a record file
    #[arg(long = "save")]
    save: Option<PathBuf>,

    /// Replay a maze record instead of generating
    #[arg(long = "load")]
    load: Option<PathBuf>,

    /// Moves for the manual driver: F forward, B backward, L/R turn, A around
    #[arg(long = "moves")]
    moves: Option<String>,

    /// Print the maze before driving
    #[arg(long = "show-map")]
    show_map: bool,

    /// Verbose output, repeat for more
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = match args.verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .init();

    let config = session_config(&args)?;
    let maze = match &args.load {
        Some(path) => {
            let maze = load_maze(path)
                .with_context(|| format!("failed to load maze from {}", path.display()))?;
            Arc::new(maze)
        }
        None => build_maze(&config)?,
    };

    if let Some(path) = &args.save {
        MazeRecord::from_maze(&maze)
            .with_origin(config.builder, config.seed)
            .save(path)
            .with_context(|| format!("failed to save maze to {}", path.display()))?;
    }

    if args.show_map {
        print!("{}", maze.cells());
    }

    let mut session = Session::new(Arc::clone(&maze), &config);
    let escaped = match config.driver {
        DriverKind::Manual => drive_manually(&mut session, args.moves.as_deref().unwrap_or(""))?,
        _ => session.drive()?,
    };

    let snap = session.snapshot();
    let (sx, sy) = maze.starting_position();
    let (ex, ey) = maze.exit_position();
    println!("maze:      {}x{}", maze.width(), maze.height());
    println!("start:     ({sx}, {sy}), {} steps from the exit", maze.distance_to_exit(sx, sy));
    println!("exit:      ({ex}, {ey})");
    println!("driver:    {}", snap.driver);
    println!("escaped:   {escaped}");
    println!("path:      {}", snap.path_length);
    println!("energy:    {}", snap.energy_consumption);
    println!("battery:   {}", snap.robot.battery);
    println!(
        "robot:     ({}, {}) facing {}{}",
        snap.robot.x,
        snap.robot.y,
        snap.robot.facing,
        if snap.robot.stopped { ", stopped" } else { "" }
    );

    Ok(())
}

/// Configuration file (or defaults) with command-line overrides applied
fn session_config(args: &Args) -> Result<SessionConfig> {
    let mut config = match &args.config {
        Some(path) => SessionConfig::load(path)
            .with_context(|| format!("failed to read config {}", path.display()))?,
        None => SessionConfig::default(),
    };

    if let Some(name) = &args.builder {
        config.builder = parse_builder(name)?;
    }
    if let Some(name) = &args.driver {
        config.driver = parse_driver(name)?;
    }
    if let Some(skill) = args.skill {
        config.skill = skill;
    }
    if args.perfect {
        config.perfect = true;
    } else if args.imperfect {
        config.perfect = false;
    }
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    if let Some(battery) = args.battery {
        config.robot.initial_battery = battery;
    }
    config.validate()?;
    Ok(config)
}

/// Generate on a worker thread, logging progress while waiting
fn build_maze(config: &SessionConfig) -> Result<Arc<MazeConfig>> {
    let request = config.generation_request()?;
    info!(builder = %request.builder, skill = config.skill, "ordering maze");

    let mut handle = MazeFactory::new().order(request);
    let mut shown = 0;
    while !handle.is_finished() {
        let pct = handle.try_progress();
        if pct > shown {
            debug!(progress = pct, "generating");
            shown = pct;
        }
        thread::sleep(Duration::from_millis(20));
    }
    Ok(handle.wait()?)
}

/// Replay a move string through the manual driver
fn drive_manually(session: &mut Session, moves: &str) -> Result<bool> {
    let driver = session.driver_mut();
    for c in moves.chars() {
        match c.to_ascii_uppercase() {
            'F' => {
                driver.step_forward()?;
            }
            'B' => {
                driver.step_backward()?;
            }
            'L' => driver.rotate(Turn::Left)?,
            'R' => driver.rotate(Turn::Right)?,
            'A' => driver.rotate(Turn::Around)?,
            c if c.is_whitespace() => {}
            other => bail!("unknown move `{other}`"),
        }
    }
    Ok(session.robot().borrow().has_escaped())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_for(argv: &[&str]) -> SessionConfig {
        let args = Args::try_parse_from(argv).unwrap();
        session_config(&args).unwrap()
    }

    #[test]
    fn test_perfect_defaults_to_library_value() {
        let config = config_for(&["mazebot"]);
        assert_eq!(config.perfect, SessionConfig::default().perfect);
    }

    #[test]
    fn test_perfect_flags_override() {
        assert!(config_for(&["mazebot", "-p"]).perfect);
        assert!(!config_for(&["mazebot", "--imperfect"]).perfect);
        assert!(Args::try_parse_from(["mazebot", "-p", "-i"]).is_err());
    }

    #[test]
    fn test_builder_and_driver_names() {
        let config = config_for(&["mazebot", "-b", "eller", "-d", "pledge"]);
        assert_eq!(config.builder, mz_core::Builder::Eller);
        assert_eq!(config.driver, DriverKind::Pledge);
    }
}
