//! Error types
//!
//! Capability errors and driver misuse are recoverable and reported to the
//! caller. Invariant violations in a generated grid indicate a defect in a
//! carving strategy and are surfaced as [`MazeError`] rather than repaired.
//! Running the battery dry is not an error: drivers report it as an
//! unsuccessful drive.

use thiserror::Error;

use crate::robot::Sensor;

/// Structural problems with a grid or a maze configuration
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MazeError {
    #[error("Cell ({x}, {y}) cannot reach the exit")]
    Unreachable { x: usize, y: usize },

    #[error("Maze has no exit")]
    NoExit,

    #[error("Maze already has an exit at ({x}, {y})")]
    MultipleExits { x: usize, y: usize },

    #[error("Position ({x}, {y}) is outside a {width}x{height} maze")]
    OutOfBounds {
        x: i64,
        y: i64,
        width: usize,
        height: usize,
    },

    #[error("Wall at ({x}, {y}) facing {dir} is not on the maze border")]
    NotABorder { x: usize, y: usize, dir: String },

    #[error("Invalid maze dimensions {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
}

/// Reasons a generation run ends without delivering a maze
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    #[error("Generation was cancelled")]
    Cancelled,

    #[error("Generated maze violates an invariant: {0}")]
    Maze(#[from] MazeError),

    #[error("Generation worker panicked")]
    WorkerPanicked,
}

/// Robot operation failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RobotError {
    #[error("This robot does not have a {0} sensor")]
    MissingSensor(Sensor),

    #[error("Robot is not in the maze (at {x}, {y})")]
    OutsideMaze { x: i32, y: i32 },
}

/// Driver failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DriverError {
    #[error("No robot is attached to the driver")]
    NoRobot,

    #[error("This driver is not automatic")]
    NotAutomatic,

    #[error(transparent)]
    Robot(#[from] RobotError),

    #[error(transparent)]
    Maze(#[from] MazeError),
}

/// Configuration and selection failures
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Unknown driver: {0}")]
    UnknownDriver(String),

    #[error("Unknown maze builder: {0}")]
    UnknownBuilder(String),

    #[error("Skill level {0} is out of range")]
    InvalidSkill(usize),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}
