//! mz-core: maze generation and robot navigation
//!
//! This crate builds grid mazes with one of several carving strategies,
//! computes the distance-to-exit field, and drives sensor-limited robots
//! through the result under a finite energy budget.
//!
//! It performs no rendering. Everything a drawing layer needs is exposed
//! through [`session::SessionSnapshot`] and the read-only [`MazeConfig`].

pub mod config;
pub mod driver;
pub mod errors;
pub mod generation;
pub mod maze;
pub mod robot;
pub mod save;
pub mod session;

mod consts;
mod rng;

pub use config::{RobotConfig, SessionConfig};
pub use consts::*;
pub use driver::{Driver, DriverKind};
pub use errors::{ConfigError, DriverError, GenerationError, MazeError, RobotError};
pub use generation::{
    Builder, CancelToken, GenerationHandle, GenerationRequest, MazeFactory, Progress,
};
pub use maze::{CardinalDirection, CellFlags, Cells, DistanceField, MazeConfig, Room, Wall};
pub use rng::MazeRng;
pub use robot::{Direction, ObstacleDistance, Robot, RobotSnapshot, Sensor, Sensors, Turn};
pub use save::{MazeRecord, RecordError};
pub use session::{Session, SessionSnapshot};
