//! Maze model
//!
//! Contains the cell grid, rooms, the distance field, and the configuration
//! that bundles them for robots and drivers.

mod cells;
mod configuration;
mod direction;
mod distance;
mod room;

pub(crate) use distance::bfs;

pub use cells::{CellFlags, Cells, Wall};
pub use configuration::MazeConfig;
pub use direction::CardinalDirection;
pub use distance::DistanceField;
pub use room::Room;
