//! Robot: a battery-powered agent with optional sensors
//!
//! The robot knows its position and facing, and senses the maze only through
//! its fitted sensors. Every costed operation drains the battery, which is
//! floored at zero; hitting zero stops the robot for good. A stopped robot
//! ignores movement and rotation.

mod sensors;

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};
use tracing::{debug, warn};

use crate::config::RobotConfig;
use crate::consts::{ROTATE_ENERGY, SENSE_ENERGY, STEP_ENERGY};
use crate::errors::RobotError;
use crate::maze::{CardinalDirection, CellFlags, MazeConfig};

pub use sensors::{Sensor, Sensors};

/// Direction relative to the robot's facing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
pub enum Direction {
    Forward,
    Left,
    Right,
    Backward,
}

impl Direction {
    /// Absolute direction for a robot facing `facing`
    pub const fn absolute(self, facing: CardinalDirection) -> CardinalDirection {
        match self {
            Direction::Forward => facing,
            Direction::Left => facing.rotate_counterclockwise(),
            Direction::Right => facing.rotate_clockwise(),
            Direction::Backward => facing.opposite(),
        }
    }
}

/// Rotation in place
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
pub enum Turn {
    Left,
    Right,
    Around,
}

impl Turn {
    pub const fn apply(self, facing: CardinalDirection) -> CardinalDirection {
        match self {
            Turn::Left => facing.rotate_counterclockwise(),
            Turn::Right => facing.rotate_clockwise(),
            Turn::Around => facing.opposite(),
        }
    }

    pub const fn energy(self) -> f32 {
        match self {
            Turn::Left | Turn::Right => ROTATE_ENERGY,
            Turn::Around => 2.0 * ROTATE_ENERGY,
        }
    }
}

/// Result of a distance scan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleDistance {
    /// Open cells before the first wall
    Cells(u32),
    /// The scan left the maze through the exit
    Exit,
}

impl ObstacleDistance {
    /// Whether at least one step is possible in the scanned direction
    pub fn is_open(self) -> bool {
        !matches!(self, ObstacleDistance::Cells(0))
    }
}

/// Read-only view of a robot's state for rendering
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RobotSnapshot {
    pub x: i32,
    pub y: i32,
    pub facing: CardinalDirection,
    pub battery: f32,
    pub stopped: bool,
    pub escaped: bool,
    pub sensors: Sensors,
    /// Walls around the robot's cell, empty once it is outside the grid
    pub walls: CellFlags,
}

#[derive(Debug, Clone)]
pub struct Robot {
    maze: Arc<MazeConfig>,
    x: i32,
    y: i32,
    facing: CardinalDirection,
    battery: f32,
    initial_battery: f32,
    stopped: bool,
    sensors: Sensors,
}

impl Robot {
    /// A fully equipped robot at the maze's start, facing East
    pub fn new(maze: Arc<MazeConfig>) -> Self {
        Self::with_config(maze, &RobotConfig::default())
    }

    pub fn with_config(maze: Arc<MazeConfig>, config: &RobotConfig) -> Self {
        let (x, y) = maze.starting_position();
        let mut sensors = Sensors::empty();
        sensors.set(Sensors::DISTANCE, config.distance_sensor);
        sensors.set(Sensors::ROOM, config.room_sensor);
        let initial_battery = config.initial_battery.max(0.0);

        Self {
            maze,
            x: x as i32,
            y: y as i32,
            facing: CardinalDirection::East,
            battery: initial_battery,
            initial_battery,
            stopped: initial_battery <= 0.0,
            sensors,
        }
    }

    pub fn maze(&self) -> &Arc<MazeConfig> {
        &self.maze
    }

    /// Raw position, which may lie outside the grid after escaping
    pub fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    /// Position as a grid cell
    pub fn current_position(&self) -> Result<(usize, usize), RobotError> {
        if self.maze.is_valid_position(self.x, self.y) {
            Ok((self.x as usize, self.y as usize))
        } else {
            Err(RobotError::OutsideMaze {
                x: self.x,
                y: self.y,
            })
        }
    }

    pub fn facing(&self) -> CardinalDirection {
        self.facing
    }

    pub fn battery_level(&self) -> f32 {
        self.battery
    }

    /// Overwrite the battery; a level of zero stops the robot
    pub fn set_battery_level(&mut self, level: f32) {
        self.battery = level.max(0.0);
        if self.battery <= 0.0 {
            self.stopped = true;
        }
    }

    pub fn has_stopped(&self) -> bool {
        self.stopped
    }

    pub fn stop(&mut self) {
        self.stopped = true;
    }

    /// Whether the robot walked out through the exit
    pub fn has_escaped(&self) -> bool {
        !self.maze.is_valid_position(self.x, self.y)
    }

    pub fn is_at_exit(&self) -> bool {
        self.current_position()
            .is_ok_and(|pos| pos == self.maze.exit_position())
    }

    pub fn energy_for_full_rotation(&self) -> f32 {
        4.0 * ROTATE_ENERGY
    }

    pub fn energy_for_step_forward(&self) -> f32 {
        STEP_ENERGY
    }

    pub fn sensors(&self) -> Sensors {
        self.sensors
    }

    pub fn has_sensor(&self, sensor: Sensor) -> bool {
        self.sensors.contains(sensor.flag())
    }

    pub fn add_sensor(&mut self, sensor: Sensor) {
        self.sensors.insert(sensor.flag());
    }

    pub fn remove_sensor(&mut self, sensor: Sensor) {
        self.sensors.remove(sensor.flag());
    }

    fn require(&self, sensor: Sensor) -> Result<(), RobotError> {
        if self.has_sensor(sensor) {
            Ok(())
        } else {
            Err(RobotError::MissingSensor(sensor))
        }
    }

    fn drain(&mut self, cost: f32) {
        self.battery = (self.battery - cost).max(0.0);
        if self.battery <= 0.0 && !self.stopped {
            warn!(x = self.x, y = self.y, "battery exhausted, robot stopped");
            self.stopped = true;
        }
    }

    fn is_halted(&self) -> bool {
        self.stopped || self.has_escaped()
    }

    pub fn rotate(&mut self, turn: Turn) {
        if self.is_halted() {
            return;
        }
        self.facing = turn.apply(self.facing);
        self.drain(turn.energy());
    }

    /// Step up to `distance` cells forward; returns the cells moved
    ///
    /// A wall ends the move. Outside manual mode the robot crashes into it
    /// and stops.
    pub fn move_forward(&mut self, distance: u32, manual: bool) -> u32 {
        self.walk(self.facing, distance, manual)
    }

    /// Step up to `distance` cells against the facing direction
    pub fn move_backward(&mut self, distance: u32, manual: bool) -> u32 {
        self.walk(self.facing.opposite(), distance, manual)
    }

    fn walk(&mut self, dir: CardinalDirection, distance: u32, manual: bool) -> u32 {
        let mut moved = 0;
        for _ in 0..distance {
            if self.is_halted() {
                break;
            }
            let (x, y) = (self.x as usize, self.y as usize);
            if self.maze.has_wall(x, y, dir) {
                if !manual {
                    warn!(x, y, %dir, "robot crashed into a wall");
                    self.stopped = true;
                }
                break;
            }
            let (dx, dy) = dir.delta();
            self.x += dx;
            self.y += dy;
            self.drain(STEP_ENERGY);
            moved += 1;
        }
        if moved > 0 && self.has_escaped() {
            debug!(x = self.x, y = self.y, "robot left the maze");
        }
        moved
    }

    /// Count open cells in `direction` up to the first wall
    pub fn distance_to_obstacle(&mut self, direction: Direction) -> Result<ObstacleDistance, RobotError> {
        self.require(Sensor::Distance)?;
        let (mut x, mut y) = self.current_position()?;
        let dir = direction.absolute(self.facing);
        self.drain(SENSE_ENERGY);

        let mut count = 0;
        while !self.maze.has_wall(x, y, dir) {
            match self.maze.cells().neighbor(x, y, dir) {
                Some((nx, ny)) => {
                    (x, y) = (nx, ny);
                    count += 1;
                }
                None => return Ok(ObstacleDistance::Exit),
            }
        }
        Ok(ObstacleDistance::Cells(count))
    }

    /// Whether a scan in `direction` runs out through the exit
    pub fn can_see_exit(&mut self, direction: Direction) -> Result<bool, RobotError> {
        Ok(self.distance_to_obstacle(direction)? == ObstacleDistance::Exit)
    }

    pub fn is_in_room(&self) -> Result<bool, RobotError> {
        self.require(Sensor::Room)?;
        Ok(self.maze.cells().is_in_room(self.x, self.y))
    }

    /// Walls around the current cell
    pub fn visible_walls(&self) -> Result<CellFlags, RobotError> {
        let (x, y) = self.current_position()?;
        Ok(self.maze.cells().walls_at(x, y))
    }

    pub fn snapshot(&self) -> RobotSnapshot {
        RobotSnapshot {
            x: self.x,
            y: self.y,
            facing: self.facing,
            battery: self.battery,
            stopped: self.stopped,
            escaped: self.has_escaped(),
            sensors: self.sensors,
            walls: self
                .current_position()
                .map(|(x, y)| self.maze.cells().walls_at(x, y))
                .unwrap_or_default(),
        }
    }

    /// Back to the start with a full battery
    pub fn reset(&mut self) {
        let (x, y) = self.maze.starting_position();
        self.x = x as i32;
        self.y = y as i32;
        self.facing = CardinalDirection::East;
        self.battery = self.initial_battery;
        self.stopped = self.initial_battery <= 0.0;
    }
}
