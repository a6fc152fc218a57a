//! Drivers: strategies that steer a robot to the exit
//!
//! A driver holds only a weak reference to its robot; the session owns the
//! robot. Automatic drivers loop until the robot stands on the exit cell or
//! can no longer act, then turn towards the opening and step out.

mod pledge;
mod wall_follower;
mod wizard;

use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};
use tracing::{info, warn};

use crate::errors::{ConfigError, DriverError};
use crate::maze::MazeConfig;
use crate::robot::{Direction, Robot, Turn};

/// Available driving strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumIter, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum DriverKind {
    /// Steered step by step by the user
    Manual,
    /// Keeps a wall on its left
    WallFollower,
    /// Wall following with a turn counter, escapes islands
    Pledge,
    /// Follows the distance field
    #[default]
    Wizard,
}

impl DriverKind {
    /// Parse a driver name, case-insensitively
    pub fn parse_name(name: &str) -> Result<Self, ConfigError> {
        name.parse()
            .map_err(|_| ConfigError::UnknownDriver(name.to_string()))
    }

    pub fn is_automatic(self) -> bool {
        self != DriverKind::Manual
    }
}

impl Serialize for DriverKind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DriverKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let name = String::deserialize(deserializer)?;
        name.parse()
            .map_err(|_| serde::de::Error::custom(format!("unknown driver `{name}`")))
    }
}

#[derive(Debug, Clone)]
pub struct Driver {
    kind: DriverKind,
    robot: Weak<RefCell<Robot>>,
    maze: Option<Arc<MazeConfig>>,
    path_length: u32,
    starting_energy: f32,
}

impl Driver {
    pub fn new(kind: DriverKind) -> Self {
        Self {
            kind,
            robot: Weak::new(),
            maze: None,
            path_length: 0,
            starting_energy: 0.0,
        }
    }

    pub fn kind(&self) -> DriverKind {
        self.kind
    }

    /// Attach to a robot, recording its current battery as the starting energy
    pub fn attach(&mut self, robot: &Rc<RefCell<Robot>>) {
        let r = robot.borrow();
        self.maze = Some(Arc::clone(r.maze()));
        self.starting_energy = r.battery_level();
        self.path_length = 0;
        self.robot = Rc::downgrade(robot);
    }

    /// The attached robot, if it is still alive
    pub fn robot(&self) -> Option<Rc<RefCell<Robot>>> {
        self.robot.upgrade()
    }

    /// Cells moved so far, excluding the final step out of the maze
    pub fn path_length(&self) -> u32 {
        self.path_length
    }

    pub fn starting_energy(&self) -> f32 {
        self.starting_energy
    }

    pub fn energy_consumption(&self) -> Result<f32, DriverError> {
        let robot = self.robot().ok_or(DriverError::NoRobot)?;
        let battery = robot.borrow().battery_level();
        Ok(self.starting_energy - battery)
    }

    /// Drive the robot out of the maze
    ///
    /// Returns `Ok(false)` if the robot stopped or ran out of energy first.
    pub fn drive_to_exit(&mut self) -> Result<bool, DriverError> {
        let robot = self.robot().ok_or(DriverError::NoRobot)?;
        let maze = self.maze.clone().ok_or(DriverError::NoRobot)?;
        let mut robot = robot.borrow_mut();

        let reached = match self.kind {
            DriverKind::Manual => return Err(DriverError::NotAutomatic),
            DriverKind::WallFollower => wall_follower::drive(&mut robot, &mut self.path_length)?,
            DriverKind::Pledge => pledge::drive(&mut robot, &mut self.path_length)?,
            DriverKind::Wizard => wizard::drive(&mut robot, &maze, &mut self.path_length)?,
        };

        if !reached {
            warn!(
                driver = %self.kind,
                path_length = self.path_length,
                battery = robot.battery_level(),
                "robot stopped before reaching the exit"
            );
            return Ok(false);
        }

        let escaped = leave_maze(&mut robot)?;
        info!(
            driver = %self.kind,
            escaped,
            path_length = self.path_length,
            energy = self.starting_energy - robot.battery_level(),
            "drive finished"
        );
        Ok(escaped)
    }

    /// Manual step forward; a blocked step is ignored
    pub fn step_forward(&mut self) -> Result<u32, DriverError> {
        let robot = self.robot().ok_or(DriverError::NoRobot)?;
        let moved = robot.borrow_mut().move_forward(1, true);
        self.path_length += moved;
        Ok(moved)
    }

    /// Manual step backward; a blocked step is ignored
    pub fn step_backward(&mut self) -> Result<u32, DriverError> {
        let robot = self.robot().ok_or(DriverError::NoRobot)?;
        let moved = robot.borrow_mut().move_backward(1, true);
        self.path_length += moved;
        Ok(moved)
    }

    pub fn rotate(&mut self, turn: Turn) -> Result<(), DriverError> {
        let robot = self.robot().ok_or(DriverError::NoRobot)?;
        robot.borrow_mut().rotate(turn);
        Ok(())
    }
}

/// Whether the robot can no longer act
fn exhausted(robot: &Robot) -> bool {
    robot.has_stopped() || robot.battery_level() <= 0.0
}

/// From the exit cell, face the opening and take the step out
fn leave_maze(robot: &mut Robot) -> Result<bool, DriverError> {
    if robot.can_see_exit(Direction::Left)? {
        robot.rotate(Turn::Left);
    } else if robot.can_see_exit(Direction::Right)? {
        robot.rotate(Turn::Right);
    } else if robot.can_see_exit(Direction::Backward)? {
        robot.rotate(Turn::Around);
    }

    if exhausted(robot) {
        return Ok(false);
    }
    robot.move_forward(1, false);
    Ok(robot.has_escaped())
}
