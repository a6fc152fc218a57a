//! A single run: one maze, one robot, one driver

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use crate::config::SessionConfig;
use crate::driver::{Driver, DriverKind};
use crate::errors::{DriverError, RobotError};
use crate::maze::{CellFlags, MazeConfig};
use crate::robot::{Robot, RobotSnapshot};

/// State a renderer needs for one frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SessionSnapshot {
    pub robot: RobotSnapshot,
    pub driver: DriverKind,
    pub path_length: u32,
    pub energy_consumption: f32,
}

/// Owns the robot and wires the driver to it
#[derive(Debug)]
pub struct Session {
    maze: Arc<MazeConfig>,
    robot: Rc<RefCell<Robot>>,
    driver: Driver,
}

impl Session {
    pub fn new(maze: Arc<MazeConfig>, config: &SessionConfig) -> Self {
        let robot = Rc::new(RefCell::new(Robot::with_config(
            Arc::clone(&maze),
            &config.robot,
        )));
        let mut driver = Driver::new(config.driver);
        driver.attach(&robot);
        info!(
            driver = %config.driver,
            width = maze.width(),
            height = maze.height(),
            "session started"
        );
        Self {
            maze,
            robot,
            driver,
        }
    }

    pub fn maze(&self) -> &Arc<MazeConfig> {
        &self.maze
    }

    pub fn robot(&self) -> &Rc<RefCell<Robot>> {
        &self.robot
    }

    pub fn driver(&self) -> &Driver {
        &self.driver
    }

    pub fn driver_mut(&mut self) -> &mut Driver {
        &mut self.driver
    }

    /// Let the automatic driver run to completion
    pub fn drive(&mut self) -> Result<bool, DriverError> {
        self.driver.drive_to_exit()
    }

    /// Put the robot back at the start and re-attach the driver
    pub fn restart(&mut self) {
        self.robot.borrow_mut().reset();
        self.driver.attach(&self.robot);
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let robot = self.robot.borrow().snapshot();
        SessionSnapshot {
            robot,
            driver: self.driver.kind(),
            path_length: self.driver.path_length(),
            energy_consumption: self.driver.starting_energy() - robot.battery,
        }
    }

    /// Walls of the robot's current cell
    pub fn visible_walls(&self) -> Result<CellFlags, RobotError> {
        self.robot.borrow().visible_walls()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RobotConfig;
    use crate::maze::{CardinalDirection, Cells, Wall};

    fn l_shape() -> Arc<MazeConfig> {
        let mut cells = Cells::new(2, 2).unwrap();
        cells.delete_wall(Wall::new(0, 0, CardinalDirection::East));
        cells.delete_wall(Wall::new(1, 0, CardinalDirection::South));
        cells.delete_wall(Wall::new(1, 1, CardinalDirection::West));
        cells.open_exit(0, 1, CardinalDirection::West).unwrap();
        Arc::new(MazeConfig::from_cells(cells).unwrap())
    }

    #[test]
    fn test_session_drives_and_restarts() {
        let mut session = Session::new(l_shape(), &SessionConfig::default());
        assert!(session.drive().unwrap());

        let snap = session.snapshot();
        assert!(snap.robot.escaped);
        assert_eq!(snap.path_length, 3);
        assert!(snap.energy_consumption > 0.0);
        assert!(session.visible_walls().is_err());

        session.restart();
        let snap = session.snapshot();
        assert_eq!((snap.robot.x, snap.robot.y), (0, 0));
        assert_eq!(snap.path_length, 0);
        assert_eq!(snap.energy_consumption, 0.0);
    }

    #[test]
    fn test_session_respects_robot_config() {
        let config = SessionConfig {
            driver: DriverKind::WallFollower,
            robot: RobotConfig {
                distance_sensor: false,
                ..RobotConfig::default()
            },
            ..SessionConfig::default()
        };
        let mut session = Session::new(l_shape(), &config);
        assert!(matches!(
            session.drive(),
            Err(DriverError::Robot(RobotError::MissingSensor(_)))
        ));
        assert_eq!(session.snapshot().energy_consumption, 0.0);
    }
}
