//! Left-hand wall following

use super::exhausted;
use crate::errors::DriverError;
use crate::robot::{Direction, Robot, Turn};

/// Walk with the left hand on the wall until the exit cell is reached
///
/// Returns `Ok(false)` if the robot stops on the way.
pub(super) fn drive(robot: &mut Robot, path_length: &mut u32) -> Result<bool, DriverError> {
    while !robot.is_at_exit() {
        if exhausted(robot) {
            return Ok(false);
        }
        if robot.distance_to_obstacle(Direction::Left)?.is_open() {
            robot.rotate(Turn::Left);
            *path_length += robot.move_forward(1, false);
        } else if robot.distance_to_obstacle(Direction::Forward)?.is_open() {
            *path_length += robot.move_forward(1, false);
        } else {
            robot.rotate(Turn::Right);
        }
    }
    Ok(true)
}
