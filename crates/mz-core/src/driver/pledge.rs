//! Pledge algorithm
//!
//! Walks straight while the turn counter is zero. Once it meets a wall it
//! follows it, counting left turns up and right turns down, and leaves the
//! wall again when the counter returns to zero. This frees the robot from
//! the free-standing islands a plain wall follower can circle forever.

use super::exhausted;
use crate::errors::DriverError;
use crate::robot::{Direction, Robot, Turn};

pub(super) fn drive(robot: &mut Robot, path_length: &mut u32) -> Result<bool, DriverError> {
    let mut counter: i32 = 0;

    while !robot.is_at_exit() {
        if exhausted(robot) {
            return Ok(false);
        }

        if counter == 0 {
            if robot.distance_to_obstacle(Direction::Forward)?.is_open() {
                *path_length += robot.move_forward(1, false);
            } else {
                robot.rotate(Turn::Right);
                counter -= 1;
            }
        } else if robot.distance_to_obstacle(Direction::Left)?.is_open() {
            robot.rotate(Turn::Left);
            *path_length += robot.move_forward(1, false);
            counter += 1;
        } else if robot.distance_to_obstacle(Direction::Forward)?.is_open() {
            *path_length += robot.move_forward(1, false);
        } else {
            robot.rotate(Turn::Right);
            counter -= 1;
        }
    }
    Ok(true)
}
