//! Distance-field oracle: always step towards a neighbor closer to the exit

use super::exhausted;
use crate::errors::{DriverError, MazeError};
use crate::maze::{CardinalDirection, MazeConfig};
use crate::robot::{Robot, Turn};

pub(super) fn drive(
    robot: &mut Robot,
    maze: &MazeConfig,
    path_length: &mut u32,
) -> Result<bool, DriverError> {
    while !robot.is_at_exit() {
        if exhausted(robot) {
            return Ok(false);
        }

        let (x, y) = robot.current_position()?;
        let (nx, ny) = maze
            .neighbor_closer_to_exit(x, y)
            .ok_or(MazeError::Unreachable { x, y })?;
        let target = CardinalDirection::from_delta(nx as i32 - x as i32, ny as i32 - y as i32)
            .ok_or(MazeError::Unreachable { x, y })?;

        let facing = robot.facing();
        if target == facing {
            *path_length += robot.move_forward(1, false);
        } else if target == facing.opposite() {
            robot.rotate(Turn::Around);
        } else if target == facing.rotate_clockwise() {
            robot.rotate(Turn::Right);
        } else {
            robot.rotate(Turn::Left);
        }
    }
    Ok(true)
}
