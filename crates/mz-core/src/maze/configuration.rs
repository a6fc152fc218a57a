//! Maze configuration: the finished product of a generation run

use super::cells::Cells;
use super::direction::CardinalDirection;
use super::distance::DistanceField;
use crate::errors::MazeError;

/// A carved grid together with its distance field, start and exit
///
/// Immutable once built; share it behind an `Arc`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MazeConfig {
    cells: Cells,
    distances: DistanceField,
    start: (usize, usize),
    exit: (usize, usize),
}

impl MazeConfig {
    /// Validate a carved grid and derive the distance field and start cell
    pub fn from_cells(cells: Cells) -> Result<Self, MazeError> {
        let exit = cells.exit_position().ok_or(MazeError::NoExit)?;
        let distances = DistanceField::compute(&cells, exit)?;
        let start = distances.max_distance_cell();
        Ok(Self {
            cells,
            distances,
            start,
            exit,
        })
    }

    pub fn cells(&self) -> &Cells {
        &self.cells
    }

    pub fn distances(&self) -> &DistanceField {
        &self.distances
    }

    pub fn width(&self) -> usize {
        self.cells.width()
    }

    pub fn height(&self) -> usize {
        self.cells.height()
    }

    pub fn starting_position(&self) -> (usize, usize) {
        self.start
    }

    pub fn exit_position(&self) -> (usize, usize) {
        self.exit
    }

    /// # Panics
    ///
    /// Panics if `(x, y)` is outside the grid.
    pub fn distance_to_exit(&self, x: usize, y: usize) -> u32 {
        self.distances.distance(x, y)
    }

    pub fn has_wall(&self, x: usize, y: usize, dir: CardinalDirection) -> bool {
        self.cells.has_wall(x, y, dir)
    }

    pub fn is_valid_position(&self, x: i32, y: i32) -> bool {
        self.cells.is_valid_position(x, y)
    }

    pub fn neighbor_closer_to_exit(&self, x: usize, y: usize) -> Option<(usize, usize)> {
        self.distances.neighbor_closer_to_exit(&self.cells, x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze::Wall;

    #[test]
    fn test_missing_exit_is_rejected() {
        let mut cells = Cells::new(2, 1).unwrap();
        cells.delete_wall(Wall::new(0, 0, CardinalDirection::East));
        assert_eq!(MazeConfig::from_cells(cells), Err(MazeError::NoExit));
    }

    #[test]
    fn test_start_is_farthest_cell() {
        let mut cells = Cells::new(2, 2).unwrap();
        cells.delete_wall(Wall::new(0, 0, CardinalDirection::East));
        cells.delete_wall(Wall::new(1, 0, CardinalDirection::South));
        cells.delete_wall(Wall::new(1, 1, CardinalDirection::West));
        cells.open_exit(0, 1, CardinalDirection::South).unwrap();

        let maze = MazeConfig::from_cells(cells).unwrap();
        assert_eq!(maze.exit_position(), (0, 1));
        assert_eq!(maze.starting_position(), (0, 0));
        assert_eq!(maze.distance_to_exit(0, 0), 3);
        assert_eq!(maze.neighbor_closer_to_exit(0, 0), Some((1, 0)));
    }
}
