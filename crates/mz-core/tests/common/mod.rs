//! Shared maze fixtures

#![allow(dead_code)]

use std::sync::Arc;

use mz_core::{CardinalDirection, Cells, MazeConfig, Wall};

use CardinalDirection::{East, South, West};

/// Hand-built 4x4 perfect maze
///
/// A single serpentine corridor from (0, 0) to the exit at (3, 3), which
/// opens to the South. The start is 12 steps from the exit.
///
/// ```text
/// +--+--+--+--+
/// |S          |
/// +--+--+--+  +
/// |           |
/// +  +--+--+--+
/// |           |
/// +--+--+--+  +
/// |         XX|
/// +--+--+--+  +
/// ```
pub fn serpentine() -> Arc<MazeConfig> {
    let mut cells = Cells::new(4, 4).unwrap();
    for x in 0..3 {
        cells.delete_wall(Wall::new(x, 0, East));
    }
    cells.delete_wall(Wall::new(3, 0, South));
    for x in 1..4 {
        cells.delete_wall(Wall::new(x, 1, West));
    }
    cells.delete_wall(Wall::new(0, 1, South));
    for x in 0..3 {
        cells.delete_wall(Wall::new(x, 2, East));
    }
    cells.delete_wall(Wall::new(3, 2, South));
    for x in 1..4 {
        cells.delete_wall(Wall::new(x, 3, West));
    }
    cells.open_exit(3, 3, South).unwrap();
    Arc::new(MazeConfig::from_cells(cells).unwrap())
}

/// Check the structural invariants every generated maze must satisfy
pub fn assert_maze_invariants(maze: &MazeConfig) {
    let cells = maze.cells();
    let (w, h) = (cells.width(), cells.height());

    let exits: Vec<_> = (0..h)
        .flat_map(|y| (0..w).map(move |x| (x, y)))
        .filter(|&(x, y)| cells.is_exit_position(x, y))
        .collect();
    assert_eq!(exits, vec![maze.exit_position()]);

    let exit_dir = cells.exit_direction().expect("exit has an opening");
    for y in 0..h {
        for x in 0..w {
            for dir in CardinalDirection::ALL {
                if !cells.has_border(x, y, dir) {
                    continue;
                }
                let is_opening = (x, y) == maze.exit_position() && dir == exit_dir;
                assert_eq!(cells.has_wall(x, y, dir), !is_opening, "({x}, {y}) {dir}");
            }
        }
    }

    let (sx, sy) = maze.starting_position();
    let max = maze.distances().as_slice().iter().copied().max().unwrap_or(0);
    assert_eq!(maze.distance_to_exit(sx, sy), max);
    let (ex, ey) = maze.exit_position();
    assert_eq!(maze.distance_to_exit(ex, ey), 0);
}

/// Open internal walls expected once rooms collapse to single tree nodes
pub fn expected_open_walls(cells: &Cells) -> usize {
    let mut nodes = cells.width() * cells.height();
    let mut interior = 0;
    for room in cells.rooms() {
        nodes = nodes - room.area() + 1;
        interior += (room.width - 1) * room.height + (room.height - 1) * room.width;
    }
    interior + nodes - 1
}
