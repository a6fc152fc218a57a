//! Randomized Prim carving over a frontier of candidate walls

use super::checkpoint;
use super::Progress;
use crate::errors::GenerationError;
use crate::maze::{CardinalDirection, Cells, Wall};
use crate::rng::MazeRng;

/// Grow a spanning tree by repeatedly opening a random frontier wall
pub(crate) fn carve(
    cells: &mut Cells,
    rng: &mut MazeRng,
    progress: &mut dyn Progress,
) -> Result<(), GenerationError> {
    let total = cells.len();
    let mut visited = vec![false; total];
    let mut frontier: Vec<Wall> = Vec::new();

    let start = (rng.rn2(cells.width()), rng.rn2(cells.height()));
    let mut count = absorb(cells, &mut visited, &mut frontier, start);

    while let Some(i) = rng.choose_index(frontier.len()) {
        let wall = frontier.swap_remove(i);
        let Some((nx, ny)) = cells.neighbor(wall.x, wall.y, wall.dir) else {
            continue;
        };
        if visited[cells.index(nx, ny)] || !cells.can_go(wall) {
            continue;
        }

        cells.delete_wall(wall);
        count += absorb(cells, &mut visited, &mut frontier, (nx, ny));
        checkpoint(progress, count, total)?;
    }

    Ok(())
}

/// Add a cell (or its whole room) to the tree and queue its outward walls
fn absorb(
    cells: &Cells,
    visited: &mut [bool],
    frontier: &mut Vec<Wall>,
    cell: (usize, usize),
) -> usize {
    let members: Vec<(usize, usize)> = match cells.room_index_at(cell.0, cell.1) {
        Some(r) => cells.rooms()[r].cells().collect(),
        None => vec![cell],
    };

    for &(x, y) in &members {
        visited[cells.index(x, y)] = true;
    }
    for &(x, y) in &members {
        for dir in CardinalDirection::ALL {
            let wall = Wall::new(x, y, dir);
            if !cells.can_go(wall) {
                continue;
            }
            if let Some((nx, ny)) = cells.neighbor(x, y, dir) {
                if !visited[cells.index(nx, ny)] {
                    frontier.push(wall);
                }
            }
        }
    }

    members.len()
}
