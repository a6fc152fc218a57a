//! Randomized depth-first carving with an explicit backtracking stack

use super::checkpoint;
use super::Progress;
use crate::errors::GenerationError;
use crate::maze::{CardinalDirection, Cells, Wall};
use crate::rng::MazeRng;

/// Carve spanning-tree pathways by walking from a random cell
pub(crate) fn carve(
    cells: &mut Cells,
    rng: &mut MazeRng,
    progress: &mut dyn Progress,
) -> Result<(), GenerationError> {
    let total = cells.len();
    let mut visited = vec![false; total];
    let mut stack = Vec::with_capacity(total);

    let start = (rng.rn2(cells.width()), rng.rn2(cells.height()));
    let mut count = enter(cells, &mut visited, &mut stack, start, rng);

    while let Some(&(x, y)) = stack.last() {
        let mut valid_dirs = [CardinalDirection::North; 4];
        let mut q = 0;

        for dir in CardinalDirection::ALL {
            if !cells.can_go(Wall::new(x, y, dir)) {
                continue;
            }
            if let Some((nx, ny)) = cells.neighbor(x, y, dir) {
                if !visited[cells.index(nx, ny)] {
                    valid_dirs[q] = dir;
                    q += 1;
                }
            }
        }

        if q == 0 {
            stack.pop();
            continue;
        }

        let dir = valid_dirs[rng.rn2(q)];
        let Some(next) = cells.neighbor(x, y, dir) else {
            continue;
        };
        cells.delete_wall(Wall::new(x, y, dir));
        count += enter(cells, &mut visited, &mut stack, next, rng);
        checkpoint(progress, count, total)?;
    }

    Ok(())
}

/// Visit a cell and push it; a room is visited as a whole with the entry
/// cell on top of the stack
fn enter(
    cells: &Cells,
    visited: &mut [bool],
    stack: &mut Vec<(usize, usize)>,
    cell: (usize, usize),
    rng: &mut MazeRng,
) -> usize {
    let Some(r) = cells.room_index_at(cell.0, cell.1) else {
        visited[cells.index(cell.0, cell.1)] = true;
        stack.push(cell);
        return 1;
    };

    let room = cells.rooms()[r];
    let mut members: Vec<(usize, usize)> = room.cells().filter(|&c| c != cell).collect();
    rng.shuffle(&mut members);
    members.push(cell);

    for &(x, y) in &members {
        visited[cells.index(x, y)] = true;
    }
    let n = members.len();
    stack.extend(members);
    n
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::Silent;
    use crate::maze::Room;

    #[test]
    fn test_dfs_spanning_tree() {
        let mut rng = MazeRng::new(42);
        let mut cells = Cells::new(9, 7).unwrap();
        carve(&mut cells, &mut rng, &mut Silent).unwrap();
        assert_eq!(cells.open_internal_walls(), 9 * 7 - 1);
        assert!(crate::maze::bfs(&cells, (0, 0)).iter().all(Option::is_some));
    }

    #[test]
    fn test_dfs_enters_room_once() {
        let mut rng = MazeRng::new(4);
        let mut cells = Cells::new(8, 8).unwrap();
        let room = Room::new(2, 2, 3, 3);
        cells.carve_room(room);
        let room_walls = cells.open_internal_walls();
        carve(&mut cells, &mut rng, &mut Silent).unwrap();

        // Room collapses to one node: (64 - 9 + 1) nodes need 55 tree edges
        assert_eq!(cells.open_internal_walls(), room_walls + 64 - 9);
        assert!(crate::maze::bfs(&cells, (0, 0)).iter().all(Option::is_some));
    }
}
