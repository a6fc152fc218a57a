//! Distance-to-exit field
//!
//! Breadth-first search from the exit through open walls. A cell the search
//! never reaches means the grid is disconnected, which no strategy may
//! produce, so it is reported as [`MazeError::Unreachable`].

use std::collections::VecDeque;

use super::cells::Cells;
use crate::errors::MazeError;

/// Hop distances over open walls, seeded at one origin cell
pub(crate) fn bfs(cells: &Cells, origin: (usize, usize)) -> Vec<Option<u32>> {
    let mut dists = vec![None; cells.len()];
    let mut queue = VecDeque::with_capacity(cells.len());

    dists[cells.index(origin.0, origin.1)] = Some(0);
    queue.push_back(origin);

    while let Some((x, y)) = queue.pop_front() {
        let here = dists[cells.index(x, y)].unwrap_or(0);
        for (nx, ny) in cells.open_neighbors(x, y) {
            let idx = cells.index(nx, ny);
            if dists[idx].is_none() {
                dists[idx] = Some(here + 1);
                queue.push_back((nx, ny));
            }
        }
    }

    dists
}

/// Shortest open-wall path length from every cell to the exit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistanceField {
    width: usize,
    height: usize,
    dists: Vec<u32>,
}

impl DistanceField {
    /// Compute the field, failing on the first cell that cannot reach the exit
    pub fn compute(cells: &Cells, exit: (usize, usize)) -> Result<Self, MazeError> {
        let raw = bfs(cells, exit);
        let mut dists = Vec::with_capacity(raw.len());
        for (idx, d) in raw.into_iter().enumerate() {
            match d {
                Some(d) => dists.push(d),
                None => {
                    let (x, y) = cells.coords(idx);
                    tracing::error!(x, y, "cell is unreachable from the exit");
                    return Err(MazeError::Unreachable { x, y });
                }
            }
        }

        Ok(Self {
            width: cells.width(),
            height: cells.height(),
            dists,
        })
    }

    /// Distance of a cell from the exit (0 at the exit itself)
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` is outside the grid; see [`DistanceField::get`].
    pub fn distance(&self, x: usize, y: usize) -> u32 {
        self.dists[y * self.width + x]
    }

    /// Distance of a cell from the exit, `None` outside the grid
    pub fn get(&self, x: usize, y: usize) -> Option<u32> {
        (x < self.width && y < self.height).then(|| self.dists[y * self.width + x])
    }

    /// The cell farthest from the exit, first in row-major order on ties
    pub fn max_distance_cell(&self) -> (usize, usize) {
        let mut best = 0;
        for (idx, &d) in self.dists.iter().enumerate() {
            if d > self.dists[best] {
                best = idx;
            }
        }
        (best % self.width, best / self.width)
    }

    /// An open neighbor one step closer to the exit, `None` at the exit
    pub fn neighbor_closer_to_exit(&self, cells: &Cells, x: usize, y: usize) -> Option<(usize, usize)> {
        let here = self.distance(x, y);
        if here == 0 {
            return None;
        }
        cells
            .open_neighbors(x, y)
            .find(|&(nx, ny)| self.distance(nx, ny) + 1 == here)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.dists
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze::{CardinalDirection, Wall};

    /// 3x1 corridor with the exit on the right
    fn corridor() -> Cells {
        let mut cells = Cells::new(3, 1).unwrap();
        cells.delete_wall(Wall::new(0, 0, CardinalDirection::East));
        cells.delete_wall(Wall::new(1, 0, CardinalDirection::East));
        cells.open_exit(2, 0, CardinalDirection::East).unwrap();
        cells
    }

    #[test]
    fn test_corridor_distances() {
        let cells = corridor();
        let field = DistanceField::compute(&cells, (2, 0)).unwrap();
        assert_eq!(field.as_slice(), &[2, 1, 0]);
        assert_eq!(field.max_distance_cell(), (0, 0));
        assert_eq!(field.neighbor_closer_to_exit(&cells, 0, 0), Some((1, 0)));
        assert_eq!(field.neighbor_closer_to_exit(&cells, 2, 0), None);
        assert_eq!(field.get(0, 0), Some(2));
        assert_eq!(field.get(3, 0), None);
        assert_eq!(field.get(0, 1), None);
    }

    #[test]
    fn test_unreachable_cell_is_an_error() {
        let mut cells = Cells::new(3, 1).unwrap();
        cells.delete_wall(Wall::new(1, 0, CardinalDirection::East));
        cells.open_exit(2, 0, CardinalDirection::East).unwrap();
        assert_eq!(
            DistanceField::compute(&cells, (2, 0)),
            Err(MazeError::Unreachable { x: 0, y: 0 })
        );
    }

    #[test]
    fn test_compute_is_idempotent() {
        let cells = corridor();
        let a = DistanceField::compute(&cells, (2, 0)).unwrap();
        let b = DistanceField::compute(&cells, (2, 0)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_bfs_from_other_origin() {
        let cells = corridor();
        let dists = bfs(&cells, (0, 0));
        assert_eq!(dists, vec![Some(0), Some(1), Some(2)]);
    }
}
