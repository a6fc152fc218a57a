//! Eller's algorithm: one row at a time, tracking connectivity with
//! disjoint sets that only ever span the active row

use std::mem;

use super::checkpoint;
use super::Progress;
use crate::errors::GenerationError;
use crate::maze::{CardinalDirection, Cells, Room, Wall};
use crate::rng::MazeRng;

/// Odds (one in N) of an extra downward opening per cell
const EXTRA_DROP_ODDS: usize = 3;

/// Partition of the active row's columns into sets
#[derive(Debug)]
struct RowSets {
    /// Set id of each column, `None` until assigned
    set_of: Vec<Option<usize>>,
    /// Member columns per set id; merged-away sets are left empty
    members: Vec<Vec<usize>>,
}

impl RowSets {
    fn new(width: usize) -> Self {
        Self {
            set_of: vec![None; width],
            members: Vec::new(),
        }
    }

    fn fresh(&mut self, col: usize) -> usize {
        let id = self.members.len();
        self.members.push(vec![col]);
        self.set_of[col] = Some(id);
        id
    }

    fn assign(&mut self, col: usize, id: usize) {
        self.set_of[col] = Some(id);
        self.members[id].push(col);
    }

    /// Union of two sets; the smaller one is re-tagged into the larger
    fn merge(&mut self, a: usize, b: usize) -> usize {
        if a == b {
            return a;
        }
        let (keep, gone) = if self.members[a].len() >= self.members[b].len() {
            (a, b)
        } else {
            (b, a)
        };
        let moved = mem::take(&mut self.members[gone]);
        for &col in &moved {
            self.set_of[col] = Some(keep);
        }
        self.members[keep].extend(moved);
        keep
    }

    fn live_sets(&self) -> Vec<usize> {
        (0..self.members.len())
            .filter(|&id| !self.members[id].is_empty())
            .collect()
    }

    /// Move to the next row, keeping only the columns carried down and
    /// renumbering the surviving sets
    fn advance(&mut self, carried: &[Option<usize>]) {
        let mut remap: Vec<Option<usize>> = vec![None; self.members.len()];
        let mut members: Vec<Vec<usize>> = Vec::new();

        for (col, &id) in carried.iter().enumerate() {
            self.set_of[col] = id.map(|old| {
                let new = *remap[old].get_or_insert_with(|| {
                    members.push(Vec::new());
                    members.len() - 1
                });
                members[new].push(col);
                new
            });
        }

        self.members = members;
    }
}

pub(crate) fn carve(
    cells: &mut Cells,
    rng: &mut MazeRng,
    progress: &mut dyn Progress,
) -> Result<(), GenerationError> {
    let (width, height) = (cells.width(), cells.height());
    let mut row = RowSets::new(width);

    for y in 0..height {
        let last = y + 1 == height;

        // Room cells on this row are already joined, so they share one set
        let rooms_here: Vec<Room> = cells
            .rooms()
            .iter()
            .filter(|r| r.covers_row(y))
            .copied()
            .collect();
        for room in &rooms_here {
            unify_room(&mut row, room);
        }
        for x in 0..width {
            if row.set_of[x].is_none() {
                row.fresh(x);
            }
        }

        // Horizontal pass: the last row joins everything still apart
        for x in 0..width.saturating_sub(1) {
            let (Some(a), Some(b)) = (row.set_of[x], row.set_of[x + 1]) else {
                continue;
            };
            let wall = Wall::new(x, y, CardinalDirection::East);
            if a == b || !cells.can_go(wall) {
                continue;
            }
            if last || rng.one_in(2) {
                cells.delete_wall(wall);
                row.merge(a, b);
            }
        }

        if last {
            checkpoint(progress, height, height)?;
            break;
        }

        let carried = drop_down(cells, &row, y, rng);
        row.advance(&carried);
        checkpoint(progress, y + 1, height)?;
    }

    Ok(())
}

/// Put every column of a room on this row into one set
fn unify_room(row: &mut RowSets, room: &Room) {
    let mut target: Option<usize> = None;
    for x in room.x..=room.right() {
        match (row.set_of[x], target) {
            (Some(s), None) => target = Some(s),
            (Some(s), Some(t)) if s != t => target = Some(row.merge(t, s)),
            _ => {}
        }
    }

    let target = match target {
        Some(t) => t,
        None => row.fresh(room.x),
    };
    for x in room.x..=room.right() {
        if row.set_of[x].is_none() {
            row.assign(x, target);
        }
    }
}

/// Vertical pass: every set reaches the next row at least once
///
/// A set that continues through a room needs no forced opening. Extra
/// openings skip rooms the set already reaches so no loop forms inside the
/// room's footprint. Returns the set carried into each column below.
fn drop_down(cells: &mut Cells, row: &RowSets, y: usize, rng: &mut MazeRng) -> Vec<Option<usize>> {
    let mut carried = vec![None; cells.width()];

    for id in row.live_sets() {
        let members = &row.members[id];
        let mut reached_rooms: Vec<usize> = Vec::new();

        for &x in members {
            if let Some(r) = cells.room_index_at(x, y) {
                if cells.rooms()[r].covers_row(y + 1) {
                    carried[x] = Some(id);
                    if !reached_rooms.contains(&r) {
                        reached_rooms.push(r);
                    }
                }
            }
        }

        if reached_rooms.is_empty() {
            let x = members[rng.rn2(members.len())];
            open_down(cells, x, y, id, &mut carried, &mut reached_rooms);
        }

        for &x in members {
            if carried[x].is_some() || !rng.one_in(EXTRA_DROP_ODDS) {
                continue;
            }
            if let Some(r) = cells.room_index_at(x, y + 1) {
                if reached_rooms.contains(&r) {
                    continue;
                }
            }
            open_down(cells, x, y, id, &mut carried, &mut reached_rooms);
        }
    }

    carried
}

fn open_down(
    cells: &mut Cells,
    x: usize,
    y: usize,
    id: usize,
    carried: &mut [Option<usize>],
    reached_rooms: &mut Vec<usize>,
) {
    cells.delete_wall(Wall::new(x, y, CardinalDirection::South));
    carried[x] = Some(id);
    if let Some(r) = cells.room_index_at(x, y + 1) {
        reached_rooms.push(r);
    }
}
