//! Room placement for imperfect mazes

use tracing::trace;

use crate::consts::MAX_ROOM_SIDE;
use crate::maze::{Cells, Room};
use crate::rng::MazeRng;

/// Place up to `target` rooms, trying at most `attempts` random rectangles
///
/// Rooms keep one cell of clearance from each other and never touch the
/// border ring, so the outer walls stay intact. Returns the number placed.
pub(crate) fn place_rooms(
    cells: &mut Cells,
    target: usize,
    attempts: usize,
    rng: &mut MazeRng,
) -> usize {
    let (width, height) = (cells.width(), cells.height());
    if target == 0 || width < 4 || height < 4 {
        return 0;
    }

    let max_w = MAX_ROOM_SIDE.min(width - 2);
    let max_h = MAX_ROOM_SIDE.min(height - 2);
    let mut placed = 0;

    for _ in 0..attempts {
        if placed >= target {
            break;
        }
        let rw = rng.range_inclusive(2, max_w);
        let rh = rng.range_inclusive(2, max_h);
        let x = rng.range_inclusive(1, width - 1 - rw);
        let y = rng.range_inclusive(1, height - 1 - rh);
        let room = Room::new(x, y, rw, rh);

        if cells.rooms().iter().any(|other| other.overlaps(&room, 1)) {
            continue;
        }
        trace!(x, y, width = rw, height = rh, "room carved");
        cells.carve_room(room);
        placed += 1;
    }

    placed
}
