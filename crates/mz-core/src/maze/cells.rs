//! Cell grid with per-side wall state
//!
//! Each cell stores its four walls, which of its sides lie on the maze
//! border, and whether it belongs to a room. A wall between two cells is
//! stored on both of them and the grid keeps the two copies in sync. Every
//! deletion is appended to an ordered log so a maze can be replayed without
//! running a generation strategy.

use core::fmt;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use super::direction::CardinalDirection;
use super::room::Room;
use crate::errors::MazeError;

bitflags! {
    /// Wall, border and room flags of a single cell
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct CellFlags: u16 {
        const WALL_NORTH = 1 << 0;
        const WALL_EAST = 1 << 1;
        const WALL_SOUTH = 1 << 2;
        const WALL_WEST = 1 << 3;
        const BORDER_NORTH = 1 << 4;
        const BORDER_EAST = 1 << 5;
        const BORDER_SOUTH = 1 << 6;
        const BORDER_WEST = 1 << 7;
        const IN_ROOM = 1 << 8;

        const ALL_WALLS = Self::WALL_NORTH.bits()
            | Self::WALL_EAST.bits()
            | Self::WALL_SOUTH.bits()
            | Self::WALL_WEST.bits();
    }
}

impl CellFlags {
    /// Wall flag for one side
    pub const fn wall(dir: CardinalDirection) -> Self {
        Self::from_bits_truncate(1 << dir.index())
    }

    /// Border flag for one side
    pub const fn border(dir: CardinalDirection) -> Self {
        Self::from_bits_truncate(1 << (dir.index() + 4))
    }

    /// The walls that are present, as a direction list
    pub fn wall_directions(self) -> impl Iterator<Item = CardinalDirection> {
        CardinalDirection::ALL
            .into_iter()
            .filter(move |&d| self.contains(Self::wall(d)))
    }
}

impl Serialize for CellFlags {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.bits().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for CellFlags {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let bits = u16::deserialize(deserializer)?;
        Ok(CellFlags::from_bits_truncate(bits))
    }
}

/// One side of one cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Wall {
    pub x: usize,
    pub y: usize,
    pub dir: CardinalDirection,
}

impl Wall {
    pub fn new(x: usize, y: usize, dir: CardinalDirection) -> Self {
        Self { x, y, dir }
    }
}

/// Width × height grid of cells
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cells {
    width: usize,
    height: usize,
    flags: Vec<CellFlags>,
    rooms: Vec<Room>,
    exit: Option<(usize, usize)>,
    deletions: Vec<Wall>,
}

impl Cells {
    /// Create a grid with every wall present and the outer ring marked as border
    pub fn new(width: usize, height: usize) -> Result<Self, MazeError> {
        if width == 0 || height == 0 {
            return Err(MazeError::InvalidDimensions { width, height });
        }

        let mut flags = vec![CellFlags::ALL_WALLS; width * height];
        for x in 0..width {
            flags[x] |= CellFlags::BORDER_NORTH;
            flags[(height - 1) * width + x] |= CellFlags::BORDER_SOUTH;
        }
        for y in 0..height {
            flags[y * width] |= CellFlags::BORDER_WEST;
            flags[y * width + width - 1] |= CellFlags::BORDER_EAST;
        }

        Ok(Self {
            width,
            height,
            flags,
            rooms: Vec::new(),
            exit: None,
            deletions: Vec::new(),
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn len(&self) -> usize {
        self.flags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    /// Row-major index of a cell
    pub fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    /// Cell coordinates of a row-major index
    pub fn coords(&self, index: usize) -> (usize, usize) {
        (index % self.width, index / self.width)
    }

    /// Whether signed coordinates fall inside the grid
    pub fn is_valid_position(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    /// Flags of a cell
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` is outside the grid; see [`Cells::get_flags`].
    pub fn flags(&self, x: usize, y: usize) -> CellFlags {
        self.flags[self.index(x, y)]
    }

    /// Flags of a cell, `None` outside the grid
    pub fn get_flags(&self, x: usize, y: usize) -> Option<CellFlags> {
        (x < self.width && y < self.height).then(|| self.flags[self.index(x, y)])
    }

    /// Walls present around a cell
    pub fn walls_at(&self, x: usize, y: usize) -> CellFlags {
        self.flags(x, y) & CellFlags::ALL_WALLS
    }

    /// Adjacent cell in a direction, if it is inside the grid
    pub fn neighbor(&self, x: usize, y: usize, dir: CardinalDirection) -> Option<(usize, usize)> {
        let (dx, dy) = dir.delta();
        let nx = x as i32 + dx;
        let ny = y as i32 + dy;
        self.is_valid_position(nx, ny)
            .then_some((nx as usize, ny as usize))
    }

    pub fn has_wall(&self, x: usize, y: usize, dir: CardinalDirection) -> bool {
        self.flags(x, y).contains(CellFlags::wall(dir))
    }

    pub fn has_border(&self, x: usize, y: usize, dir: CardinalDirection) -> bool {
        self.flags(x, y).contains(CellFlags::border(dir))
    }

    /// Whether carving may remove this wall: it is present and leads to a cell
    /// inside the grid
    pub fn can_go(&self, wall: Wall) -> bool {
        self.has_wall(wall.x, wall.y, wall.dir)
            && self.neighbor(wall.x, wall.y, wall.dir).is_some()
    }

    /// Remove an interior wall from both adjacent cells
    ///
    /// Border walls are left alone; use [`Cells::open_exit`] for those.
    pub fn delete_wall(&mut self, wall: Wall) {
        let Some((nx, ny)) = self.neighbor(wall.x, wall.y, wall.dir) else {
            return;
        };
        if !self.has_wall(wall.x, wall.y, wall.dir) {
            return;
        }
        let here = self.index(wall.x, wall.y);
        let there = self.index(nx, ny);
        self.flags[here].remove(CellFlags::wall(wall.dir));
        self.flags[there].remove(CellFlags::wall(wall.dir.opposite()));
        self.deletions.push(wall);
    }

    /// Open the border wall of a cell, making it the single exit
    pub fn open_exit(&mut self, x: usize, y: usize, dir: CardinalDirection) -> Result<(), MazeError> {
        if x >= self.width || y >= self.height {
            return Err(MazeError::OutOfBounds {
                x: x as i64,
                y: y as i64,
                width: self.width,
                height: self.height,
            });
        }
        if !self.has_border(x, y, dir) {
            return Err(MazeError::NotABorder {
                x,
                y,
                dir: dir.to_string(),
            });
        }
        if let Some((ex, ey)) = self.exit {
            return Err(MazeError::MultipleExits { x: ex, y: ey });
        }
        let idx = self.index(x, y);
        self.flags[idx].remove(CellFlags::wall(dir));
        self.exit = Some((x, y));
        self.deletions.push(Wall::new(x, y, dir));
        Ok(())
    }

    /// The exit cell, once one has been opened
    pub fn exit_position(&self) -> Option<(usize, usize)> {
        self.exit
    }

    pub fn is_exit_position(&self, x: usize, y: usize) -> bool {
        self.exit == Some((x, y))
    }

    /// Direction in which the exit cell opens onto the outside
    pub fn exit_direction(&self) -> Option<CardinalDirection> {
        let (x, y) = self.exit?;
        CardinalDirection::ALL
            .into_iter()
            .find(|&d| self.has_border(x, y, d) && !self.has_wall(x, y, d))
    }

    /// Mark a room's cells without touching any walls
    pub fn mark_room(&mut self, room: Room) {
        for (x, y) in room.cells() {
            let idx = self.index(x, y);
            self.flags[idx].insert(CellFlags::IN_ROOM);
        }
        self.rooms.push(room);
    }

    /// Mark a room and delete every wall between two of its cells
    pub fn carve_room(&mut self, room: Room) {
        self.mark_room(room);
        for (x, y) in room.cells() {
            if x < room.right() {
                self.delete_wall(Wall::new(x, y, CardinalDirection::East));
            }
            if y < room.bottom() {
                self.delete_wall(Wall::new(x, y, CardinalDirection::South));
            }
        }
    }

    /// Room membership; positions outside the grid are never in a room
    pub fn is_in_room(&self, x: i32, y: i32) -> bool {
        self.is_valid_position(x, y)
            && self
                .flags(x as usize, y as usize)
                .contains(CellFlags::IN_ROOM)
    }

    /// Index of the room containing a cell
    pub fn room_index_at(&self, x: usize, y: usize) -> Option<usize> {
        if !self.flags(x, y).contains(CellFlags::IN_ROOM) {
            return None;
        }
        self.rooms.iter().position(|r| r.contains(x, y))
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    /// Ordered log of every wall deletion applied to this grid
    pub fn deletions(&self) -> &[Wall] {
        &self.deletions
    }

    /// Number of open walls between two cells of the grid
    pub fn open_internal_walls(&self) -> usize {
        let mut open = 0;
        for y in 0..self.height {
            for x in 0..self.width {
                if x + 1 < self.width && !self.has_wall(x, y, CardinalDirection::East) {
                    open += 1;
                }
                if y + 1 < self.height && !self.has_wall(x, y, CardinalDirection::South) {
                    open += 1;
                }
            }
        }
        open
    }

    /// Open neighbors of a cell, i.e. those reachable without crossing a wall
    pub fn open_neighbors(&self, x: usize, y: usize) -> impl Iterator<Item = (usize, usize)> + '_ {
        CardinalDirection::ALL.into_iter().filter_map(move |d| {
            if self.has_wall(x, y, d) {
                None
            } else {
                self.neighbor(x, y, d)
            }
        })
    }
}

/// ASCII map, one text row per wall row and one per cell row
impl fmt::Display for Cells {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height {
            for x in 0..self.width {
                f.write_str("+")?;
                let top = if self.has_wall(x, y, CardinalDirection::North) { "--" } else { "  " };
                f.write_str(top)?;
            }
            writeln!(f, "+")?;
            for x in 0..self.width {
                let left = if self.has_wall(x, y, CardinalDirection::West) { "|" } else { " " };
                let body = if self.is_exit_position(x, y) {
                    "XX"
                } else if self.flags(x, y).contains(CellFlags::IN_ROOM) {
                    ".."
                } else {
                    "  "
                };
                write!(f, "{left}{body}")?;
            }
            let last = self.width - 1;
            let right = if self.has_wall(last, y, CardinalDirection::East) { "|" } else { " " };
            writeln!(f, "{right}")?;
        }
        let last = self.height - 1;
        for x in 0..self.width {
            let bottom = if self.has_wall(x, last, CardinalDirection::South) { "--" } else { "  " };
            write!(f, "+{bottom}")?;
        }
        writeln!(f, "+")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_grid_is_closed() {
        let cells = Cells::new(3, 2).unwrap();
        for y in 0..2 {
            for x in 0..3 {
                assert_eq!(cells.walls_at(x, y), CellFlags::ALL_WALLS);
            }
        }
        assert!(cells.has_border(0, 0, CardinalDirection::North));
        assert!(cells.has_border(0, 0, CardinalDirection::West));
        assert!(!cells.has_border(1, 0, CardinalDirection::South));
        assert!(cells.has_border(2, 1, CardinalDirection::East));
        assert_eq!(cells.open_internal_walls(), 0);
        assert!(cells.exit_position().is_none());
    }

    #[test]
    fn test_get_flags_is_checked() {
        let cells = Cells::new(3, 2).unwrap();
        assert_eq!(cells.get_flags(2, 1), Some(cells.flags(2, 1)));
        assert_eq!(cells.get_flags(3, 0), None);
        assert_eq!(cells.get_flags(0, 2), None);
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        assert_eq!(
            Cells::new(0, 4),
            Err(MazeError::InvalidDimensions { width: 0, height: 4 })
        );
    }

    #[test]
    fn test_delete_wall_updates_both_sides() {
        let mut cells = Cells::new(3, 3).unwrap();
        let wall = Wall::new(1, 1, CardinalDirection::East);
        assert!(cells.can_go(wall));

        cells.delete_wall(wall);

        assert!(!cells.has_wall(1, 1, CardinalDirection::East));
        assert!(!cells.has_wall(2, 1, CardinalDirection::West));
        assert!(!cells.can_go(wall));
        assert_eq!(cells.deletions(), &[wall]);
        assert_eq!(cells.open_internal_walls(), 1);

        // Deleting again is a no-op and is not logged twice
        cells.delete_wall(wall);
        assert_eq!(cells.deletions().len(), 1);
    }

    #[test]
    fn test_border_walls_cannot_be_carved() {
        let mut cells = Cells::new(2, 2).unwrap();
        let wall = Wall::new(0, 0, CardinalDirection::North);
        assert!(!cells.can_go(wall));
        cells.delete_wall(wall);
        assert!(cells.has_wall(0, 0, CardinalDirection::North));
        assert!(cells.deletions().is_empty());
    }

    #[test]
    fn test_single_exit() {
        let mut cells = Cells::new(3, 3).unwrap();
        cells.open_exit(2, 1, CardinalDirection::East).unwrap();
        assert!(cells.is_exit_position(2, 1));
        assert_eq!(cells.exit_direction(), Some(CardinalDirection::East));
        assert_eq!(
            cells.open_exit(0, 0, CardinalDirection::West),
            Err(MazeError::MultipleExits { x: 2, y: 1 })
        );
    }

    #[test]
    fn test_exit_requires_border() {
        let mut cells = Cells::new(3, 3).unwrap();
        assert!(matches!(
            cells.open_exit(1, 1, CardinalDirection::North),
            Err(MazeError::NotABorder { .. })
        ));
        assert!(matches!(
            cells.open_exit(5, 1, CardinalDirection::North),
            Err(MazeError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn test_carve_room_clears_interior_only() {
        let mut cells = Cells::new(6, 6).unwrap();
        let room = Room::new(1, 1, 3, 2);
        cells.carve_room(room);

        // 3x2 room has 2*2 horizontal + 3*1 vertical interior walls
        assert_eq!(cells.open_internal_walls(), 7);
        assert!(cells.is_in_room(2, 2));
        assert!(!cells.is_in_room(4, 2));
        assert!(!cells.is_in_room(-1, 2));
        assert!(cells.has_wall(3, 1, CardinalDirection::East));
        assert!(cells.has_wall(1, 2, CardinalDirection::South));
        assert_eq!(cells.room_index_at(3, 2), Some(0));
        assert_eq!(cells.room_index_at(0, 0), None);
    }

    #[test]
    fn test_open_neighbors() {
        let mut cells = Cells::new(3, 3).unwrap();
        cells.delete_wall(Wall::new(1, 1, CardinalDirection::North));
        cells.delete_wall(Wall::new(1, 1, CardinalDirection::West));
        let mut open: Vec<_> = cells.open_neighbors(1, 1).collect();
        open.sort_unstable();
        assert_eq!(open, vec![(0, 1), (1, 0)]);
    }

    #[test]
    fn test_display_marks_exit() {
        let mut cells = Cells::new(2, 1).unwrap();
        cells.open_exit(1, 0, CardinalDirection::East).unwrap();
        let map = cells.to_string();
        assert!(map.contains("XX"));
        assert_eq!(map.lines().count(), 3);
    }
}
