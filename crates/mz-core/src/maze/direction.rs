//! Compass directions on the grid

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// One of the four grid directions
///
/// x grows to the East and y grows to the South.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
pub enum CardinalDirection {
    North,
    East,
    South,
    West,
}

impl CardinalDirection {
    /// All directions in clockwise order starting North
    pub const ALL: [CardinalDirection; 4] = [
        CardinalDirection::North,
        CardinalDirection::East,
        CardinalDirection::South,
        CardinalDirection::West,
    ];

    /// Unit offset `(dx, dy)` of a step in this direction
    pub const fn delta(self) -> (i32, i32) {
        match self {
            CardinalDirection::North => (0, -1),
            CardinalDirection::East => (1, 0),
            CardinalDirection::South => (0, 1),
            CardinalDirection::West => (-1, 0),
        }
    }

    /// Direction of a unit offset, if it is one
    pub const fn from_delta(dx: i32, dy: i32) -> Option<Self> {
        match (dx, dy) {
            (0, -1) => Some(CardinalDirection::North),
            (1, 0) => Some(CardinalDirection::East),
            (0, 1) => Some(CardinalDirection::South),
            (-1, 0) => Some(CardinalDirection::West),
            _ => None,
        }
    }

    pub const fn opposite(self) -> Self {
        match self {
            CardinalDirection::North => CardinalDirection::South,
            CardinalDirection::East => CardinalDirection::West,
            CardinalDirection::South => CardinalDirection::North,
            CardinalDirection::West => CardinalDirection::East,
        }
    }

    pub const fn rotate_clockwise(self) -> Self {
        match self {
            CardinalDirection::North => CardinalDirection::East,
            CardinalDirection::East => CardinalDirection::South,
            CardinalDirection::South => CardinalDirection::West,
            CardinalDirection::West => CardinalDirection::North,
        }
    }

    pub const fn rotate_counterclockwise(self) -> Self {
        match self {
            CardinalDirection::North => CardinalDirection::West,
            CardinalDirection::East => CardinalDirection::North,
            CardinalDirection::South => CardinalDirection::East,
            CardinalDirection::West => CardinalDirection::South,
        }
    }

    /// Bit index used by the per-cell wall and border flags
    pub(crate) const fn index(self) -> u16 {
        match self {
            CardinalDirection::North => 0,
            CardinalDirection::East => 1,
            CardinalDirection::South => 2,
            CardinalDirection::West => 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_rotations_are_inverse() {
        for dir in CardinalDirection::iter() {
            assert_eq!(dir.rotate_clockwise().rotate_counterclockwise(), dir);
            assert_eq!(dir.rotate_clockwise().rotate_clockwise(), dir.opposite());
            assert_eq!(dir.opposite().opposite(), dir);
        }
    }

    #[test]
    fn test_delta_round_trip() {
        for dir in CardinalDirection::ALL {
            let (dx, dy) = dir.delta();
            assert_eq!(CardinalDirection::from_delta(dx, dy), Some(dir));
        }
        assert_eq!(CardinalDirection::from_delta(1, 1), None);
    }

    #[test]
    fn test_clockwise_order() {
        assert_eq!(
            CardinalDirection::North.rotate_clockwise(),
            CardinalDirection::East
        );
        assert_eq!(
            CardinalDirection::West.rotate_clockwise(),
            CardinalDirection::North
        );
    }
}
