//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};
use std::fmt;

/// Simulation tick counter (one discrete step)
pub type Tick = u64;

/// Unique building identifier, handed out by the state's id generator
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BuildingId(pub u64);

impl fmt::Display for BuildingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Absolute grid position (row-major: row first, then column)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Position shifted by `offset`, or `None` if either coordinate would go negative.
    /// Upper bounds are the map's business.
    pub fn checked_add(self, offset: Offset) -> Option<Position> {
        let row = self.row.checked_add_signed(offset.row)?;
        let col = self.col.checked_add_signed(offset.col)?;
        Some(Position { row, col })
    }

    /// Signed displacement from `self` to `other`
    pub fn offset_to(self, other: Position) -> Offset {
        Offset::new(
            other.row as isize - self.row as isize,
            other.col as isize - self.col as isize,
        )
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Signed relative displacement between two grid cells
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Offset {
    pub row: isize,
    pub col: isize,
}

impl Offset {
    pub const ZERO: Offset = Offset { row: 0, col: 0 };

    pub const fn new(row: isize, col: isize) -> Self {
        Self { row, col }
    }
}

impl std::ops::Add for Offset {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self { row: self.row + rhs.row, col: self.col + rhs.col }
    }
}

impl std::ops::Neg for Offset {
    type Output = Self;
    fn neg(self) -> Self {
        Self { row: -self.row, col: -self.col }
    }
}

impl std::ops::Mul<isize> for Offset {
    type Output = Self;
    fn mul(self, rhs: isize) -> Self {
        Self { row: self.row * rhs, col: self.col * rhs }
    }
}

/// Facing of a building on the grid
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    #[default]
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Down,
        Direction::Up,
        Direction::Left,
        Direction::Right,
    ];

    /// Unit step in this direction. Up decreases the row index.
    pub fn offset(self) -> Offset {
        match self {
            Direction::Up => Offset::new(-1, 0),
            Direction::Down => Offset::new(1, 0),
            Direction::Left => Offset::new(0, -1),
            Direction::Right => Offset::new(0, 1),
        }
    }

    /// Direction a quarter turn counter-clockwise from this one
    pub fn left_of(self) -> Direction {
        match self {
            Direction::Left => Direction::Down,
            Direction::Down => Direction::Right,
            Direction::Right => Direction::Up,
            Direction::Up => Direction::Left,
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Left => Direction::Right,
            Direction::Down => Direction::Up,
            Direction::Right => Direction::Left,
            Direction::Up => Direction::Down,
        }
    }

    /// Direction a quarter turn clockwise from this one
    pub fn right_of(self) -> Direction {
        self.left_of().opposite()
    }

    pub fn is_horizontal(self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotations_are_consistent() {
        for d in Direction::ALL {
            assert_eq!(d.opposite().opposite(), d);
            assert_eq!(d.left_of().right_of(), d);
            assert_eq!(d.right_of().right_of(), d.opposite());
            assert_eq!(d.offset() + d.opposite().offset(), Offset::ZERO);
        }
    }

    #[test]
    fn test_right_of_is_clockwise() {
        assert_eq!(Direction::Up.right_of(), Direction::Right);
        assert_eq!(Direction::Right.right_of(), Direction::Down);
        assert_eq!(Direction::Down.right_of(), Direction::Left);
        assert_eq!(Direction::Left.right_of(), Direction::Up);
    }

    #[test]
    fn test_checked_add_rejects_negative() {
        let origin = Position::new(0, 0);
        assert_eq!(origin.checked_add(Direction::Up.offset()), None);
        assert_eq!(origin.checked_add(Direction::Left.offset()), None);
        assert_eq!(
            origin.checked_add(Direction::Down.offset()),
            Some(Position::new(1, 0))
        );
    }

    #[test]
    fn test_offset_to_round_trips() {
        let a = Position::new(3, 1);
        let b = Position::new(1, 4);
        assert_eq!(a.checked_add(a.offset_to(b)), Some(b));
        assert_eq!(a.offset_to(b), Offset::new(-2, 3));
    }
}
