// Grid value types: cells, board bounds, headings and display colours

use serde::{Deserialize, Serialize};

use super::world::WorldError;

/// A grid cell, origin top-left
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const ORIGIN: Position = Position { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The neighbouring cell one step in `direction` (may lie off the board)
    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.offset();
        Self::new(self.x + dx, self.y + dy)
    }

    /// Manhattan distance `|dx| + |dy|`
    pub fn distance(self, other: Position) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

/// Board dimensions in grid cells
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Board {
    width: u32,
    height: u32,
}

impl Board {
    /// Largest side length; cells must be addressable as `i32`
    pub const MAX_SIDE: u32 = i32::MAX as u32;

    /// Build a board, rejecting zero-sized or oversized dimensions
    pub fn new(width: u32, height: u32) -> Result<Self, WorldError> {
        if width == 0 || height == 0 {
            return Err(WorldError::DegenerateBoard { width, height });
        }
        if width > Self::MAX_SIDE || height > Self::MAX_SIDE {
            return Err(WorldError::OversizedBoard {
                width,
                height,
                max: Self::MAX_SIDE,
            });
        }
        Ok(Self { width, height })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// `0 <= x < width && 0 <= y < height`
    pub fn contains(&self, position: Position) -> bool {
        position.x >= 0
            && position.y >= 0
            && (position.x as u32) < self.width
            && (position.y as u32) < self.height
    }

    /// Floor-center cell, the fallback target when no treats exist
    pub fn center(&self) -> Position {
        Position::new((self.width / 2) as i32, (self.height / 2) as i32)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Decode order for per-direction score vectors
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Unit offset in grid coordinates (y grows downward)
    pub fn offset(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

/// Display identity of a player or treat, as RGB
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorToken(pub [u8; 3]);

impl ColorToken {
    pub const GREEDY: ColorToken = ColorToken([0xcc, 0x66, 0xcc]);
    pub const STOCHASTIC: ColorToken = ColorToken([0x33, 0x66, 0xaa]);
    pub const HUMAN: ColorToken = ColorToken([0xcc, 0x33, 0x33]);
    pub const TREAT: ColorToken = ColorToken([0x33, 0xcc, 0x33]);

    pub fn rgb(self) -> (u8, u8, u8) {
        let [r, g, b] = self.0;
        (r, g, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_rejects_zero_dimensions() {
        assert!(Board::new(0, 10).is_err());
        assert!(Board::new(10, 0).is_err());
        assert!(Board::new(1, 1).is_ok());
    }

    #[test]
    fn test_board_rejects_oversized_dimensions() {
        let err = Board::new(u32::MAX, 10).unwrap_err();
        assert!(matches!(err, WorldError::OversizedBoard { width: u32::MAX, .. }));
        assert!(err.to_string().contains("exceeds"));

        let err = Board::new(0, 10).unwrap_err();
        assert!(matches!(err, WorldError::DegenerateBoard { .. }));
        assert!(Board::new(Board::MAX_SIDE, 1).is_ok());
    }

    #[test]
    fn test_board_contains_edges() {
        let board = Board::new(10, 8).unwrap();

        assert!(board.contains(Position::new(0, 0)));
        assert!(board.contains(Position::new(9, 7)));
        assert!(!board.contains(Position::new(10, 0)));
        assert!(!board.contains(Position::new(0, 8)));
        assert!(!board.contains(Position::new(-1, 3)));
        assert!(!board.contains(Position::new(3, -1)));
    }

    #[test]
    fn test_board_center_floors_odd_dimensions() {
        assert_eq!(Board::new(10, 10).unwrap().center(), Position::new(5, 5));
        assert_eq!(Board::new(7, 3).unwrap().center(), Position::new(3, 1));
    }

    #[test]
    fn test_step_offsets() {
        let p = Position::new(5, 5);
        assert_eq!(p.step(Direction::Up), Position::new(5, 4));
        assert_eq!(p.step(Direction::Down), Position::new(5, 6));
        assert_eq!(p.step(Direction::Left), Position::new(4, 5));
        assert_eq!(p.step(Direction::Right), Position::new(6, 5));
    }

    #[test]
    fn test_manhattan_distance() {
        assert_eq!(Position::new(0, 0).distance(Position::new(3, 4)), 7);
        assert_eq!(Position::new(3, 4).distance(Position::new(0, 0)), 7);
        assert_eq!(Position::new(2, 2).distance(Position::new(2, 2)), 0);
    }
}
