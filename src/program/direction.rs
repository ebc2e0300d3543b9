//! Directions, grid positions, and the instruction pointer

use std::fmt;

/// One of the four directions the instruction pointer can travel in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All directions, in the order used by random turns
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    /// Unit step `(dx, dy)` for this direction (y grows downward)
    pub fn delta(self) -> (i64, i64) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// Whether the direction moves along a row
    pub fn is_horizontal(self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }

    /// Reflect through a `/` mirror: Right <-> Up, Left <-> Down
    pub fn reflect_slash(self) -> Self {
        match self {
            Direction::Right => Direction::Up,
            Direction::Up => Direction::Right,
            Direction::Left => Direction::Down,
            Direction::Down => Direction::Left,
        }
    }

    /// Reflect through a `\` mirror: Right <-> Down, Left <-> Up
    pub fn reflect_backslash(self) -> Self {
        match self {
            Direction::Right => Direction::Down,
            Direction::Down => Direction::Right,
            Direction::Left => Direction::Up,
            Direction::Up => Direction::Left,
        }
    }

    /// Arrow glyph used by the debugger
    pub fn arrow(self) -> char {
        match self {
            Direction::Up => '↑',
            Direction::Down => '↓',
            Direction::Left => '←',
            Direction::Right => '→',
        }
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

/// A cell coordinate: `x` is the column, `y` is the row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    pub fn new(x: usize, y: usize) -> Self {
        Position { x, y }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// The instruction pointer: where execution is and where it is heading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstructionPointer {
    pub position: Position,
    pub direction: Direction,
}

impl InstructionPointer {
    pub fn new(position: Position, direction: Direction) -> Self {
        InstructionPointer {
            position,
            direction,
        }
    }
}

impl Default for InstructionPointer {
    /// Top-left corner, heading right
    fn default() -> Self {
        InstructionPointer::new(Position::new(0, 0), Direction::Right)
    }
}
