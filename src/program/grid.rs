//! The program grid
//!
//! A [`Grid`] is built once from source text and never mutated afterwards,
//! which lets a renderer read it while the engine executes. Each cell keeps
//! both its raw symbol (needed by string mode and `g`) and its decoded
//! [`Command`], so dispatch never re-decodes.

use super::command::Command;
use super::direction::{Direction, Position};

/// A single grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub symbol: char,
    pub command: Command,
}

impl Cell {
    pub fn new(symbol: char) -> Self {
        Cell {
            symbol,
            command: Command::decode(symbol),
        }
    }
}

/// Immutable 2D program grid with ragged rows
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Grid {
    rows: Vec<Vec<Cell>>,
    width: usize,
}

impl Grid {
    /// Build a grid from source text, one row per line.
    ///
    /// Line terminators (`\n` and `\r\n`) are stripped; rows keep their own
    /// length and are never padded in storage.
    pub fn parse(source: &str) -> Self {
        let rows: Vec<Vec<Cell>> = source
            .lines()
            .map(|line| line.chars().map(Cell::new).collect())
            .collect();
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        Grid { rows, width }
    }

    /// Width of the torus: the length of the longest row
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.rows.is_empty()
    }

    /// Cell at `(x, y)`, or `None` past the end of a ragged row or the grid
    pub fn cell(&self, x: usize, y: usize) -> Option<&Cell> {
        self.rows.get(y).and_then(|row| row.get(x))
    }

    /// Command at `(x, y)`. Total: empty cells decode to [`Command::NoOp`].
    pub fn cell_at(&self, x: usize, y: usize) -> Command {
        self.cell(x, y).map_or(Command::NoOp, |cell| cell.command)
    }

    /// Symbol at `(x, y)`, or `None` for an empty cell
    pub fn symbol_at(&self, x: usize, y: usize) -> Option<char> {
        self.cell(x, y).map(|cell| cell.symbol)
    }

    /// One unit step in `direction`, wrapping around both axes
    pub fn advance(&self, position: Position, direction: Direction) -> Position {
        let (dx, dy) = direction.delta();
        Position {
            x: wrap(position.x as i64 + dx, self.width),
            y: wrap(position.y as i64 + dy, self.height()),
        }
    }

    /// Map arbitrary signed coordinates onto the torus
    pub fn wrap_position(&self, x: i64, y: i64) -> Position {
        Position {
            x: wrap(x, self.width),
            y: wrap(y, self.height()),
        }
    }

    /// Render the grid back to text, one line per row
    pub fn to_source(&self) -> String {
        self.rows
            .iter()
            .map(|row| row.iter().map(|cell| cell.symbol).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn wrap(coordinate: i64, extent: usize) -> usize {
    if extent == 0 {
        0
    } else {
        coordinate.rem_euclid(extent as i64) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ragged_rows_read_as_noop() {
        let grid = Grid::parse("12345\n6");
        assert_eq!(grid.width(), 5);
        assert_eq!(grid.height(), 2);
        assert_eq!(grid.cell_at(0, 1), Command::Push(6));
        assert_eq!(grid.cell_at(3, 1), Command::NoOp);
        assert_eq!(grid.cell_at(40, 40), Command::NoOp);
    }

    #[test]
    fn test_advance_wraps_both_axes() {
        let grid = Grid::parse("abcde\nfghij\nklmno");
        let last = Position::new(4, 0);
        assert_eq!(grid.advance(last, Direction::Right), Position::new(0, 0));
        assert_eq!(
            grid.advance(Position::new(0, 0), Direction::Left),
            Position::new(4, 0)
        );
        assert_eq!(
            grid.advance(Position::new(2, 0), Direction::Up),
            Position::new(2, 2)
        );
        assert_eq!(
            grid.advance(Position::new(2, 2), Direction::Down),
            Position::new(2, 0)
        );
    }

    #[test]
    fn test_crlf_is_stripped() {
        let grid = Grid::parse("12\r\n34\r\n");
        assert_eq!(grid.height(), 2);
        assert_eq!(grid.width(), 2);
        assert_eq!(grid.to_source(), "12\n34");
    }

    #[test]
    fn test_empty_grid_stays_at_origin() {
        let grid = Grid::parse("");
        assert!(grid.is_empty());
        assert_eq!(
            grid.advance(Position::new(0, 0), Direction::Right),
            Position::new(0, 0)
        );
    }
}
