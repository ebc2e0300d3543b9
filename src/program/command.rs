//! The Deolang instruction set
//!
//! Every grid symbol decodes to exactly one [`Command`]. Decoding is total:
//! symbols outside the instruction set (including space and the empty cell)
//! decode to [`Command::NoOp`], so a program can never fail to load. Invalid
//! behavior only surfaces at execution time, when a command meets a state it
//! cannot operate on (for example an empty stack).

use super::direction::Direction;

/// Binary operators that pop `b`, then `a`, and push `a op b`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    And,
    Or,
    Xor,
    Equal,
    Less,
    Greater,
}

impl BinaryOp {
    /// Operator symbol used in error messages
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
            BinaryOp::And => "&",
            BinaryOp::Or => "|",
            BinaryOp::Xor => "^",
            BinaryOp::Equal => "==",
            BinaryOp::Less => "<",
            BinaryOp::Greater => ">",
        }
    }
}

/// Whether an I/O operation deals in decimal integers or character codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IoMode {
    Int,
    Char,
}

/// Conditions for the conditional jump commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpCondition {
    NonZero,
    Zero,
}

impl JumpCondition {
    pub fn holds(self, value: i64) -> bool {
        match self {
            JumpCondition::NonZero => value != 0,
            JumpCondition::Zero => value == 0,
        }
    }
}

/// Mirror orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mirror {
    /// `/`
    Slash,
    /// `\`
    Backslash,
}

impl Mirror {
    pub fn reflect(self, direction: Direction) -> Direction {
        match self {
            Mirror::Slash => direction.reflect_slash(),
            Mirror::Backslash => direction.reflect_backslash(),
        }
    }
}

/// Bridge orientation: which axis of travel opens the bridge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bridge {
    /// `|`, opened by horizontal travel
    Vertical,
    /// `_`, opened by vertical travel
    Horizontal,
}

impl Bridge {
    /// Whether travelling in `direction` across this bridge starts a skip
    pub fn opens_for(self, direction: Direction) -> bool {
        match self {
            Bridge::Vertical => direction.is_horizontal(),
            Bridge::Horizontal => !direction.is_horizontal(),
        }
    }
}

/// A decoded grid command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    NoOp,
    /// Push an immediate digit
    Push(i64),
    Turn(Direction),
    RandomTurn,
    Binary(BinaryOp),
    Not,
    Pop,
    Swap,
    Dup,
    ToAux,
    FromAux,
    RotateLeft,
    RotateRight,
    Length,
    Clear,
    Print(IoMode),
    Read(IoMode),
    Store,
    Load,
    GridGet,
    Jump,
    JumpIf(JumpCondition),
    Call,
    Return,
    Mirror(Mirror),
    Bridge(Bridge),
    StringMode,
    Halt,
}

impl Command {
    /// Decode a grid symbol. Total: unknown symbols become [`Command::NoOp`].
    ///
    /// `T` (push the clock), `W` (sleep), `M` (merge a file), and `p` (write
    /// a cell) are left out on purpose and decode to `NoOp` as well: a run
    /// depends only on the grid, its input, and the seed, and the grid never
    /// changes after loading.
    pub fn decode(symbol: char) -> Command {
        match symbol {
            '0'..='9' => Command::Push(i64::from(symbol as u8 - b'0')),

            '^' => Command::Turn(Direction::Up),
            '>' => Command::Turn(Direction::Right),
            '<' => Command::Turn(Direction::Left),
            'V' => Command::Turn(Direction::Down),
            '?' => Command::RandomTurn,

            '+' => Command::Binary(BinaryOp::Add),
            '-' => Command::Binary(BinaryOp::Sub),
            '*' => Command::Binary(BinaryOp::Mul),
            ':' => Command::Binary(BinaryOp::Div),
            '%' => Command::Binary(BinaryOp::Mod),
            '&' => Command::Binary(BinaryOp::And),
            'o' => Command::Binary(BinaryOp::Or),
            'x' => Command::Binary(BinaryOp::Xor),
            '=' => Command::Binary(BinaryOp::Equal),
            '(' => Command::Binary(BinaryOp::Less),
            ')' => Command::Binary(BinaryOp::Greater),
            '~' => Command::Not,

            'P' => Command::Pop,
            'S' => Command::Swap,
            'C' => Command::Dup,
            'D' => Command::ToAux,
            'U' => Command::FromAux,
            '{' => Command::RotateLeft,
            '}' => Command::RotateRight,
            'L' => Command::Length,
            'Z' => Command::Clear,

            'N' | '.' => Command::Print(IoMode::Int),
            'A' | ',' => Command::Print(IoMode::Char),
            'i' => Command::Read(IoMode::Int),
            'I' => Command::Read(IoMode::Char),

            'h' => Command::Store,
            'H' => Command::Load,
            'g' => Command::GridGet,

            'j' => Command::Jump,
            'y' => Command::JumpIf(JumpCondition::NonZero),
            'n' => Command::JumpIf(JumpCondition::Zero),
            'F' => Command::Call,
            'R' => Command::Return,
            '/' => Command::Mirror(Mirror::Slash),
            '\\' => Command::Mirror(Mirror::Backslash),
            '|' => Command::Bridge(Bridge::Vertical),
            '_' => Command::Bridge(Bridge::Horizontal),
            '"' => Command::StringMode,
            '@' => Command::Halt,

            _ => Command::NoOp,
        }
    }

    /// Whether the command changes the IP itself instead of advancing it
    pub fn is_flow_control(&self) -> bool {
        matches!(
            self,
            Command::Jump
                | Command::JumpIf(_)
                | Command::Call
                | Command::Return
                | Command::Mirror(_)
                | Command::Turn(_)
                | Command::RandomTurn
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_is_total() {
        for symbol in [' ', 'Q', 'é', '\t', '#'] {
            assert_eq!(Command::decode(symbol), Command::NoOp);
        }
    }

    #[test]
    fn test_clock_file_and_grid_writes_are_no_ops() {
        for symbol in ['T', 'W', 'M', 'p'] {
            assert_eq!(Command::decode(symbol), Command::NoOp);
        }
    }

    #[test]
    fn test_print_aliases() {
        assert_eq!(Command::decode('.'), Command::decode('N'));
        assert_eq!(Command::decode(','), Command::decode('A'));
    }

    #[test]
    fn test_digits() {
        assert_eq!(Command::decode('0'), Command::Push(0));
        assert_eq!(Command::decode('9'), Command::Push(9));
    }
}
