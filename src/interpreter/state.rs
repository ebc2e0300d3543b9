//! Program lifecycle state

use super::errors::RuntimeError;
use std::fmt;

/// Where a run is in its lifecycle.
///
/// `Ready -> Running -> Halted | Errored`. The last two are terminal: the
/// engine executes nothing more until it is reset.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ProgramState {
    #[default]
    Ready,
    Running,
    Halted,
    Errored(RuntimeError),
}

impl ProgramState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, ProgramState::Halted | ProgramState::Errored(_))
    }

    pub fn error(&self) -> Option<&RuntimeError> {
        match self {
            ProgramState::Errored(err) => Some(err),
            _ => None,
        }
    }
}

impl fmt::Display for ProgramState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProgramState::Ready => f.write_str("ready"),
            ProgramState::Running => f.write_str("running"),
            ProgramState::Halted => f.write_str("halted"),
            ProgramState::Errored(err) => write!(f, "error: {}", err),
        }
    }
}

/// How the next cell is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionMode {
    /// Cells are dispatched as commands
    #[default]
    Normal,
    /// Cells push their symbol code until the closing `"`
    String,
    /// Cells are skipped until the next bridge
    Bridge,
}
