//! Runtime error types for the Deolang interpreter
//!
//! This module defines [`RuntimeError`], which represents every failure that
//! can end a run. All runtime errors are fatal: the engine moves to
//! [`ProgramState::Errored`] and refuses further steps until it is reset.
//!
//! Every variant records the grid position of the command that failed, so a
//! driver can highlight the offending cell.
//!
//! An aborted read is deliberately *not* a runtime error. It leaves the
//! engine untouched and is reported through
//! [`Engine::awaiting_input`](crate::interpreter::engine::Engine::awaiting_input).
//!
//! [`ProgramState::Errored`]: crate::interpreter::state::ProgramState::Errored

use crate::program::Position;
use std::fmt;

/// Which value stack an underflow happened on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StackKind {
    Main,
    Aux,
}

impl fmt::Display for StackKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StackKind::Main => f.write_str("main"),
            StackKind::Aux => f.write_str("aux"),
        }
    }
}

/// Category of a runtime error, without its details
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    StackUnderflow,
    DivisionByZero,
    IntegerOverflow,
    InvalidReturn,
    UnrecoverableIoFault,
}

/// Runtime errors that can occur during execution
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuntimeError {
    /// A command needed more values than the stack holds
    StackUnderflow {
        stack: StackKind,
        needed: usize,
        available: usize,
        position: Position,
    },

    /// Division or modulo by zero
    DivisionByZero {
        operation: String,
        position: Position,
    },

    /// Arithmetic result does not fit in a word
    IntegerOverflow {
        operation: String,
        position: Position,
    },

    /// Return with an empty call stack
    InvalidReturn { position: Position },

    /// The I/O channel failed for good
    IoFault { message: String, position: Position },
}

impl RuntimeError {
    pub fn position(&self) -> Position {
        match self {
            RuntimeError::StackUnderflow { position, .. } => *position,
            RuntimeError::DivisionByZero { position, .. } => *position,
            RuntimeError::IntegerOverflow { position, .. } => *position,
            RuntimeError::InvalidReturn { position } => *position,
            RuntimeError::IoFault { position, .. } => *position,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            RuntimeError::StackUnderflow { .. } => ErrorKind::StackUnderflow,
            RuntimeError::DivisionByZero { .. } => ErrorKind::DivisionByZero,
            RuntimeError::IntegerOverflow { .. } => ErrorKind::IntegerOverflow,
            RuntimeError::InvalidReturn { .. } => ErrorKind::InvalidReturn,
            RuntimeError::IoFault { .. } => ErrorKind::UnrecoverableIoFault,
        }
    }
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuntimeError::StackUnderflow {
                stack,
                needed,
                available,
                position,
            } => {
                write!(
                    f,
                    "Stack underflow at {}: needed {} value{} on the {} stack, found {}",
                    position,
                    needed,
                    if *needed == 1 { "" } else { "s" },
                    stack,
                    available
                )
            }
            RuntimeError::DivisionByZero {
                operation,
                position,
            } => {
                write!(f, "Division by zero in {} at {}", operation, position)
            }
            RuntimeError::IntegerOverflow {
                operation,
                position,
            } => {
                write!(f, "Integer overflow in {} at {}", operation, position)
            }
            RuntimeError::InvalidReturn { position } => {
                write!(f, "Return with an empty call stack at {}", position)
            }
            RuntimeError::IoFault { message, position } => {
                write!(f, "I/O fault at {}: {}", position, message)
            }
        }
    }
}

impl std::error::Error for RuntimeError {}
