//! Deolang execution engine
//!
//! This module provides the core execution logic:
//! - [`engine`]: The [`Engine`](engine::Engine) state machine and its debug
//!   control interface (`step`, `run`, `reset`, `snapshot`)
//! - [`errors`]: Runtime error types
//! - [`state`]: Program lifecycle and execution modes
//! - [`config`]: Entry point and random seed
//!
//! # Execution Model
//!
//! One step fetches the command under the instruction pointer, applies it to
//! the stacks, heap, call stack, or I/O channel, and then moves the IP: one
//! cell in the current direction unless the command placed it explicitly.
//! Commands are implemented in `ops` (values, memory, I/O) and `jumps`
//! (flow control).

pub mod config;
pub mod constants;
pub mod engine;
pub mod errors;
mod jumps;
mod ops;
pub mod state;

pub use config::EngineConfig;
pub use engine::Engine;
pub use errors::{ErrorKind, RuntimeError, StackKind};
pub use state::{ExecutionMode, ProgramState};
