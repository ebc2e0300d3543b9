//! # Introduction
//!
//! Deolang is a two-dimensional, stack-based esoteric language. Source code is
//! laid out on a grid and an instruction pointer walks across it, executing
//! whatever command sits under it and changing direction at arrows, mirrors,
//! jumps, and calls. This crate is the execution engine plus a terminal
//! debugger built with [ratatui](https://docs.rs/ratatui).
//!
//! ## Execution pipeline
//!
//! ```text
//! Source → Grid → Engine (stacks, heap, calls, IP) → I/O channel
//!                    └──→ Snapshots → debugger
//! ```
//!
//! 1. [`program`] — decodes source text into an immutable [`program::Grid`]
//!    of commands and defines toroidal traversal.
//! 2. [`interpreter`] — the [`interpreter::Engine`] state machine: one
//!    command per `step`, with `run`, `reset`, and `snapshot` for drivers.
//! 3. [`memory`] — the main and auxiliary stacks, the sparse heap, and the
//!    call stack.
//! 4. [`io`] — the [`io::IoChannel`] trait the engine prints and reads
//!    through, with buffered and console implementations.
//! 5. [`snapshot`] — copy-out [`snapshot::Snapshot`]s and the bounded step
//!    history used to step backward.
//! 6. [`ui`] — ratatui-based debugger; not part of the stable library API.
//!
//! ## Example
//!
//! ```
//! use deolang::interpreter::{Engine, ProgramState};
//! use deolang::io::BufferedIo;
//! use deolang::program::Grid;
//!
//! let mut engine = Engine::new(Grid::parse("52+.@"), BufferedIo::new(""));
//! assert_eq!(engine.run(None), ProgramState::Halted);
//! assert_eq!(engine.io().output(), "7");
//! ```

pub mod interpreter;
pub mod io;
pub mod memory;
pub mod program;
pub mod snapshot;
pub mod ui;
