//! Program model for the interpreter
//!
//! This module provides the static side of a Deolang program:
//! - [`grid`]: The immutable grid of decoded cells and toroidal traversal
//! - [`command`]: The instruction set and the total symbol decoder
//! - [`direction`]: Directions, positions, and the instruction pointer
//!
//! # Traversal
//!
//! The grid is a torus. Stepping past the right edge lands on column 0 of the
//! same row, stepping above row 0 lands on the last row, and so on. The width
//! of the torus is the length of the longest row; shorter rows are padded
//! with empty cells that decode to [`Command::NoOp`].

pub mod command;
pub mod direction;
pub mod grid;

pub use command::Command;
pub use direction::{Direction, InstructionPointer, Position};
pub use grid::{Cell, Grid};
