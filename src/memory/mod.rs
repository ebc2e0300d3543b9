//! Memory model for the interpreter
//!
//! This module provides the mutable stores a Deolang program works with:
//! - [`stack`]: LIFO integer stacks (the main stack and the auxiliary stack)
//! - [`heap`]: Sparse integer memory addressed by any integer
//! - [`calls`]: The call stack of return frames used by `F` and `R`
//!
//! # Failure Reporting
//!
//! None of these stores know where the instruction pointer is, so they do
//! not build runtime errors themselves. Empty stacks are signalled with
//! `Option` (or [`stack::Underflow`] for multi-value pops) and the engine
//! turns that into a positioned [`RuntimeError`].
//!
//! [`RuntimeError`]: crate::interpreter::errors::RuntimeError

pub mod calls;
pub mod heap;
pub mod stack;

/// The integer type held by stacks and heap cells
pub type Word = i64;
