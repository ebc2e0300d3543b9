//! Command implementations, grouped by category.
//!
//! Each file adds an `impl` block to [`Engine`](super::engine::Engine).
//! Commands validate everything they need (stack depth, divisor, address)
//! before they mutate anything, so a failing step leaves no trace.

mod arithmetic;
mod io;
mod memory;
mod stack;
