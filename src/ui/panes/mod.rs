//! TUI pane rendering modules
//!
//! This module provides the rendering logic for all visual panes in the
//! debugger, organized by responsibility.
//!
//! # Pane Modules
//!
//! - [`grid`]: Program grid with command highlighting and the IP cell
//! - [`stack`]: Main and auxiliary stacks, top first
//! - [`heap`]: Written heap cells and the call stack
//! - [`terminal`]: Program output and the input prompt
//! - [`status`]: Status bar with keybindings and execution state
//!
//! # Architecture
//!
//! Each pane module exports:
//! - A primary `render_*_pane()` function
//! - A `*RenderData` struct borrowed from a snapshot
//! - A `*ScrollState` struct owned by the app, where the pane scrolls

pub mod grid;
pub mod heap;
pub mod stack;
pub mod status;
pub mod terminal;

// Re-export render functions for convenience
pub use grid::{render_grid_pane, GridRenderData, GridScrollState};
pub use heap::{render_heap_pane, HeapRenderData, HeapScrollState};
pub use stack::{render_stack_pane, StackRenderData, StackScrollState};
pub use status::{render_status_bar, StatusRenderData};
pub use terminal::{render_terminal_pane, TerminalRenderData, TerminalScrollState};
