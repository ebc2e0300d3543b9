//! Terminal debugger built on [ratatui](https://github.com/ratatui-org/ratatui).
//!
//! The UI is organized into three layers:
//!
//! - **[`app`]** — debugger state, keyboard event loop, pane focus, input mode,
//!   play mode, and step history
//! - **[`panes`]** — stateless render functions for each visible pane (grid,
//!   stacks, heap and calls, output, status bar)
//! - **[`theme`]** — centralized color palette used by all panes
//!
//! The debugger only ever renders [`Snapshot`]s; it never reads the engine's
//! live stores while drawing.
//!
//! The entry point for consumers is [`App`]: construct it with an [`Engine`]
//! and call [`App::run`] to start the event loop.
//!
//! [`Engine`]: crate::interpreter::engine::Engine
//! [`Snapshot`]: crate::snapshot::Snapshot
//! [`App::run`]: app::App::run

pub mod app;
pub mod panes;
pub mod theme;

pub use app::App;
