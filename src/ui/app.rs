//! Main TUI application state and logic

use crate::interpreter::engine::Engine;
use crate::interpreter::state::ProgramState;
use crate::io::{BufferedIo, IoMode};
use crate::snapshot::History;
use crate::ui::panes::{
    self, GridRenderData, GridScrollState, HeapRenderData, HeapScrollState, StackRenderData,
    StackScrollState, StatusRenderData, TerminalRenderData, TerminalScrollState,
};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;
use std::time::{Duration, Instant};
use tracing::debug;

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Grid,
    Stack,
    Heap,
    Terminal,
}

impl FocusedPane {
    /// Move focus to the next pane (clockwise: grid -> terminal -> stack -> heap)
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Grid => FocusedPane::Terminal,
            FocusedPane::Terminal => FocusedPane::Stack,
            FocusedPane::Stack => FocusedPane::Heap,
            FocusedPane::Heap => FocusedPane::Grid,
        }
    }
}

/// Options the debugger is started with
#[derive(Debug, Clone)]
pub struct AppOptions {
    /// Input available to the program before the user types anything
    pub initial_input: String,
    /// Steps per second in play mode
    pub play_hz: u32,
    /// Step budget for a single "run" key press
    pub run_budget: u64,
}

/// The main application state
pub struct App {
    /// The engine being debugged
    pub engine: Engine<BufferedIo>,

    /// Executed states, for stepping backward
    pub history: History,

    pub options: AppOptions,

    /// Currently focused pane
    pub focused_pane: FocusedPane,

    /// Per-pane scroll state
    pub grid_scroll: GridScrollState,
    pub stack_scroll: StackScrollState,
    pub heap_scroll: HeapScrollState,
    pub terminal_scroll: TerminalScrollState,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,

    /// Whether auto-play mode is active
    pub is_playing: bool,

    /// Last time a step was taken in play mode
    pub last_play_time: Instant,

    /// Last time space was pressed (for debouncing)
    pub last_space_press: Instant,

    /// Line being typed while the program waits for input
    pub input_buffer: Option<String>,
}

impl App {
    /// Create a new app around a freshly constructed engine
    pub fn new(mut engine: Engine<BufferedIo>, history: History, options: AppOptions) -> Self {
        engine.io_mut().feed(&options.initial_input);
        let mut app = App {
            engine,
            history,
            options,
            focused_pane: FocusedPane::Grid,
            grid_scroll: GridScrollState::default(),
            stack_scroll: StackScrollState::default(),
            heap_scroll: HeapScrollState::default(),
            terminal_scroll: TerminalScrollState::default(),
            should_quit: false,
            status_message: String::from("Ready!"),
            is_playing: false,
            last_play_time: Instant::now(),
            last_space_press: Instant::now()
                .checked_sub(Duration::from_secs(1))
                .unwrap_or(Instant::now()),
            input_buffer: None,
        };
        app.record();
        app
    }

    fn play_interval(&self) -> Duration {
        Duration::from_millis(1000 / u64::from(self.options.play_hz.max(1)))
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            // Handle auto-play mode
            if self.is_playing && self.last_play_time.elapsed() >= self.play_interval() {
                if !self.step_forward() {
                    self.is_playing = false;
                }
                self.last_play_time = Instant::now();
            }

            // Use poll with timeout to allow auto-play to work
            if event::poll(Duration::from_millis(10))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    /// Render the UI from the snapshot currently being viewed
    fn render(&mut self, frame: &mut Frame) {
        let Some(entry) = self.history.current() else {
            return;
        };
        let snapshot = &entry.snapshot;
        let full_output = self.engine.io().output();
        let output = full_output.get(..entry.output_len).unwrap_or(full_output);

        let size = frame.area();

        // Create layout: 4 panes in 2 columns, plus status bar at bottom
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(main_chunks[0]);

        // Left column: Grid (top) | Output (bottom)
        let left_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
            .split(columns[0]);

        // Right column: Stacks (top) | Heap and calls (bottom)
        let right_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(columns[1]);

        panes::render_grid_pane(
            frame,
            left_rows[0],
            GridRenderData {
                grid: self.engine.grid(),
                ip: snapshot.ip,
                is_error: matches!(snapshot.state, ProgramState::Errored(_)),
                is_waiting: self.input_buffer.is_some(),
            },
            self.focused_pane == FocusedPane::Grid,
            &mut self.grid_scroll,
        );

        panes::render_terminal_pane(
            frame,
            left_rows[1],
            TerminalRenderData {
                output,
                pending_input: self.input_buffer.as_deref(),
            },
            self.focused_pane == FocusedPane::Terminal,
            &mut self.terminal_scroll,
        );

        panes::render_stack_pane(
            frame,
            right_rows[0],
            StackRenderData {
                main_stack: &snapshot.main_stack,
                aux_stack: &snapshot.aux_stack,
            },
            self.focused_pane == FocusedPane::Stack,
            &mut self.stack_scroll,
        );

        panes::render_heap_pane(
            frame,
            right_rows[1],
            HeapRenderData {
                heap: &snapshot.heap,
                call_stack: &snapshot.call_stack,
            },
            self.focused_pane == FocusedPane::Heap,
            &mut self.heap_scroll,
        );

        panes::render_status_bar(
            frame,
            main_chunks[1],
            StatusRenderData {
                message: &self.status_message,
                step: snapshot.steps,
                state: &snapshot.state,
                is_playing: self.is_playing,
                is_input: self.input_buffer.is_some(),
                is_rewound: !self.history.at_latest(),
            },
        );
    }

    /// Handle keyboard events
    fn handle_key_event(&mut self, key: KeyEvent) {
        if self.input_buffer.is_some() {
            self.handle_input_key(key);
            return;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            // Number keys step forward N times directly
            KeyCode::Char(c @ '1'..='9') => {
                self.is_playing = false;
                let n = c.to_digit(10).unwrap_or(1);
                let mut stepped = 0;
                for _ in 0..n {
                    if !self.step_forward() {
                        break;
                    }
                    stepped += 1;
                }
                if stepped > 0 && self.input_buffer.is_none() {
                    self.status_message = format!("Stepped forward {} step(s)", stepped);
                }
            }
            KeyCode::Char('r') | KeyCode::Char('R') => {
                self.is_playing = false;
                self.reset();
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::Left => {
                self.is_playing = false;
                if self.history.step_backward() {
                    self.status_message = "Stepped backward".to_string();
                } else {
                    self.status_message = "Cannot step backward: oldest recorded step".to_string();
                }
            }
            KeyCode::Right => {
                self.is_playing = false;
                self.step_forward();
            }
            KeyCode::Up => match self.focused_pane {
                FocusedPane::Grid => {
                    self.grid_scroll.row_offset = self.grid_scroll.row_offset.saturating_sub(1);
                }
                FocusedPane::Stack => {
                    self.stack_scroll.offset = self.stack_scroll.offset.saturating_sub(1);
                }
                FocusedPane::Heap => {
                    self.heap_scroll.offset = self.heap_scroll.offset.saturating_sub(1);
                }
                FocusedPane::Terminal => {
                    self.terminal_scroll.offset = self.terminal_scroll.offset.saturating_sub(1);
                }
            },
            KeyCode::Down => match self.focused_pane {
                FocusedPane::Grid => {
                    self.grid_scroll.row_offset = self.grid_scroll.row_offset.saturating_add(1);
                }
                FocusedPane::Stack => {
                    self.stack_scroll.offset = self.stack_scroll.offset.saturating_add(1);
                }
                FocusedPane::Heap => {
                    self.heap_scroll.offset = self.heap_scroll.offset.saturating_add(1);
                }
                FocusedPane::Terminal => {
                    self.terminal_scroll.offset = self.terminal_scroll.offset.saturating_add(1);
                }
            },
            KeyCode::Char(' ') => {
                // Toggle auto-play mode (with 200ms debounce to prevent key repeat spam)
                if self.last_space_press.elapsed() >= Duration::from_millis(200) {
                    self.last_space_press = Instant::now();
                    self.is_playing = !self.is_playing;
                    if self.is_playing {
                        self.last_play_time = Instant::now()
                            .checked_sub(self.play_interval())
                            .unwrap_or(Instant::now());
                        self.status_message = "Playing...".to_string();
                    } else {
                        self.status_message = "Paused".to_string();
                    }
                }
            }
            KeyCode::Enter => {
                self.is_playing = false;
                self.run_to_end();
            }
            _ => {}
        }
    }

    /// Keys while a read is waiting for a line of input
    fn handle_input_key(&mut self, key: KeyEvent) {
        let Some(buffer) = self.input_buffer.as_mut() else {
            return;
        };
        match key.code {
            KeyCode::Char(c) => buffer.push(c),
            KeyCode::Backspace => {
                buffer.pop();
            }
            KeyCode::Enter => {
                let line = format!("{}\n", buffer);
                self.input_buffer = None;
                self.engine.io_mut().feed(&line);
                debug!(len = line.len(), "input supplied");
                self.step_forward();
            }
            KeyCode::Esc => {
                self.input_buffer = None;
                self.status_message = "Input cancelled; stepping retries the read".to_string();
            }
            _ => {}
        }
    }

    /// Record the live engine state as the newest history entry
    fn record(&mut self) {
        let output_len = self.engine.io().output().len();
        self.history.push(self.engine.snapshot(), output_len);
        self.terminal_scroll.offset = usize::MAX;
    }

    /// Advance one step: replay from history when rewound, otherwise execute.
    /// Returns false when nothing happened.
    fn step_forward(&mut self) -> bool {
        if !self.history.at_latest() {
            self.history.step_forward();
            self.status_message = "Stepped forward (history)".to_string();
            return true;
        }

        if self.engine.state().is_terminal() {
            self.status_message = "Cannot step forward: program finished".to_string();
            return false;
        }

        self.engine.step();

        if let Some(mode) = self.engine.awaiting_input() {
            self.is_playing = false;
            self.input_buffer = Some(String::new());
            self.status_message = match mode {
                IoMode::Int => "Program is reading an integer".to_string(),
                IoMode::Char => "Program is reading a character".to_string(),
            };
            return false;
        }

        self.record();
        self.status_message = match self.engine.state() {
            ProgramState::Halted => "Program halted".to_string(),
            ProgramState::Errored(err) => err.to_string(),
            _ => "Stepped forward".to_string(),
        };
        true
    }

    /// Run until halt, error, pending input, or the run budget
    fn run_to_end(&mut self) {
        while !self.history.at_latest() {
            self.history.step_forward();
        }
        if self.engine.state().is_terminal() {
            self.status_message = "Program finished".to_string();
            return;
        }

        let before = self.engine.steps();
        let state = self.engine.run(Some(self.options.run_budget));
        let taken = self.engine.steps() - before;

        if let Some(mode) = self.engine.awaiting_input() {
            self.input_buffer = Some(String::new());
            self.status_message = format!("Ran {} step(s); waiting for {:?} input", taken, mode);
        } else {
            self.status_message = match state {
                ProgramState::Halted => format!("Ran {} step(s); program halted", taken),
                ProgramState::Errored(err) => err.to_string(),
                _ => format!("Ran {} step(s); step budget reached", taken),
            };
        }
        if taken > 0 {
            self.record();
        }
    }

    /// Start over with the same program and initial input
    fn reset(&mut self) {
        self.engine.reset();
        let io = self.engine.io_mut();
        io.reset();
        io.feed(&self.options.initial_input);
        self.history.clear();
        self.input_buffer = None;
        self.record();
        self.status_message = "Reset".to_string();
    }
}
