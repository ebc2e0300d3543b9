// Execution engine for the Deolang interpreter

use crate::interpreter::config::EngineConfig;
use crate::interpreter::constants::EMPTY_CELL_CODE;
use crate::interpreter::errors::{RuntimeError, StackKind};
use crate::interpreter::state::{ExecutionMode, ProgramState};
use crate::io::{IoChannel, IoMode};
use crate::memory::{
    calls::CallStack,
    heap::Heap,
    stack::{Stack, Underflow},
    Word,
};
use crate::program::{Cell, Command, Grid, InstructionPointer, Position};
use crate::snapshot::Snapshot;
use rand::{rngs::StdRng, SeedableRng};
use std::sync::Arc;
use tracing::{debug, info, trace, warn};

/// What the IP does once a command has been applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Flow {
    /// Move one cell in the (possibly new) current direction
    Advance,
    /// The command already placed the IP
    Jumped,
    /// Stop the program; the IP stays on the halt cell
    Halt,
}

/// Why a step did not complete
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Interrupt {
    /// The channel had no input; the step may be retried
    Aborted(IoMode),
    /// The run is over
    Fatal(RuntimeError),
}

impl From<RuntimeError> for Interrupt {
    fn from(err: RuntimeError) -> Self {
        Interrupt::Fatal(err)
    }
}

pub(crate) type StepResult = Result<Flow, Interrupt>;

/// The engine that executes a Deolang grid one command at a time
pub struct Engine<IO: IoChannel> {
    /// Program grid; shared read-only with any renderer
    pub(crate) grid: Arc<Grid>,

    pub(crate) config: EngineConfig,

    /// Instruction pointer
    pub(crate) ip: InstructionPointer,

    /// Main value stack
    pub(crate) main: Stack,

    /// Auxiliary value stack
    pub(crate) aux: Stack,

    /// Heap memory
    pub(crate) heap: Heap,

    /// Return frames for `F` / `R`
    pub(crate) calls: CallStack,

    pub(crate) state: ProgramState,

    /// Whether cells are dispatched, pushed as characters, or skipped
    pub(crate) mode: ExecutionMode,

    /// Generator for random turns, reseeded on reset
    pub(crate) rng: StdRng,

    /// Output sink and input source
    pub(crate) io: IO,

    /// Steps completed since the last reset
    steps: u64,

    /// Set when the last step was aborted by a pending read
    awaiting_input: Option<IoMode>,
}

impl<IO: IoChannel> Engine<IO> {
    /// Create an engine for `grid` with the default configuration
    pub fn new(grid: impl Into<Arc<Grid>>, io: IO) -> Self {
        Self::with_config(grid, io, EngineConfig::default())
    }

    /// Create an engine with an explicit entry point and seed
    pub fn with_config(grid: impl Into<Arc<Grid>>, io: IO, config: EngineConfig) -> Self {
        let grid = grid.into();
        let ip = Self::entry_for(&grid, &config);
        Engine {
            grid,
            config,
            ip,
            main: Stack::new(),
            aux: Stack::new(),
            heap: Heap::new(),
            calls: CallStack::new(),
            state: ProgramState::Ready,
            mode: ExecutionMode::Normal,
            rng: StdRng::seed_from_u64(config.seed),
            io,
            steps: 0,
            awaiting_input: None,
        }
    }

    fn entry_for(grid: &Grid, config: &EngineConfig) -> InstructionPointer {
        let entry = config.entry;
        InstructionPointer::new(
            grid.wrap_position(entry.position.x as i64, entry.position.y as i64),
            entry.direction,
        )
    }

    // ========== Debug control interface ==========

    /// Execute exactly one command.
    ///
    /// A step is atomic: if it fails, none of its effects are visible. Once
    /// the program has halted or errored this is a no-op that returns the
    /// terminal state. An aborted read leaves the state, IP, and memory as
    /// they were (a first step that aborts stays `Ready`) and sets
    /// [`Engine::awaiting_input`].
    pub fn step(&mut self) -> ProgramState {
        if self.state.is_terminal() {
            return self.state.clone();
        }
        self.awaiting_input = None;

        let position = self.ip.position;
        let cell = self.grid.cell(position.x, position.y).copied();

        let result = match self.mode {
            ExecutionMode::String => Ok(self.step_string_mode(cell)),
            ExecutionMode::Bridge => Ok(self.step_bridge_mode(cell)),
            ExecutionMode::Normal => {
                let command = cell.map_or(Command::NoOp, |c| c.command);
                trace!(x = position.x, y = position.y, ?command, "dispatch");
                self.execute_command(command)
            }
        };

        match result {
            Ok(flow) => {
                self.steps += 1;
                self.state = ProgramState::Running;
                match flow {
                    Flow::Advance => {
                        self.ip.position = self.grid.advance(position, self.ip.direction);
                    }
                    Flow::Jumped => {}
                    Flow::Halt => {
                        info!(steps = self.steps, %position, "program halted");
                        self.state = ProgramState::Halted;
                    }
                }
            }
            Err(Interrupt::Aborted(mode)) => {
                debug!(%position, ?mode, "read aborted, waiting for input");
                self.awaiting_input = Some(mode);
            }
            Err(Interrupt::Fatal(err)) => {
                warn!(%err, "runtime error");
                self.state = ProgramState::Errored(err);
            }
        }

        self.state.clone()
    }

    /// Step until the program halts or errors, `step_budget` steps have been
    /// taken, or a read is waiting for input.
    pub fn run(&mut self, step_budget: Option<u64>) -> ProgramState {
        let mut taken = 0u64;
        while !self.state.is_terminal() {
            if step_budget.is_some_and(|budget| taken >= budget) {
                debug!(taken, "step budget exhausted");
                break;
            }
            self.step();
            taken += 1;
            if self.awaiting_input.is_some() {
                break;
            }
        }
        self.state.clone()
    }

    /// Return to `Ready` with empty memory and the IP at the entry point.
    ///
    /// The I/O channel belongs to the driver and is left as it is.
    pub fn reset(&mut self) {
        debug!("engine reset");
        self.ip = Self::entry_for(&self.grid, &self.config);
        self.main.clear();
        self.aux.clear();
        self.heap.clear();
        self.calls.clear();
        self.state = ProgramState::Ready;
        self.mode = ExecutionMode::Normal;
        self.rng = StdRng::seed_from_u64(self.config.seed);
        self.steps = 0;
        self.awaiting_input = None;
    }

    /// Deep copy of the current state
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            ip: self.ip,
            main_stack: self.main.values().to_vec(),
            aux_stack: self.aux.values().to_vec(),
            heap: self.heap.sorted_cells(),
            call_stack: self.calls.frames().to_vec(),
            state: self.state.clone(),
            mode: self.mode,
            steps: self.steps,
        }
    }

    // ========== Modes ==========

    fn step_string_mode(&mut self, cell: Option<Cell>) -> Flow {
        match cell.map(|c| c.symbol) {
            Some('"') => self.mode = ExecutionMode::Normal,
            Some(symbol) => self.main.push(Word::from(u32::from(symbol))),
            None => self.main.push(EMPTY_CELL_CODE),
        }
        Flow::Advance
    }

    fn step_bridge_mode(&mut self, cell: Option<Cell>) -> Flow {
        if matches!(cell.map(|c| c.command), Some(Command::Bridge(_))) {
            self.mode = ExecutionMode::Normal;
        }
        Flow::Advance
    }

    fn execute_command(&mut self, command: Command) -> StepResult {
        match command {
            Command::NoOp => Ok(Flow::Advance),
            Command::Push(value) => {
                self.main.push(value);
                Ok(Flow::Advance)
            }
            Command::Binary(op) => self.execute_binary(op),
            Command::Not => self.execute_not(),

            Command::Pop
            | Command::Swap
            | Command::Dup
            | Command::ToAux
            | Command::FromAux
            | Command::RotateLeft
            | Command::RotateRight
            | Command::Length
            | Command::Clear => self.execute_stack_op(command),

            Command::Store => self.execute_store(),
            Command::Load => self.execute_load(),
            Command::GridGet => self.execute_grid_get(),

            Command::Print(mode) => self.execute_print(mode),
            Command::Read(mode) => self.execute_read(mode),

            Command::Turn(direction) => {
                self.ip.direction = direction;
                Ok(Flow::Advance)
            }
            Command::RandomTurn => self.execute_random_turn(),
            Command::Mirror(mirror) => {
                self.ip.direction = mirror.reflect(self.ip.direction);
                Ok(Flow::Advance)
            }
            Command::Bridge(bridge) => {
                if bridge.opens_for(self.ip.direction) {
                    self.mode = ExecutionMode::Bridge;
                }
                Ok(Flow::Advance)
            }
            Command::Jump => self.execute_jump(),
            Command::JumpIf(condition) => self.execute_jump_if(condition),
            Command::Call => self.execute_call(),
            Command::Return => self.execute_return(),
            Command::StringMode => {
                self.mode = ExecutionMode::String;
                Ok(Flow::Advance)
            }
            Command::Halt => Ok(Flow::Halt),
        }
    }

    // ========== Stack helpers ==========

    fn underflow(&self, stack: StackKind, underflow: Underflow) -> RuntimeError {
        RuntimeError::StackUnderflow {
            stack,
            needed: underflow.needed,
            available: underflow.available,
            position: self.ip.position,
        }
    }

    /// Fail unless the main stack holds at least `needed` values
    pub(crate) fn require_main(&self, needed: usize) -> Result<(), RuntimeError> {
        self.main
            .require(needed)
            .map_err(|u| self.underflow(StackKind::Main, u))
    }

    /// Pop `N` values from the main stack, top first, all or nothing
    pub(crate) fn pop_main<const N: usize>(&mut self) -> Result<[Word; N], RuntimeError> {
        match self.main.pop_n::<N>() {
            Ok(values) => Ok(values),
            Err(u) => Err(self.underflow(StackKind::Main, u)),
        }
    }

    pub(crate) fn pop_aux(&mut self) -> Result<Word, RuntimeError> {
        match self.aux.pop_n::<1>() {
            Ok([value]) => Ok(value),
            Err(u) => Err(self.underflow(StackKind::Aux, u)),
        }
    }

    // ========== Getter methods for drivers ==========

    /// The program grid
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn ip(&self) -> InstructionPointer {
        self.ip
    }

    /// Grid position of the next command
    pub fn position(&self) -> Position {
        self.ip.position
    }

    pub fn state(&self) -> &ProgramState {
        &self.state
    }

    pub fn mode(&self) -> ExecutionMode {
        self.mode
    }

    pub fn main_stack(&self) -> &Stack {
        &self.main
    }

    pub fn aux_stack(&self) -> &Stack {
        &self.aux
    }

    pub fn heap(&self) -> &Heap {
        &self.heap
    }

    pub fn call_stack(&self) -> &CallStack {
        &self.calls
    }

    /// Steps completed since the last reset
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Read mode of a pending read, if the last step was aborted by one
    pub fn awaiting_input(&self) -> Option<IoMode> {
        self.awaiting_input
    }

    pub fn io(&self) -> &IO {
        &self.io
    }

    pub fn io_mut(&mut self) -> &mut IO {
        &mut self.io
    }
}
