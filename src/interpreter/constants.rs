// Constants for the Deolang interpreter

/// Seed for the random-turn generator when none is configured.
/// Fixed so that runs (and resets) are reproducible.
pub const DEFAULT_SEED: u64 = 0x0DE0_1A4E;

/// Character code pushed by string mode for an empty cell
pub const EMPTY_CELL_CODE: i64 = b' ' as i64;

/// Default number of steps per second when the debugger plays a program
pub const DEFAULT_PLAY_HZ: u32 = 10;

/// Memory budget for the debugger's step history (64 MB)
pub const HISTORY_MEMORY_LIMIT: usize = 64 * 1024 * 1024;

/// Steps a single "run" command in the debugger may take before pausing
pub const DEFAULT_RUN_BUDGET: u64 = 100_000;
