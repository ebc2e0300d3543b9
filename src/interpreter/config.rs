//! Engine configuration

use super::constants::DEFAULT_SEED;
use crate::program::InstructionPointer;

/// Settings fixed for the lifetime of an engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Where the IP starts on construction and after every reset
    pub entry: InstructionPointer,
    /// Seed for `?` random turns; reset reseeds with the same value
    pub seed: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            entry: InstructionPointer::default(),
            seed: DEFAULT_SEED,
        }
    }
}

impl EngineConfig {
    pub fn with_entry(mut self, entry: InstructionPointer) -> Self {
        self.entry = entry;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}
