// Snapshots of engine state and the debugger's step history

use crate::interpreter::state::{ExecutionMode, ProgramState};
use crate::memory::{calls::CallFrame, heap::Address, Word};
use crate::program::InstructionPointer;
use std::collections::VecDeque;

/// Point-in-time copy of everything the engine mutates.
///
/// A snapshot owns its data; nothing in it aliases the live engine, so a
/// renderer can hold one while the engine keeps stepping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub ip: InstructionPointer,
    /// Bottom to top
    pub main_stack: Vec<Word>,
    /// Bottom to top
    pub aux_stack: Vec<Word>,
    /// Written cells ordered by address
    pub heap: Vec<(Address, Word)>,
    /// Outermost first
    pub call_stack: Vec<CallFrame>,
    pub state: ProgramState,
    pub mode: ExecutionMode,
    /// Steps executed since the last reset
    pub steps: u64,
}

impl Snapshot {
    /// Estimate the memory usage of this snapshot in bytes
    pub fn estimated_size(&self) -> usize {
        let word = std::mem::size_of::<Word>();
        let stacks = (self.main_stack.len() + self.aux_stack.len()) * word;
        let heap = self.heap.len() * std::mem::size_of::<(Address, Word)>();
        let calls = self.call_stack.len() * std::mem::size_of::<CallFrame>();
        std::mem::size_of::<Snapshot>() + stacks + heap + calls
    }

    /// Value at `address` as of this snapshot
    pub fn heap_value(&self, address: Address) -> Word {
        self.heap
            .binary_search_by_key(&address, |(a, _)| *a)
            .map_or(0, |index| self.heap[index].1)
    }
}

/// A recorded step: the engine state plus how much output existed then
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    pub snapshot: Snapshot,
    pub output_len: usize,
}

/// Bounded record of executed states for stepping backward.
///
/// When the memory budget is exceeded the oldest entries are dropped, so
/// the history always covers the most recent steps.
#[derive(Debug)]
pub struct History {
    entries: VecDeque<HistoryEntry>,
    position: usize,
    max_memory: usize,
    current_memory: usize,
}

impl History {
    pub fn new(max_memory: usize) -> Self {
        History {
            entries: VecDeque::new(),
            position: 0,
            max_memory,
            current_memory: 0,
        }
    }

    /// Record a new state and move to it
    pub fn push(&mut self, snapshot: Snapshot, output_len: usize) {
        let size = snapshot.estimated_size();
        self.current_memory += size;
        self.entries.push_back(HistoryEntry {
            snapshot,
            output_len,
        });

        while self.current_memory > self.max_memory && self.entries.len() > 1 {
            if let Some(dropped) = self.entries.pop_front() {
                self.current_memory -= dropped.snapshot.estimated_size();
            }
        }
        self.position = self.entries.len() - 1;
    }

    /// Entry currently being viewed
    pub fn current(&self) -> Option<&HistoryEntry> {
        self.entries.get(self.position)
    }

    /// Move one entry back. Returns false at the oldest entry.
    pub fn step_backward(&mut self) -> bool {
        if self.position == 0 {
            return false;
        }
        self.position -= 1;
        true
    }

    /// Move one entry forward. Returns false at the newest entry.
    pub fn step_forward(&mut self) -> bool {
        if self.position + 1 >= self.entries.len() {
            return false;
        }
        self.position += 1;
        true
    }

    /// Whether the viewed entry is the live engine state
    pub fn at_latest(&self) -> bool {
        self.position + 1 >= self.entries.len()
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.position = 0;
        self.current_memory = 0;
    }

    /// Get current memory usage
    pub fn memory_usage(&self) -> usize {
        self.current_memory
    }
}
