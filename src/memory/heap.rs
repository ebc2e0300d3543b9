//! Heap implementation for the interpreter
//!
//! The heap is a sparse map from any word to a word. It has no allocation
//! step and no bounds: every integer, negative ones included, is a valid
//! address. Unwritten addresses cost nothing and read as zero.

use super::Word;
use rustc_hash::FxHashMap;

/// Heap address; any word is one
pub type Address = Word;

/// Sparse, conceptually infinite integer memory
#[derive(Debug, Clone, Default)]
pub struct Heap {
    cells: FxHashMap<Address, Word>,
}

impl Heap {
    pub fn new() -> Self {
        Heap {
            cells: FxHashMap::default(),
        }
    }

    /// Write `value` at `address`
    pub fn store(&mut self, address: Address, value: Word) {
        self.cells.insert(address, value);
    }

    /// Read `address`, defaulting to zero for cells never written
    pub fn load(&self, address: Address) -> Word {
        self.cells.get(&address).copied().unwrap_or(0)
    }

    /// Number of cells that have been written
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn clear(&mut self) {
        self.cells.clear();
    }

    /// Written cells ordered by address (for snapshots and display)
    pub fn sorted_cells(&self) -> Vec<(Address, Word)> {
        let mut cells: Vec<_> = self.cells.iter().map(|(&a, &v)| (a, v)).collect();
        cells.sort_unstable_by_key(|(address, _)| *address);
        cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unwritten_reads_zero() {
        let heap = Heap::new();
        assert_eq!(heap.load(0), 0);
        assert_eq!(heap.load(Word::MAX), 0);
        assert_eq!(heap.load(Word::MIN), 0);
        assert!(heap.is_empty());
    }

    #[test]
    fn test_store_overwrites() {
        let mut heap = Heap::new();
        heap.store(7, 1);
        heap.store(7, -3);
        heap.store(2, 9);
        assert_eq!(heap.load(7), -3);
        assert_eq!(heap.sorted_cells(), vec![(2, 9), (7, -3)]);
    }

    #[test]
    fn test_negative_addresses() {
        let mut heap = Heap::new();
        heap.store(-1, 5);
        heap.store(3, 4);
        assert_eq!(heap.load(-1), 5);
        assert_eq!(heap.load(1), 0);
        assert_eq!(heap.sorted_cells(), vec![(-1, 5), (3, 4)]);
    }
}
