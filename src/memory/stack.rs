//! Integer stack implementation
//!
//! [`Stack`] backs both the main stack and the auxiliary stack. It has no
//! capacity limit; depth is bounded only by host memory.
//!
//! Multi-value pops ([`Stack::pop_n`]) are all-or-nothing: when the stack
//! holds fewer values than requested nothing is removed, which is what lets
//! the engine apply each step atomically.

use super::Word;

/// Not enough values on a stack for a multi-value pop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Underflow {
    pub needed: usize,
    pub available: usize,
}

/// A LIFO stack of words
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stack {
    values: Vec<Word>,
}

impl Stack {
    pub fn new() -> Self {
        Stack { values: Vec::new() }
    }

    pub fn push(&mut self, value: Word) {
        self.values.push(value);
    }

    pub fn pop(&mut self) -> Option<Word> {
        self.values.pop()
    }

    /// Top value without removing it
    pub fn peek(&self) -> Option<Word> {
        self.values.last().copied()
    }

    /// Value `depth` positions below the top (0 is the top)
    pub fn peek_at(&self, depth: usize) -> Option<Word> {
        self.values
            .len()
            .checked_sub(depth + 1)
            .map(|index| self.values[index])
    }

    /// Pop `N` values, top first. Leaves the stack untouched on underflow.
    pub fn pop_n<const N: usize>(&mut self) -> Result<[Word; N], Underflow> {
        self.require(N)?;
        let mut popped = [0; N];
        for slot in popped.iter_mut() {
            // require() guarantees N values are present
            *slot = self.values.pop().unwrap_or_default();
        }
        Ok(popped)
    }

    /// Check that at least `needed` values are present
    pub fn require(&self, needed: usize) -> Result<(), Underflow> {
        if self.values.len() < needed {
            Err(Underflow {
                needed,
                available: self.values.len(),
            })
        } else {
            Ok(())
        }
    }

    /// Move the top value to the bottom
    pub fn rotate_left(&mut self) {
        if self.values.len() > 1 {
            self.values.rotate_right(1);
        }
    }

    /// Move the bottom value to the top
    pub fn rotate_right(&mut self) {
        if self.values.len() > 1 {
            self.values.rotate_left(1);
        }
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Values from bottom to top (for snapshots and display)
    pub fn values(&self) -> &[Word] {
        &self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pop_n_is_all_or_nothing() {
        let mut stack = Stack::new();
        stack.push(1);
        assert_eq!(
            stack.pop_n::<2>(),
            Err(Underflow {
                needed: 2,
                available: 1
            })
        );
        assert_eq!(stack.values(), &[1]);

        stack.push(2);
        assert_eq!(stack.pop_n::<2>(), Ok([2, 1]));
        assert!(stack.is_empty());
    }

    #[test]
    fn test_rotations() {
        let mut stack = Stack::new();
        for v in [1, 2, 3] {
            stack.push(v);
        }
        stack.rotate_left();
        assert_eq!(stack.values(), &[3, 1, 2]);
        stack.rotate_right();
        assert_eq!(stack.values(), &[1, 2, 3]);
    }

    #[test]
    fn test_peek_at() {
        let mut stack = Stack::new();
        stack.push(10);
        stack.push(20);
        assert_eq!(stack.peek_at(0), Some(20));
        assert_eq!(stack.peek_at(1), Some(10));
        assert_eq!(stack.peek_at(2), None);
    }
}
