//! Call stack implementation
//!
//! `F` pushes a [`CallFrame`] recording where the call happened and which
//! way the IP was heading; `R` pops it and resumes one cell past the call
//! site in that direction. The call stack is separate from the value stacks
//! so subroutines can freely use the main stack for arguments and results.

use crate::program::{Direction, InstructionPointer, Position};

/// Return record pushed by a call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallFrame {
    pub return_position: Position,
    pub return_direction: Direction,
}

impl CallFrame {
    /// Frame for a call made by `ip`
    pub fn from_call_site(ip: InstructionPointer) -> Self {
        CallFrame {
            return_position: ip.position,
            return_direction: ip.direction,
        }
    }
}

/// The call stack
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallStack {
    frames: Vec<CallFrame>,
}

impl CallStack {
    pub fn new() -> Self {
        CallStack { frames: Vec::new() }
    }

    /// Push a new return frame
    pub fn push_frame(&mut self, frame: CallFrame) {
        self.frames.push(frame);
    }

    /// Pop the innermost return frame
    pub fn pop_frame(&mut self) -> Option<CallFrame> {
        self.frames.pop()
    }

    /// Get the depth of the call stack
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn clear(&mut self) {
        self.frames.clear();
    }

    /// All frames, outermost first (for snapshots and display)
    pub fn frames(&self) -> &[CallFrame] {
        &self.frames
    }
}
