use crate::interpreter::engine::{Engine, Flow, StepResult};
use crate::interpreter::errors::RuntimeError;
use crate::io::IoChannel;
use crate::memory::calls::CallFrame;
use crate::program::{command::JumpCondition, Direction};
use rand::Rng;

impl<IO: IoChannel> Engine<IO> {
    /// `j`: pop y, pop x, continue at (x, y) in the current direction
    pub(crate) fn execute_jump(&mut self) -> StepResult {
        let [y, x] = self.pop_main::<2>()?;
        self.ip.position = self.grid.wrap_position(x, y);
        Ok(Flow::Jumped)
    }

    /// `y` / `n`: pop y, pop x, pop a condition; jump like `j` when it holds
    pub(crate) fn execute_jump_if(&mut self, condition: JumpCondition) -> StepResult {
        let [y, x, value] = self.pop_main::<3>()?;
        if condition.holds(value) {
            self.ip.position = self.grid.wrap_position(x, y);
            Ok(Flow::Jumped)
        } else {
            Ok(Flow::Advance)
        }
    }

    /// `F`: pop y, pop x, remember the call site, continue at (x, y)
    pub(crate) fn execute_call(&mut self) -> StepResult {
        let [y, x] = self.pop_main::<2>()?;
        self.calls.push_frame(CallFrame::from_call_site(self.ip));
        self.ip.position = self.grid.wrap_position(x, y);
        Ok(Flow::Jumped)
    }

    /// `R`: resume one cell past the innermost call site, heading the way
    /// the IP was heading when the call was made
    pub(crate) fn execute_return(&mut self) -> StepResult {
        let frame = self
            .calls
            .pop_frame()
            .ok_or(RuntimeError::InvalidReturn {
                position: self.ip.position,
            })?;
        self.ip.direction = frame.return_direction;
        self.ip.position = self
            .grid
            .advance(frame.return_position, frame.return_direction);
        Ok(Flow::Jumped)
    }

    /// `?`: head off in a random direction
    pub(crate) fn execute_random_turn(&mut self) -> StepResult {
        let index = self.rng.gen_range(0..Direction::ALL.len());
        self.ip.direction = Direction::ALL[index];
        Ok(Flow::Advance)
    }
}
