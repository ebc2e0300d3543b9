use crate::interpreter::engine::{Engine, Flow, StepResult};
use crate::io::IoChannel;
use crate::memory::Word;
use crate::program::Command;

impl<IO: IoChannel> Engine<IO> {
    /// Stack manipulation commands
    pub(crate) fn execute_stack_op(&mut self, command: Command) -> StepResult {
        match command {
            Command::Pop => {
                self.pop_main::<1>()?;
            }
            Command::Swap => {
                let [top, second] = self.pop_main::<2>()?;
                self.main.push(top);
                self.main.push(second);
            }
            Command::Dup => {
                self.require_main(1)?;
                let top = self.main.peek().unwrap_or_default();
                self.main.push(top);
            }
            Command::ToAux => {
                let [value] = self.pop_main::<1>()?;
                self.aux.push(value);
            }
            Command::FromAux => {
                let value = self.pop_aux()?;
                self.main.push(value);
            }
            Command::RotateLeft => self.main.rotate_left(),
            Command::RotateRight => self.main.rotate_right(),
            Command::Length => {
                let depth = self.main.len() as Word;
                self.main.push(depth);
            }
            Command::Clear => self.main.clear(),
            _ => unreachable!("not a stack command: {:?}", command),
        }
        Ok(Flow::Advance)
    }
}
