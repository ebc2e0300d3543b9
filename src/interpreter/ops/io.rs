use crate::interpreter::engine::{Engine, Flow, Interrupt, StepResult};
use crate::interpreter::errors::RuntimeError;
use crate::io::{IoChannel, IoError, IoMode};

impl<IO: IoChannel> Engine<IO> {
    /// `N` / `A`: pop a value and write it
    pub(crate) fn execute_print(&mut self, mode: IoMode) -> StepResult {
        let [value] = self.pop_main::<1>()?;
        self.io.write(value, mode);
        Ok(Flow::Advance)
    }

    /// `i` / `I`: read a value and push it.
    ///
    /// Nothing is mutated before the channel answers, so an aborted read can
    /// simply be retried.
    pub(crate) fn execute_read(&mut self, mode: IoMode) -> StepResult {
        match self.io.read(mode) {
            Ok(value) => {
                self.main.push(value);
                Ok(Flow::Advance)
            }
            Err(IoError::Aborted) => Err(Interrupt::Aborted(mode)),
            Err(IoError::Fault(message)) => Err(Interrupt::Fatal(RuntimeError::IoFault {
                message,
                position: self.ip.position,
            })),
        }
    }
}
