use crate::interpreter::engine::{Engine, Flow, StepResult};
use crate::io::IoChannel;
use crate::memory::Word;

impl<IO: IoChannel> Engine<IO> {
    /// `h`: pop address, pop value, write the value at the address
    pub(crate) fn execute_store(&mut self) -> StepResult {
        let [address, value] = self.pop_main::<2>()?;
        self.heap.store(address, value);
        Ok(Flow::Advance)
    }

    /// `H`: pop address, push the value stored there (zero if never written)
    pub(crate) fn execute_load(&mut self) -> StepResult {
        let [address] = self.pop_main::<1>()?;
        self.main.push(self.heap.load(address));
        Ok(Flow::Advance)
    }

    /// `g`: pop y, pop x, push the symbol code at (x, y), or 0 if empty
    pub(crate) fn execute_grid_get(&mut self) -> StepResult {
        let [y, x] = self.pop_main::<2>()?;
        let code = match (usize::try_from(x), usize::try_from(y)) {
            (Ok(x), Ok(y)) => self
                .grid
                .symbol_at(x, y)
                .map_or(0, |symbol| Word::from(u32::from(symbol))),
            _ => 0,
        };
        self.main.push(code);
        Ok(Flow::Advance)
    }
}
