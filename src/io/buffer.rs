//! In-memory I/O channel
//!
//! [`BufferedIo`] reads from a preset input string and appends everything
//! the program prints to an output string. It is the channel used by tests
//! and by the terminal debugger, which feeds it input lines as the user
//! types them.

use super::{parse_leading_int, render_output, IoChannel, IoError, IoMode, END_OF_INPUT};
use crate::memory::Word;

/// Preset input and captured output
#[derive(Debug, Clone, Default)]
pub struct BufferedIo {
    input: String,
    cursor: usize,
    output: String,
    interactive: bool,
}

impl BufferedIo {
    /// Channel with fixed input; reads past the end yield [`END_OF_INPUT`]
    pub fn new(input: impl Into<String>) -> Self {
        BufferedIo {
            input: input.into(),
            ..Self::default()
        }
    }

    /// Channel whose reads abort when input runs out, so a driver can ask
    /// the user for more and retry the step
    pub fn interactive() -> Self {
        BufferedIo {
            interactive: true,
            ..Self::default()
        }
    }

    /// Append more input
    pub fn feed(&mut self, text: &str) {
        self.input.push_str(text);
    }

    /// Everything printed so far
    pub fn output(&self) -> &str {
        &self.output
    }

    /// Input not yet consumed
    pub fn remaining_input(&self) -> &str {
        &self.input[self.cursor..]
    }

    /// Clear output and consumed input
    pub fn reset(&mut self) {
        self.output.clear();
        self.input.clear();
        self.cursor = 0;
    }

    fn exhausted(&self) -> Result<Word, IoError> {
        if self.interactive {
            Err(IoError::Aborted)
        } else {
            Ok(END_OF_INPUT)
        }
    }
}

impl IoChannel for BufferedIo {
    fn write(&mut self, value: Word, mode: IoMode) {
        self.output.push_str(&render_output(value, mode));
    }

    fn read(&mut self, mode: IoMode) -> Result<Word, IoError> {
        let remaining = &self.input[self.cursor..];
        match mode {
            IoMode::Char => match remaining.chars().next() {
                Some(c) => {
                    self.cursor += c.len_utf8();
                    Ok(Word::from(u32::from(c)))
                }
                None => self.exhausted(),
            },
            IoMode::Int => match parse_leading_int(remaining) {
                Some((value, consumed)) => {
                    self.cursor += consumed;
                    Ok(value)
                }
                None if remaining.trim().is_empty() => self.exhausted(),
                None => Err(IoError::Fault(format!(
                    "expected an integer, found {:?}",
                    remaining.split_whitespace().next().unwrap_or_default()
                ))),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_reads_then_end_of_input() {
        let mut io = BufferedIo::new("hé");
        assert_eq!(io.read(IoMode::Char), Ok('h' as Word));
        assert_eq!(io.read(IoMode::Char), Ok('é' as Word));
        assert_eq!(io.read(IoMode::Char), Ok(END_OF_INPUT));
    }

    #[test]
    fn test_int_reads() {
        let mut io = BufferedIo::new("12 -5\n");
        assert_eq!(io.read(IoMode::Int), Ok(12));
        assert_eq!(io.read(IoMode::Int), Ok(-5));
        assert_eq!(io.read(IoMode::Int), Ok(END_OF_INPUT));
    }

    #[test]
    fn test_interactive_aborts_until_fed() {
        let mut io = BufferedIo::interactive();
        assert_eq!(io.read(IoMode::Int), Err(IoError::Aborted));
        io.feed("8 x\n");
        assert_eq!(io.read(IoMode::Int), Ok(8));
        assert_eq!(io.remaining_input(), " x\n");
    }

    #[test]
    fn test_garbage_int_is_fault() {
        let mut io = BufferedIo::new("abc");
        assert!(matches!(io.read(IoMode::Int), Err(IoError::Fault(_))));
    }
}
