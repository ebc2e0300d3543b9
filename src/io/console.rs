//! Process console I/O channel

use super::{parse_leading_int, render_output, IoChannel, IoError, IoMode, END_OF_INPUT};
use crate::memory::Word;
use std::io::{self, BufRead, Write};

/// Reads stdin line by line and writes to stdout
#[derive(Debug, Default)]
pub struct ConsoleIo {
    /// Unconsumed part of the last line read from stdin
    line: String,
    eof: bool,
}

impl ConsoleIo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Console that answers reads from `input` before falling back to stdin
    pub fn with_input(input: &str) -> Self {
        ConsoleIo {
            line: input.to_string(),
            eof: false,
        }
    }

    /// Make sure `line` holds unconsumed text, reading more if needed.
    /// Returns false at end of input.
    fn fill(&mut self, skip_blank: bool) -> Result<bool, IoError> {
        loop {
            let pending = if skip_blank {
                !self.line.trim().is_empty()
            } else {
                !self.line.is_empty()
            };
            if pending {
                return Ok(true);
            }
            if self.eof {
                return Ok(false);
            }
            self.line.clear();
            let read = io::stdin()
                .lock()
                .read_line(&mut self.line)
                .map_err(|e| IoError::Fault(e.to_string()))?;
            if read == 0 {
                self.eof = true;
            }
        }
    }
}

impl IoChannel for ConsoleIo {
    fn write(&mut self, value: Word, mode: IoMode) {
        let mut stdout = io::stdout().lock();
        // Output failures belong to the console, not to the program
        let _ = stdout.write_all(render_output(value, mode).as_bytes());
        let _ = stdout.flush();
    }

    fn read(&mut self, mode: IoMode) -> Result<Word, IoError> {
        match mode {
            IoMode::Char => {
                if !self.fill(false)? {
                    return Ok(END_OF_INPUT);
                }
                match self.line.chars().next() {
                    Some(c) => {
                        self.line.drain(..c.len_utf8());
                        Ok(Word::from(u32::from(c)))
                    }
                    None => Ok(END_OF_INPUT),
                }
            }
            IoMode::Int => {
                if !self.fill(true)? {
                    return Ok(END_OF_INPUT);
                }
                match parse_leading_int(&self.line) {
                    Some((value, consumed)) => {
                        self.line.drain(..consumed);
                        Ok(value)
                    }
                    None => Err(IoError::Fault(format!(
                        "expected an integer, found {:?}",
                        self.line.trim()
                    ))),
                }
            }
        }
    }
}
