//! I/O channel between the engine and its driver
//!
//! The engine never touches a console, file, or widget directly. Every print
//! and read goes through an [`IoChannel`] supplied by whoever drives the
//! engine:
//! - [`buffer::BufferedIo`]: preset input and captured output, for tests and
//!   the terminal debugger
//! - [`console::ConsoleIo`]: process stdin/stdout, for headless runs
//!
//! # Reads
//!
//! A read may block until a value is available. A channel that cannot
//! produce a value right now returns [`IoError::Aborted`]; the engine then
//! leaves its state untouched so the same step can be retried once the
//! driver has supplied input. [`IoError::Fault`] is a hard failure and ends
//! the run.

pub mod buffer;
pub mod console;

pub use crate::program::command::IoMode;
pub use buffer::BufferedIo;
pub use console::ConsoleIo;

use crate::memory::Word;
use std::fmt;

/// Value returned by reads once input is exhausted
pub const END_OF_INPUT: Word = -1;

/// Failure reported by a channel read
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IoError {
    /// No value is available yet; the read may be retried
    Aborted,
    /// The channel is broken; the run cannot continue
    Fault(String),
}

impl fmt::Display for IoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IoError::Aborted => write!(f, "read aborted"),
            IoError::Fault(message) => write!(f, "I/O fault: {}", message),
        }
    }
}

impl std::error::Error for IoError {}

/// Output sink and input source used by the engine
pub trait IoChannel {
    /// Emit a value as a decimal number or a character code. Never fails
    /// from the engine's point of view.
    fn write(&mut self, value: Word, mode: IoMode);

    /// Produce the next input value as an integer or a character code
    fn read(&mut self, mode: IoMode) -> Result<Word, IoError>;
}

impl<T: IoChannel + ?Sized> IoChannel for &mut T {
    fn write(&mut self, value: Word, mode: IoMode) {
        (**self).write(value, mode)
    }

    fn read(&mut self, mode: IoMode) -> Result<Word, IoError> {
        (**self).read(mode)
    }
}

impl<T: IoChannel + ?Sized> IoChannel for Box<T> {
    fn write(&mut self, value: Word, mode: IoMode) {
        (**self).write(value, mode)
    }

    fn read(&mut self, mode: IoMode) -> Result<Word, IoError> {
        (**self).read(mode)
    }
}

/// Render a written value the way it appears on an output stream.
///
/// Character codes outside the Unicode scalar range render as U+FFFD.
pub fn render_output(value: Word, mode: IoMode) -> String {
    match mode {
        IoMode::Int => value.to_string(),
        IoMode::Char => u32::try_from(value)
            .ok()
            .and_then(char::from_u32)
            .unwrap_or(char::REPLACEMENT_CHARACTER)
            .to_string(),
    }
}

/// Parse an optionally signed decimal integer at the start of `text`,
/// skipping leading whitespace. Returns the value and the bytes consumed.
pub(crate) fn parse_leading_int(text: &str) -> Option<(Word, usize)> {
    let trimmed = text.trim_start();
    let skipped = text.len() - trimmed.len();
    let bytes = trimmed.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'-') | Some(b'+')) {
        end = 1;
    }
    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    if end == digits_start {
        return None;
    }
    trimmed[..end]
        .parse::<Word>()
        .ok()
        .map(|value| (value, skipped + end))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_output() {
        assert_eq!(render_output(-42, IoMode::Int), "-42");
        assert_eq!(render_output(65, IoMode::Char), "A");
        assert_eq!(render_output(-1, IoMode::Char), "\u{FFFD}");
    }

    #[test]
    fn test_parse_leading_int() {
        assert_eq!(parse_leading_int("  42 rest"), Some((42, 4)));
        assert_eq!(parse_leading_int("-7"), Some((-7, 2)));
        assert_eq!(parse_leading_int("+3x"), Some((3, 2)));
        assert_eq!(parse_leading_int("abc"), None);
        assert_eq!(parse_leading_int("-"), None);
        assert_eq!(parse_leading_int(""), None);
    }
}
