use crate::interpreter::engine::{Engine, Flow, StepResult};
use crate::interpreter::errors::RuntimeError;
use crate::io::IoChannel;
use crate::memory::Word;
use crate::program::command::BinaryOp;

/// Floor division: the quotient rounds toward negative infinity.
/// `None` on overflow; the caller rules out a zero divisor first.
fn floor_div(a: Word, b: Word) -> Option<Word> {
    let quotient = a.checked_div(b)?;
    if a % b != 0 && ((a < 0) != (b < 0)) {
        Some(quotient - 1)
    } else {
        Some(quotient)
    }
}

/// Floor modulo: the result takes the sign of the divisor
fn floor_mod(a: Word, b: Word) -> Option<Word> {
    if b == -1 {
        return Some(0);
    }
    let remainder = a.checked_rem(b)?;
    if remainder != 0 && ((remainder < 0) != (b < 0)) {
        Some(remainder + b)
    } else {
        Some(remainder)
    }
}

impl<IO: IoChannel> Engine<IO> {
    /// Pop `b`, pop `a`, push `a op b`
    pub(crate) fn execute_binary(&mut self, op: BinaryOp) -> StepResult {
        self.require_main(2)?;
        let [b, a] = [
            self.main.peek_at(0).unwrap_or_default(),
            self.main.peek_at(1).unwrap_or_default(),
        ];
        let result = self.apply_binary(op, a, b)?;
        self.pop_main::<2>()?;
        self.main.push(result);
        Ok(Flow::Advance)
    }

    /// Logical not: 1 for zero, 0 otherwise
    pub(crate) fn execute_not(&mut self) -> StepResult {
        let [a] = self.pop_main::<1>()?;
        self.main.push(Word::from(a == 0));
        Ok(Flow::Advance)
    }

    fn apply_binary(&self, op: BinaryOp, a: Word, b: Word) -> Result<Word, RuntimeError> {
        let position = self.ip.position;
        let overflow = || RuntimeError::IntegerOverflow {
            operation: format!("{} {} {}", a, op.symbol(), b),
            position,
        };

        match op {
            BinaryOp::Add => a.checked_add(b).ok_or_else(overflow),
            BinaryOp::Sub => a.checked_sub(b).ok_or_else(overflow),
            BinaryOp::Mul => a.checked_mul(b).ok_or_else(overflow),
            BinaryOp::Div | BinaryOp::Mod => {
                if b == 0 {
                    return Err(RuntimeError::DivisionByZero {
                        operation: format!("{} {} {}", a, op.symbol(), b),
                        position,
                    });
                }
                let result = if op == BinaryOp::Div {
                    floor_div(a, b)
                } else {
                    floor_mod(a, b)
                };
                result.ok_or_else(overflow)
            }
            BinaryOp::And => Ok(a & b),
            BinaryOp::Or => Ok(a | b),
            BinaryOp::Xor => Ok(a ^ b),
            BinaryOp::Equal => Ok(Word::from(a == b)),
            BinaryOp::Less => Ok(Word::from(a < b)),
            BinaryOp::Greater => Ok(Word::from(a > b)),
        }
    }
}
