use std::io;

use crate::number::format_fixed;
use crate::vm::EXIT_FAILURE;

/// An error that ends a run of the machine
///
/// Every variant is fatal: once a step returns one of these, the machine is
/// halted with a failure status.
#[derive(thiserror::Error, Debug)]
pub enum Error {
  /// `DIV` with a zero divisor. The divisor is reported first.
  #[error("DivisionZeroError: {}, {}", fixed(.b), fixed(.a))]
  DivisionByZero { a: f64, b: f64 },

  #[error("InvalidOpcodeError: 0x{0:02X}")]
  InvalidOpcode(u8),

  #[error("InvalidArgumentError: Operation 0x{opcode:02X} received invalid argument 0x{operand:02X}")]
  InvalidArgument { opcode: u8, operand: u8 },

  #[error("StackOverflowError: stack capacity of {capacity} values exceeded")]
  StackOverflow { capacity: usize },

  #[error("StackUnderflowError: pop from an empty stack")]
  StackUnderflow,

  #[error("ProgramOverrunError: read past end of program at offset {pc}")]
  ProgramOverrun { pc: usize },

  #[error("machine is halted")]
  MachineHalted,

  #[error("failed to write output: {0}")]
  Output(#[from] io::Error),
}

impl Error {
  /// Status reported to the caller for a run that ended with this error
  pub fn status(&self) -> i32 {
    EXIT_FAILURE
  }
}

fn fixed(value: &f64) -> String {
  format_fixed(*value)
}

pub type Result<T> = std::result::Result<T, Error>;
