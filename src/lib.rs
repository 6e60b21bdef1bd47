//! Tiny stack machine for double-precision arithmetic
//!
//! Programs are flat byte sequences: one opcode byte, optionally followed by
//! operand bytes (8 for `DCONST`, 1 for `MOV`). The machine owns a bounded
//! value stack and two registers, and runs until it reaches `HALT` or fails.
//!
//! ```
//! use machine::opcode::Opcode;
//! use machine::vm;
//!
//! let program = [Opcode::Dconst2, Opcode::Dconst1, Opcode::Sub, Opcode::Print, Opcode::Halt]
//!   .map(u8::from);
//! let mut out = Vec::new();
//! assert_eq!(vm::execute(&program, &mut out), vm::EXIT_SUCCESS);
//! assert_eq!(out, b"1.000000\n");
//! ```

pub mod config;
pub mod error;
pub mod number;
pub mod opcode;
pub mod region;
pub mod stack;
pub mod vm;

pub use error::{Error, Result};
