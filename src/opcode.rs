use crate::error::Error;

/// Every instruction the machine understands, tagged with its byte encoding.
///
/// Binary operations pop the right operand `b` first, then the left operand
/// `a`, so the value pushed last is always the rightmost operand.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Opcode {
  /// | Operation | Semantics/RTL      | Assembly |
  /// |-----------|--------------------|----------|
  /// | Halt      | `(stop execution)` | `halt`   |
  Halt = 0x00,

  /// | Operation     | Semantics/RTL | Assembly    |
  /// |---------------|---------------|-------------|
  /// | Push Minus 1  | `push -1.0`   | `dconst_m1` |
  DconstM1 = 0x0A,

  /// | Operation | Semantics/RTL | Assembly   |
  /// |-----------|---------------|------------|
  /// | Push 0    | `push 0.0`    | `dconst_0` |
  Dconst0 = 0x0B,

  /// | Operation | Semantics/RTL | Assembly   |
  /// |-----------|---------------|------------|
  /// | Push 1    | `push 1.0`    | `dconst_1` |
  Dconst1 = 0x0C,

  /// | Operation | Semantics/RTL | Assembly   |
  /// |-----------|---------------|------------|
  /// | Push 2    | `push 2.0`    | `dconst_2` |
  Dconst2 = 0x0D,

  /// Pushes the double encoded by the next eight bytes, most significant
  /// byte first.
  ///
  /// | Operation      | Semantics/RTL             | Assembly           |
  /// |----------------|---------------------------|--------------------|
  /// | Push Immediate | `push vvvvvvvvvvvvvvvv`   | `dconst $v`        |
  Dconst = 0x0F,

  /// | Operation | Semantics/RTL                  | Assembly |
  /// |-----------|--------------------------------|----------|
  /// | Add       | `b ← pop; a ← pop; push a + b` | `add`    |
  Add = 0x60,

  /// | Operation | Semantics/RTL                  | Assembly |
  /// |-----------|--------------------------------|----------|
  /// | Subtract  | `b ← pop; a ← pop; push a − b` | `sub`    |
  Sub = 0x61,

  /// | Operation | Semantics/RTL                  | Assembly |
  /// |-----------|--------------------------------|----------|
  /// | Multiply  | `b ← pop; a ← pop; push a × b` | `mul`    |
  Mul = 0x62,

  /// Fails the run instead of pushing when `b` is zero.
  ///
  /// | Operation | Semantics/RTL                  | Assembly |
  /// |-----------|--------------------------------|----------|
  /// | Divide    | `b ← pop; a ← pop; push a / b` | `div`    |
  Div = 0x64,

  /// | Operation | Semantics/RTL        | Assembly |
  /// |-----------|----------------------|----------|
  /// | Negate    | `b ← pop; push −b`   | `neg`    |
  Neg = 0x70,

  /// Copies one register into the other. The operand byte holds the source
  /// register in its high nibble and the destination in its low nibble; only
  /// `0x12` and `0x21` are defined.
  ///
  /// | Operation     | Semantics/RTL | Assembly     |
  /// |---------------|---------------|--------------|
  /// | Move          | `r[d] ← r[s]` | `mov rs, rd` |
  Mov = 0x90,

  /// | Operation | Semantics/RTL  | Assembly |
  /// |-----------|----------------|----------|
  /// | Nop       | `(do nothing)` | `nop`    |
  Nop = 0xF0,

  /// | Operation | Semantics/RTL     | Assembly |
  /// |-----------|-------------------|----------|
  /// | Print     | `out ← pop`       | `print`  |
  Print = 0xF2,

  /// | Operation | Semantics/RTL | Assembly |
  /// |-----------|---------------|----------|
  /// | Store r1  | `r1 ← pop`    | `st1`    |
  St1 = 0xF4,

  /// | Operation | Semantics/RTL | Assembly |
  /// |-----------|---------------|----------|
  /// | Load r1   | `push r1`     | `ld1`    |
  Ld1 = 0xF5,

  /// | Operation | Semantics/RTL | Assembly |
  /// |-----------|---------------|----------|
  /// | Store r2  | `r2 ← pop`    | `st2`    |
  St2 = 0xF6,

  /// | Operation | Semantics/RTL | Assembly |
  /// |-----------|---------------|----------|
  /// | Load r2   | `push r2`     | `ld2`    |
  Ld2 = 0xF7,
}

impl Opcode {
  /// Number of operand bytes that follow the opcode in the instruction stream
  pub fn operands(self) -> usize {
    match self {
      Self::Dconst => 8,
      Self::Mov => 1,
      _ => 0,
    }
  }

  pub fn mnemonic(self) -> &'static str {
    match self {
      Self::Halt => "HALT",
      Self::DconstM1 => "DCONST_M1",
      Self::Dconst0 => "DCONST_0",
      Self::Dconst1 => "DCONST_1",
      Self::Dconst2 => "DCONST_2",
      Self::Dconst => "DCONST",
      Self::Add => "ADD",
      Self::Sub => "SUB",
      Self::Mul => "MUL",
      Self::Div => "DIV",
      Self::Neg => "NEG",
      Self::Mov => "MOV",
      Self::Nop => "NOP",
      Self::Print => "PRINT",
      Self::St1 => "ST1",
      Self::Ld1 => "LD1",
      Self::St2 => "ST2",
      Self::Ld2 => "LD2",
    }
  }
}

impl TryFrom<u8> for Opcode {
  type Error = Error;

  fn try_from(byte: u8) -> Result<Self, Self::Error> {
    let op = match byte {
      0x00 => Self::Halt,
      0x0A => Self::DconstM1,
      0x0B => Self::Dconst0,
      0x0C => Self::Dconst1,
      0x0D => Self::Dconst2,
      0x0F => Self::Dconst,
      0x60 => Self::Add,
      0x61 => Self::Sub,
      0x62 => Self::Mul,
      0x64 => Self::Div,
      0x70 => Self::Neg,
      0x90 => Self::Mov,
      0xF0 => Self::Nop,
      0xF2 => Self::Print,
      0xF4 => Self::St1,
      0xF5 => Self::Ld1,
      0xF6 => Self::St2,
      0xF7 => Self::Ld2,
      _ => return Err(Error::InvalidOpcode(byte)),
    };
    Ok(op)
  }
}

impl From<Opcode> for u8 {
  fn from(op: Opcode) -> Self {
    op as u8
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  const ALL: [Opcode; 18] = [
    Opcode::Halt,
    Opcode::DconstM1,
    Opcode::Dconst0,
    Opcode::Dconst1,
    Opcode::Dconst2,
    Opcode::Dconst,
    Opcode::Add,
    Opcode::Sub,
    Opcode::Mul,
    Opcode::Div,
    Opcode::Neg,
    Opcode::Mov,
    Opcode::Nop,
    Opcode::Print,
    Opcode::St1,
    Opcode::Ld1,
    Opcode::St2,
    Opcode::Ld2,
  ];

  #[test]
  fn every_defined_byte_decodes() {
    for op in ALL {
      assert_eq!(Opcode::try_from(u8::from(op)).ok(), Some(op));
    }
  }

  #[test]
  fn undefined_bytes_are_rejected() {
    let defined: Vec<u8> = ALL.iter().map(|&op| op.into()).collect();
    let rejected = (0..=u8::MAX).filter(|b| !defined.contains(b)).count();
    assert_eq!(rejected, 256 - ALL.len());
    for byte in [0x01, 0x0E, 0x63, 0xF1, 0xF3, 0xFF] {
      assert!(matches!(
        Opcode::try_from(byte),
        Err(Error::InvalidOpcode(b)) if b == byte
      ));
    }
  }

  #[test]
  fn operand_widths() {
    assert_eq!(Opcode::Dconst.operands(), 8);
    assert_eq!(Opcode::Mov.operands(), 1);
    assert_eq!(Opcode::Add.operands(), 0);
    assert_eq!(Opcode::Halt.operands(), 0);
  }

  #[test]
  fn mnemonics() {
    assert_eq!(Opcode::DconstM1.mnemonic(), "DCONST_M1");
    assert_eq!(Opcode::Ld2.mnemonic(), "LD2");
  }
}
