/// A read-only region of bytecode the virtual machine may execute
pub trait Region {
  fn instructions(&self) -> &[u8];
}

/// A `Chunk` is an owned program, for callers that build bytecode at runtime
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Chunk {
  instructions: Vec<u8>,
}

impl From<Vec<u8>> for Chunk {
  fn from(instructions: Vec<u8>) -> Self {
    Self { instructions }
  }
}

impl Region for Chunk {
  fn instructions(&self) -> &[u8] {
    &self.instructions
  }
}

impl Region for [u8] {
  fn instructions(&self) -> &[u8] {
    self
  }
}

impl Region for Vec<u8> {
  fn instructions(&self) -> &[u8] {
    self
  }
}

impl<const N: usize> Region for [u8; N] {
  fn instructions(&self) -> &[u8] {
    self
  }
}
