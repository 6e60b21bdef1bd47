/// Default number of stack slots
pub const STACK_CAPACITY: usize = 256;

/// Limits and compatibility switches for a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
  /// Maximum number of values on the stack
  pub stack_capacity: usize,

  /// Make `LD2` push `r1` instead of `r2`, as the first machines built on
  /// this instruction set did. Programs written against that behaviour rely
  /// on it.
  pub legacy_ld2: bool,
}

impl Config {
  pub fn with_stack_capacity(mut self, capacity: usize) -> Self {
    self.stack_capacity = capacity;
    self
  }

  pub fn with_legacy_ld2(mut self, legacy: bool) -> Self {
    self.legacy_ld2 = legacy;
    self
  }
}

impl Default for Config {
  fn default() -> Self {
    Self {
      stack_capacity: STACK_CAPACITY,
      legacy_ld2: false,
    }
  }
}
