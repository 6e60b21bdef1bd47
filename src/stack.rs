use crate::error::{Error, Result};

/// Bounded stack of doubles
///
/// The capacity is fixed at construction; pushing onto a full stack or
/// popping an empty one is an error rather than a silent overrun.
#[derive(Debug, Clone)]
pub struct Stack {
  values: Vec<f64>,
  capacity: usize,
}

impl Stack {
  pub fn new(capacity: usize) -> Self {
    Self {
      values: Vec::with_capacity(capacity),
      capacity,
    }
  }

  pub fn push(&mut self, value: f64) -> Result<()> {
    if self.values.len() >= self.capacity {
      return Err(Error::StackOverflow {
        capacity: self.capacity,
      });
    }
    self.values.push(value);
    Ok(())
  }

  pub fn pop(&mut self) -> Result<f64> {
    self.values.pop().ok_or(Error::StackUnderflow)
  }

  pub fn top(&self) -> Option<f64> {
    self.values.last().copied()
  }

  /// Index of the top element, `-1` when empty
  pub fn pointer(&self) -> isize {
    self.values.len() as isize - 1
  }

  pub fn len(&self) -> usize {
    self.values.len()
  }

  pub fn is_empty(&self) -> bool {
    self.values.is_empty()
  }

  pub fn capacity(&self) -> usize {
    self.capacity
  }
}
