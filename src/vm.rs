use std::io::Write;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::number::{self, format_fixed};
use crate::opcode::Opcode;
use crate::region::Region;
use crate::stack::Stack;

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;

/// Lifecycle of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
  Running,
  /// Stopped for good, with the status handed back to the caller
  Halted(i32),
}

/// A stack machine over doubles, with two scalar registers.
///
/// A `Vm` is meant for a single run: build it, feed it a program with
/// [`Vm::run`] (or one instruction at a time with [`Vm::step`]) and throw it
/// away once it halts.
#[derive(Debug)]
pub struct Vm {
  // offset of the next opcode to fetch
  pc: usize,
  stack: Stack,
  r1: f64,
  r2: f64,
  state: State,
  config: Config,
}

impl Vm {
  /// Create a new machine with the default limits
  pub fn new() -> Self {
    Self::with_config(Config::default())
  }

  pub fn with_config(config: Config) -> Self {
    Self {
      pc: 0,
      stack: Stack::new(config.stack_capacity),
      r1: 0.0,
      r2: 0.0,
      state: State::Running,
      config,
    }
  }

  /// Execute a single instruction.
  ///
  /// Any error halts the machine with [`EXIT_FAILURE`] before it is returned,
  /// and stepping a halted machine fails with [`Error::MachineHalted`].
  pub fn step<R, W>(&mut self, region: &R, out: &mut W) -> Result<()>
  where
    R: Region + ?Sized,
    W: Write + ?Sized,
  {
    if self.state != State::Running {
      return Err(Error::MachineHalted);
    }
    let mut task = Task::new(self, region, out);
    let result = task.run();
    if result.is_err() {
      self.state = State::Halted(EXIT_FAILURE);
    }
    result
  }

  /// Step until the machine halts, returning the exit status
  pub fn run<R, W>(&mut self, region: &R, out: &mut W) -> Result<i32>
  where
    R: Region + ?Sized,
    W: Write + ?Sized,
  {
    loop {
      if let State::Halted(status) = self.state {
        tracing::debug!(status, depth = self.stack.len(), "machine halted");
        return Ok(status);
      }
      self.step(region, out)?;
    }
  }

  pub fn state(&self) -> State {
    self.state
  }

  pub fn pc(&self) -> usize {
    self.pc
  }

  pub fn r1(&self) -> f64 {
    self.r1
  }

  pub fn r2(&self) -> f64 {
    self.r2
  }

  pub fn stack(&self) -> &Stack {
    &self.stack
  }
}

impl Default for Vm {
  fn default() -> Self {
    Self::new()
  }
}

/// Run `region` to completion on a fresh machine, reporting any failure to
/// `out` and returning the exit status
pub fn execute<R, W>(region: &R, out: &mut W) -> i32
where
  R: Region + ?Sized,
  W: Write + ?Sized,
{
  execute_with(Config::default(), region, out)
}

pub fn execute_with<R, W>(config: Config, region: &R, out: &mut W) -> i32
where
  R: Region + ?Sized,
  W: Write + ?Sized,
{
  let mut vm = Vm::with_config(config);
  match vm.run(region, out) {
    Ok(status) => status,
    Err(err) => {
      tracing::error!(pc = vm.pc, %err, "run failed");
      if let Err(io) = writeln!(out, "{err}") {
        tracing::error!(%io, "failed to report error");
      }
      err.status()
    }
  }
}

struct Task<'vm, 'region, 'out, R: ?Sized, W: ?Sized> {
  vm: &'vm mut Vm,
  region: &'region R,
  out: &'out mut W,
}

impl<'vm, 'region, 'out, R, W> Task<'vm, 'region, 'out, R, W>
where
  R: Region + ?Sized,
  W: Write + ?Sized,
{
  fn new(vm: &'vm mut Vm, region: &'region R, out: &'out mut W) -> Self {
    Self { vm, region, out }
  }

  #[inline]
  fn eat(&mut self) -> Result<u8> {
    let pc = self.vm.pc;
    let byte = *self
      .region
      .instructions()
      .get(pc)
      .ok_or(Error::ProgramOverrun { pc })?;
    self.vm.pc += 1;
    Ok(byte)
  }

  fn eat_constant(&mut self) -> Result<f64> {
    let mut bytes = [0; number::WIDTH];
    for byte in &mut bytes {
      *byte = self.eat()?;
    }
    Ok(number::decode(bytes))
  }

  fn push(&mut self, value: f64) -> Result<()> {
    self.vm.stack.push(value)
  }

  fn pop(&mut self) -> Result<f64> {
    self.vm.stack.pop()
  }

  fn run(&mut self) -> Result<()> {
    let pc = self.vm.pc;
    let op = Opcode::try_from(self.eat()?)?;
    tracing::trace!(pc, op = op.mnemonic(), depth = self.vm.stack.len());
    match op {
      Opcode::Halt => self.vm.state = State::Halted(EXIT_SUCCESS),
      Opcode::Nop => {}
      Opcode::DconstM1 => self.push(-1.0)?,
      Opcode::Dconst0 => self.push(0.0)?,
      Opcode::Dconst1 => self.push(1.0)?,
      Opcode::Dconst2 => self.push(2.0)?,
      Opcode::Dconst => {
        let value = self.eat_constant()?;
        self.push(value)?;
      }
      Opcode::Add => binary(self, |a, b| Ok(a + b))?,
      Opcode::Sub => binary(self, |a, b| Ok(a - b))?,
      Opcode::Mul => binary(self, |a, b| Ok(a * b))?,
      Opcode::Div => binary(self, divide)?,
      Opcode::Neg => {
        let b = self.pop()?;
        self.push(-b)?;
      }
      Opcode::St1 => self.vm.r1 = self.pop()?,
      Opcode::St2 => self.vm.r2 = self.pop()?,
      Opcode::Ld1 => self.push(self.vm.r1)?,
      Opcode::Ld2 => {
        let value = if self.vm.config.legacy_ld2 {
          self.vm.r1
        } else {
          self.vm.r2
        };
        self.push(value)?;
      }
      Opcode::Print => print(self)?,
      Opcode::Mov => mov(self)?,
    }
    Ok(())
  }
}

// b ← pop; a ← pop; push f(a, b)
fn binary<R, W, F>(task: &mut Task<'_, '_, '_, R, W>, f: F) -> Result<()>
where
  R: Region + ?Sized,
  W: Write + ?Sized,
  F: FnOnce(f64, f64) -> Result<f64>,
{
  let b = task.pop()?;
  let a = task.pop()?;
  let value = f(a, b)?;
  task.push(value)
}

fn divide(a: f64, b: f64) -> Result<f64> {
  // also catches -0.0
  if b == 0.0 {
    return Err(Error::DivisionByZero { a, b });
  }
  Ok(a / b)
}

// out ← pop
fn print<R, W>(task: &mut Task<'_, '_, '_, R, W>) -> Result<()>
where
  R: Region + ?Sized,
  W: Write + ?Sized,
{
  let value = task.pop()?;
  writeln!(task.out, "{}", format_fixed(value))?;
  Ok(())
}

// r[d] ← r[s], with s and d packed as 0xSD
fn mov<R, W>(task: &mut Task<'_, '_, '_, R, W>) -> Result<()>
where
  R: Region + ?Sized,
  W: Write + ?Sized,
{
  let operand = task.eat()?;
  match (operand >> 4, operand & 0xF) {
    (1, 2) => task.vm.r2 = task.vm.r1,
    (2, 1) => task.vm.r1 = task.vm.r2,
    _ => {
      return Err(Error::InvalidArgument {
        opcode: Opcode::Mov.into(),
        operand,
      })
    }
  }
  Ok(())
}
