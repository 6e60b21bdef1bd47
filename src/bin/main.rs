use std::io;
use std::process;

use machine::opcode::Opcode::*;
use machine::vm;
use tracing_subscriber::EnvFilter;

fn main() {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    )
    .with_writer(io::stderr)
    .init();

  // push 2, push 1, subtract, print, halt (prints 1.000000)
  let subtract = [Dconst2, Dconst1, Sub, Print, Halt].map(u8::from);

  #[rustfmt::skip]
  let arithmetic = [
    Dconst1, Dconst2, Add, Print, // 3
    Dconst1, Dconst2, Div, Print, // 0.5
    Dconst1, Dconst2, Mul, Print, // 2
    Dconst1, Dconst2, Neg, Print, // -2
    Halt,
  ]
  .map(u8::from);

  let mut stdout = io::stdout();
  let mut status = vm::EXIT_SUCCESS;
  for program in [&subtract[..], &arithmetic[..]] {
    status = vm::execute(program, &mut stdout);
    println!("Exited vm with code: {status}");
  }
  process::exit(status);
}
