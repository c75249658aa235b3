//! A small interpreter for a Brainfuck-family tape language.
//!
//! Source text goes through three stages before it runs:
//!
//! 1. [`parse`]: one count-of-one instruction per character.
//! 2. [`reduce`]: runs of `+ - < > . ,` collapse into one instruction with a
//!    count; comment characters are dropped; brackets stay one-to-one.
//! 3. [`resolve`]: every `[` and `]` learns the slot distance to its partner.
//!
//! The resulting stream is executed by a [`Machine`] over a sparse tape of
//! 16-bit cells. Cell values and the data pointer wrap. There is no input
//! instruction: `,` is accepted and ignored. Unbalanced brackets are not
//! reported; their scans run to the edge of the program and the machine uses
//! the resulting distance as-is.
//!
//! ```no_run
//! // Prints "A"
//! tri::eval("++++++++[>++++++++<-]>+.").expect("program should run");
//! println!();
//! ```

pub mod cli_util;
pub mod commands;
pub mod config;
pub mod instr;
pub mod machine;
pub mod parser;
pub mod reduce;
pub mod repl;
pub mod resolve;
pub mod runner;
pub mod tape;
pub mod theme;
pub mod trace;

pub use instr::{Instr, Word};
pub use machine::{Halt, Machine, StepControl, TriError};
pub use parser::parse;
pub use reduce::reduce;
pub use resolve::resolve;
pub use tape::Tape;

/// Run all three stages over `source`.
pub fn compile(source: &str) -> Vec<Instr> {
    resolve(reduce(parse(source)))
}

/// Compile and run `source` on a fresh tape, writing output to stdout.
pub fn eval(source: &str) -> Result<Halt, TriError> {
    Machine::new(source).run()
}
