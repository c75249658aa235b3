//! The tape machine.
//!
//! A [`Machine`] owns a resolved instruction stream, a fresh sparse tape and
//! a data pointer. Running it walks the instruction pointer over the stream
//! until it leaves the program:
//!
//! - `+ -` add or subtract the run length from the current cell (wrapping).
//! - `< >` move the data pointer by the run length (wrapping).
//! - `.` writes the low byte of the current cell, run length (mod 2^16) times.
//! - `[` jumps forward by its distance when the cell is 0.
//! - `]` jumps back by its distance when the cell is not 0.
//! - `,` and anything else only advance the instruction pointer.
//!
//! ```no_run
//! use tri::Machine;
//!
//! let mut machine = Machine::new("++++++++[>++++++++<-]>+.");
//! machine.run().expect("program should run");
//! println!();
//! ```

use std::fmt;
use std::io::{self, Write};
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use crate::instr::{Instr, Word};
use crate::tape::Tape;
use crate::{compile, trace};

/// Errors that can stop a running program early.
#[derive(Debug, thiserror::Error)]
pub enum TriError {
    /// Writing program output failed.
    #[error("I/O error at instruction {ip}: {source}")]
    Io {
        ip: usize,
        #[source]
        source: io::Error,
    },

    /// Execution aborted due to step limit.
    #[error("Execution aborted: step limit exceeded ({limit})")]
    StepLimitExceeded { limit: usize },

    /// Execution aborted through the cancel flag (e.g. a wall-clock timeout).
    #[error("Execution aborted: cancelled")]
    Canceled,
}

/// Opt-in step limit and cooperative cancellation, checked before every instruction.
#[derive(Clone)]
pub struct StepControl {
    pub max_steps: Option<usize>,
    pub cancel_flag: Arc<AtomicBool>,
}

impl StepControl {
    pub fn new(max_steps: Option<usize>, cancel_flag: Arc<AtomicBool>) -> Self {
        Self { max_steps, cancel_flag }
    }
}

/// Where the machine stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Halt {
    /// Terminal instruction pointer; at least the program length.
    pub ip: usize,
    /// Number of instructions executed.
    pub steps: usize,
}

impl fmt::Display for Halt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "halted at instruction {} after {} steps", self.ip, self.steps)
    }
}

type OutputSink = Box<dyn Fn(&[u8]) + Send + Sync>;

pub struct Machine {
    program: Vec<Instr>,
    tape: Tape,
    data_ptr: Word,
    output_sink: Option<OutputSink>,
}

impl Machine {
    /// Compile `source` and prepare a machine with an empty tape.
    pub fn new(source: &str) -> Self {
        Self::from_program(compile(source))
    }

    /// Use an already resolved instruction stream as-is.
    pub fn from_program(program: Vec<Instr>) -> Self {
        Self {
            program,
            tape: Tape::new(),
            data_ptr: 0,
            output_sink: None,
        }
    }

    /// Provide an output sink. When set, `.` sends its bytes here instead of stdout.
    /// Each call receives the whole run of one `.` instruction.
    pub fn set_output_sink<F>(&mut self, sink: F)
    where
        F: Fn(&[u8]) + Send + Sync + 'static,
    {
        self.output_sink = Some(Box::new(sink));
    }

    pub fn program(&self) -> &[Instr] {
        &self.program
    }

    pub fn tape(&self) -> &Tape {
        &self.tape
    }

    pub fn data_ptr(&self) -> Word {
        self.data_ptr
    }

    fn emit(&self, bytes: &[u8]) -> io::Result<()> {
        match self.output_sink.as_ref() {
            Some(sink) => {
                (sink)(bytes);
                Ok(())
            }
            None => io::stdout().write_all(bytes),
        }
    }

    fn execute(&mut self, debug: bool, step_control: Option<&StepControl>) -> Result<Halt, TriError> {
        let mut ip: usize = 0;
        let mut steps: usize = 0;

        while ip < self.program.len() {
            if let Some(ctrl) = step_control {
                if ctrl.cancel_flag.load(Ordering::Relaxed) {
                    return Err(TriError::Canceled);
                }
                if let Some(max) = ctrl.max_steps {
                    if steps >= max {
                        return Err(TriError::StepLimitExceeded { limit: max });
                    }
                }
            }

            let instr = self.program[ip];
            let Instr { op, arg } = instr;

            if debug {
                eprintln!("{}", trace::log(&self.tape, ip, self.data_ptr, &instr));
            }

            // Run lengths are word-sized: they apply modulo 2^16.
            let amount = arg as Word;

            ip = match op {
                '+' => {
                    let cell = self.tape.cell_mut(self.data_ptr);
                    *cell = cell.wrapping_add(amount);
                    ip.wrapping_add(1)
                }
                '-' => {
                    let cell = self.tape.cell_mut(self.data_ptr);
                    *cell = cell.wrapping_sub(amount);
                    ip.wrapping_add(1)
                }
                '>' => {
                    self.data_ptr = self.data_ptr.wrapping_add(amount);
                    ip.wrapping_add(1)
                }
                '<' => {
                    self.data_ptr = self.data_ptr.wrapping_sub(amount);
                    ip.wrapping_add(1)
                }
                '.' => {
                    let byte = *self.tape.cell_mut(self.data_ptr) as u8;
                    self.emit(&vec![byte; usize::from(amount)])
                        .map_err(|source| TriError::Io { ip, source })?;
                    ip.wrapping_add(1)
                }
                '[' => {
                    if *self.tape.cell_mut(self.data_ptr) == 0 {
                        ip.wrapping_add(arg)
                    } else {
                        ip.wrapping_add(1)
                    }
                }
                ']' => {
                    if *self.tape.cell_mut(self.data_ptr) != 0 {
                        ip.wrapping_sub(arg)
                    } else {
                        ip.wrapping_add(1)
                    }
                }
                // ',' has no read behavior; it advances like any unknown operator.
                _ => ip.wrapping_add(1),
            };

            steps += 1;
        }

        if self.output_sink.is_none() {
            io::stdout()
                .flush()
                .map_err(|source| TriError::Io { ip, source })?;
        }

        let halt = Halt { ip, steps };
        if debug {
            eprintln!("{halt}");
        }

        Ok(halt)
    }

    /// Execute the program until the instruction pointer leaves it.
    pub fn run(&mut self) -> Result<Halt, TriError> {
        self.execute(false, None)
    }

    /// Like [`Machine::run`], also tracing every step to stderr.
    pub fn run_debug(&mut self) -> Result<Halt, TriError> {
        self.execute(true, None)
    }

    /// Execute with cooperative cancellation and optional step limit.
    pub fn run_with_control(&mut self, step_control: StepControl) -> Result<Halt, TriError> {
        self.execute(false, Some(&step_control))
    }

    /// Debug-run with cooperative cancellation and optional step limit.
    pub fn run_debug_with_control(&mut self, step_control: StepControl) -> Result<Halt, TriError> {
        self.execute(true, Some(&step_control))
    }
}
