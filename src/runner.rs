//! Evaluation on a worker thread with opt-in limits.
//!
//! Without limits a program runs until it halts, however long that takes.
//! With a step limit or wall-clock timeout the machine is stopped
//! cooperatively and the caller gets the matching [`TriError`].

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use crate::config::Config;
use crate::{Halt, Machine, StepControl, TriError};

/// Execution limits; `None` means unlimited.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Limits {
    pub max_steps: Option<usize>,
    pub timeout: Option<Duration>,
}

impl Limits {
    /// Resolve limits: flags -> env (`TRI_MAX_STEPS`, `TRI_TIMEOUT_MS`) -> config file -> unlimited.
    pub fn resolve(max_steps: Option<usize>, timeout_ms: Option<u64>, config: &Config) -> Self {
        let max_steps = max_steps
            .or_else(|| env_number::<usize>("TRI_MAX_STEPS"))
            .or(config.max_steps);
        let timeout_ms = timeout_ms
            .or_else(|| env_number::<u64>("TRI_TIMEOUT_MS"))
            .or(config.timeout_ms);

        Self {
            max_steps,
            timeout: timeout_ms.map(Duration::from_millis),
        }
    }
}

fn env_number<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|s| s.trim().parse::<T>().ok())
}

/// Compile and run `source` on a worker thread, honoring `limits`.
///
/// A timeout raises the machine's cancel flag and reports [`TriError::Canceled`].
pub fn run_guarded(source: String, debug: bool, limits: Limits) -> Result<Halt, TriError> {
    let cancel = Arc::new(AtomicBool::new(false));
    let (tx, rx) = mpsc::channel::<Result<Halt, TriError>>();
    let cancel_worker = Arc::clone(&cancel);

    thread::spawn(move || {
        let mut machine = Machine::new(&source);
        let ctrl = StepControl::new(limits.max_steps, cancel_worker);
        let res = if debug {
            machine.run_debug_with_control(ctrl)
        } else {
            machine.run_with_control(ctrl)
        };
        let _ = tx.send(res);
    });

    let received = match limits.timeout {
        Some(timeout) => rx.recv_timeout(timeout),
        None => rx.recv().map_err(|_| mpsc::RecvTimeoutError::Disconnected),
    };

    match received {
        Ok(res) => res,
        Err(mpsc::RecvTimeoutError::Timeout) => {
            cancel.store(true, Ordering::Relaxed);
            Err(TriError::Canceled)
        }
        // The worker panicked; treat it like an aborted run.
        Err(mpsc::RecvTimeoutError::Disconnected) => Err(TriError::Canceled),
    }
}
