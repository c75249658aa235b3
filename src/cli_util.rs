use std::fs;
use std::io::{self, Write};
use std::path::Path;

use crate::runner::Limits;
use crate::TriError;

/// Print a concise one-line message for a failed run.
/// If `program` is `Some("tri")`, messages are prefixed with "tri: ...".
pub fn print_run_error(program: Option<&str>, err: &TriError, limits: &Limits) {
    let msg = match err {
        TriError::Canceled => match limits.timeout {
            Some(t) => format!(
                "Execution aborted: wall-clock timeout exceeded ({} ms)",
                t.as_millis()
            ),
            None => "Execution aborted: cancelled".to_string(),
        },
        TriError::StepLimitExceeded { .. } => err.to_string(),
        TriError::Io { ip, source } => match program {
            Some(p) => format!("{p}: I/O error at instruction {ip}: {source}"),
            None => format!("I/O error at instruction {ip}: {source}"),
        },
    };
    eprintln!("{msg}");
    let _ = io::stderr().flush();
}

/// Read a whole source file as one string.
pub fn read_source(program: &str, path: &Path) -> Result<String, String> {
    fs::read_to_string(path)
        .map_err(|e| format!("{program}: failed to read {}: {e}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn missing_file_message_names_program_and_path() {
        let path = PathBuf::from("/definitely/not/here.tri");
        let err = read_source("tri", &path).unwrap_err();
        assert!(err.starts_with("tri: failed to read /definitely/not/here.tri"));
    }
}
