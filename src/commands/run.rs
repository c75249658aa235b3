use std::io::{self, Write};
use std::path::PathBuf;

use clap::Args;

use crate::cli_util::{print_run_error, read_source};
use crate::config::config;
use crate::runner::{run_guarded, Limits};

#[derive(Args, Debug, Default)]
#[command(disable_help_flag = true)]
pub struct RunArgs {
    /// Trace every step to stderr and report where the program halted
    #[arg(short = 'd', long = "debug")]
    pub debug: bool,

    /// Read source from PATH instead of positional "<code>"
    #[arg(short = 'f', long = "file", value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Concatenated source parts
    #[arg(value_name = "code", trailing_var_arg = true, allow_hyphen_values = true)]
    pub code: Vec<String>,

    /// Wall-clock timeout in milliseconds (fallback TRI_TIMEOUT_MS; default unlimited)
    #[arg(long = "timeout", value_name = "MS")]
    pub timeout_ms: Option<u64>,

    /// Maximum interpreter steps before abort (fallback TRI_MAX_STEPS; default unlimited)
    #[arg(long = "max-steps", value_name = "N")]
    pub max_steps: Option<usize>,

    /// Show this help
    #[arg(short = 'h', long = "help", action = clap::ArgAction::SetTrue)]
    pub help: bool,
}

pub fn run(program: &str, args: RunArgs) -> i32 {
    if args.help {
        usage_and_exit(program, 0);
    }

    let RunArgs {
        debug,
        file,
        code,
        timeout_ms,
        max_steps,
        ..
    } = args;

    if file.is_none() && code.is_empty() {
        usage_and_exit(program, 2);
    }

    if file.is_some() && !code.is_empty() {
        eprintln!("{program}: cannot use positional code together with --file");
        usage_and_exit(program, 2);
    }

    let source = match file {
        Some(path) => match read_source(program, &path) {
            Ok(s) => s,
            Err(msg) => {
                eprintln!("{msg}");
                let _ = io::stderr().flush();
                return 1;
            }
        },
        None => code.join(""),
    };

    let limits = Limits::resolve(max_steps, timeout_ms, config());

    let exit_code = match run_guarded(source, debug, limits) {
        Ok(_) => 0,
        Err(err) => {
            print_run_error(Some(program), &err, &limits);
            1
        }
    };

    // For readability, ensure output ends with a newline
    println!();
    let _ = io::stdout().flush();
    exit_code
}

fn usage_and_exit(program: &str, code: i32) -> ! {
    eprintln!(
        r#"Usage:
  {0} run [--debug|-d] "<code>"
  {0} run [--debug|-d] --file <PATH>

Options:
  --file,  -f <PATH>  Read source from PATH instead of positional "<code>"
  --debug, -d         Trace each step as [ip:ptr]: cell, op on stderr
  --timeout <MS>      Abort after MS milliseconds (env TRI_TIMEOUT_MS)
  --max-steps <N>     Abort after N instructions (env TRI_MAX_STEPS)
  --help,  -h         Show this help

Notes:
- Characters outside of +-<>.,[] are comments.
- Code may start with `-`; flags must come before the code.
- `,` is accepted but reads nothing.
- Cells and the data pointer are 16-bit and wrap; `.` writes the low byte.
"#,
        program
    );
    let _ = io::stderr().flush();
    std::process::exit(code);
}
