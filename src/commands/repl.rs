use std::io::{self, IsTerminal, Write};

use clap::Args;

use crate::config::config;
use crate::repl::{repl_loop, run_bare, select_mode, ModeFlagOverride, ReplMode, Session};
use crate::runner::Limits;

#[derive(Args, Debug, Default)]
#[command(disable_help_flag = true)]
pub struct ReplArgs {
    /// Force non-interactive bare mode
    #[arg(long = "bare", conflicts_with = "editor")]
    pub bare: bool,

    /// Force interactive mode (errors if stdin is not a TTY)
    #[arg(long = "editor", conflicts_with = "bare")]
    pub editor: bool,

    /// Report where each program halted on stderr
    #[arg(short = 'd', long = "debug")]
    pub debug: bool,

    /// Show this help
    #[arg(short = 'h', long = "help", action = clap::ArgAction::SetTrue)]
    pub help: bool,
}

impl ReplArgs {
    pub fn mode_flag(&self) -> ModeFlagOverride {
        if self.bare {
            ModeFlagOverride::Bare
        } else if self.editor {
            ModeFlagOverride::Editor
        } else {
            ModeFlagOverride::None
        }
    }
}

pub fn run(program: &str, args: ReplArgs) -> i32 {
    if args.help {
        usage_and_exit(program, 0);
    }

    let mode = match select_mode(args.mode_flag()) {
        Ok(m) => m,
        Err(msg) => {
            eprintln!("{program}: {msg}");
            let _ = io::stderr().flush();
            return 1;
        }
    };

    // SIGINT while a program runs: flush and exit(0) immediately
    if let Err(e) = ctrlc::set_handler(|| {
        let _ = io::stdout().flush();
        let _ = io::stderr().flush();
        std::process::exit(0);
    }) {
        eprintln!("{program}: failed to set ctrl+c handler: {e}");
        let _ = io::stderr().flush();
        return 1;
    }

    let config = config();
    let session = Session {
        limits: Limits::resolve(None, None, config),
        report_halt: args.debug,
    };

    let result = match mode {
        ReplMode::Editor => {
            if io::stderr().is_terminal() {
                eprintln!("tri REPL: each line runs on a fresh tape. Empty line or Ctrl+D exits.");
                let _ = io::stderr().flush();
            }
            repl_loop(config, session)
        }
        ReplMode::Bare => run_bare(&mut io::stdin().lock(), session),
    };

    match result {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("{program}: REPL error: {e}");
            let _ = io::stderr().flush();
            1
        }
    }
}

fn usage_and_exit(program: &str, code: i32) -> ! {
    eprintln!(
        r#"Usage:
  {0} repl   # Start a read-eval-print loop

Options:
  --bare              Force non-interactive bare mode
  --editor            Force interactive editor mode (errors if stdin is not a TTY)
  --debug,  -d        Print "halted at instruction <ip> after <n> steps" to stderr after each program
  --help,   -h        Show this help

Notes:
    - Each line is one program and runs on a fresh tape.
    - An empty line, Ctrl+D or EOF ends the session; Ctrl+C exits immediately.
    - A newline is printed after each program's output.
    - Mode selection:
        * Flags: --bare|--editor override environment and auto-detection.
        * Env: TRI_REPL_MODE=bare|editor overrides auto-detection.
        * Auto-detect: interactive editor if stdin is a TTY, otherwise bare.
    - Limits come from TRI_MAX_STEPS / TRI_TIMEOUT_MS or the config file.
"#,
        program
    );
    let _ = io::stderr().flush();
    std::process::exit(code);
}
