use std::env;
use std::io::{self, BufRead, IsTerminal, Write};

use nu_ansi_term::Style;
use reedline::{
    DefaultPrompt, DefaultPromptSegment, FileBackedHistory, Highlighter, Reedline, Signal,
    StyledText,
};

use crate::cli_util;
use crate::config::Config;
use crate::runner::{run_guarded, Limits};
use crate::theme::Palette;

/// Per-session evaluation settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Session {
    pub limits: Limits,
    /// Print where each program halted to stderr.
    pub report_halt: bool,
}

/// Interactive session: one line per evaluation, an empty line ends it.
pub fn repl_loop(config: &Config, session: Session) -> io::Result<()> {
    let mut editor = init_line_editor(config)?;
    let prompt = DefaultPrompt::new(
        DefaultPromptSegment::Basic(config.prompt.clone()),
        DefaultPromptSegment::Empty,
    );

    loop {
        match editor.read_line(&prompt) {
            Ok(Signal::Success(line)) => {
                if line.is_empty() {
                    return Ok(());
                }
                execute_line(&line, session);
            }
            Ok(Signal::CtrlC) | Ok(Signal::CtrlD) => {
                println!();
                io::stdout().flush()?;
                return Ok(());
            }
            Err(e) => {
                eprintln!("repl: editor error: {e}");
                let _ = io::stderr().flush();
                return Ok(());
            }
        }
    }
}

fn init_line_editor(config: &Config) -> io::Result<Reedline> {
    // In-memory history; nothing is written to disk.
    let history = FileBackedHistory::new(config.history_size)
        .map_err(|e| io::Error::other(e.to_string()))?;

    Ok(Reedline::create()
        .with_highlighter(Box::new(OperatorHighlighter::new(config.colors)))
        .with_history(Box::new(history)))
}

/// Non-interactive session over `input`: evaluates line by line until an empty line or EOF.
pub fn run_bare<R: BufRead>(input: &mut R, session: Session) -> io::Result<()> {
    while let Some(line) = next_line(input)? {
        execute_line(&line, session);

        // Test hook: TRI_REPL_ONCE=1 stops after one evaluation
        if env::var("TRI_REPL_ONCE").ok().as_deref() == Some("1") {
            break;
        }
    }
    Ok(())
}

/// Read the next source line without its line terminator.
/// `None` on EOF or on an empty line, both of which end the session.
pub fn next_line<R: BufRead>(input: &mut R) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }

    let trimmed = line.strip_suffix('\n').unwrap_or(&line);
    let trimmed = trimmed.strip_suffix('\r').unwrap_or(trimmed);
    if trimmed.is_empty() {
        Ok(None)
    } else {
        Ok(Some(trimmed.to_string()))
    }
}

/// Evaluate one source line on a fresh tape.
/// - Program output goes to stdout, followed by a newline.
/// - Aborts, and the halt position when requested, are reported on stderr.
fn execute_line(source: &str, session: Session) {
    match run_guarded(source.to_string(), false, session.limits) {
        Ok(halt) if session.report_halt => {
            eprintln!("{halt}");
            let _ = io::stderr().flush();
        }
        Ok(_) => {}
        Err(err) => cli_util::print_run_error(None, &err, &session.limits),
    }
    println!();
    let _ = io::stdout().flush();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplMode {
    Bare,
    Editor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeFlagOverride {
    None,
    Bare,
    Editor,
}

/// Pick the session mode: flags -> `TRI_REPL_MODE` -> whether stdin is a TTY.
pub fn select_mode(flag: ModeFlagOverride) -> Result<ReplMode, String> {
    let stdin_is_tty = io::stdin().is_terminal();

    match flag {
        ModeFlagOverride::Bare => return Ok(ReplMode::Bare),
        ModeFlagOverride::Editor if !stdin_is_tty => {
            return Err("cannot start editor: stdin is not a TTY (use --bare or TRI_REPL_MODE=bare)".to_string());
        }
        ModeFlagOverride::Editor => return Ok(ReplMode::Editor),
        ModeFlagOverride::None => {}
    }

    if let Ok(val) = env::var("TRI_REPL_MODE") {
        return match val.trim().to_ascii_lowercase().as_str() {
            "bare" => Ok(ReplMode::Bare),
            "editor" if !stdin_is_tty => {
                Err("cannot start editor: stdin is not a TTY (use TRI_REPL_MODE=bare)".to_string())
            }
            "editor" => Ok(ReplMode::Editor),
            _ => Err(format!("invalid TRI_REPL_MODE value: {val}, must be 'bare' or 'editor'")),
        };
    }

    if stdin_is_tty {
        Ok(ReplMode::Editor)
    } else {
        Ok(ReplMode::Bare)
    }
}

/// Colors each operator; runs of same-styled characters share one span.
struct OperatorHighlighter {
    palette: Palette,
}

impl OperatorHighlighter {
    fn new(palette: Palette) -> Self {
        Self { palette }
    }

    fn style_for(&self, ch: char) -> Style {
        let style = Style::new().fg(self.palette.color_for(ch));
        if crate::instr::is_operator(ch) {
            style.bold()
        } else {
            style
        }
    }
}

impl Highlighter for OperatorHighlighter {
    fn highlight(&self, line: &str, _cursor: usize) -> StyledText {
        let mut out = StyledText::new();
        let mut current: Option<(Style, String)> = None;

        for ch in line.chars() {
            let style = self.style_for(ch);
            if let Some((s, text)) = current.as_mut() {
                if *s == style {
                    text.push(ch);
                    continue;
                }
            }
            if let Some(span) = current.replace((style, ch.to_string())) {
                out.push(span);
            }
        }

        if let Some(span) = current {
            out.push(span);
        }
        out
    }
}
