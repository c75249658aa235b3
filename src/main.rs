use std::env;
use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tri::commands::{repl::ReplArgs, run::RunArgs};

fn print_top_usage_and_exit(program: &str, code: i32) -> ! {
    eprintln!(
        r#"Usage:
  {0} <FILE>                          # Run the program in FILE
  {0}                                 # Start a REPL (one program per line)
  {0} run [--debug|-d] "<code>"       # Run code given on the command line
  {0} run [--debug|-d] --file <PATH>  # Run code loaded from file
  {0} repl [--bare|--editor]          # Start a REPL explicitly

Run "{0} <subcommand> --help" for more info.
"#,
        program
    );
    let _ = io::stderr().flush();
    std::process::exit(code);
}

#[derive(Parser, Debug)]
#[command(
    name = "tri",
    disable_help_flag = true,
    disable_help_subcommand = true,
    args_conflicts_with_subcommands = true
)]
struct Cli {
    /// Show this help
    #[arg(short = 'h', long = "help", action = clap::ArgAction::SetTrue)]
    help: bool,

    /// Program file to run
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    Run(RunArgs),
    Repl(ReplArgs),
}

fn main() {
    // Program name for help rendering and error prefixes
    let program = env::args().next().unwrap_or_else(|| String::from("tri"));

    let cli = Cli::parse();

    if cli.help {
        print_top_usage_and_exit(&program, 0);
    }

    let code = match (cli.command, cli.file) {
        (Some(Command::Run(args)), _) => tri::commands::run::run(&program, args),
        (Some(Command::Repl(args)), _) => tri::commands::repl::run(&program, args),
        (None, Some(file)) => tri::commands::run::run(
            &program,
            RunArgs {
                file: Some(file),
                ..RunArgs::default()
            },
        ),
        (None, None) => tri::commands::repl::run(&program, ReplArgs::default()),
    };

    std::process::exit(code);
}
