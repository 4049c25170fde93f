use std::fs;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use colored::Colorize;
use miette::{bail, IntoDiagnostic, Result};

use ali::env::Env;
use ali::output::Output;
use ali::{AliParser, Debugger, DebuggerOptions, Program, RunState, Status};

/// Ali is an interpreter and debugger for the ALI abstract language.
#[derive(Parser)]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,

    /// Quickly provide a `.ali` file to open in the debugger
    path: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Command {
    /// Run `.ali` file to completion and print the final machine state
    Run {
        /// `.ali` file to run
        name: PathBuf,
        /// Produce minimal output, suited for blackbox tests
        #[arg(short, long)]
        minimal: bool,
    },
    /// Load `.ali` file and step through it with the command prompt
    Debug {
        /// `.ali` file to run
        name: PathBuf,
        /// Read debugger commands from argument
        #[arg(short, long)]
        command: Option<String>,
        /// Produce minimal output, suited for blackbox tests
        #[arg(short, long)]
        minimal: bool,
    },
    /// Check a `.ali` file without running it
    Check {
        /// File to check
        name: PathBuf,
    },
}

fn main() -> miette::Result<()> {
    use MsgColor::*;
    let args = Args::parse();
    let env = Env::from_process();

    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new() //
                .context_lines(ali::DIAGNOSTIC_CONTEXT_LINES)
                .build(),
        )
    }))?;

    if let Some(command) = args.command {
        match command {
            Command::Run { name, minimal } => run(&name, env, minimal),
            Command::Debug {
                name,
                command,
                minimal,
            } => debug(&name, env, DebuggerOptions { command }, minimal),
            Command::Check { name } => {
                file_message(Green, "Checking", &name);
                let program = load(&name)?;
                let count = program.iter().flatten().count();
                message(
                    Green,
                    "Success",
                    &format!(
                        "{count} instruction{} decoded, no errors found!",
                        if count == 1 { "" } else { "s" }
                    ),
                );
                Ok(())
            }
        }
    } else if let Some(path) = args.path {
        debug(&path, env, DebuggerOptions::default(), false)
    } else {
        println!("\n~ ali v{VERSION} ~");
        println!("{}", LOGO.cyan().bold());
        println!("{SHORT_INFO}");
        Ok(())
    }
}

#[allow(unused)]
enum MsgColor {
    Green,
    Cyan,
    Red,
}

fn file_message(color: MsgColor, left: &str, right: &PathBuf) {
    let right = format!("target {}", right.display());
    message(color, left, &right);
}

fn message(color: MsgColor, left: &str, right: &str) {
    if Output::is_minimal() {
        return;
    }
    let left = match color {
        MsgColor::Green => left.green(),
        MsgColor::Cyan => left.cyan(),
        MsgColor::Red => left.red(),
    };
    println!("{left:>12} {right}");
}

/// Decode program file into instructions
fn load(name: &PathBuf) -> Result<Program> {
    let contents = fs::read_to_string(name).into_diagnostic()?;
    AliParser::new(&contents).parse()
}

fn prepare(name: &PathBuf, env: Env, minimal: bool) -> Result<RunState> {
    Output::set_minimal(minimal);
    file_message(MsgColor::Green, "Loading", name);
    let mut state = RunState::from_program(load(name)?);
    state.set_trace(env.trace);
    Ok(state)
}

fn run(name: &PathBuf, env: Env, minimal: bool) -> Result<()> {
    let mut state = prepare(name, env, minimal)?;

    message(MsgColor::Green, "Running", "loaded program");
    if let Err(error) = state.run_to_completion() {
        message(MsgColor::Red, "Failed", &error.to_string());
        print_state(&state);
        bail!("{error}");
    }

    match state.status() {
        Status::StepLimitExceeded => {
            message(MsgColor::Red, "Runaway", &state.status().to_string());
        }
        status => message(MsgColor::Cyan, "Finished", &status.to_string()),
    }
    print_state(&state);

    file_message(MsgColor::Green, "Completed", name);
    Ok(())
}

fn debug(name: &PathBuf, env: Env, opts: DebuggerOptions, minimal: bool) -> Result<()> {
    let mut state = prepare(name, env, minimal)?;

    message(MsgColor::Green, "Debugging", "loaded program");
    Debugger::new(opts).wait_for_commands(&mut state);

    file_message(MsgColor::Green, "Completed", name);
    Ok(())
}

fn print_state(state: &RunState) {
    let out = Output::Normal;
    out.print_registers(state);
    out.print_str("\n");
    out.print_instructions(state);
    out.print_str("\n");
    out.print_data(state);
}

const LOGO: &str = r#"
         _ _
   __ _ | (_)
  / _` || | |
 | (_| || | |
  \__,_||_|_|"#;

const SHORT_INFO: &str = r"
Welcome to ali, an abstract language interpreter.
Please use `-h` or `--help` to access the usage instructions and documentation.
";

const VERSION: &str = env!("CARGO_PKG_VERSION");
