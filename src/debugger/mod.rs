mod command;
mod source;

use self::command::Command;
use self::source::Source;
use crate::output::{Condition, Output};
use crate::runtime::{RunState, Status};
use crate::{dprint, dprintln};

/// How the prompt is driven. Without `command`, commands come from stdin.
#[derive(Debug, Default)]
pub struct DebuggerOptions {
    pub command: Option<String>,
}

/// Interactive command prompt over a loaded program.
pub struct Debugger {
    command_source: Source,
    /// Amount of instructions executed since last command.
    instruction_count: u32,
}

impl Debugger {
    pub fn new(opts: DebuggerOptions) -> Self {
        Self {
            command_source: Source::from(opts.command),
            instruction_count: 0,
        }
    }

    /// Read and execute commands until `quit` or end of input.
    pub fn wait_for_commands(&mut self, state: &mut RunState) {
        dprintln!(Sometimes, "Program counter at: {}.", state.pc());
        loop {
            Output::Debugger(Condition::Always).start_new_line();

            // Convert `EOF` to `quit` command
            let Some(command) = self.next_command() else {
                break;
            };
            if command == Command::Quit {
                break;
            }
            self.execute(command, state);
        }
    }

    fn next_command(&mut self) -> Option<Command> {
        loop {
            let line = self.command_source.read()?;
            match Command::try_from(line) {
                Ok(command) => return Some(command),
                Err(error) => {
                    dprintln!(Always, "{}", error);
                    dprintln!(Sometimes, "Type `help` for a list of commands.");
                }
            }
        }
    }

    fn execute(&mut self, command: Command, state: &mut RunState) {
        match command {
            Command::Quit => (),

            Command::Help => {
                dprintln!(Always, "{}", include_str!("./help.txt"));
            }

            Command::Step { count } => {
                for _ in 0..count {
                    if !self.step(state) {
                        break;
                    }
                }
                self.finish_execution(state);
            }

            Command::Run => {
                while self.step(state) {}
                self.finish_execution(state);
            }

            Command::Registers => {
                dprintln!(Sometimes, "Registers:");
                Output::Debugger(Condition::Always).print_registers(state);
            }

            Command::Memory => {
                dprintln!(Sometimes, "Instruction memory:");
                Output::Debugger(Condition::Always).print_instructions(state);
                dprintln!(Sometimes, "Data memory:");
                Output::Debugger(Condition::Always).print_data(state);
            }

            Command::Symbols => {
                dprintln!(Sometimes, "Symbols:");
                Output::Debugger(Condition::Always).print_symbols(state);
            }

            Command::Reset => {
                state.reset();
                dprintln!(Always, "Reset program to initial state.");
            }
        }
    }

    /// Execute one step. Returns whether execution may continue.
    fn step(&mut self, state: &mut RunState) -> bool {
        if state.is_terminated() {
            return false;
        }
        match state.single_step() {
            Ok(()) => {
                self.instruction_count += 1;
                !state.is_terminated()
            }
            Err(error) => {
                dprintln!(Always, "{}", error);
                false
            }
        }
    }

    fn finish_execution(&mut self, state: &RunState) {
        if self.instruction_count > 0 {
            dprintln!(
                Sometimes,
                "Executed {} step{}.",
                self.instruction_count,
                if self.instruction_count == 1 { "" } else { "s" },
            );
            self.instruction_count = 0;
        }
        match state.status() {
            Status::Running => (),
            Status::Halted => dprintln!(Always, "Program halted."),
            Status::StepLimitExceeded => {
                dprint!(Always, "Runaway execution: ");
                dprintln!(Always, "{}.", state.status());
            }
            Status::OutOfRange => dprintln!(Always, "Program {}.", state.status()),
        }
        Output::Debugger(Condition::Always).print_registers(state);
    }
}
