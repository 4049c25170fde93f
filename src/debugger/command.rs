use std::{error::Error, fmt};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Command {
    Help,
    Step { count: u16 },
    Run,
    Registers,
    Memory,
    Symbols,
    Reset,
    Quit,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CommandName {
    Help,
    Step,
    Run,
    Registers,
    Memory,
    Symbols,
    Reset,
    Quit,
}

/// Error parsing a command.
#[derive(Debug, PartialEq)]
pub enum CommandError {
    InvalidCommand {
        command_name: String,
    },
    InvalidArgument {
        command_name: CommandName,
        error: ArgumentError,
    },
}

/// Error parsing command arguments.
#[derive(Debug, PartialEq)]
pub enum ArgumentError {
    TooManyArguments { expected_count: u8, actual_count: u8 },
    InvalidCount { string: String },
}

impl CommandName {
    /// Full names, then single-letter aliases.
    const NAMES: &'static [(&'static str, CommandName)] = &[
        ("help", CommandName::Help),
        ("step", CommandName::Step),
        ("run", CommandName::Run),
        ("registers", CommandName::Registers),
        ("memory", CommandName::Memory),
        ("symbols", CommandName::Symbols),
        ("reset", CommandName::Reset),
        ("quit", CommandName::Quit),
        ("h", CommandName::Help),
        ("s", CommandName::Step),
        ("a", CommandName::Run),
        ("r", CommandName::Registers),
        ("m", CommandName::Memory),
        ("q", CommandName::Quit),
    ];

    fn from_name(name: &str) -> Option<Self> {
        let name = name.to_ascii_lowercase();
        Self::NAMES
            .iter()
            .find(|(candidate, _)| *candidate == name)
            .map(|(_, command)| *command)
    }

    fn max_arguments(&self) -> u8 {
        match self {
            Self::Step => 1,
            _ => 0,
        }
    }
}

impl TryFrom<&str> for Command {
    type Error = CommandError;

    /// Assumes line is non-empty.
    fn try_from(line: &str) -> Result<Self, Self::Error> {
        let mut words = line.split_whitespace();
        let first = words.next().unwrap_or_default();
        let command_name =
            CommandName::from_name(first).ok_or_else(|| CommandError::InvalidCommand {
                command_name: first.to_string(),
            })?;

        let arguments: Vec<&str> = words.collect();
        let invalid = |error| CommandError::InvalidArgument {
            command_name,
            error,
        };

        let expected_count = command_name.max_arguments();
        if arguments.len() > expected_count as usize {
            return Err(invalid(ArgumentError::TooManyArguments {
                expected_count,
                actual_count: arguments.len().min(u8::MAX as usize) as u8,
            }));
        }

        Ok(match command_name {
            CommandName::Help => Command::Help,
            CommandName::Run => Command::Run,
            CommandName::Registers => Command::Registers,
            CommandName::Memory => Command::Memory,
            CommandName::Symbols => Command::Symbols,
            CommandName::Reset => Command::Reset,
            CommandName::Quit => Command::Quit,
            CommandName::Step => {
                let count = match arguments.first() {
                    None => 1,
                    Some(string) => match string.parse::<u16>() {
                        Ok(count) if count > 0 => count,
                        _ => {
                            return Err(invalid(ArgumentError::InvalidCount {
                                string: string.to_string(),
                            }))
                        }
                    },
                };
                Command::Step { count }
            }
        })
    }
}

impl Error for CommandError {}
impl Error for ArgumentError {}

impl fmt::Display for CommandName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Help => write!(f, "help"),
            Self::Step => write!(f, "step"),
            Self::Run => write!(f, "run"),
            Self::Registers => write!(f, "registers"),
            Self::Memory => write!(f, "memory"),
            Self::Symbols => write!(f, "symbols"),
            Self::Reset => write!(f, "reset"),
            Self::Quit => write!(f, "quit"),
        }
    }
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCommand { command_name } => {
                write!(f, "Not a command: `{}`.", command_name)
            }
            Self::InvalidArgument {
                command_name,
                error,
            } => {
                write!(f, "Invalid argument for `{}`: {}", command_name, error)
            }
        }
    }
}

impl fmt::Display for ArgumentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooManyArguments {
                expected_count,
                actual_count,
            } => write!(
                f,
                "Expected at most {} argument{}, found {}.",
                expected_count,
                if *expected_count == 1 { "" } else { "s" },
                actual_count,
            ),
            Self::InvalidCount { string } => {
                write!(f, "`{}` is not a positive step count.", string)
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parses_commands() {
        assert_eq!(Command::try_from("step"), Ok(Command::Step { count: 1 }));
        assert_eq!(Command::try_from("s 12"), Ok(Command::Step { count: 12 }));
        assert_eq!(Command::try_from("STEP   3"), Ok(Command::Step { count: 3 }));
        assert_eq!(Command::try_from("a"), Ok(Command::Run));
        assert_eq!(Command::try_from("run"), Ok(Command::Run));
        assert_eq!(Command::try_from("m"), Ok(Command::Memory));
        assert_eq!(Command::try_from("symbols"), Ok(Command::Symbols));
        assert_eq!(Command::try_from("reset"), Ok(Command::Reset));
        assert_eq!(Command::try_from("q"), Ok(Command::Quit));
        assert_eq!(Command::try_from("h"), Ok(Command::Help));
    }

    #[test]
    fn rejects_bad_commands() {
        assert_eq!(
            Command::try_from("jump 4"),
            Err(CommandError::InvalidCommand {
                command_name: "jump".into()
            })
        );
        assert_eq!(
            Command::try_from("step 0"),
            Err(CommandError::InvalidArgument {
                command_name: CommandName::Step,
                error: ArgumentError::InvalidCount {
                    string: "0".into()
                },
            })
        );
        assert_eq!(
            Command::try_from("run fast"),
            Err(CommandError::InvalidArgument {
                command_name: CommandName::Run,
                error: ArgumentError::TooManyArguments {
                    expected_count: 0,
                    actual_count: 1
                },
            })
        );
    }
}
