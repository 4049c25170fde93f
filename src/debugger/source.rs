use std::collections::VecDeque;
use std::io::{self, BufRead, IsTerminal, Write};

use crate::dprintln;

/// Where prompt commands come from.
///
/// Every mode splits its input on newlines and `;`, so several commands may be given at once.
#[derive(Debug)]
pub struct Source {
    mode: SourceMode,
    /// Commands read but not yet returned
    pending: VecDeque<String>,
    /// Command most recently returned; must outlive the borrow handed out by `read`
    current: String,
}

#[derive(Debug)]
enum SourceMode {
    /// Command-line argument. Already fully split into `pending`.
    Argument,
    /// Stdin which is not attached to a terminal, i.e. piped.
    Stdin(io::Stdin),
    /// Interactive terminal
    Terminal(console::Term),
}

impl Source {
    pub fn from(argument: Option<String>) -> Self {
        let mut pending = VecDeque::new();
        let mode = if let Some(argument) = argument {
            split_commands(&argument, &mut pending);
            SourceMode::Argument
        } else if io::stdin().is_terminal() {
            SourceMode::Terminal(console::Term::stdout())
        } else {
            SourceMode::Stdin(io::stdin())
        };
        Self {
            mode,
            pending,
            current: String::new(),
        }
    }

    /// `None` indicates EOF.
    ///
    /// Returned string is trimmed, and never empty.
    pub fn read(&mut self) -> Option<&str> {
        loop {
            if let Some(command) = self.pending.pop_front() {
                self.current = command;
                break;
            }
            let line = self.read_line()?;
            split_commands(&line, &mut self.pending);
        }

        // Echo command for non-terminal source, as a terminal already shows what was typed
        if !matches!(self.mode, SourceMode::Terminal(_)) {
            dprintln!(Sometimes, "Command: {}", self.current);
        }
        Some(&self.current)
    }

    fn read_line(&mut self) -> Option<String> {
        match &mut self.mode {
            SourceMode::Argument => None,
            SourceMode::Stdin(stdin) => {
                let mut buffer = String::new();
                match stdin.lock().read_line(&mut buffer) {
                    Ok(0) | Err(_) => None,
                    Ok(_) => Some(buffer),
                }
            }
            SourceMode::Terminal(term) => {
                // Must use `write!` to be flushed
                write!(term, "Command: ").ok()?;
                term.flush().ok()?;
                term.read_line().ok()
            }
        }
    }
}

fn split_commands(input: &str, pending: &mut VecDeque<String>) {
    pending.extend(
        input
            .split(['\n', ';'])
            .map(str::trim)
            .filter(|command| !command.is_empty())
            .map(String::from),
    );
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn argument_commands() {
        let mut source = Source::from(Some("step 2;  registers \n\n ;quit".to_string()));
        assert_eq!(source.read(), Some("step 2"));
        assert_eq!(source.read(), Some("registers"));
        assert_eq!(source.read(), Some("quit"));
        assert_eq!(source.read(), None);
        assert_eq!(source.read(), None);
    }

    #[test]
    fn empty_argument() {
        let mut source = Source::from(Some(" ; \n".to_string()));
        assert_eq!(source.read(), None);
    }
}
