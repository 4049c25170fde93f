use std::cell::RefCell;
use std::str::Chars;

use colored::{ColoredString, Colorize};

use crate::memory::Cell;
use crate::runtime::RunState;

#[macro_export]
macro_rules! dprint {
    ( $cond:expr, $fmt:literal $($tt:tt)* ) => {{
        #[allow(unused_imports)]
        use $crate::output::Condition::*;
        let s = format!(
            $fmt
            $($tt)*
        );
        $crate::output::Output::Debugger($cond).print_str(&s);
    }};
    // Trigger type error if missing condition
    ( $fmt:literal $($tt:tt)* ) => {{
        $crate::output::Output::Debugger($fmt);
    }};
}

#[macro_export]
macro_rules! dprintln {
    ( $cond:expr ) => {{
        #[allow(unused_imports)]
        use $crate::output::Condition::*;
        $crate::output::Output::Debugger($cond).print_str("\n");
    }};
    ( $cond:expr, $fmt:literal $($tt:tt)* ) => {{
        #[allow(unused_imports)]
        use $crate::output::Condition::*;
        let s = format!(
            concat!($fmt, "\n")
            $($tt)*
        );
        $crate::output::Output::Debugger($cond).print_str(&s);
    }};
    // Trigger type error if missing condition
    ( $fmt:literal $($tt:tt)* ) => {{
        $crate::output::Output::Debugger($fmt);
    }};
}

/// Destination of printed text.
///
/// `Normal` is program output on stdout. `Debugger` is prompt chatter on stderr.
#[derive(Clone, Copy, Debug)]
pub enum Output {
    Normal,
    Debugger(Condition),
}

/// Whether debugger text survives `--minimal`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Condition {
    Always,
    Sometimes,
}

struct Decolored<'a> {
    chars: Chars<'a>,
}

impl Output {
    thread_local! {
        static IS_LINE_START: RefCell<bool> = const { RefCell::new(true) };
        static IS_MINIMAL: RefCell<bool> = const { RefCell::new(false) };
    }

    pub fn set_line_start(new_value: bool) -> bool {
        Self::IS_LINE_START.with(|value| value.replace(new_value))
    }
    /// Private. Use [`Output::start_new_line`].
    fn is_line_start() -> bool {
        Self::IS_LINE_START.with(|value| *value.borrow())
    }
    pub fn set_minimal(new_value: bool) -> bool {
        Self::IS_MINIMAL.with(|value| value.replace(new_value))
    }
    pub fn is_minimal() -> bool {
        Self::IS_MINIMAL.with(|value| *value.borrow())
    }

    fn set_line_start_from_str(string: &str) {
        let last = Decolored::new(string).last();
        if let Some(ch) = last {
            Output::set_line_start(ch == '\n');
        }
    }

    pub fn print_str(&self, string: &str) {
        match self {
            Self::Normal => {
                if Self::is_minimal() {
                    print!("{}", Decolored::new(string).collect::<String>());
                } else {
                    print!("{}", string);
                }
                Self::set_line_start_from_str(string);
            }

            Self::Debugger(condition) => match (Self::is_minimal(), *condition) {
                (false, _) => {
                    eprint!("{}", ColoredString::from(string).blue());
                    Self::set_line_start_from_str(string);
                }
                // Always remove color if `--minimal`
                (true, Condition::Always) => {
                    eprint_colorless(string);
                    Self::set_line_start_from_str(string);
                }
                (true, Condition::Sometimes) => (),
            },
        }
    }

    pub fn start_new_line(&self) {
        if !Self::is_line_start() {
            self.print_str("\n");
        }
    }

    pub fn print_registers(&self, state: &RunState) {
        if Self::is_minimal() {
            self.print_str(&minimal_registers(state));
            return;
        }

        self.print_str("\x1b[2m┌──────────────────────────────┐\x1b[0m\n");
        for (name, value) in [
            ("ACC", state.accumulator()),
            ("DR ", state.data_register()),
        ] {
            self.print_str(&format!(
                "\x1b[2m│\x1b[0m \x1b[1m{}\x1b[0m {:>24} \x1b[2m│\x1b[0m\n",
                name, value
            ));
        }
        self.print_str(&format!(
            "\x1b[2m│\x1b[0m \x1b[1mPC \x1b[0m {:>4}    \x1b[1mZ\x1b[0m {}  \x1b[1mV\x1b[0m {}  {:>6} \x1b[2m│\x1b[0m\n",
            state.pc(),
            u8::from(state.zero_flag()),
            u8::from(state.overflow_flag()),
            "",
        ));
        self.print_str("\x1b[2m└──────────────────────────────┘\x1b[0m\n");
    }

    /// Print every occupied slot of the instruction segment.
    pub fn print_instructions(&self, state: &RunState) {
        for (addr, instr) in state.mem().instructions() {
            let marker = if addr == state.pc() && !Self::is_minimal() {
                "\x1b[1m>\x1b[0m"
            } else {
                " "
            };
            if Self::is_minimal() {
                self.print_str(&format!("{:>3} {}\n", addr, instr));
            } else {
                self.print_str(&format!("{} \x1b[2m{:>3}\x1b[0m  {}\n", marker, addr, instr));
            }
        }
    }

    /// Print every occupied slot of the data segment, named by its symbol.
    pub fn print_data(&self, state: &RunState) {
        if state.mem().data().next().is_none() {
            self.print_str("(no data)\n");
            return;
        }
        for (addr, cell) in state.mem().data() {
            let name = state.symbols().name_at(addr).unwrap_or("-");
            let value = match cell {
                Cell::Value(value) => value.to_string(),
                Cell::Instruction(instr) => instr.to_string(),
                Cell::Empty => continue,
            };
            if Self::is_minimal() {
                self.print_str(&format!("{} {} {}\n", addr, name, value));
            } else {
                self.print_str(&format!(
                    "  \x1b[2m{:>3}\x1b[0m  \x1b[1m{:<12}\x1b[0m {:>12}\n",
                    addr, name, value
                ));
            }
        }
    }

    pub fn print_symbols(&self, state: &RunState) {
        if state.symbols().is_empty() {
            self.print_str("(no symbols)\n");
            return;
        }
        for (name, addr) in state.symbols().iter() {
            self.print_str(&format!("{} {}\n", name, addr));
        }
    }
}

impl<'a> Decolored<'a> {
    pub fn new(string: &'a str) -> Self {
        Self {
            chars: string.chars(),
        }
    }
}

impl<'a> Iterator for Decolored<'a> {
    type Item = char;
    fn next(&mut self) -> Option<Self::Item> {
        while let Some(ch) = self.chars.next() {
            // Skip everything between '\x1b' and 'm' (inclusive)
            if ch == '\x1b' {
                while self.chars.next().is_some_and(|ch| ch != 'm') {}
                continue;
            }
            return Some(ch);
        }
        None
    }
}

/// One `NAME value` line per register, flags as `0` or `1`.
fn minimal_registers(state: &RunState) -> String {
    format!(
        "ACC {}\nDR {}\nPC {}\nZF {}\nOF {}\n",
        state.accumulator(),
        state.data_register(),
        state.pc(),
        u8::from(state.zero_flag()),
        u8::from(state.overflow_flag()),
    )
}

fn eprint_colorless(string: &str) {
    eprint!("{}", Decolored::new(string).collect::<String>());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decolored() {
        assert_eq!(Decolored::new("abcdef").collect::<String>(), "abcdef");
        assert_eq!(
            Decolored::new("\x1b[2m│\x1b[0m ACC").collect::<String>(),
            "│ ACC"
        );
        assert_eq!(Decolored::new("abc\x1b[0xyz").collect::<String>(), "abc");
    }

    #[test]
    fn minimal_register_lines() {
        use crate::instruction::Instruction;

        let mut state = RunState::from_program(vec![
            Some(Instruction::Ldi(i64::MAX.into())),
            Some(Instruction::Xch),
            Some(Instruction::Ldi(i64::MAX.into())),
            Some(Instruction::Add),
            Some(Instruction::Hlt),
        ]);
        assert_eq!(
            minimal_registers(&state),
            "ACC 0\nDR 0\nPC 0\nZF 0\nOF 0\n"
        );
        state.run_to_completion().unwrap();
        assert_eq!(
            minimal_registers(&state),
            "ACC 18446744073709551614\nDR 9223372036854775807\nPC 4\nZF 0\nOF 1\n"
        );
    }

    #[test]
    fn minimal_is_thread_local() {
        let previous = Output::set_minimal(true);
        assert!(Output::is_minimal());
        Output::set_minimal(previous);
        assert_eq!(Output::is_minimal(), previous);
    }
}
