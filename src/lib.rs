// Loading
mod parser;
pub use parser::{AliParser, Program};
mod span;
mod error;

// Machine
pub mod instruction;
pub mod memory;
pub mod registers;
pub mod symbol;

// Running
mod runtime;
pub use runtime::{ExecError, RunState, Status, STEP_LIMIT};
mod debugger;
pub use debugger::{Debugger, DebuggerOptions};
pub mod output;

pub mod env;

/// Amount of lines to show as context, each side of focus line (line containing span).
pub const DIAGNOSTIC_CONTEXT_LINES: usize = 4;
