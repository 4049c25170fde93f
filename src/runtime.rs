use std::fmt;

use colored::Colorize;
use num_bigint::BigInt;

use crate::{
    instruction::{Directive, Instruction},
    memory::{Cell, MemoryBank, DATA_START, MEMORY_MAX},
    registers::{Flags, RegisterFile},
    symbol::{AllocationExhausted, SymbolTable},
};

/// Total instructions an engine may execute before it is considered stuck.
pub const STEP_LIMIT: u32 = 1000;

/// Execution state of the engine. Every state except `Running` is final.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Status {
    Running,
    /// `HLT` was executed.
    Halted,
    /// More than [`STEP_LIMIT`] steps were requested.
    StepLimitExceeded,
    /// Program counter walked off the end of memory.
    OutOfRange,
}

/// Failure of a single instruction. The instruction had no effect.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExecError {
    AllocationExhausted { pc: usize, error: AllocationExhausted },
}

/// Represents complete program state during runtime.
#[derive(Clone, Debug)]
pub struct RunState {
    /// Image of memory as loaded, used for `reset`.
    initial_mem: MemoryBank,
    mem: MemoryBank,
    reg: RegisterFile,
    symbols: SymbolTable,
    flags: Flags,
    /// Program counter
    pc: usize,
    status: Status,
    /// Steps requested over the lifetime of this engine
    steps: u32,
    /// Print each executed instruction to stderr
    trace: bool,
}

impl RunState {
    pub fn new() -> Self {
        RunState {
            initial_mem: MemoryBank::new(),
            mem: MemoryBank::new(),
            reg: RegisterFile::new(),
            symbols: SymbolTable::new(),
            flags: Flags::default(),
            pc: 0,
            status: Status::Running,
            steps: 0,
            trace: false,
        }
    }

    /// Create an engine with `program` placed at addresses `0..program.len()`.
    ///
    /// `None` entries leave their address empty.
    pub fn from_program(program: Vec<Option<Instruction>>) -> Self {
        let mut state = RunState::new();
        for (addr, instr) in program.into_iter().enumerate() {
            if let Some(instr) = instr {
                state.load(addr, instr);
            }
        }
        state
    }

    /// Place a decoded instruction into the instruction segment.
    ///
    /// Panics if `addr` is not an instruction address.
    pub fn load(&mut self, addr: usize, instr: Instruction) {
        assert!(addr < DATA_START, "instruction address {addr} out of range");
        self.initial_mem.set(addr, Cell::Instruction(instr.clone()));
        self.mem.set(addr, Cell::Instruction(instr));
    }

    pub fn set_trace(&mut self, trace: bool) {
        self.trace = trace;
    }

    /// Return to the state just after loading.
    pub fn reset(&mut self) {
        *self = RunState {
            initial_mem: self.initial_mem.clone(),
            mem: self.initial_mem.clone(),
            trace: self.trace,
            ..RunState::new()
        };
    }

    /// Execute (at most) one instruction.
    pub fn single_step(&mut self) -> Result<(), ExecError> {
        self.steps = self.steps.saturating_add(1);
        if self.steps > STEP_LIMIT {
            if !self.is_terminated() {
                self.status = Status::StepLimitExceeded;
            }
            return Ok(());
        }

        if self.is_terminated() {
            return Ok(());
        }
        if self.pc >= MEMORY_MAX {
            self.status = Status::OutOfRange;
            return Ok(());
        }

        // Empty and data cells are skipped without moving
        let Cell::Instruction(instr) = self.mem.get(self.pc) else {
            return Ok(());
        };
        let instr = instr.clone();

        let directive = instr
            .execute(
                &mut self.reg,
                &mut self.mem,
                &mut self.symbols,
                &mut self.flags,
            )
            .map_err(|error| ExecError::AllocationExhausted { pc: self.pc, error })?;

        if self.trace {
            eprintln!("{:>12} {:>3}  {}", "Executed".cyan(), self.pc, instr);
        }

        match directive {
            Directive::Advance => self.pc += 1,
            Directive::JumpTo(addr) => self.pc = addr,
            Directive::Halt => self.status = Status::Halted,
        }
        if self.status == Status::Running && self.pc >= MEMORY_MAX {
            self.status = Status::OutOfRange;
        }
        Ok(())
    }

    /// Step until the program halts, leaves memory, or exceeds the step limit.
    pub fn run_to_completion(&mut self) -> Result<(), ExecError> {
        while !self.is_terminated() {
            self.single_step()?;
        }
        Ok(())
    }

    pub fn status(&self) -> Status {
        self.status
    }

    /// Whether any instruction may still execute.
    pub fn is_terminated(&self) -> bool {
        self.status != Status::Running
    }

    pub fn pc(&self) -> usize {
        self.pc
    }

    pub fn steps(&self) -> u32 {
        self.steps
    }

    pub fn accumulator(&self) -> &BigInt {
        self.reg.accumulator()
    }

    pub fn data_register(&self) -> &BigInt {
        self.reg.data_register()
    }

    pub fn zero_flag(&self) -> bool {
        self.flags.zero
    }

    pub fn overflow_flag(&self) -> bool {
        self.flags.overflow
    }

    pub fn mem(&self) -> &MemoryBank {
        &self.mem
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }
}

impl Default for RunState {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Running => write!(f, "running"),
            Self::Halted => write!(f, "halted"),
            Self::StepLimitExceeded => {
                write!(f, "stopped after exceeding {STEP_LIMIT} instructions")
            }
            Self::OutOfRange => write!(f, "reached end of memory"),
        }
    }
}

impl std::error::Error for ExecError {}

impl fmt::Display for ExecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AllocationExhausted { pc, error } => {
                write!(f, "Instruction at address {pc} failed. {error}")
            }
        }
    }
}
