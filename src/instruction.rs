use std::{fmt, str::FromStr};

use num_bigint::BigInt;

use crate::{
    memory::{Cell, MemoryBank},
    registers::{Flags, RegisterFile},
    symbol::{AllocationExhausted, SymbolTable},
};

/// Instruction mnemonics, without operands.
#[allow(clippy::upper_case_acronyms)]
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Opcode {
    DEC,
    LDA,
    LDI,
    STR,
    XCH,
    JMP,
    JZS,
    LVS,
    ADD,
    SUB,
    HLT,
}

/// Kind of operand an opcode expects.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum OperandKind {
    None,
    Symbol,
    Integer,
    Address,
}

/// Single decoded ALI instruction.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Instruction {
    /// Declare a symbol, initializing its cell to zero if unset
    Dec(String),
    /// Load symbol value into accumulator
    Lda(String),
    /// Load immediate into accumulator
    Ldi(BigInt),
    /// Store accumulator to symbol
    Str(String),
    /// Exchange accumulator and data register
    Xch,
    Jmp(usize),
    /// Jump if zero flag set
    Jzs(usize),
    /// Jump if overflow flag set
    Lvs(usize),
    Add,
    Sub,
    Hlt,
}

/// What the engine should do with the program counter after an instruction has run.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Directive {
    Advance,
    JumpTo(usize),
    Halt,
}

impl Opcode {
    pub const ALL: [Opcode; 11] = [
        Opcode::DEC,
        Opcode::LDA,
        Opcode::LDI,
        Opcode::STR,
        Opcode::XCH,
        Opcode::JMP,
        Opcode::JZS,
        Opcode::LVS,
        Opcode::ADD,
        Opcode::SUB,
        Opcode::HLT,
    ];

    pub fn operand(&self) -> OperandKind {
        match self {
            Opcode::DEC | Opcode::LDA | Opcode::STR => OperandKind::Symbol,
            Opcode::LDI => OperandKind::Integer,
            Opcode::JMP | Opcode::JZS | Opcode::LVS => OperandKind::Address,
            Opcode::XCH | Opcode::ADD | Opcode::SUB | Opcode::HLT => OperandKind::None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Opcode::DEC => "DEC",
            Opcode::LDA => "LDA",
            Opcode::LDI => "LDI",
            Opcode::STR => "STR",
            Opcode::XCH => "XCH",
            Opcode::JMP => "JMP",
            Opcode::JZS => "JZS",
            Opcode::LVS => "LVS",
            Opcode::ADD => "ADD",
            Opcode::SUB => "SUB",
            Opcode::HLT => "HLT",
        }
    }
}

impl FromStr for Opcode {
    type Err = ();

    /// Case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.to_ascii_uppercase();
        Opcode::ALL
            .into_iter()
            .find(|op| op.as_str() == upper)
            .ok_or(())
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Instruction {
    pub fn opcode(&self) -> Opcode {
        match self {
            Instruction::Dec(_) => Opcode::DEC,
            Instruction::Lda(_) => Opcode::LDA,
            Instruction::Ldi(_) => Opcode::LDI,
            Instruction::Str(_) => Opcode::STR,
            Instruction::Xch => Opcode::XCH,
            Instruction::Jmp(_) => Opcode::JMP,
            Instruction::Jzs(_) => Opcode::JZS,
            Instruction::Lvs(_) => Opcode::LVS,
            Instruction::Add => Opcode::ADD,
            Instruction::Sub => Opcode::SUB,
            Instruction::Hlt => Opcode::HLT,
        }
    }

    /// Apply this instruction to the machine state.
    ///
    /// Symbols are resolved before anything is mutated, so an `Err` leaves every argument
    /// untouched.
    pub fn execute(
        &self,
        reg: &mut RegisterFile,
        mem: &mut MemoryBank,
        symbols: &mut SymbolTable,
        flags: &mut Flags,
    ) -> Result<Directive, AllocationExhausted> {
        match self {
            Instruction::Dec(name) => {
                let addr = symbols.resolve(name)?;
                if mem.get(addr).is_empty() {
                    mem.set(addr, Cell::Value(BigInt::default()));
                }
                // Whether or not the cell was already set
                Ok(Directive::Advance)
            }
            Instruction::Lda(name) => {
                let addr = symbols.resolve(name)?;
                reg.set_accumulator(mem.get(addr).value());
                Ok(Directive::Advance)
            }
            Instruction::Ldi(val) => {
                reg.set_accumulator(val.clone());
                Ok(Directive::Advance)
            }
            Instruction::Str(name) => {
                let addr = symbols.resolve(name)?;
                mem.set(addr, Cell::Value(reg.accumulator().clone()));
                Ok(Directive::Advance)
            }
            Instruction::Xch => {
                reg.swap();
                Ok(Directive::Advance)
            }
            Instruction::Jmp(addr) => Ok(Directive::JumpTo(*addr)),
            Instruction::Jzs(addr) => Ok(Self::branch(flags.zero, *addr)),
            Instruction::Lvs(addr) => Ok(Self::branch(flags.overflow, *addr)),
            Instruction::Add => {
                let res = reg.accumulator() + reg.data_register();
                flags.update(&res);
                reg.set_accumulator(res);
                Ok(Directive::Advance)
            }
            Instruction::Sub => {
                let res = reg.accumulator() - reg.data_register();
                flags.update(&res);
                reg.set_accumulator(res);
                Ok(Directive::Advance)
            }
            Instruction::Hlt => Ok(Directive::Halt),
        }
    }

    #[inline]
    fn branch(cond: bool, addr: usize) -> Directive {
        if cond {
            Directive::JumpTo(addr)
        } else {
            Directive::Advance
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op = self.opcode();
        match self {
            Instruction::Dec(name) | Instruction::Lda(name) | Instruction::Str(name) => {
                write!(f, "{op} {name}")
            }
            Instruction::Ldi(val) => write!(f, "{op} {val}"),
            Instruction::Jmp(addr) | Instruction::Jzs(addr) | Instruction::Lvs(addr) => {
                write!(f, "{op} {addr}")
            }
            Instruction::Xch | Instruction::Add | Instruction::Sub | Instruction::Hlt => {
                write!(f, "{op}")
            }
        }
    }
}
