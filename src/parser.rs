use miette::Result;
use num_bigint::BigInt;

use crate::{
    error,
    instruction::{Instruction, Opcode, OperandKind},
    memory::{DATA_START, MEMORY_MAX},
    span::Span,
};

/// Decoded program. Index is the address of each instruction; `None` marks a blank line.
pub type Program = Vec<Option<Instruction>>;

/// Decodes ALI source, one instruction per line.
///
/// The line index is the address of the instruction. A `;` comments out the rest of a line, and
/// blank lines leave their address empty.
pub struct AliParser<'a> {
    /// Reference to the source file
    src: &'a str,
}

/// Whitespace-separated word of a line, with its position in the whole source.
#[derive(Clone, Copy, Debug)]
struct Word<'a> {
    text: &'a str,
    span: Span,
}

impl<'a> AliParser<'a> {
    pub fn new(src: &'a str) -> Self {
        AliParser { src }
    }

    pub fn parse(self) -> Result<Program> {
        let mut program = Program::new();
        let mut line_offs = 0;

        for (addr, line) in self.src.split('\n').enumerate() {
            let words = Self::words(line, line_offs);
            line_offs += line.len() + 1;

            let Some((first, operands)) = words.split_first() else {
                program.push(None);
                continue;
            };
            if addr >= DATA_START {
                return Err(error::parse_too_long(first.span, self.src));
            }
            program.push(Some(self.instruction(first, operands)?));
        }

        // Trailing blank lines carry no meaning
        while program.last().is_some_and(|instr| instr.is_none()) {
            program.pop();
        }
        Ok(program)
    }

    fn words(line: &'a str, line_offs: usize) -> Vec<Word<'a>> {
        let code = match line.find(';') {
            Some(idx) => &line[..idx],
            None => line,
        };

        let mut words = Vec::new();
        let mut start = None;
        for (idx, ch) in code.char_indices().chain([(code.len(), ' ')]) {
            match (start, ch.is_whitespace()) {
                (None, false) => start = Some(idx),
                (Some(begin), true) => {
                    words.push(Word {
                        text: &code[begin..idx],
                        span: Span::new(line_offs + begin, idx - begin),
                    });
                    start = None;
                }
                _ => (),
            }
        }
        words
    }

    fn instruction(&self, first: &Word, operands: &[Word]) -> Result<Instruction> {
        let opcode: Opcode = first
            .text
            .parse()
            .map_err(|_| error::parse_unknown_opcode(first.span, self.src))?;

        let kind = opcode.operand();
        let expected = match kind {
            OperandKind::None => 0,
            _ => 1,
        };
        if let Some(extra) = operands.get(expected) {
            return Err(error::parse_extra_operand(extra.span, self.src, opcode));
        }

        let operand = match (kind, operands.first()) {
            (OperandKind::None, _) => None,
            (_, Some(operand)) => Some(operand),
            (_, None) => {
                // Point just past the opcode
                let span = Span::new(first.span.end(), 1);
                return Err(error::parse_missing_operand(
                    span,
                    self.src,
                    opcode,
                    Self::describe(kind),
                ));
            }
        };

        Ok(match (opcode, operand) {
            (Opcode::XCH, _) => Instruction::Xch,
            (Opcode::ADD, _) => Instruction::Add,
            (Opcode::SUB, _) => Instruction::Sub,
            (Opcode::HLT, _) => Instruction::Hlt,
            (Opcode::DEC, Some(word)) => Instruction::Dec(self.symbol(word)?),
            (Opcode::LDA, Some(word)) => Instruction::Lda(self.symbol(word)?),
            (Opcode::STR, Some(word)) => Instruction::Str(self.symbol(word)?),
            (Opcode::LDI, Some(word)) => Instruction::Ldi(self.integer(word)?),
            (Opcode::JMP, Some(word)) => Instruction::Jmp(self.address(word)?),
            (Opcode::JZS, Some(word)) => Instruction::Jzs(self.address(word)?),
            (Opcode::LVS, Some(word)) => Instruction::Lvs(self.address(word)?),
            (_, None) => unreachable!("operand presence checked above"),
        })
    }

    fn describe(kind: OperandKind) -> &'static str {
        match kind {
            OperandKind::None => "nothing",
            OperandKind::Symbol => "a symbol name",
            OperandKind::Integer => "an integer literal",
            OperandKind::Address => "an address",
        }
    }

    fn symbol(&self, word: &Word) -> Result<String> {
        let mut chars = word.text.chars();
        let valid_start = chars
            .next()
            .is_some_and(|ch| ch.is_ascii_alphabetic() || ch == '_');
        if !valid_start || !chars.all(|ch| ch.is_ascii_alphanumeric() || ch == '_') {
            return Err(error::parse_bad_symbol(word.span, self.src));
        }
        Ok(word.text.to_string())
    }

    fn integer(&self, word: &Word) -> Result<BigInt> {
        word.text
            .parse::<BigInt>()
            .map_err(|e| error::parse_bad_integer(word.span, self.src, e))
    }

    fn address(&self, word: &Word) -> Result<usize> {
        match word.text.parse::<usize>() {
            Ok(addr) if addr < MEMORY_MAX => Ok(addr),
            _ => Err(error::parse_bad_address(word.span, self.src)),
        }
    }
}
