use miette::{miette, LabeledSpan, Report, Severity};
use num_bigint::ParseBigIntError;

use crate::{
    instruction::Opcode,
    memory::{DATA_START, MEMORY_MAX},
    span::Span,
};

// Decoding errors

pub fn parse_unknown_opcode(span: Span, src: &str) -> Report {
    miette!(
        severity = Severity::Error,
        code = "parse::opcode",
        help = "available instructions are DEC, LDA, LDI, STR, XCH, JMP, JZS, LVS, ADD, SUB and HLT",
        labels = vec![LabeledSpan::at(span, "unknown opcode")],
        "Encountered an unknown instruction.",
    )
    .with_source_code(src.to_string())
}

pub fn parse_missing_operand(span: Span, src: &str, opcode: Opcode, expected: &str) -> Report {
    miette!(
        severity = Severity::Error,
        code = "parse::missing_operand",
        help = format!("{opcode} must be followed by {expected}"),
        labels = vec![LabeledSpan::at(span, "missing operand")],
        "Expected an operand for {opcode}.",
    )
    .with_source_code(src.to_string())
}

pub fn parse_extra_operand(span: Span, src: &str, opcode: Opcode) -> Report {
    miette!(
        severity = Severity::Error,
        code = "parse::extra_operand",
        help = "each line holds exactly one instruction",
        labels = vec![LabeledSpan::at(span, "unexpected operand")],
        "Too many operands for {opcode}.",
    )
    .with_source_code(src.to_string())
}

pub fn parse_bad_integer(span: Span, src: &str, e: ParseBigIntError) -> Report {
    miette!(
        severity = Severity::Error,
        code = "parse::bad_lit",
        help = "integer literals are decimal and may start with a sign, like -12",
        labels = vec![LabeledSpan::at(span, "incorrect literal")],
        "Encountered an invalid literal: {e}",
    )
    .with_source_code(src.to_string())
}

pub fn parse_bad_address(span: Span, src: &str) -> Report {
    miette!(
        severity = Severity::Error,
        code = "parse::bad_addr",
        help = format!("jump targets are addresses from 0 to {}", MEMORY_MAX - 1),
        labels = vec![LabeledSpan::at(span, "incorrect address")],
        "Encountered an invalid jump address.",
    )
    .with_source_code(src.to_string())
}

pub fn parse_bad_symbol(span: Span, src: &str) -> Report {
    miette!(
        severity = Severity::Error,
        code = "parse::bad_symbol",
        help = "symbols start with a letter or `_`, followed by letters, digits or `_`",
        labels = vec![LabeledSpan::at(span, "invalid symbol")],
        "Encountered an invalid symbol name.",
    )
    .with_source_code(src.to_string())
}

pub fn parse_too_long(span: Span, src: &str) -> Report {
    miette!(
        severity = Severity::Error,
        code = "parse::too_long",
        help = format!("the instruction segment holds at most {DATA_START} lines"),
        labels = vec![LabeledSpan::at(span, "does not fit in memory")],
        "Program is too long.",
    )
    .with_source_code(src.to_string())
}
