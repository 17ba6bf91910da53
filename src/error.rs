//! Shared error hierarchy for the lexer, parser, evaluator, and driver.
//!
//! Mirrors the error kinds enumerated in the specification's error-handling
//! design: lex/parse failures carry a source line for the `[line N] Error at
//! 'token': message` form; runtime failures are reported as
//! `Runtime error: <kind>` by the driver.

use thiserror::Error;

use crate::dimension::Dimension;

/// A single, crate-wide error type. Lex and parse variants are
/// line-tagged; the rest are runtime errors produced by the evaluator or
/// the constants table.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DimError {
    #[error("[line {line}] Error: unexpected character {character:?}")]
    LexUnexpectedChar { line: u32, character: char },

    #[error("[line {line}] Error: malformed number literal {lexeme:?}")]
    LexMalformedNumber { line: u32, lexeme: String },

    #[error("[line {line}] Error at '{lexeme}': {message}")]
    ParseError {
        line: u32,
        lexeme: String,
        message: String,
    },

    #[error("Runtime error: undefined variable or unit '{0}'")]
    UndefinedVariable(String),

    #[error("Runtime error: invalid operand: {0}")]
    InvalidOperand(String),

    #[error("Runtime error: invalid operands: {0}")]
    InvalidOperands(String),

    #[error("Runtime error: dimension mismatch: {0} vs {1}")]
    DimensionMismatch(Dimension, Dimension),

    #[error("Runtime error: division by zero")]
    DivisionByZero,

    #[error("Runtime error: unsupported operator '{0}' (internal error)")]
    UnsupportedOperator(String),

    #[error("Runtime error: exponent does not produce an integer dimension")]
    NonIntegerDim,

    #[error("Runtime error: out of memory")]
    OutOfMemory,
}

pub type DimResult<T> = Result<T, DimError>;
