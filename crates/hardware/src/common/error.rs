//! Error definitions.
//!
//! This module defines the error handling for the simulator. It provides:
//! 1. **Assembly errors:** `ParseError` with the offending line and a typed reason.
//! 2. **Simulator errors:** `SimError`, the crate-level error for register lookups,
//!    program file I/O and configuration parsing.
//!
//! `step()` itself is infallible: structural hazards are stalls and mispredictions
//! are a normal recovery path, so neither is represented here.

use std::path::PathBuf;

use thiserror::Error;

/// Reason an assembly line was rejected.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    /// The mnemonic is not part of the instruction set.
    #[error("unknown mnemonic '{0}'")]
    UnknownMnemonic(String),

    /// The mnemonic was given the wrong number of operands.
    #[error("{mnemonic} expects {expected} operand(s), found {found}")]
    OperandCount {
        /// Upper-cased mnemonic.
        mnemonic: String,
        /// Human readable arity, e.g. `"2 or 3"`.
        expected: &'static str,
        /// Number of operands present on the line.
        found: usize,
    },

    /// A branch or call names a label that is never defined.
    #[error("label '{0}' not found")]
    UnknownLabel(String),

    /// A label is defined more than once.
    #[error("label '{0}' defined twice")]
    DuplicateLabel(String),

    /// A line consisting only of `:`.
    #[error("empty label name")]
    EmptyLabel,

    /// A memory operand is not of the form `[register+offset]`.
    #[error("malformed memory operand '{0}', expected [REG+IMM]")]
    MalformedMemoryOperand(String),

    /// A token in register position is not one of the sixteen register names.
    #[error("unknown register '{0}'")]
    UnknownRegister(String),

    /// A token in immediate position does not parse as an integer.
    #[error("invalid immediate '{0}'")]
    InvalidImmediate(String),
}

/// Assembly failure, capturing the offending source line.
///
/// Line numbers are 1-based and refer to the text handed to the assembler,
/// including blank and comment lines.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("parse error on line {line} '{text}': {kind}")]
pub struct ParseError {
    /// 1-based source line number.
    pub line: usize,
    /// The line as written (comments stripped, trimmed).
    pub text: String,
    /// Why the line was rejected.
    pub kind: ParseErrorKind,
}

impl ParseError {
    /// Creates a parse error for `line`/`text`.
    pub fn new(line: usize, text: impl Into<String>, kind: ParseErrorKind) -> Self {
        Self {
            line,
            text: text.into(),
            kind,
        }
    }
}

/// Crate-level error type.
#[derive(Debug, Error)]
pub enum SimError {
    /// The program text failed to assemble.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// A register was addressed by a name outside the register file.
    ///
    /// The assembler only emits validated registers, so reaching this from the
    /// pipeline is a contract violation; it is only produced by the name-based
    /// accessors on [`RegisterFile`](crate::common::RegisterFile).
    #[error("invalid register access: '{0}'")]
    InvalidRegister(String),

    /// A program or configuration file could not be read.
    #[error("could not read '{}': {source}", path.display())]
    Io {
        /// File that was being read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// A JSON configuration document was rejected.
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    /// A configuration value is out of range (e.g. a zero-sized structure).
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
