//! Two-pass assembler.
//!
//! Turns program text into a [`Program`]. It performs:
//! 1. **Pass 1:** Strips `;` and `//` comments and blank lines, upper-cases, assigns
//!    sequential addresses to instruction lines and records `LABEL:` addresses.
//! 2. **Pass 2:** Splits each instruction line into mnemonic and comma-separated
//!    operands and builds the [`Operands`] shape for the mnemonic.
//!
//! Any failure aborts assembly with a [`ParseError`] naming the 1-based line.

use std::collections::BTreeMap;

use crate::common::error::{ParseError, ParseErrorKind};
use crate::core::arch::Register;
use crate::isa::instruction::{Instruction, MemOperand, Operands, Source};
use crate::isa::opcode::Opcode;

/// An assembled program image.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Program {
    /// Instructions indexed by address.
    pub instructions: Vec<Instruction>,
    /// Label name to address.
    pub labels: BTreeMap<String, usize>,
}

impl Program {
    /// Number of instructions.
    #[inline]
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// Returns true if the program has no instructions.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Instruction at `pc`, or `None` past the end.
    #[inline]
    pub fn get(&self, pc: usize) -> Option<&Instruction> {
        self.instructions.get(pc)
    }
}

/// One non-blank source line after comment stripping.
struct Line {
    number: usize,
    text: String,
}

impl Line {
    fn err(&self, kind: ParseErrorKind) -> ParseError {
        ParseError::new(self.number, self.text.clone(), kind)
    }
}

/// Assembles `source` into a program image.
///
/// # Errors
///
/// Returns a [`ParseError`] on an unknown mnemonic, wrong operand count,
/// unresolved or duplicate label, malformed memory operand, or a token that is
/// neither a register nor an immediate where one was required.
pub fn assemble(source: &str) -> Result<Program, ParseError> {
    let lines = clean_lines(source);

    let mut labels = BTreeMap::new();
    let mut address = 0usize;
    for line in &lines {
        if let Some(name) = line.text.strip_suffix(':') {
            let name = name.trim();
            if name.is_empty() {
                return Err(line.err(ParseErrorKind::EmptyLabel));
            }
            if labels.insert(name.to_string(), address).is_some() {
                return Err(line.err(ParseErrorKind::DuplicateLabel(name.to_string())));
            }
        } else {
            address += 1;
        }
    }

    let mut instructions = Vec::with_capacity(address);
    for line in lines.iter().filter(|l| !l.text.ends_with(':')) {
        let inst = parse_instruction(line, instructions.len(), &labels)?;
        instructions.push(inst);
    }

    Ok(Program {
        instructions,
        labels,
    })
}

/// Pass 1 normalization: comments removed, trimmed, upper-cased, blanks dropped.
fn clean_lines(source: &str) -> Vec<Line> {
    source
        .lines()
        .enumerate()
        .filter_map(|(i, raw)| {
            let cut = [raw.find(';'), raw.find("//")]
                .into_iter()
                .flatten()
                .min()
                .unwrap_or(raw.len());
            let text = raw[..cut].trim().to_ascii_uppercase();
            (!text.is_empty()).then_some(Line { number: i + 1, text })
        })
        .collect()
}

fn parse_instruction(
    line: &Line,
    address: usize,
    labels: &BTreeMap<String, usize>,
) -> Result<Instruction, ParseError> {
    let (mnemonic, rest) = line
        .text
        .split_once(char::is_whitespace)
        .unwrap_or((line.text.as_str(), ""));
    let opcode = Opcode::from_mnemonic(mnemonic)
        .ok_or_else(|| line.err(ParseErrorKind::UnknownMnemonic(mnemonic.to_string())))?;
    let ops: Vec<&str> = rest
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();

    let arity = |expected: &'static str, ok: bool| {
        if ok {
            Ok(())
        } else {
            Err(line.err(ParseErrorKind::OperandCount {
                mnemonic: mnemonic.to_string(),
                expected,
                found: ops.len(),
            }))
        }
    };
    let reg = |tok: &str| parse_register(tok).map_err(|k| line.err(k));
    let src = |tok: &str| parse_source(tok).map_err(|k| line.err(k));
    let mem = |tok: &str| parse_mem(tok).map_err(|k| line.err(k));

    let operands = match opcode {
        Opcode::Add
        | Opcode::Sub
        | Opcode::Mul
        | Opcode::Div
        | Opcode::And
        | Opcode::Or
        | Opcode::Xor => {
            arity("2 or 3", matches!(ops.len(), 2 | 3))?;
            let dst = reg(ops[0])?;
            if ops.len() == 2 {
                Operands::Binary {
                    dst,
                    lhs: dst,
                    rhs: src(ops[1])?,
                }
            } else {
                Operands::Binary {
                    dst,
                    lhs: reg(ops[1])?,
                    rhs: src(ops[2])?,
                }
            }
        }
        Opcode::Cmp => {
            arity("2", ops.len() == 2)?;
            Operands::Compare {
                lhs: reg(ops[0])?,
                rhs: src(ops[1])?,
            }
        }
        Opcode::Mov => {
            arity("2", ops.len() == 2)?;
            Operands::Move {
                dst: reg(ops[0])?,
                src: src(ops[1])?,
            }
        }
        Opcode::Lea | Opcode::Load => {
            arity("2", ops.len() == 2)?;
            Operands::Address {
                dst: reg(ops[0])?,
                mem: mem(ops[1])?,
            }
        }
        Opcode::Store => {
            arity("2", ops.len() == 2)?;
            Operands::Store {
                src: reg(ops[0])?,
                mem: mem(ops[1])?,
            }
        }
        Opcode::Inc | Opcode::Dec | Opcode::Not => {
            arity("1", ops.len() == 1)?;
            Operands::Unary { reg: reg(ops[0])? }
        }
        Opcode::Push => {
            arity("1", ops.len() == 1)?;
            Operands::Push { src: reg(ops[0])? }
        }
        Opcode::Pop => {
            arity("1", ops.len() == 1)?;
            Operands::Pop { dst: reg(ops[0])? }
        }
        Opcode::Jmp
        | Opcode::Jz
        | Opcode::Jnz
        | Opcode::Jg
        | Opcode::Jge
        | Opcode::Jl
        | Opcode::Jle
        | Opcode::Call => {
            arity("1 (label)", ops.len() == 1)?;
            let label = ops[0].to_string();
            let target = *labels
                .get(&label)
                .ok_or_else(|| line.err(ParseErrorKind::UnknownLabel(label.clone())))?;
            Operands::Branch { label, target }
        }
        Opcode::Ret => {
            arity("0", ops.is_empty())?;
            Operands::Return
        }
    };

    Ok(Instruction {
        opcode,
        operands,
        address,
        text: line.text.clone(),
    })
}

/// Parses a signed decimal or `0x` hexadecimal integer.
fn parse_imm(tok: &str) -> Option<i64> {
    let (negative, digits) = match tok.as_bytes().first().copied()? {
        b'-' => (true, &tok[1..]),
        b'+' => (false, &tok[1..]),
        _ => (false, tok),
    };
    let magnitude = match digits.strip_prefix("0X") {
        Some(hex) => i64::from_str_radix(hex, 16).ok()?,
        None => digits.parse::<i64>().ok()?,
    };
    Some(if negative {
        magnitude.wrapping_neg()
    } else {
        magnitude
    })
}

fn looks_numeric(tok: &str) -> bool {
    tok.starts_with(|c: char| c.is_ascii_digit() || c == '-' || c == '+')
}

fn parse_register(tok: &str) -> Result<Register, ParseErrorKind> {
    tok.parse::<Register>()
        .map_err(ParseErrorKind::UnknownRegister)
}

fn parse_source(tok: &str) -> Result<Source, ParseErrorKind> {
    if let Some(v) = parse_imm(tok) {
        return Ok(Source::Imm(v));
    }
    if looks_numeric(tok) {
        return Err(ParseErrorKind::InvalidImmediate(tok.to_string()));
    }
    parse_register(tok).map(Source::Reg)
}

/// Parses `[BASE]`, `[BASE+IMM]` or `[BASE-IMM]`.
fn parse_mem(tok: &str) -> Result<MemOperand, ParseErrorKind> {
    let inner = tok
        .strip_prefix('[')
        .and_then(|t| t.strip_suffix(']'))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ParseErrorKind::MalformedMemoryOperand(tok.to_string()))?;

    let Some(split) = inner.find(['+', '-']) else {
        return Ok(MemOperand {
            base: parse_register(inner)?,
            offset: 0,
        });
    };
    let (base, offset) = inner.split_at(split);
    let base = base.trim();
    if base.is_empty() {
        return Err(ParseErrorKind::MalformedMemoryOperand(tok.to_string()));
    }
    let offset = offset.replace(' ', "");
    let offset =
        parse_imm(&offset).ok_or_else(|| ParseErrorKind::InvalidImmediate(offset.clone()))?;
    Ok(MemOperand {
        base: parse_register(base)?,
        offset,
    })
}
