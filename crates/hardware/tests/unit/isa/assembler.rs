//! Assembler tests.
//!
//! Verifies operand-shape classification, label resolution across both passes,
//! comment handling, and that every class of malformed line is rejected with
//! the right reason and line number.

use pretty_assertions::assert_eq;
use rstest::rstest;
use tomasim_core::common::ParseErrorKind;
use tomasim_core::core::arch::Register;
use tomasim_core::isa::{MemOperand, Opcode, Operands, Source, assemble};

// ══════════════════════════════════════════════════════════
// 1. Shapes
// ══════════════════════════════════════════════════════════

#[test]
fn two_operand_arithmetic_reuses_destination() {
    let prog = assemble("add rax, 4").unwrap();
    assert_eq!(
        prog.instructions[0].operands,
        Operands::Binary {
            dst: Register::Rax,
            lhs: Register::Rax,
            rhs: Source::Imm(4),
        }
    );
}

#[test]
fn three_operand_arithmetic_with_register_source() {
    let prog = assemble("XOR R8, R9, R10").unwrap();
    assert_eq!(prog.instructions[0].opcode, Opcode::Xor);
    assert_eq!(
        prog.instructions[0].operands,
        Operands::Binary {
            dst: Register::R8,
            lhs: Register::R9,
            rhs: Source::Reg(Register::R10),
        }
    );
}

#[test]
fn memory_forms() {
    let prog = assemble("LOAD RAX, [RBX+16]\nSTORE RAX, [RSP-8]\nLEA RCX, [RDX]").unwrap();
    assert_eq!(
        prog.instructions[0].operands,
        Operands::Address {
            dst: Register::Rax,
            mem: MemOperand {
                base: Register::Rbx,
                offset: 16
            },
        }
    );
    assert_eq!(
        prog.instructions[1].operands,
        Operands::Store {
            src: Register::Rax,
            mem: MemOperand {
                base: Register::Rsp,
                offset: -8
            },
        }
    );
    assert_eq!(prog.instructions[2].opcode, Opcode::Lea);
}

#[test]
fn hex_and_negative_immediates() {
    let prog = assemble("MOV RAX, 0x10\nMOV RBX, -3").unwrap();
    assert_eq!(
        prog.instructions[0].operands,
        Operands::Move {
            dst: Register::Rax,
            src: Source::Imm(16)
        }
    );
    assert_eq!(
        prog.instructions[1].operands,
        Operands::Move {
            dst: Register::Rbx,
            src: Source::Imm(-3)
        }
    );
}

// ══════════════════════════════════════════════════════════
// 2. Labels and addresses
// ══════════════════════════════════════════════════════════

#[test]
fn labels_do_not_consume_addresses() {
    let src = "
        ; counter loop
        MOV RCX, 3
    LOOP:
        DEC RCX          // body
        CMP RCX, 0
        JNZ LOOP
    DONE:
    ";
    let prog = assemble(src).unwrap();
    assert_eq!(prog.len(), 4);
    assert_eq!(prog.labels.get("LOOP"), Some(&1));
    assert_eq!(prog.labels.get("DONE"), Some(&4));
    assert_eq!(prog.instructions[3].target(), Some(1));
    assert!(prog.instructions[3].is_backward());
    let addresses: Vec<usize> = prog.instructions.iter().map(|i| i.address).collect();
    assert_eq!(addresses, vec![0, 1, 2, 3]);
}

#[test]
fn forward_reference_resolves() {
    let prog = assemble("JMP END\nMOV RAX, 1\nEND:\nRET").unwrap();
    assert_eq!(prog.instructions[0].target(), Some(2));
    assert!(!prog.instructions[0].is_backward());
}

#[test]
fn labels_are_case_insensitive() {
    let prog = assemble("Top:\njmp TOP").unwrap();
    assert_eq!(prog.instructions[0].target(), Some(0));
}

#[test]
fn empty_source_is_an_empty_program() {
    let prog = assemble("\n  ; nothing\n// here\n").unwrap();
    assert!(prog.is_empty());
}

// ══════════════════════════════════════════════════════════
// 3. Rejected input
// ══════════════════════════════════════════════════════════

#[rstest]
#[case::unknown_mnemonic("FOO RAX", ParseErrorKind::UnknownMnemonic("FOO".into()))]
#[case::unknown_label("JMP NOWHERE", ParseErrorKind::UnknownLabel("NOWHERE".into()))]
#[case::duplicate_label("L:\nL:", ParseErrorKind::DuplicateLabel("L".into()))]
#[case::empty_label(":", ParseErrorKind::EmptyLabel)]
#[case::missing_brackets("LOAD RAX, RBX+4", ParseErrorKind::MalformedMemoryOperand("RBX+4".into()))]
#[case::bad_register("MOV RQX, 1", ParseErrorKind::UnknownRegister("RQX".into()))]
#[case::bad_immediate("ADD RAX, 5X", ParseErrorKind::InvalidImmediate("5X".into()))]
#[case::numeric_base("LOAD RAX, [4+4]", ParseErrorKind::UnknownRegister("4".into()))]
#[case::missing_base("STORE RAX, [-8]", ParseErrorKind::MalformedMemoryOperand("[-8]".into()))]
fn rejects(#[case] src: &str, #[case] kind: ParseErrorKind) {
    let err = assemble(src).unwrap_err();
    assert_eq!(err.kind, kind);
}

#[rstest]
#[case("ADD RAX", "2 or 3", 1)]
#[case("CMP RAX, RBX, RCX", "2", 3)]
#[case("INC", "1", 0)]
#[case("RET RAX", "0", 1)]
#[case("CALL", "1 (label)", 0)]
fn rejects_wrong_operand_count(#[case] src: &str, #[case] expected: &str, #[case] found: usize) {
    let err = assemble(src).unwrap_err();
    match err.kind {
        ParseErrorKind::OperandCount {
            expected: e,
            found: f,
            ..
        } => {
            assert_eq!(e, expected);
            assert_eq!(f, found);
        }
        other => panic!("expected OperandCount, got {other:?}"),
    }
}

#[test]
fn error_names_the_source_line() {
    let err = assemble("MOV RAX, 1\n\n; comment\nPUSH 5").unwrap_err();
    assert_eq!(err.line, 4);
    assert_eq!(err.text, "PUSH 5");
    assert!(err.to_string().contains("line 4"));
}
