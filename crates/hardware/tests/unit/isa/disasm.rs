//! Disassembly tests.

use pretty_assertions::assert_eq;
use tomasim_core::isa::assemble;

#[test]
fn canonical_text_for_every_shape() {
    let src = "
        add rax, 1
        cmp rax, rbx
        mov rcx, -2
        lea rdx, [rsp+8]
        store rdx, [rbp-16]
        not rsi
        push rdi
        pop r8
    top:
        jle top
        call top
        ret
    ";
    let prog = assemble(src).unwrap();
    let text: Vec<String> = prog.instructions.iter().map(ToString::to_string).collect();
    assert_eq!(
        text,
        vec![
            "ADD RAX, RAX, 1",
            "CMP RAX, RBX",
            "MOV RCX, -2",
            "LEA RDX, [RSP+8]",
            "STORE RDX, [RBP-16]",
            "NOT RSI",
            "PUSH RDI",
            "POP R8",
            "JLE TOP",
            "CALL TOP",
            "RET",
        ]
    );
}

#[test]
fn disassembly_reassembles_to_the_same_program() {
    let src = "MOV RAX, 7\nL:\nSUB RBX, RAX, 0x3\nLOAD RCX, [RBX]\nJG L";
    let first = assemble(src).unwrap();
    let listing: Vec<String> = first
        .instructions
        .iter()
        .map(|i| {
            if i.address == 1 {
                format!("L:\n{i}")
            } else {
                i.to_string()
            }
        })
        .collect();
    let second = assemble(&listing.join("\n")).unwrap();
    let shapes = |p: &tomasim_core::isa::Program| {
        p.instructions
            .iter()
            .map(|i| (i.opcode, i.operands.clone()))
            .collect::<Vec<_>>()
    };
    assert_eq!(shapes(&first), shapes(&second));
}
