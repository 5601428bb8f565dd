//! Stack operation tests.
//!
//! PUSH, POP, CALL and RET rename RSP like any other destination. Consumers
//! of the new stack pointer bind to the producer's stack-pointer result, and
//! return targets come from committed memory when RET retires.

use pretty_assertions::assert_eq;
use tomasim_core::config::Config;
use tomasim_core::core::arch::Register;

use crate::common::harness::TestContext;

fn with_stack(initial_sp: i64) -> Config {
    let mut config = Config::default();
    config.general.initial_sp = initial_sp;
    config
}

#[test]
fn initial_stack_pointer_is_applied() {
    let ctx = TestContext::with_config(with_stack(4096)).load("MOV RAX, 1");
    assert_eq!(ctx.reg(Register::Rsp), 4096);
}

#[test]
fn pushes_chain_through_the_stack_pointer() {
    let mut ctx = TestContext::with_config(with_stack(1000)).load(
        "
        MOV RAX, 42
        MOV RBX, 7
        PUSH RAX
        PUSH RBX
        ",
    );
    ctx.run();

    assert_eq!(ctx.reg(Register::Rsp), 984);
    assert_eq!(ctx.mem(992), 42);
    assert_eq!(ctx.mem(984), 7);
    assert_eq!(ctx.sim.stats().inst_stack, 2);
}

#[test]
fn pop_returns_pushed_values_in_reverse() {
    let mut ctx = TestContext::with_config(with_stack(1000)).load(
        "
        MOV RAX, 42
        MOV RBX, 7
        PUSH RAX
        PUSH RBX
        CMP RAX, RAX
        JZ DRAIN
        MOV RDX, 1
    DRAIN:
        POP RCX
        POP RSI
        ",
    );
    ctx.run();

    assert_eq!(ctx.reg(Register::Rcx), 7);
    assert_eq!(ctx.reg(Register::Rsi), 42);
    assert_eq!(ctx.reg(Register::Rsp), 1000);
    assert_eq!(ctx.reg(Register::Rdx), 0);
    assert_eq!(ctx.sim.mispredictions(), 1);
}

#[test]
fn call_and_return() {
    let mut ctx = TestContext::new().load(
        "
        MOV RAX, 1
        CALL FN
        MOV RCX, 3
        JMP END
    FN:
        MOV RBX, 2
        RET
    END:
        ",
    );
    ctx.run();

    assert_eq!(ctx.committed_addresses(), vec![0, 1, 4, 5, 2, 3]);
    assert_eq!(ctx.reg(Register::Rbx), 2);
    assert_eq!(ctx.reg(Register::Rcx), 3);
    assert_eq!(ctx.reg(Register::Rsp), 0);
    assert_eq!(ctx.mem(-8), 2, "CALL stores its return address");
    assert_eq!(ctx.sim.mispredictions(), 0);
}

#[test]
fn nested_calls_predict_through_the_return_stack() {
    let mut ctx = TestContext::with_config(with_stack(1000)).load(
        "
        CALL A
        JMP END
    A:
        CALL B
        INC RAX
        RET
    B:
        MOV RAX, 10
        RET
    END:
        ",
    );
    ctx.run();

    assert_eq!(ctx.committed_addresses(), vec![0, 2, 5, 6, 3, 4, 1]);
    assert_eq!(ctx.reg(Register::Rax), 11);
    assert_eq!(ctx.reg(Register::Rsp), 1000);
    assert_eq!(ctx.mem(992), 1);
    assert_eq!(ctx.mem(984), 3);
    assert_eq!(ctx.sim.mispredictions(), 0);
}

#[test]
fn shallow_return_stack_mispredicts_outer_return() {
    let mut config = with_stack(1000);
    config.pipeline.ras_size = 1;
    let mut ctx = TestContext::with_config(config).load(
        "
        CALL A
        JMP END
    A:
        CALL B
        INC RAX
        RET
    B:
        MOV RAX, 10
        RET
    END:
        ",
    );
    ctx.run();

    assert_eq!(ctx.reg(Register::Rax), 11);
    assert_eq!(ctx.reg(Register::Rsp), 1000);
    assert_eq!(ctx.sim.mispredictions(), 1);
}

#[test]
fn overwritten_return_address_redirects_at_commit() {
    let mut ctx = TestContext::new().load(
        "
        CALL F
        MOV RBX, 1
        JMP END
    F:
        MOV RAX, 6
        STORE RAX, [RSP+0]
        RET
    ALT:
        MOV RCX, 7
    END:
        ",
    );
    ctx.run();

    // The redirected RET is squashed but still pops the stack.
    assert_eq!(ctx.committed_addresses(), vec![0, 3, 4, 6]);
    assert_eq!(ctx.reg(Register::Rbx), 0);
    assert_eq!(ctx.reg(Register::Rcx), 7);
    assert_eq!(ctx.reg(Register::Rsp), 0);
    assert_eq!(ctx.sim.mispredictions(), 1);
}
