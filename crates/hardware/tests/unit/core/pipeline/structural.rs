//! Structural hazard tests.
//!
//! A full pool or a full ROB stalls issue without dropping or reordering the
//! blocked instruction; it dispatches as soon as a slot frees.

use pretty_assertions::assert_eq;
use tomasim_core::config::Config;
use tomasim_core::core::arch::Register;
use tomasim_core::core::pipeline::rat::RatEntry;

use crate::common::harness::TestContext;

#[test]
fn saturated_alu_pool_stalls_issue() {
    let mut ctx = TestContext::new().load(
        "
        MOV RAX, 12
        DIV RAX, RAX, 3
        ADD RBX, RAX, 1
        ADD RCX, RAX, 2
        ADD RDX, RAX, 3
        ADD RSI, RAX, 4
        ADD RDI, RAX, 5
        ADD R8, RAX, 6
        ADD R9, RAX, 7
        ",
    );

    let stalled = ctx.step_until(50, |sim| sim.stats().stalls.alu_rs_full > 0);
    assert!(stalled);
    assert!(ctx.sim.alu_rs().is_full());
    assert_eq!(ctx.sim.alu_rs().len(), 6);
    assert_eq!(ctx.sim.pc(), 8, "the seventh ADD must stay at the PC");

    let issued = ctx.sim.stats().instructions_issued;
    let rob_len = ctx.sim.rob().len();
    ctx.step(3);
    assert_eq!(ctx.sim.pc(), 8);
    assert_eq!(ctx.sim.stats().instructions_issued, issued);
    assert_eq!(ctx.sim.rob().len(), rob_len, "a stalled issue allocates no ROB slot");
    assert_eq!(ctx.sim.rat().get(Register::R9), RatEntry::Architectural);
    assert!(ctx.sim.stats().stalls.alu_rs_full >= 4);

    ctx.run();
    assert_eq!(ctx.sim.committed(), 9);
    assert_eq!(ctx.reg(Register::Rbx), 5);
    assert_eq!(ctx.reg(Register::R8), 10);
    assert_eq!(ctx.reg(Register::R9), 11);
    assert_eq!(ctx.sim.stats().instructions_issued, 9);
}

#[test]
fn saturated_mul_div_pool_stalls_issue() {
    let mut ctx = TestContext::new().load(
        "
        DIV RAX, RAX, 1
        DIV RBX, RBX, 1
        DIV RCX, RCX, 1
        MUL RDX, RDX, 1
        ",
    );
    let stalled = ctx.step_until(20, |sim| sim.stats().stalls.mul_div_rs_full > 0);
    assert!(stalled);
    assert_eq!(ctx.sim.pc(), 3);
    assert!(ctx.sim.mul_div_rs().is_full());

    ctx.run();
    assert_eq!(ctx.sim.committed(), 4);
    assert_eq!(ctx.sim.stats().stalls.alu_rs_full, 0);
}

#[test]
fn full_lsb_stalls_issue() {
    let mut config = Config::default();
    config.pipeline.lsb_size = 2;
    let mut ctx = TestContext::with_config(config).load(
        "
        MOV RCX, 40
        DIV RAX, RCX, 4
        STORE RAX, [RAX+8]
        STORE RAX, [RAX+16]
        STORE RCX, [RAX+0]
        ",
    );
    ctx.run();

    assert!(ctx.sim.stats().stalls.lsb_full > 0);
    assert_eq!(ctx.sim.committed(), 5);
    assert_eq!(ctx.mem(18), 10);
    assert_eq!(ctx.mem(26), 10);
    assert_eq!(ctx.mem(10), 40);
    assert_eq!(ctx.sim.stats().inst_store, 3);
}

#[test]
fn full_rob_stalls_issue() {
    let mut config = Config::default();
    config.pipeline.rob_size = 4;
    let mut ctx = TestContext::with_config(config).load(
        "
        DIV RAX, RAX, 1
        MOV RBX, 1
        MOV RCX, 2
        MOV RDX, 3
        MOV RSI, 4
        ",
    );
    let stalled = ctx.step_until(20, |sim| sim.stats().stalls.rob_full > 0);
    assert!(stalled);
    assert!(ctx.sim.rob().is_full());
    assert_eq!(ctx.sim.rob().len(), 4);
    assert_eq!(ctx.sim.pc(), 4);

    ctx.run();
    assert_eq!(ctx.reg(Register::Rsi), 4);
    assert_eq!(ctx.committed_addresses(), vec![0, 1, 2, 3, 4]);
}
