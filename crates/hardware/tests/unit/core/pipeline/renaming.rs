//! Register renaming tests.
//!
//! Reused registers must not serialize independent work: a younger writer
//! takes over the RAT entry, readers bind to whichever producer was current
//! when they dispatched, and the RAT drains back to architectural state.

use pretty_assertions::assert_eq;
use tomasim_core::core::arch::Register;
use tomasim_core::core::pipeline::rat::RatEntry;
use tomasim_core::core::pipeline::rob::RobTag;

use crate::common::harness::TestContext;

#[test]
fn waw_younger_writer_wins() {
    let mut ctx = TestContext::new().load(
        "
        MOV RAX, 100
        DIV RBX, RAX, 10
        MOV RBX, 7
        ADD RCX, RBX, 1
        ",
    );
    ctx.run();

    assert_eq!(ctx.reg(Register::Rbx), 7);
    assert_eq!(ctx.reg(Register::Rcx), 8);
    assert_eq!(ctx.sim.committed(), 4);
}

#[test]
fn rat_points_at_latest_producer_while_in_flight() {
    let mut ctx = TestContext::new().load(
        "
        MOV RAX, 100
        DIV RBX, RAX, 10
        MOV RBX, 7
        ",
    );
    ctx.step(3);

    assert_eq!(ctx.sim.rat().get(Register::Rbx), RatEntry::Pending(2));
    assert_eq!(ctx.sim.rat().producer(Register::Rdx), None);
    // DIV is still counting down, so nothing past it has committed.
    assert_eq!(ctx.reg(Register::Rbx), 0);
}

#[test]
fn war_reader_keeps_old_value() {
    let mut ctx = TestContext::new().load(
        "
        MOV RAX, 3
        MUL RBX, RAX, 5
        MOV RAX, 9
        ",
    );
    ctx.run();

    assert_eq!(ctx.reg(Register::Rbx), 15);
    assert_eq!(ctx.reg(Register::Rax), 9);
}

#[test]
fn dependent_reads_captured_value_of_committed_producer() {
    let mut ctx = TestContext::new().load(
        "
        MOV RAX, 5
        INC RAX
        INC RAX
        ADD RBX, RAX, RAX
        ",
    );
    ctx.run();

    assert_eq!(ctx.reg(Register::Rax), 7);
    assert_eq!(ctx.reg(Register::Rbx), 14);
}

#[test]
fn rat_is_architectural_after_drain() {
    let mut ctx = TestContext::new().load("MOV RAX, 1\nMUL RBX, RAX, 2\nPUSH RBX\nPOP RCX");
    ctx.run();

    assert!(ctx.sim.is_finished());
    assert!(
        ctx.sim
            .rat()
            .iter()
            .all(|(_, entry)| entry == RatEntry::Architectural)
    );
    assert!(ctx.sim.rob().is_empty());
    assert!(ctx.sim.rob().get(RobTag(0)).is_none());
}
