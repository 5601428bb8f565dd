//! Ordering tests.
//!
//! Results may complete out of order but retire strictly in program order,
//! and a produced value reaches waiting consumers exactly one cycle later.

use pretty_assertions::assert_eq;
use tomasim_core::config::Config;
use tomasim_core::core::arch::Register;
use tomasim_core::core::pipeline::cdb::FuClass;
use tomasim_core::core::pipeline::operand::{Operand, Port, Tag};
use tomasim_core::core::pipeline::rob::{RobState, RobTag};

use crate::common::harness::TestContext;

fn single_cycle_alu() -> Config {
    let mut config = Config::default();
    config.latency.alu = 1;
    config
}

// ══════════════════════════════════════════════════════════
// 1. In-order commit
// ══════════════════════════════════════════════════════════

#[test]
fn commit_follows_program_order() {
    let mut ctx = TestContext::new().load(
        "
        MOV RAX, 40
        DIV RBX, RAX, 4
        MOV RCX, 1
        MUL RDX, RCX, 3
        ",
    );
    ctx.run();

    assert_eq!(ctx.committed_addresses(), vec![0, 1, 2, 3]);
    let cycles: Vec<u64> = ctx.sim.commit_log().iter().map(|r| r.cycle).collect();
    assert!(cycles.windows(2).all(|w| w[0] < w[1]), "{cycles:?}");
    assert_eq!(ctx.reg(Register::Rbx), 10);
    assert_eq!(ctx.reg(Register::Rdx), 3);
}

#[test]
fn younger_result_waits_behind_slow_head() {
    let mut ctx = TestContext::new().load(
        "
        MOV RAX, 40
        DIV RBX, RAX, 4
        MOV RCX, 1
        MOV RDX, 2
        ",
    );
    let done = ctx.step_until(100, |sim| {
        sim.rob().get(RobTag(3)).is_some_and(|e| e.has_result())
    });
    assert!(done);

    // Both MOVs behind the DIV have results but must not be visible yet.
    assert_eq!(ctx.sim.committed(), 1);
    assert_eq!(ctx.reg(Register::Rcx), 0);
    assert_eq!(ctx.reg(Register::Rdx), 0);
    assert_eq!(
        ctx.sim.rob().get(RobTag(1)).map(|e| e.state),
        Some(RobState::Executing)
    );

    ctx.run();
    assert_eq!(ctx.reg(Register::Rcx), 1);
    assert_eq!(ctx.reg(Register::Rdx), 2);
}

// ══════════════════════════════════════════════════════════
// 2. Broadcast timing
// ══════════════════════════════════════════════════════════

#[test]
fn result_reaches_consumer_one_cycle_after_execution() {
    let mut ctx = TestContext::with_config(single_cycle_alu()).load("MOV RAX, 5\nADD RBX, RAX, 1");

    // Cycle 2: MOV executes and drives the bus; ADD dispatches and must wait.
    ctx.step(2);
    assert!(ctx.sim.pipeline.cdb.is_busy(FuClass::Alu));
    let add = ctx.sim.alu_rs().iter().map(|(_, e)| *e).next().unwrap();
    assert_eq!(
        add.lhs,
        Operand::Waiting(Tag {
            rob: RobTag(0),
            port: Port::Value,
        })
    );

    // Cycle 3: writeback wakes the ADD, which executes in the same cycle.
    ctx.step(1);
    assert_eq!(
        ctx.sim.rob().get(RobTag(0)).map(|e| e.state),
        Some(RobState::WrittenBack)
    );
    assert_eq!(
        ctx.sim.rob().get(RobTag(1)).map(|e| e.state),
        Some(RobState::Executing)
    );
    assert!(ctx.sim.alu_rs().is_empty());

    ctx.run();
    assert_eq!(ctx.reg(Register::Rbx), 6);
    assert_eq!(ctx.sim.cycle(), 5);
    let cycles: Vec<u64> = ctx.sim.commit_log().iter().map(|r| r.cycle).collect();
    assert_eq!(cycles, vec![4, 5]);
}

#[test]
fn ready_producer_is_captured_at_dispatch() {
    let mut ctx = TestContext::with_config(single_cycle_alu()).load(
        "
        DIV R8, R8, 1
        MOV RAX, 5
        MUL RBX, RBX, 1
        ADD RDX, RAX, 1
        ",
    );
    // By cycle 4 the MOV has written back but sits behind the DIV, so the
    // ADD reads its value straight out of the ROB.
    ctx.step(4);
    assert_eq!(ctx.sim.committed(), 0);
    let add = ctx
        .sim
        .alu_rs()
        .iter()
        .map(|(_, e)| *e)
        .find(|e| e.dest == RobTag(3))
        .unwrap();
    assert_eq!(add.lhs, Operand::Ready(5));

    ctx.run();
    assert_eq!(ctx.reg(Register::Rdx), 6);
}

// ══════════════════════════════════════════════════════════
// 3. Bus arbitration
// ══════════════════════════════════════════════════════════

#[test]
fn simultaneous_results_share_one_lane() {
    let mut ctx = TestContext::new().load(
        "
        MOV RAX, 12
        DIV RAX, RAX, 4
        ADD RBX, RAX, 1
        ADD RCX, RAX, 2
        ",
    );
    ctx.run();

    assert!(ctx.sim.stats().cdb_conflicts >= 1);
    assert_eq!(ctx.reg(Register::Rbx), 4);
    assert_eq!(ctx.reg(Register::Rcx), 5);
    assert_eq!(ctx.committed_addresses(), vec![0, 1, 2, 3]);
}
