//! Simulator lifecycle tests.
//!
//! Covers program loading and reloading, reset, the cycle limit, stepping a
//! finished simulator, and snapshots.

use pretty_assertions::assert_eq;
use tomasim_core::Simulator;
use tomasim_core::common::ParseErrorKind;
use tomasim_core::config::Config;
use tomasim_core::core::arch::Register;
use tomasim_core::core::cpu::Fatal;

use crate::common::harness::TestContext;

fn stack_at(initial_sp: i64) -> Config {
    let mut config = Config::default();
    config.general.initial_sp = initial_sp;
    config
}

#[test]
fn failed_load_leaves_simulator_reset_and_empty() {
    let mut sim = Simulator::new();
    sim.load("MOV RAX, 3\nSTORE RAX, [RAX+0]").unwrap();
    let _ = sim.run();
    assert_eq!(sim.registers().read(Register::Rax), 3);

    let err = sim.load("MOV RAX, 1\nJMP MISSING").unwrap_err();
    assert_eq!(err.line, 2);
    assert_eq!(err.kind, ParseErrorKind::UnknownLabel("MISSING".into()));

    assert!(sim.program().is_empty());
    assert_eq!(sim.registers().read(Register::Rax), 0);
    assert!(sim.memory().is_empty());
    assert_eq!(sim.cycle(), 0);
    assert_eq!(sim.committed(), 0);
    assert!(sim.is_finished());
}

#[test]
fn reload_discards_previous_run() {
    let mut ctx = TestContext::new().load("MOV RAX, 9\nSTORE RAX, [RAX+1]");
    ctx.run();
    assert_eq!(ctx.mem(10), 9);

    ctx.sim.load("MOV RBX, 2").unwrap();
    assert_eq!(ctx.sim.cycle(), 0);
    assert!(ctx.sim.commit_log().is_empty());
    ctx.run();
    assert_eq!(ctx.reg(Register::Rax), 0);
    assert_eq!(ctx.reg(Register::Rbx), 2);
    assert!(ctx.sim.memory().is_empty());
}

#[test]
fn reset_returns_to_power_on_state() {
    let mut ctx = TestContext::with_config(stack_at(512)).load("MOV RAX, 5\nMOV RBX, 6\nPUSH RBX");
    ctx.run();
    assert_eq!(ctx.mem(504), 6);

    ctx.sim.reset();
    assert!(ctx.sim.program().is_empty());
    assert!(ctx.sim.is_finished());
    assert_eq!(ctx.sim.pc(), 0);
    assert_eq!(ctx.sim.cycle(), 0);
    assert_eq!(ctx.sim.committed(), 0);
    assert_eq!(ctx.reg(Register::Rax), 0);
    assert_eq!(ctx.reg(Register::Rbx), 0);
    assert_eq!(ctx.reg(Register::Rsp), 512);
    assert!(ctx.sim.memory().is_empty());
    assert!(ctx.sim.rob().is_empty());

    ctx.step(5);
    assert_eq!(ctx.sim.cycle(), 0, "nothing left to run");
}

#[test]
fn reloading_a_program_replays_identically() {
    let text = "
        MOV RCX, 4
    L:
        MUL RAX, RCX, RCX
        DEC RCX
        CMP RCX, 0
        JNZ L
        ";
    let mut ctx = TestContext::new().load(text);
    ctx.run();
    let first = ctx.sim.snapshot();

    ctx.sim.load(text).unwrap();
    assert_eq!(ctx.sim.pc(), 0);
    assert_eq!(ctx.sim.program().len(), 5);
    assert!(!ctx.sim.is_finished());
    ctx.run();

    assert_eq!(ctx.sim.snapshot(), first);
}

#[test]
fn cycle_limit_is_fatal() {
    let mut config = Config::default();
    config.general.max_cycles = Some(50);
    let mut ctx = TestContext::with_config(config).load("L:\nJMP L");
    ctx.run();

    assert_eq!(ctx.sim.fatal(), Some(Fatal::CycleLimit(50)));
    assert_eq!(ctx.sim.cycle(), 50);
    assert!(ctx.sim.is_finished());
    assert_eq!(
        ctx.sim.fatal().map(|f| f.to_string()).as_deref(),
        Some("cycle limit of 50 reached")
    );
}

#[test]
fn stepping_a_finished_simulator_does_nothing() {
    let mut ctx = TestContext::new().load("MOV RAX, 1");
    ctx.run();
    let before = ctx.sim.snapshot();

    ctx.step(10);
    assert_eq!(ctx.sim.snapshot(), before);
}

#[test]
fn snapshot_serializes_registers_by_name() {
    let mut ctx = TestContext::new().load("MOV RAX, 5\nADD RBX, RAX, 3\nSTORE RBX, [RAX+0]");
    ctx.run();

    let snapshot = ctx.sim.snapshot();
    assert!(snapshot.finished);
    assert_eq!(snapshot.fatal, None);
    assert_eq!(snapshot.registers.get(&Register::Rbx), Some(&8));

    let json: serde_json::Value = serde_json::to_value(&snapshot).unwrap();
    assert_eq!(json["registers"]["RBX"], 8);
    assert_eq!(json["stats"]["instructions_retired"], 3);
    assert_eq!(json["finished"], true);
}

#[test]
fn pipeline_views_are_sized_from_config() {
    let mut config = Config::default();
    config.pipeline.rob_size = 8;
    config.pipeline.alu_rs_size = 2;
    config.pipeline.mul_div_rs_size = 1;
    config.pipeline.lsb_size = 3;
    let sim = Simulator::with_config(config);

    assert_eq!(sim.rob().capacity(), 8);
    assert_eq!(sim.alu_rs().capacity(), 2);
    assert_eq!(sim.mul_div_rs().capacity(), 1);
    assert_eq!(sim.lsb().capacity(), 3);
    assert_eq!(sim.config().pipeline.rob_size, 8);
}
