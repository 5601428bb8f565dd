//! Commit Stage: retire the ROB head.
//!
//! This stage retires at most one instruction per cycle, in program order:
//! 1. Resolve a branch waiting at the head: direction from the committed
//!    flags, RET's target from the return address on the committed stack.
//! 2. Compare a branch's resolved successor with the address fetch continued
//!    at. On a mismatch the branch is not retired; it stays at the head for
//!    the squash and the caller redirects fetch.
//! 3. Otherwise apply the memory write, destination register, stack pointer
//!    and flags, then release RAT entries that still name the retiring slot.

use tracing::debug;

use crate::core::Cpu;
use crate::core::arch::Register;
use crate::core::cpu::CommitRecord;
use crate::core::pipeline::rat::Rat;
use crate::core::pipeline::rob::{Rob, RobEntry, RobState};
use crate::core::units::bru::BranchPredictor;
use crate::isa::Opcode;

/// Executes the Commit stage.
///
/// Returns the correct successor address if the head was a mispredicted
/// branch; the caller must squash and redirect. A mispredicted branch is not
/// counted as committed and is discarded by the squash along with everything
/// younger. Only its stack effects (CALL's return address push, RET's pop)
/// reach committed state, so the stack matches the redirected control flow.
pub fn commit_stage(
    cpu: &mut Cpu,
    rob: &mut Rob,
    rat: &mut Rat,
    predictor: &mut impl BranchPredictor,
) -> Option<usize> {
    let tag = rob.head_tag()?;
    let head = rob.peek_head_mut()?;
    if head.inst.is_branch() && !head.ready && head.state == RobState::WrittenBack {
        resolve_branch(head, cpu);
    }
    if !head.ready {
        return None;
    }

    if head.inst.is_branch() {
        let correct = head.target.unwrap_or_else(|| head.inst.fallthrough());
        if correct != head.predicted_next {
            predictor.on_commit(&head.inst);
            apply_stack_effects(cpu, head);
            cpu.stats.branch_mispredictions += 1;
            debug!(
                cycle = cpu.stats.cycles,
                rob = tag.0,
                address = head.inst.address,
                predicted = head.predicted_next,
                correct,
                "mispredict"
            );
            return Some(correct);
        }
    }

    let entry = rob.commit_head()?;
    let inst = &entry.inst;

    let mut record = CommitRecord {
        cycle: cpu.stats.cycles,
        address: inst.address,
        text: inst.to_string(),
        reg_writes: Vec::new(),
        mem_write: None,
        flags: None,
    };

    if inst.opcode.writes_memory()
        && let Some(addr) = entry.address
    {
        cpu.memory.store(addr, entry.value);
        record.mem_write = Some((addr, entry.value));
    }
    if let Some(dst) = inst.dest() {
        cpu.regs.write(dst, entry.value);
        record.reg_writes.push((dst, entry.value));
    }
    if inst.opcode.touches_stack()
        && let Some(sp) = entry.stack_pointer
    {
        cpu.regs.write(Register::STACK_POINTER, sp);
        record.reg_writes.push((Register::STACK_POINTER, sp));
    }
    if let Some(flags) = entry.flags {
        cpu.regs.flags = flags;
        record.flags = Some(flags);
    }

    if let Some(dst) = inst.dest() {
        rat.release_if_match(dst, tag);
    }
    if inst.opcode.touches_stack() {
        rat.release_if_match(Register::STACK_POINTER, tag);
    }
    cpu.stats.record_commit(inst.opcode);
    if inst.is_branch() {
        predictor.on_commit(inst);
        cpu.stats.branch_predictions += 1;
    }

    debug!(
        cycle = cpu.stats.cycles,
        rob = tag.0,
        address = inst.address,
        inst = %inst,
        "commit"
    );
    if cpu.log_commits {
        cpu.commit_log.push(record);
    }
    None
}

/// Writes the return address push and stack pointer of a CALL or RET that
/// is about to be squashed.
fn apply_stack_effects(cpu: &mut Cpu, entry: &RobEntry) {
    if entry.inst.opcode.writes_memory()
        && let Some(addr) = entry.address
    {
        cpu.memory.store(addr, entry.value);
    }
    if entry.inst.opcode.touches_stack()
        && let Some(sp) = entry.stack_pointer
    {
        cpu.regs.write(Register::STACK_POINTER, sp);
    }
}

/// Resolves a branch at the ROB head against committed state and marks it ready.
fn resolve_branch(entry: &mut RobEntry, cpu: &Cpu) {
    let inst = &entry.inst;
    let taken = inst.opcode.is_taken(cpu.regs.flags);
    let target = match inst.opcode {
        // An unrepresentable return address sends fetch past the program end.
        Opcode::Ret => entry
            .address
            .map(|sp| cpu.memory.load(sp))
            .and_then(|addr| usize::try_from(addr).ok())
            .unwrap_or(usize::MAX),
        _ => inst.target().unwrap_or_else(|| inst.fallthrough()),
    };
    entry.taken = Some(taken);
    entry.target = Some(if taken { target } else { inst.fallthrough() });
    entry.ready = true;
}
