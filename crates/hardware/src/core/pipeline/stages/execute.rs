//! Execute Stage.
//!
//! This module advances every functional unit by one cycle. It performs the following:
//! 1. **Countdown:** Each reservation station with both operands resolved counts
//!    down by one; at zero it computes its result.
//! 2. **Memory Resolution:** Each LSB entry latches its address once the base
//!    resolves. Loads read data memory; stores mark their ROB slot ready
//!    directly, since their memory write is deferred to commit.
//! 3. **Bus Arbitration:** Finished results are offered to the CDB oldest first.
//!    A result whose class lane is already taken stays in its slot and retries
//!    next cycle.

use tracing::trace;

use crate::common::constants::STACK_SLOT;
use crate::core::Cpu;
use crate::core::pipeline::cdb::{Cdb, CdbResult, FuClass};
use crate::core::pipeline::engine::Stations;
use crate::core::pipeline::lsb::LsbEntry;
use crate::core::pipeline::operand::Operand;
use crate::core::pipeline::reservation::RsEntry;
use crate::core::pipeline::rob::{Rob, RobState, RobTag};
use crate::core::units::alu::Alu;
use crate::isa::Opcode;

/// Reservation station pool a finished result came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
enum Pool {
    Alu,
    MulDiv,
}

/// Executes the Execute stage.
pub fn execute_stage(cpu: &mut Cpu, rob: &mut Rob, stations: &mut Stations, cdb: &mut Cdb) {
    let mut finished: Vec<(usize, Pool, usize, CdbResult)> = Vec::new();

    for (pool, rs) in [
        (Pool::Alu, &mut stations.alu),
        (Pool::MulDiv, &mut stations.mul_div),
    ] {
        for idx in 0..rs.capacity() {
            let Some(entry) = rs.get_mut(idx) else {
                continue;
            };
            if !entry.operands_ready() {
                continue;
            }
            if entry.remaining > 0 {
                entry.remaining -= 1;
                mark_executing(rob, entry.dest);
            }
            if entry.remaining == 0
                && let Some(result) = compute(entry)
            {
                finished.push((rob.age(entry.dest), pool, idx, result));
            }
        }
    }

    finished.sort_by_key(|(age, pool, idx, _)| (*age, *pool, *idx));
    for (_, pool, idx, result) in finished {
        if cdb.post(result) {
            let rs = match pool {
                Pool::Alu => &mut stations.alu,
                Pool::MulDiv => &mut stations.mul_div,
            };
            let _ = rs.release(idx);
            trace!(rob = result.rob.0, value = result.value, class = ?result.class, "execute");
        } else {
            cpu.stats.cdb_conflicts += 1;
        }
    }

    execute_lsb(cpu, rob, stations, cdb);
}

/// Resolves LSB entries oldest first.
fn execute_lsb(cpu: &mut Cpu, rob: &mut Rob, stations: &mut Stations, cdb: &mut Cdb) {
    let mut order: Vec<(usize, usize)> = stations
        .lsb
        .iter()
        .map(|(idx, e)| (rob.age(e.dest), idx))
        .collect();
    order.sort_unstable();

    for (_, idx) in order {
        let Some(entry) = stations.lsb.get_mut(idx) else {
            continue;
        };
        if entry.resolve_address() {
            mark_executing(rob, entry.dest);
        }
        if !entry.is_ready() {
            continue;
        }
        let entry = *entry;
        let Some(address) = entry.address else {
            continue;
        };

        let done = match entry.op {
            Opcode::Store => {
                if let Some(slot) = rob.get_mut(entry.dest) {
                    slot.value = store_value(&entry);
                    slot.address = Some(address);
                    slot.ready = true;
                }
                true
            }
            Opcode::Push => {
                let value = store_value(&entry);
                let result = CdbResult {
                    class: FuClass::Memory,
                    rob: entry.dest,
                    value,
                    flags: None,
                    stack_pointer: Some(address),
                    address: Some(address),
                };
                let posted = cdb.post(result);
                if posted && let Some(slot) = rob.get_mut(entry.dest) {
                    slot.value = value;
                    slot.address = Some(address);
                    slot.stack_pointer = Some(address);
                    slot.ready = true;
                }
                posted
            }
            Opcode::Load | Opcode::Pop => {
                let value = cpu.memory.load(address);
                let result = CdbResult {
                    class: FuClass::Memory,
                    rob: entry.dest,
                    value,
                    flags: None,
                    stack_pointer: (entry.op == Opcode::Pop)
                        .then(|| address.wrapping_add(STACK_SLOT)),
                    address: Some(address),
                };
                trace!(rob = entry.dest.0, address, value, "load");
                cdb.post(result)
            }
            _ => true,
        };

        if done {
            let _ = stations.lsb.release(idx);
        } else {
            cpu.stats.cdb_conflicts += 1;
        }
    }
}

fn store_value(entry: &LsbEntry) -> i64 {
    entry.value.and_then(Operand::value).unwrap_or(0)
}

fn mark_executing(rob: &mut Rob, tag: RobTag) {
    if let Some(slot) = rob.get_mut(tag)
        && slot.state == RobState::Issued
    {
        slot.state = RobState::Executing;
    }
}

/// Computes the result of a reservation station whose countdown finished.
///
/// Returns `None` only if an operand is unexpectedly unresolved.
fn compute(entry: &RsEntry) -> Option<CdbResult> {
    let a = entry.lhs.value()?;
    let b = entry.rhs.value()?;
    let class = FuClass::of(entry.op);
    let result = match entry.op {
        // a = RSP, b = return address
        Opcode::Call => {
            let sp = a.wrapping_sub(STACK_SLOT);
            CdbResult {
                stack_pointer: Some(sp),
                address: Some(sp),
                ..CdbResult::value(class, entry.dest, b)
            }
        }
        // a = RSP; the target is read from [RSP] at commit
        Opcode::Ret => CdbResult {
            stack_pointer: Some(a.wrapping_add(STACK_SLOT)),
            address: Some(a),
            ..CdbResult::value(class, entry.dest, 0)
        },
        op if op.is_branch() => CdbResult::value(class, entry.dest, 0),
        op => {
            let out = Alu::execute(op, a, b);
            CdbResult {
                flags: out.flags,
                ..CdbResult::value(class, entry.dest, out.value)
            }
        }
    };
    Some(result)
}
