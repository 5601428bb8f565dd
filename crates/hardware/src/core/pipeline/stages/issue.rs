//! Issue Stage: dispatch one instruction per cycle.
//!
//! This stage takes the instruction at the PC and performs the following:
//! 1. **Structural Check:** Stalls (no state change) if the ROB tail slot or the
//!    target pool is occupied, counting the cause.
//! 2. **Operand Capture:** Reads each source through the RAT; an in-flight
//!    producer that already has its result supplies the value, otherwise the
//!    operand waits on the producer's tag.
//! 3. **Rename:** Points the destination (and RSP for stack operations) at the
//!    newly allocated ROB slot.
//! 4. **Next PC:** Asks the branch predictor for the successor of control
//!    transfers; everything else falls through.

use tracing::{debug, trace};

use crate::common::RegisterFile;
use crate::common::constants::STACK_SLOT;
use crate::config::LatencyConfig;
use crate::core::Cpu;
use crate::core::arch::Register;
use crate::core::pipeline::engine::Stations;
use crate::core::pipeline::lsb::LsbEntry;
use crate::core::pipeline::operand::{Operand, Port, Tag};
use crate::core::pipeline::rat::Rat;
use crate::core::pipeline::reservation::RsEntry;
use crate::core::pipeline::rob::Rob;
use crate::core::units::bru::BranchPredictor;
use crate::isa::{Instruction, Opcode, Operands, Source, Unit};

/// Operands gathered for a dispatch before its ROB slot is known.
enum Dispatch {
    /// Goes to a reservation station pool.
    Station { lhs: Operand, rhs: Operand },
    /// Goes to the load-store buffer.
    Memory {
        base: Operand,
        offset: i64,
        value: Option<Operand>,
    },
}

/// Executes the Issue stage.
pub fn issue_stage(
    cpu: &mut Cpu,
    rob: &mut Rob,
    rat: &mut Rat,
    stations: &mut Stations,
    predictor: &mut impl BranchPredictor,
    latency: &LatencyConfig,
) {
    let Some(inst) = cpu.program.get(cpu.pc) else {
        return;
    };
    let unit = inst.opcode.unit();

    if rob.is_full() {
        cpu.stats.stalls.rob_full += 1;
        trace!(pc = cpu.pc, "issue stall: ROB full");
        return;
    }
    // Claim the pool slot before touching the ROB or RAT.
    let free = match unit {
        Unit::Alu => stations.alu.free_slot(),
        Unit::MulDiv => stations.mul_div.free_slot(),
        Unit::Memory => stations.lsb.free_slot(),
    };
    let Some(slot) = free else {
        let counter = match unit {
            Unit::Alu => &mut cpu.stats.stalls.alu_rs_full,
            Unit::MulDiv => &mut cpu.stats.stalls.mul_div_rs_full,
            Unit::Memory => &mut cpu.stats.stalls.lsb_full,
        };
        *counter += 1;
        trace!(pc = cpu.pc, ?unit, "issue stall: pool full");
        return;
    };

    let inst = inst.clone();
    // Sources are read before the destination is renamed.
    let dispatch = gather(&inst, rat, rob, &cpu.regs);
    let next = if inst.is_branch() {
        predictor.predict(&inst)
    } else {
        inst.fallthrough()
    };

    let Some(tag) = rob.allocate(inst.clone(), next) else {
        return;
    };
    if let Some(dst) = inst.dest() {
        rat.rename(dst, tag);
    }
    if inst.opcode.touches_stack() {
        rat.rename(Register::STACK_POINTER, tag);
    }

    match dispatch {
        Dispatch::Station { lhs, rhs } => {
            let entry = RsEntry {
                op: inst.opcode,
                lhs,
                rhs,
                dest: tag,
                remaining: latency_of(inst.opcode, latency),
            };
            match unit {
                Unit::MulDiv => stations.mul_div.fill(slot, entry),
                _ => stations.alu.fill(slot, entry),
            }
        }
        Dispatch::Memory {
            base,
            offset,
            value,
        } => stations.lsb.fill(
            slot,
            LsbEntry {
                op: inst.opcode,
                dest: tag,
                base,
                offset,
                address: None,
                value,
            },
        ),
    }

    debug!(
        cycle = cpu.stats.cycles,
        pc = cpu.pc,
        rob = tag.0,
        next,
        inst = %inst,
        "dispatch"
    );
    cpu.stats.instructions_issued += 1;
    cpu.pc = next;
}

/// Cycles an operation spends in its reservation station.
const fn latency_of(op: Opcode, latency: &LatencyConfig) -> u32 {
    match op {
        Opcode::Mul => latency.mul,
        Opcode::Div => latency.div,
        _ => latency.alu,
    }
}

/// Captures every source operand of `inst`.
fn gather(inst: &Instruction, rat: &Rat, rob: &Rob, regs: &RegisterFile) -> Dispatch {
    let read = |reg: Register| capture(reg, rat, rob, regs);
    let source = |src: Source| match src {
        Source::Reg(reg) => read(reg),
        Source::Imm(v) => Operand::Ready(v),
    };
    let none = Operand::Ready(0);

    match inst.operands {
        Operands::Binary { lhs, rhs, .. } | Operands::Compare { lhs, rhs } => Dispatch::Station {
            lhs: read(lhs),
            rhs: source(rhs),
        },
        Operands::Move { src, .. } => Dispatch::Station {
            lhs: source(src),
            rhs: none,
        },
        Operands::Unary { reg } => Dispatch::Station {
            lhs: read(reg),
            rhs: none,
        },
        Operands::Address { mem, .. } if inst.opcode == Opcode::Lea => Dispatch::Station {
            lhs: read(mem.base),
            rhs: Operand::Ready(mem.offset),
        },
        Operands::Address { mem, .. } => Dispatch::Memory {
            base: read(mem.base),
            offset: mem.offset,
            value: None,
        },
        Operands::Store { src, mem } => Dispatch::Memory {
            base: read(mem.base),
            offset: mem.offset,
            value: Some(read(src)),
        },
        Operands::Push { src } => Dispatch::Memory {
            base: read(Register::STACK_POINTER),
            offset: -STACK_SLOT,
            value: Some(read(src)),
        },
        Operands::Pop { .. } => Dispatch::Memory {
            base: read(Register::STACK_POINTER),
            offset: 0,
            value: None,
        },
        Operands::Branch { .. } if inst.opcode == Opcode::Call => Dispatch::Station {
            lhs: read(Register::STACK_POINTER),
            rhs: Operand::Ready(inst.fallthrough() as i64),
        },
        Operands::Branch { .. } => Dispatch::Station {
            lhs: none,
            rhs: none,
        },
        Operands::Return => Dispatch::Station {
            lhs: read(Register::STACK_POINTER),
            rhs: none,
        },
    }
}

/// Reads `reg` through the RAT.
///
/// RSP renamed to a stack operation is read from that producer's
/// stack-pointer port; every other renamed register from its value port.
fn capture(reg: Register, rat: &Rat, rob: &Rob, regs: &RegisterFile) -> Operand {
    let Some(producer) = rat.producer(reg) else {
        return Operand::Ready(regs.read(reg));
    };
    let Some(entry) = rob.get(producer) else {
        return Operand::Ready(regs.read(reg));
    };
    let port = if reg == Register::STACK_POINTER && entry.inst.opcode.touches_stack() {
        Port::StackPointer
    } else {
        Port::Value
    };
    let tag = Tag {
        rob: producer,
        port,
    };
    tag.select_from(entry)
        .map_or(Operand::Waiting(tag), Operand::Ready)
}
