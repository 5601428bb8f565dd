//! Writeback Stage: drain the CDB into the ROB and wake dependents.
//!
//! Every result deposited by the previous cycle's execute stage is recorded in
//! its ROB slot and broadcast to all waiting reservation station and LSB
//! operands. It does NOT write to the register file; that happens at commit.
//! Branch results are recorded but the entry stays not-ready until commit
//! resolves the branch.

use tracing::trace;

use crate::core::pipeline::cdb::Cdb;
use crate::core::pipeline::engine::Stations;
use crate::core::pipeline::rob::{Rob, RobState};

/// Executes the Writeback stage. Leaves the bus empty.
pub fn writeback_stage(cdb: &mut Cdb, rob: &mut Rob, stations: &mut Stations) {
    for result in cdb.drain() {
        if let Some(entry) = rob.get_mut(result.rob) {
            entry.value = result.value;
            if result.flags.is_some() {
                entry.flags = result.flags;
            }
            if result.stack_pointer.is_some() {
                entry.stack_pointer = result.stack_pointer;
            }
            if result.address.is_some() {
                entry.address = result.address;
            }
            entry.state = RobState::WrittenBack;
            if !entry.inst.is_branch() {
                entry.ready = true;
            }
            trace!(
                rob = result.rob.0,
                value = result.value,
                class = ?result.class,
                "writeback"
            );
        }
        stations.broadcast(&result);
    }
}
