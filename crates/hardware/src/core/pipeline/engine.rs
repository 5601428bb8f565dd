//! Tomasulo execution engine.
//!
//! The engine owns every speculative structure and runs one cycle as four
//! phases in a fixed order: commit, writeback, execute, issue. Running commit
//! first means a misprediction discovered at the ROB head squashes the
//! machine before any younger work is advanced in the same cycle; running
//! issue last means a freshly dispatched instruction never executes in the
//! cycle it was dispatched.

use tracing::debug;

use crate::config::{Config, LatencyConfig};
use crate::core::Cpu;
use crate::core::pipeline::cdb::{Cdb, CdbResult};
use crate::core::pipeline::lsb::LoadStoreBuffer;
use crate::core::pipeline::rat::Rat;
use crate::core::pipeline::reservation::ReservationStations;
use crate::core::pipeline::rob::Rob;
use crate::core::pipeline::stages::{commit_stage, execute_stage, issue_stage, writeback_stage};
use crate::core::units::bru::{BranchPredictor, StaticPredictor};

/// The scheduling structures operands wait in: both reservation station
/// pools and the load-store buffer.
#[derive(Clone, Debug)]
pub struct Stations {
    /// ALU/Branch pool.
    pub alu: ReservationStations,
    /// Multiply/Divide pool.
    pub mul_div: ReservationStations,
    /// Load-store buffer.
    pub lsb: LoadStoreBuffer,
}

impl Stations {
    /// Creates empty pools sized from `config`.
    pub fn new(config: &Config) -> Self {
        Self {
            alu: ReservationStations::new(config.pipeline.alu_rs_size),
            mul_div: ReservationStations::new(config.pipeline.mul_div_rs_size),
            lsb: LoadStoreBuffer::new(config.pipeline.lsb_size),
        }
    }

    /// Delivers `result` to every operand waiting on its producer.
    pub fn broadcast(&mut self, result: &CdbResult) {
        self.alu.broadcast(result);
        self.mul_div.broadcast(result);
        self.lsb.broadcast(result);
    }

    /// Frees every slot in every pool.
    pub fn flush(&mut self) {
        self.alu.flush();
        self.mul_div.flush();
        self.lsb.flush();
    }

    /// Returns true if every pool is empty.
    pub fn is_empty(&self) -> bool {
        self.alu.is_empty() && self.mul_div.is_empty() && self.lsb.is_empty()
    }
}

/// The out-of-order backend: ROB, RAT, stations, CDB and branch predictor.
#[derive(Clone, Debug)]
pub struct Pipeline {
    /// Reorder buffer.
    pub rob: Rob,
    /// Register alias table.
    pub rat: Rat,
    /// Reservation stations and load-store buffer.
    pub stations: Stations,
    /// Result bus between execute and the next cycle's writeback.
    pub cdb: Cdb,
    /// Fetch-side branch predictor.
    pub predictor: StaticPredictor,
    /// Functional-unit latencies.
    pub latency: LatencyConfig,
}

impl Pipeline {
    /// Creates an empty pipeline from config.
    pub fn new(config: &Config) -> Self {
        Self {
            rob: Rob::new(config.pipeline.rob_size),
            rat: Rat::new(),
            stations: Stations::new(config),
            cdb: Cdb::new(),
            predictor: StaticPredictor::new(config.pipeline.ras_size),
            latency: config.latency.clone(),
        }
    }

    /// Run one cycle of the entire pipeline.
    pub fn tick(&mut self, cpu: &mut Cpu) {
        cpu.stats.cycles += 1;

        if let Some(target) = commit_stage(cpu, &mut self.rob, &mut self.rat, &mut self.predictor)
        {
            self.squash(cpu, target);
        }
        writeback_stage(&mut self.cdb, &mut self.rob, &mut self.stations);
        execute_stage(cpu, &mut self.rob, &mut self.stations, &mut self.cdb);
        issue_stage(
            cpu,
            &mut self.rob,
            &mut self.rat,
            &mut self.stations,
            &mut self.predictor,
            &self.latency,
        );
    }

    /// Misprediction recovery: discards every in-flight instruction and
    /// redirects fetch to `target`. Committed state is untouched.
    pub fn squash(&mut self, cpu: &mut Cpu, target: usize) {
        let squashed = self.rob.len();
        cpu.stats.squashed += squashed as u64;
        self.rob.flush_all();
        self.rat.flush();
        self.stations.flush();
        self.cdb.clear();
        self.predictor.recover();
        cpu.pc = target;
        debug!(cycle = cpu.stats.cycles, target, squashed, "squash");
    }

    /// Returns true if nothing is in flight.
    pub const fn is_drained(&self) -> bool {
        self.rob.is_empty()
    }
}
