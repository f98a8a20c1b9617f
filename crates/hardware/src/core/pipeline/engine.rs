//! Cycle-Level Timing Engine.
//!
//! This module advances the five-stage pipeline by one cycle per [`TimingEngine::tick`].
//! It does not compute results: instructions come already executed from a
//! [`FunctionalExecutor`], and the engine decides only where they sit in the
//! pipeline and how many cycles they cost. Each cycle is exactly one of:
//! 1. **Flush:** A fault is being recovered from; a bubble enters Fetch. An
//!    outstanding data miss is served first.
//! 2. **Stall:** One stall counter is charged and part of the pipeline holds.
//! 3. **Normal:** The next instruction is fetched and everything shifts.
//! 4. **Drain:** As normal, but the halt word has been fetched so a bubble enters Fetch.
//!
//! After the shift, instructions that newly entered Decode, Execute and Memory
//! are checked for faults and D-cache timing.

use super::hazards;
use super::latches::{InFlight, PipelineRegister, Slot, Stage};
use super::stall::{StallKind, StallState};
use super::traits::FunctionalExecutor;
use crate::common::constants::{
    DRAIN_CYCLES, ILLEGAL_FLUSH_CYCLES, OVERFLOW_FLUSH_CYCLES, PIPELINE_DEPTH,
};
use crate::common::data::AccessKind;
use crate::common::error::SimError;
use crate::config::CacheHierarchyConfig;
use crate::core::units::cache::CacheSim;
use crate::isa::decode::OpKind;
use crate::stats::SimStats;

/// What the pipeline did during a cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CycleKind {
    /// An instruction was fetched.
    Normal,
    /// A stall counter was charged.
    Stall(StallKind),
    /// A fault flush cycle.
    Flush,
    /// A bubble entered Fetch after the halt word.
    Drain,
}

/// Snapshot of one simulated cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CycleReport {
    /// Cycle number, starting at 0.
    pub cycle: u64,
    /// Stage contents at the end of the cycle, Fetch first.
    pub slots: [Slot; PIPELINE_DEPTH],
    /// What the cycle was spent on.
    pub kind: CycleKind,
    /// The halt word has left the pipeline; no further cycles are needed.
    pub halted: bool,
}

impl CycleReport {
    /// Contents of one stage.
    #[inline]
    pub const fn slot(&self, stage: Stage) -> Slot {
        self.slots[stage.index()]
    }
}

/// Pipeline timing state: stage slots, stall counters and both caches.
#[derive(Clone, Debug)]
pub struct TimingEngine {
    pipe: PipelineRegister,
    stall: StallState,
    icache: CacheSim,
    dcache: CacheSim,
    cycle: u64,
    fetch_halted: bool,
    drain_remaining: u32,
    done: bool,
    pending_squash: Option<Stage>,
}

impl TimingEngine {
    /// Creates an empty pipeline with cold caches.
    ///
    /// # Errors
    ///
    /// Returns `SimError::Configuration` if either cache geometry is invalid.
    pub fn new(caches: &CacheHierarchyConfig) -> Result<Self, SimError> {
        Ok(Self {
            pipe: PipelineRegister::new(),
            stall: StallState::default(),
            icache: CacheSim::new(&caches.l1_i)?,
            dcache: CacheSim::new(&caches.l1_d)?,
            cycle: 0,
            fetch_halted: false,
            drain_remaining: DRAIN_CYCLES,
            done: false,
            pending_squash: None,
        })
    }

    /// Simulates one cycle.
    ///
    /// # Arguments
    ///
    /// * `exec` - Supplies the next instruction on normal cycles.
    /// * `stats` - Counters updated with this cycle's events.
    ///
    /// # Returns
    ///
    /// The pipeline snapshot for the cycle. Once a report has `halted` set,
    /// further calls repeat the final snapshot without simulating.
    ///
    /// # Errors
    ///
    /// Propagates `SimError::OutOfRange` from the executor.
    pub fn tick<E>(&mut self, exec: &mut E, stats: &mut SimStats) -> Result<CycleReport, SimError>
    where
        E: FunctionalExecutor + ?Sized,
    {
        if self.done {
            return Ok(self.report(CycleKind::Drain));
        }

        if let Some(last) = self.pending_squash.take() {
            self.pipe.squash_through(last);
        }

        let kind = if self.stall.consume_flush() {
            stats.flush_cycles += 1;
            self.pipe.advance(Stage::Fetch, Slot::Bubble, None);
            self.after_shift(Stage::Fetch, stats);
            if self.fetch_halted {
                self.count_drain();
            }
            tracing::debug!(cycle = self.cycle, left = self.stall.exception_flush, "flush");
            CycleKind::Flush
        } else if let Some(stall) = self.stall.consume() {
            stats.record_stall(stall);
            let entry = match stall.kind {
                StallKind::DataMiss => Stage::Writeback,
                _ => Stage::Decode,
            };
            self.pipe.advance(entry, Slot::Bubble, None);
            self.after_shift(entry, stats);
            tracing::debug!(cycle = self.cycle, kind = ?stall.kind, "stall");
            CycleKind::Stall(stall.kind)
        } else if self.fetch_halted {
            self.pipe.advance(Stage::Fetch, Slot::Bubble, None);
            self.after_shift(Stage::Fetch, stats);
            self.count_drain();
            CycleKind::Drain
        } else {
            self.fetch(exec, stats)?;
            CycleKind::Normal
        };

        stats.cycles += 1;
        let report = self.report(kind);
        tracing::trace!(cycle = report.cycle, ?kind, "cycle");
        self.cycle += 1;
        Ok(report)
    }

    fn fetch<E>(&mut self, exec: &mut E, stats: &mut SimStats) -> Result<(), SimError>
    where
        E: FunctionalExecutor + ?Sized,
    {
        let record = exec.execute_next()?;
        stats.dynamic_instructions += 1;

        let slot = Slot::Occupied(InFlight {
            word: record.word,
            seq: record.seq,
            overflow: record.is_overflow(),
        });
        self.pipe.advance(Stage::Fetch, slot, record.mem_addr);

        if self.icache.access(record.pc, AccessKind::Read) {
            stats.icache_hits += 1;
        } else {
            stats.icache_misses += 1;
            self.stall.instruction_miss += self.icache.miss_latency();
        }

        if record.is_halt() {
            self.fetch_halted = true;
            tracing::debug!(cycle = self.cycle, pc = record.pc, "halt fetched, draining");
        }

        if let Some(hazard) = hazards::detect(
            self.pipe.get(Stage::Fetch),
            self.pipe.get(Stage::Decode),
            self.pipe.get(Stage::Execute),
        ) {
            self.stall.schedule_hazard(hazard);
            tracing::debug!(cycle = self.cycle, ?hazard, "hazard");
        }

        self.after_shift(Stage::Fetch, stats);
        Ok(())
    }

    /// Handles instructions that moved into a new stage when everything from
    /// `entry` onward shifted.
    fn after_shift(&mut self, entry: Stage, stats: &mut SimStats) {
        if entry <= Stage::Memory {
            self.access_dcache(stats);
        }

        if entry <= Stage::Execute && self.pipe.get(Stage::Execute).is_overflow() {
            stats.overflow_faults += 1;
            self.raise_fault(Stage::Execute, OVERFLOW_FLUSH_CYCLES);
        } else if entry == Stage::Fetch && self.pipe.get(Stage::Decode).kind() == OpKind::Illegal
        {
            stats.illegal_faults += 1;
            self.raise_fault(Stage::Decode, ILLEGAL_FLUSH_CYCLES);
        }
    }

    fn access_dcache(&mut self, stats: &mut SimStats) {
        let access = match self.pipe.get(Stage::Memory).kind() {
            OpKind::Load => AccessKind::Read,
            OpKind::Store => AccessKind::Write,
            _ => return,
        };
        let Some(addr) = self.pipe.history().get(Stage::Memory) else {
            return;
        };
        if self.dcache.access(addr, access) {
            stats.dcache_hits += 1;
        } else {
            stats.dcache_misses += 1;
            self.stall.data_miss += self.dcache.miss_latency();
        }
    }

    /// Any cycle that puts a bubble into Fetch after the halt word counts
    /// toward the drain, flush cycles included.
    fn count_drain(&mut self) {
        self.drain_remaining = self.drain_remaining.saturating_sub(1);
        self.done = self.drain_remaining == 0;
    }

    fn raise_fault(&mut self, last: Stage, cycles: u32) {
        tracing::debug!(cycle = self.cycle, stage = last.name(), cycles, "fault, flushing");
        self.pending_squash = Some(last);
        self.stall.begin_flush(cycles);
    }

    fn report(&self, kind: CycleKind) -> CycleReport {
        CycleReport {
            cycle: self.cycle,
            slots: self.pipe.slots(),
            kind,
            halted: self.done,
        }
    }

    /// Whether the run has drained after the halt word.
    pub const fn is_done(&self) -> bool {
        self.done
    }

    /// Number of cycles simulated so far.
    pub const fn cycle(&self) -> u64 {
        self.cycle
    }

    /// Current stage contents.
    pub const fn pipeline(&self) -> &PipelineRegister {
        &self.pipe
    }

    /// Outstanding stall and flush cycles.
    pub const fn stall_state(&self) -> &StallState {
        &self.stall
    }

    /// The instruction cache.
    pub const fn icache(&self) -> &CacheSim {
        &self.icache
    }

    /// The data cache.
    pub const fn dcache(&self) -> &CacheSim {
        &self.dcache
    }
}
