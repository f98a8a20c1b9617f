//! Stall and Flush Counters.
//!
//! Every source of lost cycles is a countdown. A cycle spent on a fault flush
//! is taken before any stall except an outstanding data miss, which must be
//! served while its load or store still sits in Memory. Otherwise at most one
//! stall counter is charged per cycle, in this priority order:
//! 1. **Data miss:** The whole pipeline freezes behind Memory.
//! 2. **Decode hazard:** A branch waits in Fetch for a loaded value.
//! 3. **Execute hazard:** An instruction waits in Fetch for a value from Execute.
//! 4. **Instruction miss:** Fetch waits for the I-cache.

use super::hazards::Hazard;

/// Reason a cycle was spent stalled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StallKind {
    /// D-cache miss in Memory.
    DataMiss,
    /// Load-to-branch dependency.
    DecodeHazard,
    /// Dependency resolved by the end of Execute.
    ExecuteHazard,
    /// I-cache miss in Fetch.
    InstructionMiss,
}

/// One stall cycle charged by [`StallState::consume`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StallCycle {
    /// Counter that was charged.
    pub kind: StallKind,
    /// The cycle waits on a loaded value.
    pub load_use: bool,
}

/// Outstanding stall and flush cycles.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StallState {
    /// Remaining I-cache miss cycles.
    pub instruction_miss: u32,
    /// Remaining D-cache miss cycles.
    pub data_miss: u32,
    /// Remaining load-to-branch cycles.
    pub decode_hazard: u32,
    /// Remaining execute-resolved hazard cycles.
    pub execute_hazard: u32,
    /// Remaining fault flush cycles.
    pub exception_flush: u32,
    // Hazard cycles still owed to a load producer.
    load_use: u32,
}

impl StallState {
    /// Whether any stall counter is non-zero. Flush cycles are not stalls.
    pub const fn is_stalled(&self) -> bool {
        self.instruction_miss > 0
            || self.data_miss > 0
            || self.decode_hazard > 0
            || self.execute_hazard > 0
    }

    /// Counter that the next stall cycle will charge.
    pub const fn active(&self) -> Option<StallKind> {
        if self.data_miss > 0 {
            Some(StallKind::DataMiss)
        } else if self.decode_hazard > 0 {
            Some(StallKind::DecodeHazard)
        } else if self.execute_hazard > 0 {
            Some(StallKind::ExecuteHazard)
        } else if self.instruction_miss > 0 {
            Some(StallKind::InstructionMiss)
        } else {
            None
        }
    }

    /// Charges one cycle to the highest-priority non-zero stall counter.
    ///
    /// # Returns
    ///
    /// The charged cycle, or `None` if nothing is outstanding.
    pub fn consume(&mut self) -> Option<StallCycle> {
        let kind = self.active()?;
        let mut load_use = false;
        match kind {
            StallKind::DataMiss => self.data_miss -= 1,
            StallKind::InstructionMiss => self.instruction_miss -= 1,
            StallKind::DecodeHazard | StallKind::ExecuteHazard => {
                if kind == StallKind::DecodeHazard {
                    self.decode_hazard -= 1;
                } else {
                    self.execute_hazard -= 1;
                }
                if self.load_use > 0 {
                    self.load_use -= 1;
                    load_use = true;
                }
            }
        }
        Some(StallCycle { kind, load_use })
    }

    /// Charges the cycles for a detected hazard.
    pub fn schedule_hazard(&mut self, hazard: Hazard) {
        let cycles = hazard.cycles();
        match hazard.stall_kind() {
            StallKind::DecodeHazard => self.decode_hazard += cycles,
            _ => self.execute_hazard += cycles,
        }
        if hazard.is_load_use() {
            self.load_use += cycles;
        }
    }

    /// Starts a fault flush of `cycles` cycles.
    ///
    /// Stalls owed by the discarded younger instructions (instruction miss
    /// and both hazards) are dropped; an outstanding data miss belongs to an
    /// older instruction and is kept.
    pub fn begin_flush(&mut self, cycles: u32) {
        self.exception_flush = cycles;
        self.instruction_miss = 0;
        self.decode_hazard = 0;
        self.execute_hazard = 0;
        self.load_use = 0;
    }

    /// Takes one flush cycle if a flush is in progress.
    ///
    /// Returns `false` while a data miss is outstanding, even mid-flush; the
    /// flush resumes once [`consume`](Self::consume) has drained the miss.
    pub fn consume_flush(&mut self) -> bool {
        if self.exception_flush > 0 && self.data_miss == 0 {
            self.exception_flush -= 1;
            true
        } else {
            false
        }
    }
}
