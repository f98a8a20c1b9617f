//! Pipeline Stage Slots.
//!
//! This module defines the state held between the five stages:
//! Fetch → Decode → Execute → Memory → Writeback.
//!
//! 1. **Slots:** Each stage holds either an in-flight instruction or a bubble.
//! 2. **Access History:** The data address of every in-flight load or store,
//!    aligned with the stage it occupies.
//! 3. **Shifting:** A single [`PipelineRegister::advance`] moves every stage at
//!    or behind an entry point one step toward Writeback.

use crate::common::constants::PIPELINE_DEPTH;
use crate::isa::decode::{OpKind, classify};

/// One of the five pipeline stages, oldest last.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stage {
    /// Instruction fetch (IF).
    Fetch = 0,
    /// Instruction decode (ID).
    Decode = 1,
    /// Execute (EX).
    Execute = 2,
    /// Memory access (MEM).
    Memory = 3,
    /// Register writeback (WB).
    Writeback = 4,
}

impl Stage {
    /// All stages in pipeline order.
    pub const ALL: [Self; PIPELINE_DEPTH] = [
        Self::Fetch,
        Self::Decode,
        Self::Execute,
        Self::Memory,
        Self::Writeback,
    ];

    /// Position of the stage, 0 for Fetch.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Conventional short name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Fetch => "IF",
            Self::Decode => "ID",
            Self::Execute => "EX",
            Self::Memory => "MEM",
            Self::Writeback => "WB",
        }
    }
}

/// Instruction occupying a stage.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InFlight {
    /// Raw instruction word.
    pub word: u32,
    /// Sequence number assigned by the executor.
    pub seq: u64,
    /// Execution of this instruction overflowed.
    pub overflow: bool,
}

/// Contents of one stage.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Slot {
    /// No instruction.
    #[default]
    Bubble,
    /// An in-flight instruction.
    Occupied(InFlight),
}

impl Slot {
    /// Slot holding `word` with no fault attached.
    pub const fn word_only(word: u32, seq: u64) -> Self {
        Self::Occupied(InFlight {
            word,
            seq,
            overflow: false,
        })
    }

    /// Raw word, or `None` for a bubble.
    #[inline]
    pub const fn word(&self) -> Option<u32> {
        match self {
            Self::Bubble => None,
            Self::Occupied(inst) => Some(inst.word),
        }
    }

    /// Pipeline category; a bubble is [`OpKind::Bubble`].
    #[inline]
    pub fn kind(&self) -> OpKind {
        match self {
            Self::Bubble => OpKind::Bubble,
            Self::Occupied(inst) => classify(inst.word),
        }
    }

    /// Whether the slot holds an instruction that overflowed.
    #[inline]
    pub const fn is_overflow(&self) -> bool {
        matches!(self, Self::Occupied(InFlight { overflow: true, .. }))
    }

    /// Whether the slot is empty.
    #[inline]
    pub const fn is_bubble(&self) -> bool {
        matches!(self, Self::Bubble)
    }
}

/// Data addresses of in-flight loads and stores, one entry per stage.
///
/// Entries move in lockstep with the instructions they belong to, so the
/// address of the instruction in Memory is always at [`Stage::Memory`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MemoryAccessHistory {
    addrs: [Option<u32>; PIPELINE_DEPTH],
}

impl MemoryAccessHistory {
    /// Address recorded for the instruction in `stage`.
    #[inline]
    pub const fn get(&self, stage: Stage) -> Option<u32> {
        self.addrs[stage.index()]
    }
}

/// The five stage slots together with their access history.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PipelineRegister {
    slots: [Slot; PIPELINE_DEPTH],
    history: MemoryAccessHistory,
}

impl PipelineRegister {
    /// Creates a pipeline holding only bubbles.
    pub fn new() -> Self {
        Self::default()
    }

    /// Contents of one stage.
    #[inline]
    pub const fn get(&self, stage: Stage) -> Slot {
        self.slots[stage.index()]
    }

    /// Copy of all five slots, Fetch first.
    #[inline]
    pub const fn slots(&self) -> [Slot; PIPELINE_DEPTH] {
        self.slots
    }

    /// Data address history aligned with the slots.
    #[inline]
    pub const fn history(&self) -> &MemoryAccessHistory {
        &self.history
    }

    /// Shifts every stage after `entry` one step toward Writeback and places
    /// `incoming` at `entry`. Stages before `entry` hold.
    ///
    /// The previous Writeback occupant is dropped unless `entry` is
    /// Writeback itself, in which case only Writeback is replaced.
    ///
    /// # Arguments
    ///
    /// * `entry` - First stage that receives new contents.
    /// * `incoming` - Slot placed at `entry`.
    /// * `addr` - Data address carried with `incoming`.
    pub fn advance(&mut self, entry: Stage, incoming: Slot, addr: Option<u32>) {
        let start = entry.index();
        for idx in (start + 1..PIPELINE_DEPTH).rev() {
            self.slots[idx] = self.slots[idx - 1];
            self.history.addrs[idx] = self.history.addrs[idx - 1];
        }
        self.slots[start] = incoming;
        self.history.addrs[start] = addr;
    }

    /// Replaces Fetch through `last` with bubbles.
    ///
    /// The halt word is never squashed: fetch has already stopped behind it,
    /// so it must still reach Writeback to end the run.
    pub fn squash_through(&mut self, last: Stage) {
        for idx in 0..=last.index() {
            if self.slots[idx].kind() == OpKind::Halt {
                continue;
            }
            self.slots[idx] = Slot::Bubble;
            self.history.addrs[idx] = None;
        }
    }
}
