//! Data Hazard Detection.
//!
//! The pipeline has no forwarding into the branch comparator and none from a
//! load's data into Execute, so a dependent instruction entering Fetch must
//! wait. This module decides how long. The rules, checked against the
//! instruction that was in Fetch (now in Decode):
//! 1. **Op → Branch:** An arithmetic producer feeding a branch costs one
//!    execute-hazard cycle.
//! 2. **Load → Branch:** A load feeding a branch costs two decode-hazard cycles.
//! 3. **Load → Op:** A load feeding an arithmetic instruction costs one
//!    execute-hazard cycle.
//!
//! When none of those fire, a load two stages ahead (in Execute) feeding a
//! branch still costs one decode-hazard cycle. Register 0 never creates a
//! dependency.

use super::latches::Slot;
use super::stall::StallKind;
use crate::isa::decode::{
    arith_destination_register, branch_source_registers, classify, load_target_register,
    source_registers,
};

/// A dependency that delays the newly fetched instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Hazard {
    /// Arithmetic result consumed by the next instruction, a branch.
    OpBranch,
    /// Loaded value consumed by the next instruction, a branch.
    LoadBranch,
    /// Loaded value consumed by the next instruction, an arithmetic op.
    LoadOp,
    /// Loaded value consumed by a branch two instructions later.
    LoadBranchDistant,
}

impl Hazard {
    /// Stall cycles charged for the hazard.
    pub const fn cycles(self) -> u32 {
        match self {
            Self::LoadBranch => 2,
            Self::OpBranch | Self::LoadOp | Self::LoadBranchDistant => 1,
        }
    }

    /// Stall counter the cycles are charged to.
    pub const fn stall_kind(self) -> StallKind {
        match self {
            Self::OpBranch | Self::LoadOp => StallKind::ExecuteHazard,
            Self::LoadBranch | Self::LoadBranchDistant => StallKind::DecodeHazard,
        }
    }

    /// Whether the producer is a load.
    pub const fn is_load_use(self) -> bool {
        !matches!(self, Self::OpBranch)
    }
}

/// Checks the instruction just placed in Fetch against the instructions ahead
/// of it.
///
/// # Arguments
///
/// * `fetch` - The newly fetched instruction.
/// * `decode` - The instruction fetched one cycle earlier.
/// * `execute` - The instruction fetched two cycles earlier.
///
/// # Returns
///
/// The hazard to charge, or `None` if the instruction can proceed.
pub fn detect(fetch: Slot, decode: Slot, execute: Slot) -> Option<Hazard> {
    let consumer = fetch.word()?;
    let kind = classify(consumer);

    if kind.is_branch() {
        let sources = branch_source_registers(consumer);
        let feeds = |producer: Option<usize>| {
            producer.is_some_and(|reg| sources.contains(&Some(reg)))
        };

        if let Some(prev) = decode.word() {
            if feeds(load_target_register(prev)) {
                return Some(Hazard::LoadBranch);
            }
            if feeds(arith_destination_register(prev)) {
                return Some(Hazard::OpBranch);
            }
        }
        if execute.word().is_some_and(|older| feeds(load_target_register(older))) {
            return Some(Hazard::LoadBranchDistant);
        }
        return None;
    }

    if kind.is_arithmetic() {
        let sources = source_registers(consumer);
        let loaded = decode.word().and_then(load_target_register);
        if loaded.is_some_and(|reg| sources.contains(&Some(reg))) {
            return Some(Hazard::LoadOp);
        }
    }
    None
}
