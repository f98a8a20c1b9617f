//! Instruction pipeline timing.
//!
//! This module contains the timing model of the five-stage pipeline.
//! It includes the following components:
//! 1. **Engine:** The per-cycle transition over stages, stalls and caches.
//! 2. **Hazards:** Dependency rules that delay a newly fetched instruction.
//! 3. **Latches:** Stage slots and the data address history.
//! 4. **Stall:** Stall and flush countdowns with their priority order.
//! 5. **Traits:** The interface to the functional executor.

/// Cycle-level timing engine.
pub mod engine;

/// Pipeline hazard detection.
pub mod hazards;

/// Stage slots and memory access history.
pub mod latches;

/// Stall and flush countdowns.
pub mod stall;

/// Functional executor interface and execution records.
pub mod traits;

pub use self::engine::{CycleKind, CycleReport, TimingEngine};
pub use self::latches::{Slot, Stage};
