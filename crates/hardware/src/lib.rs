//! MIPS pipeline timing simulator library.
//!
//! This crate implements a cycle-accurate timing model of a classic five-stage
//! MIPS pipeline with the following:
//! 1. **ISA:** Decoding, classification and disassembly of the supported MIPS subset.
//! 2. **Core:** A functional executor (registers, delay slots, memory) and the
//!    pipeline timing engine that consumes its records.
//! 3. **Caches:** Set-associative instruction and data caches with LRU replacement.
//! 4. **Memory:** A byte-addressable big-endian memory window.
//! 5. **Simulation:** Loader, configuration, statistics and output artifacts.

/// Common types and constants (widths, errors, faults, register file).
pub mod common;
/// Simulator configuration (defaults, JSON structures, plain-text cache files).
pub mod config;
/// CPU core (functional executor, pipeline timing, ALU, caches).
pub mod core;
/// Instruction set (fields, decode, classification, disassembly, ABI names).
pub mod isa;
/// Simulator context, loader and output artifacts.
pub mod sim;
/// Memory window.
pub mod soc;
/// Simulation statistics collection and reporting.
pub mod stats;

/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// Functional executor over a memory window.
pub use crate::core::Cpu;
/// Fatal simulator error.
pub use crate::common::SimError;
/// Cycle-accurate simulator context.
pub use crate::sim::{RunStatus, Simulator};
