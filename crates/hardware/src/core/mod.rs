//! Core processor implementation.
//!
//! This module contains the functional MIPS executor, the pipeline timing
//! engine that consumes its records, and the execution units both rely on.

/// Functional executor (registers, pc, delay slots, memory).
pub mod cpu;

/// Pipeline timing (stages, hazards, stalls, engine).
pub mod pipeline;

/// Execution units (ALU, cache).
pub mod units;

pub use self::cpu::Cpu;
