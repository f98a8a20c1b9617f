//! Execution units and functional components.
//!
//! This module contains the integer ALU used by the functional executor and
//! the set-associative cache model used by the timing engine.

/// Arithmetic Logic Unit for integer operations.
pub mod alu;

/// Set-associative cache model with LRU replacement.
pub mod cache;
