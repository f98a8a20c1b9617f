//! MIPS Integer Subset.
//!
//! Defines the encodings of the instructions the simulator understands.
//!
//! # Structure
//!
//! - `opcodes`: Major opcodes (bits 31-26).
//! - `funct`: Function codes (bits 5-0) for the R-type opcode.

/// Function codes for R-type instructions.
pub mod funct;

/// Major opcodes.
pub mod opcodes;
