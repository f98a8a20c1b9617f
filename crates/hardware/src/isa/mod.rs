//! Instruction Set Architecture (ISA) Definitions.
//!
//! Contains encodings, field extraction, classification and disassembly for
//! the MIPS integer subset executed by the simulator.
//!
//! # Modules
//!
//! * `mips`: Opcode and function code constants.
//! * `instruction`: Bit-field accessors on raw words.
//! * `decode`: The single decoder shared by execution, hazard detection and tracing.
//! * `disasm`: Trace-format disassembly.

/// Application Binary Interface (ABI) register name mappings.
pub mod abi;

/// Instruction decoding and pipeline classification.
pub mod decode;

/// Instruction disassembler for pipeline traces.
pub mod disasm;

/// Instruction field bit extraction utilities.
pub mod instruction;

/// MIPS opcode and funct definitions.
pub mod mips;

pub use decode::{Op, OpKind, classify, decode};
pub use instruction::InstructionBits;
