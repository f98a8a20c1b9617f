//! MIPS R-type Function Codes.
//!
//! Defines the funct field (bits 5-0) used when the opcode is `OP_RTYPE`.

/// Shift left logical (SLL). The all-zero word is `sll $zero, $zero, 0`.
pub const SLL: u32 = 0x00;
/// Shift right logical (SRL).
pub const SRL: u32 = 0x02;
/// Jump register (JR).
pub const JR: u32 = 0x08;
/// Add, trapping on signed overflow (ADD).
pub const ADD: u32 = 0x20;
/// Add unsigned (ADDU).
pub const ADDU: u32 = 0x21;
/// Subtract, trapping on signed overflow (SUB).
pub const SUB: u32 = 0x22;
/// Subtract unsigned (SUBU).
pub const SUBU: u32 = 0x23;
/// Bitwise AND (AND).
pub const AND: u32 = 0x24;
/// Bitwise OR (OR).
pub const OR: u32 = 0x25;
/// Bitwise NOR (NOR).
pub const NOR: u32 = 0x27;
/// Set on less than (SLT).
pub const SLT: u32 = 0x2a;
/// Set on less than unsigned (SLTU).
pub const SLTU: u32 = 0x2b;
