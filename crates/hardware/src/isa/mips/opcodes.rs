//! MIPS Major Opcodes.
//!
//! Defines the opcode field (bits 31-26) for every supported instruction.

/// Register-register instructions; the operation lives in the funct field.
pub const OP_RTYPE: u32 = 0x00;

/// Jump (J).
pub const OP_J: u32 = 0x02;
/// Jump and link (JAL).
pub const OP_JAL: u32 = 0x03;

/// Branch on equal (BEQ).
pub const OP_BEQ: u32 = 0x04;
/// Branch on not equal (BNE).
pub const OP_BNE: u32 = 0x05;
/// Branch on less than or equal to zero (BLEZ).
pub const OP_BLEZ: u32 = 0x06;
/// Branch on greater than zero (BGTZ).
pub const OP_BGTZ: u32 = 0x07;

/// Add immediate, trapping on signed overflow (ADDI).
pub const OP_ADDI: u32 = 0x08;
/// Add immediate unsigned (ADDIU).
pub const OP_ADDIU: u32 = 0x09;
/// Set on less than immediate (SLTI).
pub const OP_SLTI: u32 = 0x0a;
/// Set on less than immediate unsigned (SLTIU).
pub const OP_SLTIU: u32 = 0x0b;
/// AND immediate (ANDI).
pub const OP_ANDI: u32 = 0x0c;
/// OR immediate (ORI).
pub const OP_ORI: u32 = 0x0d;
/// Load upper immediate (LUI).
pub const OP_LUI: u32 = 0x0f;

/// Load word (LW).
pub const OP_LW: u32 = 0x23;
/// Load byte unsigned (LBU).
pub const OP_LBU: u32 = 0x24;
/// Load halfword unsigned (LHU).
pub const OP_LHU: u32 = 0x25;

/// Store byte (SB).
pub const OP_SB: u32 = 0x28;
/// Store halfword (SH).
pub const OP_SH: u32 = 0x29;
/// Store word (SW).
pub const OP_SW: u32 = 0x2b;
