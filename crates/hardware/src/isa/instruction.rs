//! Instruction encoding and decoding utilities.
//!
//! Provides bit extraction functions for the three MIPS instruction formats
//! (R, I and J) from a 32-bit instruction word.

/// Bit mask for the 6-bit opcode and funct fields.
pub const SIX_BIT_MASK: u32 = 0x3F;
/// Bit mask for 5-bit register and shift-amount fields.
pub const REG_MASK: u32 = 0x1F;
/// Bit mask for the 16-bit immediate field.
pub const IMM_MASK: u32 = 0xFFFF;
/// Bit mask for the 26-bit jump target field.
pub const ADDR_MASK: u32 = 0x03FF_FFFF;

/// Trait for extracting instruction fields from encoded instructions.
///
/// Every accessor is a fixed shift-and-mask; no accessor validates the
/// encoding, so callers classify the word first when the format matters.
pub trait InstructionBits {
    /// Extracts the opcode field (bits 31-26).
    fn opcode(&self) -> u32;

    /// Extracts the first source register field (bits 25-21).
    fn rs(&self) -> usize;

    /// Extracts the second source / I-type destination register field (bits 20-16).
    fn rt(&self) -> usize;

    /// Extracts the R-type destination register field (bits 15-11).
    fn rd(&self) -> usize;

    /// Extracts the shift amount field (bits 10-6).
    fn shamt(&self) -> u32;

    /// Extracts the function code field (bits 5-0).
    fn funct(&self) -> u32;

    /// Extracts the raw 16-bit immediate (bits 15-0).
    fn imm(&self) -> u32;

    /// Extracts the 26-bit jump target (bits 25-0).
    fn address(&self) -> u32;

    /// Returns the immediate sign-extended to 32 bits.
    fn sign_ext_imm(&self) -> u32;

    /// Returns the immediate zero-extended to 32 bits.
    fn zero_ext_imm(&self) -> u32;
}

impl InstructionBits for u32 {
    #[inline(always)]
    fn opcode(&self) -> u32 {
        (self >> 26) & SIX_BIT_MASK
    }

    #[inline(always)]
    fn rs(&self) -> usize {
        ((self >> 21) & REG_MASK) as usize
    }

    #[inline(always)]
    fn rt(&self) -> usize {
        ((self >> 16) & REG_MASK) as usize
    }

    #[inline(always)]
    fn rd(&self) -> usize {
        ((self >> 11) & REG_MASK) as usize
    }

    #[inline(always)]
    fn shamt(&self) -> u32 {
        (self >> 6) & REG_MASK
    }

    #[inline(always)]
    fn funct(&self) -> u32 {
        self & SIX_BIT_MASK
    }

    #[inline(always)]
    fn imm(&self) -> u32 {
        self & IMM_MASK
    }

    #[inline(always)]
    fn address(&self) -> u32 {
        self & ADDR_MASK
    }

    /// Sign-extends bit 15 of the immediate through the upper half-word.
    #[inline(always)]
    fn sign_ext_imm(&self) -> u32 {
        i32::from(self.imm() as u16 as i16) as u32
    }

    #[inline(always)]
    fn zero_ext_imm(&self) -> u32 {
        self.imm()
    }
}
