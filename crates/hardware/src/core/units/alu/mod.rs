//! Arithmetic Logic Unit (ALU).
//!
//! This module implements the integer ALU used by the functional executor.
//! It covers the register and immediate forms of the supported arithmetic,
//! logical, comparison and shift operations, and reports signed overflow for
//! the trapping `add`, `addi` and `sub`.

use crate::isa::decode::Op;

/// Result of one ALU operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AluOutput {
    /// Computed value (wrapped on overflow).
    pub value: u32,
    /// Signed overflow in a trapping operation.
    pub overflow: bool,
}

impl AluOutput {
    const fn ok(value: u32) -> Self {
        Self {
            value,
            overflow: false,
        }
    }
}

/// Arithmetic Logic Unit for 32-bit integer operations.
#[derive(Debug)]
pub struct Alu;

impl Alu {
    /// Executes an integer ALU operation.
    ///
    /// # Arguments
    ///
    /// * `op` - Decoded operation. Non-ALU operations yield 0.
    /// * `a` - First operand (`rs` value).
    /// * `b` - Second operand (`rt` value or the extended immediate).
    /// * `shamt` - Shift amount for `sll`/`srl`, which shift `b`.
    ///
    /// # Examples
    ///
    /// ```
    /// use pipesim_core::core::units::alu::Alu;
    /// use pipesim_core::isa::Op;
    ///
    /// assert_eq!(Alu::execute(Op::Addu, 40, 2, 0).value, 42);
    /// assert!(Alu::execute(Op::Add, 0x7fff_ffff, 1, 0).overflow);
    /// assert!(!Alu::execute(Op::Addu, 0x7fff_ffff, 1, 0).overflow);
    /// assert_eq!(Alu::execute(Op::Lui, 0, 0x1234, 0).value, 0x1234_0000);
    /// ```
    pub const fn execute(op: Op, a: u32, b: u32, shamt: u32) -> AluOutput {
        match op {
            Op::Add | Op::Addi => {
                let (value, overflow) = (a as i32).overflowing_add(b as i32);
                AluOutput {
                    value: value as u32,
                    overflow,
                }
            }
            Op::Sub => {
                let (value, overflow) = (a as i32).overflowing_sub(b as i32);
                AluOutput {
                    value: value as u32,
                    overflow,
                }
            }
            Op::Addu | Op::Addiu => AluOutput::ok(a.wrapping_add(b)),
            Op::Subu => AluOutput::ok(a.wrapping_sub(b)),
            Op::And | Op::Andi => AluOutput::ok(a & b),
            Op::Or | Op::Ori => AluOutput::ok(a | b),
            Op::Nor => AluOutput::ok(!(a | b)),
            Op::Slt | Op::Slti => AluOutput::ok(((a as i32) < (b as i32)) as u32),
            Op::Sltu | Op::Sltiu => AluOutput::ok((a < b) as u32),
            Op::Sll => AluOutput::ok(b << (shamt & 0x1f)),
            Op::Srl => AluOutput::ok(b >> (shamt & 0x1f)),
            Op::Lui => AluOutput::ok(b << 16),
            _ => AluOutput::ok(0),
        }
    }
}
