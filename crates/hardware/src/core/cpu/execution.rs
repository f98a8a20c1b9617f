//! Single-Instruction Execution.
//!
//! This module implements the architectural effect of every supported
//! instruction. It performs the following per call:
//! 1. **Fetch:** Reads the word at `pc` and advances `pc`, honouring a pending
//!    branch whose delay slot is the instruction being fetched.
//! 2. **Execute:** Applies the register, memory or control-flow effect.
//! 3. **Report:** Returns an [`ExecutionRecord`] with the data address and any fault.

use super::Cpu;
use crate::common::data::Width;
use crate::common::error::{Fault, SimError};
use crate::core::pipeline::traits::{ExecutionRecord, FunctionalExecutor};
use crate::core::units::alu::Alu;
use crate::isa::abi::REG_RA;
use crate::isa::decode::{Op, OpKind, decode};
use crate::isa::instruction::InstructionBits;

/// Upper address bits kept by `j`/`jal`.
const JUMP_REGION_MASK: u32 = 0xf000_0000;

impl Cpu {
    /// Executes the instruction at `pc`.
    ///
    /// # Returns
    ///
    /// The record describing the instruction. Illegal encodings and overflowing
    /// `add`/`addi`/`sub` are reported through `fault` and leave registers
    /// unchanged.
    ///
    /// # Errors
    ///
    /// Returns `SimError::OutOfRange` if the fetch or a load/store touches
    /// bytes outside memory.
    pub fn step(&mut self) -> Result<ExecutionRecord, SimError> {
        let pc = self.pc;
        let word = self.mem.get_value(pc, Width::Word)?;

        self.pc = self
            .pending_branch
            .take()
            .unwrap_or_else(|| pc.wrapping_add(4));

        let op = decode(word);
        let mut record = ExecutionRecord {
            pc,
            next_pc: self.pc,
            word,
            op,
            mem_addr: None,
            fault: None,
            seq: self.instructions,
        };
        self.instructions += 1;

        let rs_val = self.regs.read(word.rs());
        let rt_val = self.regs.read(word.rt());
        let delay_slot = pc.wrapping_add(4);

        match op.kind() {
            OpKind::Halt => {
                self.halted = true;
                tracing::debug!(pc, seq = record.seq, "halt fetched");
            }
            OpKind::Illegal | OpKind::Bubble => {
                record.fault = Some(Fault::IllegalInstruction(word));
                tracing::debug!(pc, word, "illegal instruction");
            }
            OpKind::ArithmeticOp => {
                let out = Alu::execute(op, rs_val, rt_val, word.shamt());
                self.retire_alu(word.rd(), out.value, out.overflow, &mut record);
            }
            OpKind::ArithmeticImmediateOp => {
                let imm = match op {
                    Op::Andi | Op::Ori | Op::Lui => word.zero_ext_imm(),
                    _ => word.sign_ext_imm(),
                };
                let out = Alu::execute(op, rs_val, imm, 0);
                self.retire_alu(word.rt(), out.value, out.overflow, &mut record);
            }
            OpKind::Load => {
                let addr = rs_val.wrapping_add(word.sign_ext_imm());
                let width = match op {
                    Op::Lbu => Width::Byte,
                    Op::Lhu => Width::Half,
                    _ => Width::Word,
                };
                let value = self.mem.get_value(addr, width)?;
                self.regs.write(word.rt(), value);
                record.mem_addr = Some(addr);
            }
            OpKind::Store => {
                let addr = rs_val.wrapping_add(word.sign_ext_imm());
                let width = match op {
                    Op::Sb => Width::Byte,
                    Op::Sh => Width::Half,
                    _ => Width::Word,
                };
                self.mem.set_value(addr, width, rt_val)?;
                record.mem_addr = Some(addr);
            }
            OpKind::Branch => {
                let taken = match op {
                    Op::Beq => rs_val == rt_val,
                    Op::Bne => rs_val != rt_val,
                    Op::Blez => (rs_val as i32) <= 0,
                    _ => (rs_val as i32) > 0,
                };
                if taken {
                    self.pending_branch =
                        Some(delay_slot.wrapping_add(word.sign_ext_imm() << 2));
                }
            }
            OpKind::Jump => {
                if op == Op::Jal {
                    self.regs.write(REG_RA, pc.wrapping_add(8));
                }
                self.pending_branch =
                    Some((delay_slot & JUMP_REGION_MASK) | (word.address() << 2));
            }
            OpKind::JumpRegister => {
                self.pending_branch = Some(rs_val);
            }
        }

        Ok(record)
    }

    fn retire_alu(&mut self, rd: usize, value: u32, overflow: bool, record: &mut ExecutionRecord) {
        if overflow {
            record.fault = Some(Fault::ArithmeticOverflow(record.word));
            tracing::debug!(pc = record.pc, word = record.word, "arithmetic overflow");
        } else {
            self.regs.write(rd, value);
        }
    }
}

impl FunctionalExecutor for Cpu {
    fn execute_next(&mut self) -> Result<ExecutionRecord, SimError> {
        self.step()
    }
}
