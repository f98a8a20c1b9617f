//! Instruction Disassembler for the MIPS subset.
//!
//! Converts a 32-bit instruction word into the mnemonic text used by the
//! pipeline trace. Output is padded by the caller; this module only produces
//! the instruction text, surrounded by single spaces.
//!
//! # Usage
//!
//! ```
//! use pipesim_core::isa::disasm::disassemble;
//! assert_eq!(disassemble(0x0000_0000), " nop ");
//! assert_eq!(disassemble(0x0022_1820), " add $v1, $at, $v0 ");
//! ```

use crate::common::constants::{HALT_WORD, UNKNOWN_WORD};
use crate::isa::abi::reg_name;
use crate::isa::decode::{Op, OpKind, decode};
use crate::isa::instruction::InstructionBits;

/// Disassembles a 32-bit instruction word into a human-readable string.
///
/// Returns text like `" add $v1, $at, $v0 "`, `" lw $t0, -4($sp) "`,
/// `" HALT "`, or `" ILLEGAL "` for unsupported encodings.
pub fn disassemble(word: u32) -> String {
    if word == HALT_WORD {
        return " HALT ".to_string();
    }
    if word == UNKNOWN_WORD {
        return " UNKNOWN ".to_string();
    }
    if word == 0 {
        return " nop ".to_string();
    }

    let op = decode(word);
    let name = op.mnemonic();
    let rs = reg_name(word.rs());
    let rt = reg_name(word.rt());
    let rd = reg_name(word.rd());

    match op {
        Op::Illegal | Op::Halt => " ILLEGAL ".to_string(),
        Op::Jr => format!(" {name} {rs} "),
        Op::Sll | Op::Srl => format!(" {name} {rd}, {rt}, {} ", word.shamt()),
        Op::Lui => format!(" {name} {rt}, {:#x} ", word.imm()),
        Op::Beq | Op::Bne => format!(" {name} {rs}, {rt}, {:#x} ", word.imm()),
        Op::Blez | Op::Bgtz => format!(" {name} {rs}, {:#x} ", word.imm()),
        Op::J | Op::Jal => format!(" {name} {:#x} ", word.address()),
        _ => match op.kind() {
            OpKind::Load | OpKind::Store => {
                format!(" {name} {rt}, {}({rs}) ", word.imm() as u16 as i16)
            }
            OpKind::ArithmeticImmediateOp => format!(" {name} {rt}, {rs}, {:#x} ", word.imm()),
            _ => format!(" {name} {rd}, {rs}, {rt} "),
        },
    }
}
