//! MIPS Instruction Decoder and Classifier.
//!
//! This module maps a raw 32-bit word onto a closed set of operations exactly
//! once. The same decoding feeds three consumers:
//! 1. **Functional execution:** `Cpu` matches on [`Op`] to apply the architectural effect.
//! 2. **Hazard detection:** The pipeline asks for [`OpKind`] and register operands.
//! 3. **Disassembly:** Trace output formats each word from its [`Op`].

use crate::common::constants::HALT_WORD;
use crate::isa::instruction::InstructionBits;
use crate::isa::mips::{funct, opcodes};

/// Pipeline-level category of an instruction.
///
/// `Bubble` is never produced by [`classify`]; it describes an empty pipeline
/// slot, so an all-zero word (`sll $zero, $zero, 0`) is still an `ArithmeticOp`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OpKind {
    /// Register-register ALU operation (R-type, except `jr`).
    ArithmeticOp,
    /// ALU operation with a 16-bit immediate operand.
    ArithmeticImmediateOp,
    /// Memory read (`lw`, `lhu`, `lbu`).
    Load,
    /// Memory write (`sw`, `sh`, `sb`).
    Store,
    /// Conditional branch (`beq`, `bne`, `blez`, `bgtz`).
    Branch,
    /// Absolute jump (`j`, `jal`).
    Jump,
    /// Register-indirect jump (`jr`).
    JumpRegister,
    /// The halt sentinel word.
    Halt,
    /// Unsupported encoding.
    Illegal,
    /// Empty pipeline slot.
    Bubble,
}

impl OpKind {
    /// Returns `true` for loads.
    #[inline]
    pub const fn is_load(self) -> bool {
        matches!(self, Self::Load)
    }

    /// Returns `true` for stores.
    #[inline]
    pub const fn is_store(self) -> bool {
        matches!(self, Self::Store)
    }

    /// Returns `true` for instructions that access data memory.
    #[inline]
    pub const fn is_mem(self) -> bool {
        matches!(self, Self::Load | Self::Store)
    }

    /// Returns `true` for conditional branches.
    #[inline]
    pub const fn is_branch(self) -> bool {
        matches!(self, Self::Branch)
    }

    /// Returns `true` for ALU operations in register or immediate form.
    #[inline]
    pub const fn is_arithmetic(self) -> bool {
        matches!(self, Self::ArithmeticOp | Self::ArithmeticImmediateOp)
    }

    /// Returns `true` for ALU operations taking a 16-bit immediate.
    #[inline]
    pub const fn is_immediate_form(self) -> bool {
        matches!(self, Self::ArithmeticImmediateOp)
    }
}

/// Fully decoded operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum Op {
    Add,
    Addu,
    And,
    Nor,
    Or,
    Slt,
    Sltu,
    Sll,
    Srl,
    Sub,
    Subu,
    Jr,
    Addi,
    Addiu,
    Andi,
    Ori,
    Slti,
    Sltiu,
    Lui,
    Lbu,
    Lhu,
    Lw,
    Sb,
    Sh,
    Sw,
    Beq,
    Bne,
    Blez,
    Bgtz,
    J,
    Jal,
    Halt,
    Illegal,
}

impl Op {
    /// Pipeline category of the operation.
    pub const fn kind(self) -> OpKind {
        match self {
            Self::Add
            | Self::Addu
            | Self::And
            | Self::Nor
            | Self::Or
            | Self::Slt
            | Self::Sltu
            | Self::Sll
            | Self::Srl
            | Self::Sub
            | Self::Subu => OpKind::ArithmeticOp,
            Self::Jr => OpKind::JumpRegister,
            Self::Addi
            | Self::Addiu
            | Self::Andi
            | Self::Ori
            | Self::Slti
            | Self::Sltiu
            | Self::Lui => OpKind::ArithmeticImmediateOp,
            Self::Lbu | Self::Lhu | Self::Lw => OpKind::Load,
            Self::Sb | Self::Sh | Self::Sw => OpKind::Store,
            Self::Beq | Self::Bne | Self::Blez | Self::Bgtz => OpKind::Branch,
            Self::J | Self::Jal => OpKind::Jump,
            Self::Halt => OpKind::Halt,
            Self::Illegal => OpKind::Illegal,
        }
    }

    /// Assembly mnemonic.
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Addu => "addu",
            Self::And => "and",
            Self::Nor => "nor",
            Self::Or => "or",
            Self::Slt => "slt",
            Self::Sltu => "sltu",
            Self::Sll => "sll",
            Self::Srl => "srl",
            Self::Sub => "sub",
            Self::Subu => "subu",
            Self::Jr => "jr",
            Self::Addi => "addi",
            Self::Addiu => "addiu",
            Self::Andi => "andi",
            Self::Ori => "ori",
            Self::Slti => "slti",
            Self::Sltiu => "sltiu",
            Self::Lui => "lui",
            Self::Lbu => "lbu",
            Self::Lhu => "lhu",
            Self::Lw => "lw",
            Self::Sb => "sb",
            Self::Sh => "sh",
            Self::Sw => "sw",
            Self::Beq => "beq",
            Self::Bne => "bne",
            Self::Blez => "blez",
            Self::Bgtz => "bgtz",
            Self::J => "j",
            Self::Jal => "jal",
            Self::Halt => "halt",
            Self::Illegal => "illegal",
        }
    }
}

/// Decodes a raw word into its operation.
///
/// Total: every word maps to exactly one [`Op`], unknown encodings to
/// [`Op::Illegal`].
pub fn decode(word: u32) -> Op {
    if word == HALT_WORD {
        return Op::Halt;
    }
    match word.opcode() {
        opcodes::OP_RTYPE => decode_rtype(word),
        opcodes::OP_J => Op::J,
        opcodes::OP_JAL => Op::Jal,
        opcodes::OP_BEQ => Op::Beq,
        opcodes::OP_BNE => Op::Bne,
        opcodes::OP_BLEZ => Op::Blez,
        opcodes::OP_BGTZ => Op::Bgtz,
        opcodes::OP_ADDI => Op::Addi,
        opcodes::OP_ADDIU => Op::Addiu,
        opcodes::OP_SLTI => Op::Slti,
        opcodes::OP_SLTIU => Op::Sltiu,
        opcodes::OP_ANDI => Op::Andi,
        opcodes::OP_ORI => Op::Ori,
        opcodes::OP_LUI => Op::Lui,
        opcodes::OP_LW => Op::Lw,
        opcodes::OP_LBU => Op::Lbu,
        opcodes::OP_LHU => Op::Lhu,
        opcodes::OP_SB => Op::Sb,
        opcodes::OP_SH => Op::Sh,
        opcodes::OP_SW => Op::Sw,
        _ => Op::Illegal,
    }
}

fn decode_rtype(word: u32) -> Op {
    match word.funct() {
        funct::ADD => Op::Add,
        funct::ADDU => Op::Addu,
        funct::AND => Op::And,
        funct::NOR => Op::Nor,
        funct::OR => Op::Or,
        funct::SLT => Op::Slt,
        funct::SLTU => Op::Sltu,
        funct::SLL => Op::Sll,
        funct::SRL => Op::Srl,
        funct::SUB => Op::Sub,
        funct::SUBU => Op::Subu,
        funct::JR => Op::Jr,
        _ => Op::Illegal,
    }
}

/// Classifies a fetched word into its pipeline category.
#[inline]
pub fn classify(word: u32) -> OpKind {
    decode(word).kind()
}

/// Register written by a load, or `None` for non-loads and `$zero`.
pub fn load_target_register(word: u32) -> Option<usize> {
    if classify(word).is_load() {
        nonzero(word.rt())
    } else {
        None
    }
}

/// Register written by an ALU operation (`rd` for R-type, `rt` for immediate
/// form), or `None` for anything else and for `$zero`.
pub fn arith_destination_register(word: u32) -> Option<usize> {
    match classify(word) {
        OpKind::ArithmeticOp => nonzero(word.rd()),
        OpKind::ArithmeticImmediateOp => nonzero(word.rt()),
        _ => None,
    }
}

/// Registers read by the instruction, with `$zero` filtered out.
pub fn source_registers(word: u32) -> [Option<usize>; 2] {
    let rs = nonzero(word.rs());
    let rt = nonzero(word.rt());
    match decode(word) {
        Op::Sll | Op::Srl => [rt, None],
        Op::Lui | Op::Halt | Op::Illegal | Op::J | Op::Jal => [None, None],
        Op::Blez | Op::Bgtz | Op::Jr => [rs, None],
        op => match op.kind() {
            OpKind::ArithmeticImmediateOp | OpKind::Load => [rs, None],
            _ => [rs, rt],
        },
    }
}

/// Registers compared by a conditional branch; both `None` for non-branches.
pub fn branch_source_registers(word: u32) -> [Option<usize>; 2] {
    if classify(word).is_branch() {
        source_registers(word)
    } else {
        [None, None]
    }
}

/// Returns `true` if `word` reads register `reg`.
pub fn reads_register(word: u32, reg: usize) -> bool {
    source_registers(word).contains(&Some(reg))
}

#[inline]
const fn nonzero(reg: usize) -> Option<usize> {
    if reg == 0 { None } else { Some(reg) }
}
