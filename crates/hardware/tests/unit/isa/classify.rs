//! Instruction Classification Tests.
//!
//! Verifies that every supported encoding lands in exactly one pipeline
//! category, that unknown encodings are Illegal, and that the register helpers
//! used by hazard detection ignore `$zero`.

use pipesim_core::common::HALT_WORD;
use pipesim_core::isa::decode::{
    arith_destination_register, branch_source_registers, load_target_register, reads_register,
    source_registers,
};
use pipesim_core::isa::{InstructionBits, OpKind, classify};
use rstest::rstest;

use crate::common::builder::instruction::asm;

// ══════════════════════════════════════════════════════════
// 1. Categories
// ══════════════════════════════════════════════════════════

#[rstest]
#[case::add(asm().add(3, 1, 2).build(), OpKind::ArithmeticOp)]
#[case::addu(asm().addu(3, 1, 2).build(), OpKind::ArithmeticOp)]
#[case::sub(asm().sub(3, 1, 2).build(), OpKind::ArithmeticOp)]
#[case::nor(asm().nor(3, 1, 2).build(), OpKind::ArithmeticOp)]
#[case::sltu(asm().sltu(3, 1, 2).build(), OpKind::ArithmeticOp)]
#[case::sll(asm().sll(3, 1, 4).build(), OpKind::ArithmeticOp)]
#[case::srl(asm().srl(3, 1, 4).build(), OpKind::ArithmeticOp)]
#[case::nop(0, OpKind::ArithmeticOp)]
#[case::jr(asm().jr(31).build(), OpKind::JumpRegister)]
#[case::addi(asm().addi(1, 0, -1).build(), OpKind::ArithmeticImmediateOp)]
#[case::addiu(asm().addiu(1, 0, 5).build(), OpKind::ArithmeticImmediateOp)]
#[case::andi(asm().andi(1, 2, 0xff).build(), OpKind::ArithmeticImmediateOp)]
#[case::ori(asm().ori(1, 2, 0xff).build(), OpKind::ArithmeticImmediateOp)]
#[case::slti(asm().slti(1, 2, 3).build(), OpKind::ArithmeticImmediateOp)]
#[case::lui(asm().lui(1, 0x1234).build(), OpKind::ArithmeticImmediateOp)]
#[case::lw(asm().lw(1, 2, 0).build(), OpKind::Load)]
#[case::lhu(asm().lhu(1, 2, 0).build(), OpKind::Load)]
#[case::lbu(asm().lbu(1, 2, 0).build(), OpKind::Load)]
#[case::sw(asm().sw(1, 2, 0).build(), OpKind::Store)]
#[case::sh(asm().sh(1, 2, 0).build(), OpKind::Store)]
#[case::sb(asm().sb(1, 2, 0).build(), OpKind::Store)]
#[case::beq(asm().beq(1, 2, 4).build(), OpKind::Branch)]
#[case::bne(asm().bne(1, 2, 4).build(), OpKind::Branch)]
#[case::blez(asm().blez(1, 4).build(), OpKind::Branch)]
#[case::bgtz(asm().bgtz(1, 4).build(), OpKind::Branch)]
#[case::j(asm().j(16).build(), OpKind::Jump)]
#[case::jal(asm().jal(16).build(), OpKind::Jump)]
#[case::halt(HALT_WORD, OpKind::Halt)]
#[case::unknown_opcode(0xfc00_0000, OpKind::Illegal)]
#[case::unknown_funct(0x0000_003f, OpKind::Illegal)]
fn classifies(#[case] word: u32, #[case] expected: OpKind) {
    assert_eq!(classify(word), expected, "word {word:#010x}");
}

#[test]
fn classification_never_yields_bubble() {
    for opcode in 0..64u32 {
        for funct in [0u32, 0x08, 0x20, 0x3f] {
            let word = (opcode << 26) | funct;
            assert_ne!(classify(word), OpKind::Bubble, "word {word:#010x}");
        }
    }
}

#[test]
fn predicates_match_categories() {
    assert!(OpKind::Load.is_load() && OpKind::Load.is_mem());
    assert!(OpKind::Store.is_store() && OpKind::Store.is_mem());
    assert!(OpKind::Branch.is_branch());
    assert!(OpKind::ArithmeticOp.is_arithmetic());
    assert!(OpKind::ArithmeticImmediateOp.is_arithmetic());
    assert!(OpKind::ArithmeticImmediateOp.is_immediate_form());
    assert!(!OpKind::ArithmeticOp.is_immediate_form());
    assert!(!OpKind::Jump.is_branch(), "jumps are not conditional branches");
    assert!(!OpKind::Bubble.is_mem());
}

// ══════════════════════════════════════════════════════════
// 2. Field Extraction
// ══════════════════════════════════════════════════════════

#[test]
fn fields_of_r_type() {
    let word = asm().sll(9, 10, 7).build();
    assert_eq!(word.opcode(), 0);
    assert_eq!(word.rt(), 10);
    assert_eq!(word.rd(), 9);
    assert_eq!(word.shamt(), 7);
    assert_eq!(word.funct(), 0);
}

#[test]
fn immediates_extend_by_sign_or_zero() {
    let word = asm().addi(1, 2, -4).build();
    assert_eq!(word.imm(), 0xfffc);
    assert_eq!(word.sign_ext_imm(), 0xffff_fffc);
    assert_eq!(word.zero_ext_imm(), 0x0000_fffc);
}

#[test]
fn jump_target_field() {
    assert_eq!(asm().j(0x0012_3456).build().address(), 0x0012_3456);
}

// ══════════════════════════════════════════════════════════
// 3. Hazard Helpers
// ══════════════════════════════════════════════════════════

#[test]
fn load_target_is_rt() {
    assert_eq!(load_target_register(asm().lw(8, 29, 4).build()), Some(8));
    assert_eq!(load_target_register(asm().sw(8, 29, 4).build()), None);
    assert_eq!(load_target_register(asm().lw(0, 29, 4).build()), None, "$zero");
}

#[test]
fn arith_destination_depends_on_form() {
    assert_eq!(arith_destination_register(asm().add(3, 1, 2).build()), Some(3));
    assert_eq!(arith_destination_register(asm().addi(5, 1, 2).build()), Some(5));
    assert_eq!(arith_destination_register(asm().lw(5, 1, 2).build()), None);
    assert_eq!(arith_destination_register(asm().add(0, 1, 2).build()), None, "$zero");
}

#[test]
fn sources_filter_zero_and_respect_form() {
    assert_eq!(source_registers(asm().add(3, 1, 2).build()), [Some(1), Some(2)]);
    assert_eq!(source_registers(asm().add(3, 0, 2).build()), [None, Some(2)]);
    assert_eq!(source_registers(asm().addi(3, 1, 9).build()), [Some(1), None]);
    assert_eq!(source_registers(asm().sll(3, 4, 2).build()), [Some(4), None]);
    assert_eq!(source_registers(asm().sw(7, 29, 0).build()), [Some(29), Some(7)]);
}

#[test]
fn branch_sources_only_for_branches() {
    assert_eq!(branch_source_registers(asm().beq(1, 2, 0).build()), [Some(1), Some(2)]);
    assert_eq!(branch_source_registers(asm().blez(4, 0).build()), [Some(4), None]);
    assert_eq!(branch_source_registers(asm().add(3, 1, 2).build()), [None, None]);
}

#[test]
fn reads_register_checks_both_sources() {
    let word = asm().or(5, 6, 7).build();
    assert!(reads_register(word, 6));
    assert!(reads_register(word, 7));
    assert!(!reads_register(word, 5));
}
