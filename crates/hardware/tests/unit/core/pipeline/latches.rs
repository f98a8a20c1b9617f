//! Pipeline Slot Shifting Tests.
//!
//! Verifies the single shift loop: what moves, what holds, and that data
//! addresses travel with their instructions.

use pipesim_core::common::HALT_WORD;
use pipesim_core::core::pipeline::latches::{PipelineRegister, Slot, Stage};
use pipesim_core::isa::OpKind;
use pretty_assertions::assert_eq;

use crate::common::builder::instruction::asm;

fn slot(word: u32, seq: u64) -> Slot {
    Slot::word_only(word, seq)
}

fn seqs(pipe: &PipelineRegister) -> Vec<Option<u64>> {
    pipe.slots()
        .iter()
        .map(|s| match s {
            Slot::Bubble => None,
            Slot::Occupied(inst) => Some(inst.seq),
        })
        .collect()
}

/// Fills the pipeline with seq 0..5, so Writeback holds 0 and Fetch holds 4.
fn full_pipe() -> PipelineRegister {
    let mut pipe = PipelineRegister::new();
    for seq in 0..5 {
        pipe.advance(Stage::Fetch, slot(0x1000 + seq as u32, seq), Some(0x100 * seq as u32));
    }
    pipe
}

#[test]
fn new_pipeline_is_all_bubbles() {
    let pipe = PipelineRegister::new();
    assert!(pipe.slots().iter().all(Slot::is_bubble));
    assert_eq!(pipe.get(Stage::Memory).kind(), OpKind::Bubble);
}

#[test]
fn fetch_entry_shifts_everything() {
    let mut pipe = full_pipe();
    assert_eq!(seqs(&pipe), vec![Some(4), Some(3), Some(2), Some(1), Some(0)]);

    pipe.advance(Stage::Fetch, Slot::Bubble, None);
    assert_eq!(seqs(&pipe), vec![None, Some(4), Some(3), Some(2), Some(1)]);
}

#[test]
fn decode_entry_holds_fetch() {
    let mut pipe = full_pipe();
    pipe.advance(Stage::Decode, Slot::Bubble, None);
    assert_eq!(
        seqs(&pipe),
        vec![Some(4), None, Some(3), Some(2), Some(1)],
        "Fetch holds, Decode gets a bubble, the rest advance"
    );
}

#[test]
fn writeback_entry_freezes_the_rest() {
    let mut pipe = full_pipe();
    pipe.advance(Stage::Writeback, Slot::Bubble, None);
    assert_eq!(seqs(&pipe), vec![Some(4), Some(3), Some(2), Some(1), None]);
}

#[test]
fn history_moves_with_instructions() {
    let mut pipe = full_pipe();
    assert_eq!(pipe.history().get(Stage::Memory), Some(0x100));

    pipe.advance(Stage::Decode, Slot::Bubble, None);
    assert_eq!(pipe.history().get(Stage::Memory), Some(0x200));
    assert_eq!(pipe.history().get(Stage::Decode), None);
    assert_eq!(pipe.history().get(Stage::Fetch), Some(0x400), "Fetch entry held");
}

#[test]
fn squash_clears_through_stage() {
    let mut pipe = full_pipe();
    pipe.squash_through(Stage::Execute);
    assert_eq!(seqs(&pipe), vec![None, None, None, Some(1), Some(0)]);
    assert_eq!(pipe.history().get(Stage::Execute), None);
    assert_eq!(pipe.history().get(Stage::Memory), Some(0x100));
}

#[test]
fn slot_reports_word_and_kind() {
    let word = asm().lw(1, 2, 0).build();
    let s = slot(word, 0);
    assert_eq!(s.word(), Some(word));
    assert_eq!(s.kind(), OpKind::Load);
    assert!(!s.is_overflow());
    assert_eq!(Slot::Bubble.word(), None);
}

#[test]
fn stage_order_and_names() {
    assert_eq!(Stage::ALL.map(Stage::index), [0, 1, 2, 3, 4]);
    assert_eq!(Stage::ALL.map(Stage::name), ["IF", "ID", "EX", "MEM", "WB"]);
    assert!(Stage::Fetch < Stage::Writeback);
}

#[test]
fn squash_spares_the_halt_word() {
    let mut pipe = PipelineRegister::new();
    pipe.advance(Stage::Fetch, slot(0x1000, 0), None);
    pipe.advance(Stage::Fetch, slot(HALT_WORD, 1), None);
    pipe.squash_through(Stage::Execute);

    assert_eq!(pipe.get(Stage::Fetch).word(), Some(HALT_WORD));
    assert!(pipe.get(Stage::Decode).is_bubble());
}
