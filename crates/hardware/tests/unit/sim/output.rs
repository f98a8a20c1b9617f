//! Output Artifact Format Tests.
//!
//! Pins the text layout of the pipeline trace line and the register dump,
//! and the `<base>_<kind>.out` naming scheme.

use std::path::{Path, PathBuf};

use pipesim_core::common::{HALT_WORD, RegisterFile};
use pipesim_core::core::pipeline::{CycleKind, CycleReport, Slot};
use pipesim_core::sim::output::{
    BUBBLE_TEXT, artifact_path, format_cycle, slot_text, write_artifact, write_registers,
};
use pretty_assertions::assert_eq;

use crate::common::builder::instruction::asm;

fn report(cycle: u64, slots: [Slot; 5]) -> CycleReport {
    CycleReport {
        cycle,
        slots,
        kind: CycleKind::Normal,
        halted: false,
    }
}

#[test]
fn artifact_names_append_kind() {
    assert_eq!(
        artifact_path(Path::new("out/fib_cycle"), "pipe_state"),
        PathBuf::from("out/fib_cycle_pipe_state.out")
    );
}

#[test]
fn bubble_and_instruction_text() {
    assert_eq!(slot_text(Slot::Bubble), BUBBLE_TEXT);
    assert_eq!(slot_text(Slot::word_only(HALT_WORD, 0)), " HALT ");
}

#[test]
fn trace_line_pads_every_column() {
    let add = asm().add(3, 1, 2).build();
    let slots = [
        Slot::word_only(HALT_WORD, 1),
        Slot::word_only(add, 0),
        Slot::Bubble,
        Slot::Bubble,
        Slot::Bubble,
    ];
    let line = format_cycle(&report(12, slots));

    let expected = format!(
        "Cycle:       12\t||{:<25}|{:<25}|{:<25}|{:<25}|{:<25}|",
        " HALT ", " add $v1, $at, $v0 ", " BUBBLE ", " BUBBLE ", " BUBBLE "
    );
    assert_eq!(line, expected);
}

#[test]
fn trace_line_cycle_is_right_aligned() {
    let line = format_cycle(&report(123_456, [Slot::Bubble; 5]));
    assert!(line.starts_with("Cycle:   123456\t|"), "{line:?}");
    assert_eq!(line.matches('|').count(), 7);
}

#[test]
fn register_dump_layout() {
    let mut regs = RegisterFile::new();
    regs.write(1, 0xdead_beef);
    regs.write(3, 12);
    regs.write(24, 0x18);
    regs.write(31, 0x40);

    let mut out = Vec::new();
    write_registers(&regs, &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines[..3], ["---------------------", "Begin Register Values", "---------------------"]);
    assert_eq!(lines[3], "$at = 0xdeadbeef");
    assert_eq!(lines[4], "");
    assert_eq!(lines[5], "$v0 = 0x00000000");
    assert_eq!(lines[6], "$v1 = 0x0000000c");
    assert_eq!(lines[7], "");

    // $t8 follows $t7 inside the temporaries group.
    let t7 = lines.iter().position(|l| l.starts_with("$t7")).unwrap();
    assert_eq!(lines[t7 + 1], "$t8 = 0x00000018");
    assert_eq!(lines[t7 + 2], "$t9 = 0x00000000");
    assert_eq!(lines[t7 + 3], "");
    assert_eq!(lines[t7 + 4], "$s0 = 0x00000000");

    let tail = &lines[lines.len() - 7..];
    assert_eq!(
        tail,
        [
            "$gp = 0x00000000",
            "$sp = 0x00000000",
            "$fp = 0x00000000",
            "$ra = 0x00000040",
            "---------------------",
            "End Register Values",
            "---------------------",
        ]
    );
    assert_eq!(lines.len(), 43);
    assert!(!text.contains("$zero"));
}

#[test]
fn artifact_write_failure_is_reported_not_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let base = dir.path().join("missing_dir").join("prog_cycle");
    assert!(!write_artifact(&base, "sim_stats", |_| Ok(())));
}

#[test]
fn artifact_is_written_under_base() {
    let dir = tempfile::tempdir().unwrap();
    let base = dir.path().join("prog_cycle");
    assert!(write_artifact(&base, "sim_stats", |out| {
        use std::io::Write;
        writeln!(out, "hello")
    }));
    let text = std::fs::read_to_string(dir.path().join("prog_cycle_sim_stats.out")).unwrap();
    assert_eq!(text, "hello\n");
}
