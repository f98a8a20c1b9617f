//! Output Artifacts.
//!
//! This module writes the files a run leaves behind, all named
//! `<base>_<kind>.out`:
//! 1. **`pipe_state`:** One line per cycle with every stage disassembled.
//! 2. **`reg_state`:** Final register values.
//! 3. **`mem_state`:** Final memory over the configured range.
//! 4. **`cache_state`:** Final I-cache and D-cache contents.
//! 5. **`sim_stats`:** The statistics report.
//!
//! Artifacts are diagnostics: a file that cannot be written is logged with
//! `tracing::warn!` and the run carries on.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::common::constants::TRACE_COLUMN_WIDTH;
use crate::common::reg::RegisterFile;
use crate::core::pipeline::engine::CycleReport;
use crate::core::pipeline::latches::Slot;
use crate::isa::abi::{REG_FP, REG_GP, REG_RA, REG_SP, reg_name};
use crate::isa::disasm::disassemble;

/// Trace text of an empty stage.
pub const BUBBLE_TEXT: &str = " BUBBLE ";

/// Register groups of the register dump, each followed by a blank line.
/// `$t8`/`$t9` sit after `$s7` in the register file but print with the `$t` group.
const REGISTER_GROUPS: [&[usize]; 6] = [
    &[1],
    &[2, 3],
    &[4, 5, 6, 7],
    &[8, 9, 10, 11, 12, 13, 14, 15, 24, 25],
    &[16, 17, 18, 19, 20, 21, 22, 23],
    &[26, 27],
];

/// Path of the artifact `kind` for an output prefix.
pub fn artifact_path(base: &Path, kind: &str) -> PathBuf {
    let mut name = base.as_os_str().to_owned();
    name.push(format!("_{kind}.out"));
    PathBuf::from(name)
}

/// Trace text of one stage.
pub fn slot_text(slot: Slot) -> String {
    slot.word().map_or_else(|| BUBBLE_TEXT.to_string(), disassemble)
}

/// Formats one line of the pipeline trace (without the newline).
///
/// ```
/// use pipesim_core::core::pipeline::{CycleKind, CycleReport, Slot};
/// use pipesim_core::sim::output::format_cycle;
///
/// let report = CycleReport {
///     cycle: 3,
///     slots: [Slot::Bubble; 5],
///     kind: CycleKind::Drain,
///     halted: false,
/// };
/// let line = format_cycle(&report);
/// assert!(line.starts_with("Cycle:        3\t|| BUBBLE "));
/// assert!(line.ends_with('|'));
/// ```
pub fn format_cycle(report: &CycleReport) -> String {
    let mut line = format!("Cycle: {:>8}\t|", report.cycle);
    for slot in report.slots {
        line.push('|');
        line.push_str(&format!("{:<TRACE_COLUMN_WIDTH$}", slot_text(slot)));
    }
    line.push('|');
    line
}

/// Streaming writer for the `pipe_state` artifact.
#[derive(Debug)]
pub struct PipeTrace {
    path: PathBuf,
    out: BufWriter<File>,
}

impl PipeTrace {
    /// Creates (truncating) the trace file for `base`.
    ///
    /// # Errors
    ///
    /// Returns the I/O error if the file cannot be created.
    pub fn create(base: &Path) -> io::Result<Self> {
        let path = artifact_path(base, "pipe_state");
        let out = BufWriter::new(File::create(&path)?);
        Ok(Self { path, out })
    }

    /// Path of the trace file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends one cycle.
    ///
    /// # Errors
    ///
    /// Returns the I/O error if the write fails.
    pub fn record(&mut self, report: &CycleReport) -> io::Result<()> {
        writeln!(self.out, "{}", format_cycle(report))
    }

    /// Flushes buffered lines to disk.
    ///
    /// # Errors
    ///
    /// Returns the I/O error if the flush fails.
    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}

/// Writes the register dump: `$at`, then the `$v`, `$a`, `$t`, `$s` and `$k`
/// groups, then `$gp`, `$sp`, `$fp` and `$ra`.
///
/// # Errors
///
/// Propagates any error from `out`.
pub fn write_registers(regs: &RegisterFile, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "---------------------")?;
    writeln!(out, "Begin Register Values")?;
    writeln!(out, "---------------------")?;
    for group in REGISTER_GROUPS {
        for &idx in group {
            write_register(regs, idx, out)?;
        }
        writeln!(out)?;
    }
    for idx in [REG_GP, REG_SP, REG_FP, REG_RA] {
        write_register(regs, idx, out)?;
    }
    writeln!(out, "---------------------")?;
    writeln!(out, "End Register Values")?;
    writeln!(out, "---------------------")
}

fn write_register(regs: &RegisterFile, idx: usize, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "{} = 0x{:08x}", reg_name(idx), regs.read(idx))
}

/// Creates the artifact `kind` for `base` and fills it with `write`.
///
/// Failures are logged and swallowed.
///
/// # Returns
///
/// `true` if the artifact was written completely.
pub fn write_artifact<F>(base: &Path, kind: &str, write: F) -> bool
where
    F: FnOnce(&mut BufWriter<File>) -> io::Result<()>,
{
    let path = artifact_path(base, kind);
    let result = File::create(&path).and_then(|file| {
        let mut out = BufWriter::new(file);
        write(&mut out)?;
        out.flush()
    });
    match result {
        Ok(()) => {
            tracing::debug!(path = %path.display(), "artifact written");
            true
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "could not write artifact");
            false
        }
    }
}
