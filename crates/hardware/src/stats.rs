//! Simulation statistics collection and reporting.
//!
//! This module tracks the timing metrics of a run. It provides:
//! 1. **Cycles and instructions:** Total cycles, dynamic instructions and CPI.
//! 2. **Caches:** Hit and miss counts for the I-cache and D-cache.
//! 3. **Stalls:** Cycles lost per stall cause, flush cycles, and load-use stalls.
//! 4. **Faults:** Illegal-instruction and overflow flushes.
//!
//! Every counter only increases during a run.

use std::io::{self, Write};
use std::time::Instant;

use serde::Serialize;

use crate::core::pipeline::stall::{StallCycle, StallKind};

/// Width the labels of the statistics artifact are padded to.
const REPORT_LABEL_WIDTH: usize = 23;

/// Simulation statistics structure tracking all timing metrics.
///
/// Serializes to a flat JSON object of its counters.
#[derive(Clone, Debug, Serialize)]
pub struct SimStats {
    #[serde(skip)]
    start_time: Instant,
    /// Total simulated cycles.
    pub cycles: u64,
    /// Instructions executed, including the halt word.
    pub dynamic_instructions: u64,

    /// I-cache hit count.
    pub icache_hits: u64,
    /// I-cache miss count.
    pub icache_misses: u64,
    /// D-cache hit count.
    pub dcache_hits: u64,
    /// D-cache miss count.
    pub dcache_misses: u64,

    /// Cycles stalled on an I-cache miss.
    pub stalls_instruction_miss: u64,
    /// Cycles stalled on a D-cache miss.
    pub stalls_data_miss: u64,
    /// Cycles stalled on a load-to-branch dependency.
    pub stalls_decode_hazard: u64,
    /// Cycles stalled on a dependency resolved in Execute.
    pub stalls_execute_hazard: u64,
    /// Stall cycles spent waiting on a loaded value.
    pub load_use_stalls: u64,
    /// Cycles spent flushing after a fault.
    pub flush_cycles: u64,

    /// Illegal instructions detected in Decode.
    pub illegal_faults: u64,
    /// Overflows detected in Execute.
    pub overflow_faults: u64,
}

impl Default for SimStats {
    fn default() -> Self {
        Self {
            start_time: Instant::now(),
            cycles: 0,
            dynamic_instructions: 0,
            icache_hits: 0,
            icache_misses: 0,
            dcache_hits: 0,
            dcache_misses: 0,
            stalls_instruction_miss: 0,
            stalls_data_miss: 0,
            stalls_decode_hazard: 0,
            stalls_execute_hazard: 0,
            load_use_stalls: 0,
            flush_cycles: 0,
            illegal_faults: 0,
            overflow_faults: 0,
        }
    }
}

/// Section names for selective stats output (`pipesim cycle --stats <SECTION>`).
///
/// Pass an empty slice to `print_sections` to print all sections.
pub const STATS_SECTIONS: &[&str] = &["summary", "stalls", "memory"];

impl SimStats {
    /// Counts one stall cycle under its cause.
    pub fn record_stall(&mut self, stall: StallCycle) {
        match stall.kind {
            StallKind::DataMiss => self.stalls_data_miss += 1,
            StallKind::DecodeHazard => self.stalls_decode_hazard += 1,
            StallKind::ExecuteHazard => self.stalls_execute_hazard += 1,
            StallKind::InstructionMiss => self.stalls_instruction_miss += 1,
        }
        if stall.load_use {
            self.load_use_stalls += 1;
        }
    }

    /// Total cycles lost to stalls of any kind.
    pub const fn total_stalls(&self) -> u64 {
        self.stalls_instruction_miss
            + self.stalls_data_miss
            + self.stalls_decode_hazard
            + self.stalls_execute_hazard
    }

    /// Writes the statistics artifact: one `label value` line per counter,
    /// labels left-aligned to a fixed width.
    ///
    /// # Errors
    ///
    /// Propagates any error from `out`.
    pub fn write_report(&self, out: &mut impl Write) -> io::Result<()> {
        let rows: [(&str, u64); 14] = [
            ("Dynamic instructions: ", self.dynamic_instructions),
            ("Total cycles: ", self.cycles),
            ("I-cache hits: ", self.icache_hits),
            ("I-cache misses: ", self.icache_misses),
            ("D-cache hits: ", self.dcache_hits),
            ("D-cache misses: ", self.dcache_misses),
            ("Load-use stalls: ", self.load_use_stalls),
            ("I-miss stalls: ", self.stalls_instruction_miss),
            ("D-miss stalls: ", self.stalls_data_miss),
            ("Decode stalls: ", self.stalls_decode_hazard),
            ("Execute stalls: ", self.stalls_execute_hazard),
            ("Flush cycles: ", self.flush_cycles),
            ("Illegal faults: ", self.illegal_faults),
            ("Overflow faults: ", self.overflow_faults),
        ];
        for (label, value) in rows {
            writeln!(out, "{label:<REPORT_LABEL_WIDTH$}{value}")?;
        }
        Ok(())
    }

    /// Prints only the requested statistics sections to stdout.
    ///
    /// Each element of `sections` should be one of [`STATS_SECTIONS`]. Pass an
    /// empty slice to print all sections (same as `print()`).
    pub fn print_sections(&self, sections: &[String]) {
        if let Err(e) = self.write_sections(sections, &mut io::stdout().lock()) {
            tracing::warn!(error = %e, "failed to print statistics");
        }
    }

    /// Writes the requested human-readable sections to `out`.
    ///
    /// Unknown section names are ignored.
    ///
    /// # Errors
    ///
    /// Propagates any error from `out`.
    pub fn write_sections(&self, sections: &[String], out: &mut impl Write) -> io::Result<()> {
        let want = |s: &str| sections.is_empty() || sections.iter().any(|x| x == s);
        let seconds = self.start_time.elapsed().as_secs_f64();
        let cyc = self.cycles.max(1);
        let instr = self.dynamic_instructions.max(1);

        writeln!(out, "\n==========================================================")?;
        writeln!(out, "MIPS PIPELINE SIMULATION STATISTICS")?;
        writeln!(out, "==========================================================")?;
        if want("summary") {
            writeln!(out, "host_seconds             {seconds:.4} s")?;
            writeln!(out, "sim_cycles               {}", self.cycles)?;
            writeln!(out, "sim_insts                {}", self.dynamic_instructions)?;
            writeln!(out, "sim_cpi                  {:.4}", cyc as f64 / instr as f64)?;
            writeln!(out, "----------------------------------------------------------")?;
        }
        if want("stalls") {
            let pct = |n: u64| (n as f64 / cyc as f64) * 100.0;
            writeln!(out, "STALL BREAKDOWN")?;
            for (name, n) in [
                ("stalls.icache_miss", self.stalls_instruction_miss),
                ("stalls.dcache_miss", self.stalls_data_miss),
                ("stalls.decode_hazard", self.stalls_decode_hazard),
                ("stalls.execute_hazard", self.stalls_execute_hazard),
                ("stalls.load_use", self.load_use_stalls),
                ("flush.cycles", self.flush_cycles),
            ] {
                writeln!(out, "  {name:<22} {n} ({:.2}%)", pct(n))?;
            }
            writeln!(
                out,
                "  faults                 illegal={} overflow={}",
                self.illegal_faults, self.overflow_faults
            )?;
            writeln!(out, "----------------------------------------------------------")?;
        }
        if want("memory") {
            writeln!(out, "MEMORY HIERARCHY")?;
            for (name, hits, misses) in [
                ("L1-I", self.icache_hits, self.icache_misses),
                ("L1-D", self.dcache_hits, self.dcache_misses),
            ] {
                let total = hits + misses;
                let miss_rate = if total > 0 {
                    (misses as f64 / total as f64) * 100.0
                } else {
                    0.0
                };
                writeln!(
                    out,
                    "  {name:<6} accesses: {total:<10} | hits: {hits:<10} | miss_rate: {miss_rate:.2}%"
                )?;
            }
        }
        writeln!(out, "==========================================================")
    }

    /// Prints all statistics sections to stdout.
    ///
    /// Equivalent to `print_sections(&[])`.
    pub fn print(&self) {
        self.print_sections(&[]);
    }
}
