//! Global Simulator Constants.
//!
//! This module defines the fixed parameters of the modelled machine. It includes:
//! 1. **Memory Constants:** Default memory window and dump range.
//! 2. **Instruction Constants:** The halt sentinel and the trace-only unknown marker.
//! 3. **Pipeline Constants:** Stage count and fault flush lengths.

/// Default size of the byte-addressable memory window (64 KiB).
pub const MEMORY_SIZE: usize = 0x10000;

/// Instruction word that stops fetching and starts the pipeline drain.
pub const HALT_WORD: u32 = 0xfeed_feed;

/// Word printed as `UNKNOWN` in traces; reserved by the reference tooling.
pub const UNKNOWN_WORD: u32 = 0xdeef_deef;

/// Number of pipeline stages (Fetch, Decode, Execute, Memory, Writeback).
pub const PIPELINE_DEPTH: usize = 5;

/// Cycles of Bubble fetches after the halt word before the run reports Halt.
pub const DRAIN_CYCLES: u32 = (PIPELINE_DEPTH - 1) as u32;

/// Flush length for an overflow detected in Execute (Fetch, Decode, Execute discarded).
pub const OVERFLOW_FLUSH_CYCLES: u32 = 3;

/// Flush length for an illegal instruction detected in Decode (Fetch, Decode discarded).
pub const ILLEGAL_FLUSH_CYCLES: u32 = 2;

/// Default first byte address of the memory dump.
pub const DUMP_START: u32 = 0;

/// Default last byte address of the memory dump.
pub const DUMP_END: u32 = 0x1f4;

/// Width of each column in the pipeline trace.
pub const TRACE_COLUMN_WIDTH: usize = 25;
