//! Memory Access Types.
//!
//! This module defines how memory operations are classified. These types are used for:
//! 1. **Cache Lookups:** Distinguishing reads from writes (both are timed identically).
//! 2. **Memory Store:** Selecting the transfer width of a big-endian access.

/// Kind of cache access.
///
/// Reads and writes follow the same hit/miss and replacement path; the kind is
/// carried for tracing and statistics only.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccessKind {
    /// Instruction fetch or data load.
    Read,
    /// Data store.
    Write,
}

/// Transfer width of a memory store access.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Width {
    /// One byte (`lbu`, `sb`).
    Byte = 1,
    /// Two bytes (`lhu`, `sh`).
    Half = 2,
    /// Four bytes (`lw`, `sw`, instruction fetch).
    Word = 4,
}

impl Width {
    /// Number of bytes transferred.
    #[inline]
    pub const fn bytes(self) -> usize {
        self as usize
    }
}
