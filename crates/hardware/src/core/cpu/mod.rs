//! CPU Core Definition and Initialization.
//!
//! This module defines the `Cpu` structure, the functional executor of the
//! simulator. It holds the architectural state:
//! 1. **Registers:** The 32 general-purpose registers and the program counter.
//! 2. **Control Flow:** The pending target of a taken branch, applied after its delay slot.
//! 3. **Memory:** The byte-addressable memory window the program runs in.
//!
//! Timing is not modelled here; the pipeline engine consumes the records this
//! executor produces.

/// Single-instruction functional execution.
pub mod execution;

use crate::common::RegisterFile;
use crate::soc::MemoryStore;

/// Functional MIPS executor.
///
/// Executes one instruction per call and reports what it did. A taken branch
/// or jump redirects fetch only after the following (delay slot) instruction.
#[derive(Clone, Debug)]
pub struct Cpu {
    /// General-purpose registers.
    pub regs: RegisterFile,
    /// Address of the next instruction to fetch.
    pub pc: u32,
    /// Memory window.
    pub mem: MemoryStore,
    /// Target of a taken branch waiting for its delay slot to execute.
    pending_branch: Option<u32>,
    /// Dynamic instruction count, including the halt word.
    instructions: u64,
    /// Set once the halt word has been executed.
    halted: bool,
}

impl Cpu {
    /// Creates a CPU with cleared registers, `pc = 0`, over the given memory.
    pub fn new(mem: MemoryStore) -> Self {
        Self {
            regs: RegisterFile::new(),
            pc: 0,
            mem,
            pending_branch: None,
            instructions: 0,
            halted: false,
        }
    }

    /// Number of instructions executed so far, including the halt word.
    pub const fn instructions(&self) -> u64 {
        self.instructions
    }

    /// Whether the halt word has been executed.
    pub const fn is_halted(&self) -> bool {
        self.halted
    }

    /// Target of a taken branch still waiting for its delay slot.
    pub const fn pending_branch(&self) -> Option<u32> {
        self.pending_branch
    }
}
