//! General-Purpose Register File.
//!
//! Holds the 32 MIPS integer registers. Register `$zero` reads as zero and
//! ignores writes.

/// Number of architectural integer registers.
pub const NUM_REGS: usize = 32;

/// MIPS integer register file.
#[derive(Clone, Debug, Default)]
pub struct RegisterFile {
    regs: [u32; NUM_REGS],
}

impl RegisterFile {
    /// Creates a register file with every register cleared.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a register.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index (0-31). Index 0 always returns 0.
    ///
    /// # Returns
    ///
    /// The 32-bit register value; 0 for out-of-range indices.
    #[inline]
    pub fn read(&self, idx: usize) -> u32 {
        if idx == 0 {
            return 0;
        }
        self.regs.get(idx).copied().unwrap_or(0)
    }

    /// Writes a register. Writes to `$zero` and out-of-range indices are ignored.
    #[inline]
    pub fn write(&mut self, idx: usize, val: u32) {
        if idx == 0 {
            return;
        }
        if let Some(slot) = self.regs.get_mut(idx) {
            *slot = val;
        }
    }

    /// Returns a snapshot of all registers in index order.
    pub const fn snapshot(&self) -> [u32; NUM_REGS] {
        self.regs
    }
}
