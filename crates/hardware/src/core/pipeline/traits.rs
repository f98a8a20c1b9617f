//! Functional Executor Interface.
//!
//! The timing engine never computes architectural state itself. Each normal
//! cycle it asks a [`FunctionalExecutor`] for the next instruction and keeps
//! only what timing needs from the returned [`ExecutionRecord`]: the raw word,
//! the data address, and whether execution overflowed.

use crate::common::error::{Fault, SimError};
use crate::isa::decode::{Op, OpKind};

/// Description of one functionally executed instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExecutionRecord {
    /// Address the word was fetched from.
    pub pc: u32,
    /// Address of the next instruction to execute.
    pub next_pc: u32,
    /// Raw instruction word.
    pub word: u32,
    /// Decoded operation.
    pub op: Op,
    /// Effective address of a load or store.
    pub mem_addr: Option<u32>,
    /// Recoverable fault raised by the instruction.
    pub fault: Option<Fault>,
    /// Sequence number among executed instructions, starting at 0.
    pub seq: u64,
}

impl ExecutionRecord {
    /// Pipeline category of the instruction.
    #[inline]
    pub const fn kind(&self) -> OpKind {
        self.op.kind()
    }

    /// Whether the halt sentinel was fetched.
    #[inline]
    pub const fn is_halt(&self) -> bool {
        matches!(self.op, Op::Halt)
    }

    /// Whether the encoding was recognised.
    #[inline]
    pub const fn is_valid(&self) -> bool {
        !matches!(self.fault, Some(Fault::IllegalInstruction(_)))
    }

    /// Whether execution raised a signed overflow.
    #[inline]
    pub const fn is_overflow(&self) -> bool {
        matches!(self.fault, Some(Fault::ArithmeticOverflow(_)))
    }
}

/// Source of architecturally executed instructions.
///
/// Implementations advance their state by exactly one instruction per call
/// and never block.
pub trait FunctionalExecutor {
    /// Executes the next instruction and describes it.
    ///
    /// # Errors
    ///
    /// Returns `SimError::OutOfRange` if the fetch or a data access leaves the
    /// memory window; the run cannot continue after that.
    fn execute_next(&mut self) -> Result<ExecutionRecord, SimError>;
}
