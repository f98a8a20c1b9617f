//! Error and Fault definitions.
//!
//! This module defines the two failure families of the simulator:
//! 1. **Fatal errors:** `SimError`, propagated with `?` and ending the run.
//! 2. **Recoverable faults:** `Fault`, absorbed by the pipeline through a flush.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Fatal simulator error.
///
/// Any of these aborts the current run; the CLI reports it and exits non-zero.
#[derive(Debug, Error)]
pub enum SimError {
    /// Cache or memory parameters that cannot describe a real structure.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A numeric property in a plain-text configuration file could not be read.
    #[error("Failed to parse property at line {line} for property {property}")]
    ConfigParse {
        /// One-based line of the offending token.
        line: usize,
        /// Name of the property being read.
        property: &'static str,
    },

    /// An access touched bytes outside the memory window.
    #[error("out-of-range memory access at {addr:#010x} (width {width}, memory size {size:#x})")]
    OutOfRange {
        /// First byte address of the access.
        addr: u32,
        /// Access width in bytes.
        width: usize,
        /// Size of the memory window in bytes.
        size: usize,
    },

    /// Reading an input or writing an output artifact failed.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// File being read or written.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// A JSON configuration document was malformed.
    #[error("invalid JSON configuration: {0}")]
    Json(#[from] serde_json::Error),
}

impl SimError {
    /// Wraps an I/O error with the path it occurred on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Recoverable instruction fault.
///
/// Faults never end a run; the timing engine discards the faulting instruction
/// and its younger neighbours and counts the event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fault {
    /// Encoding does not correspond to a supported instruction.
    /// The associated value is the instruction word.
    IllegalInstruction(u32),

    /// Signed overflow in `add`, `addi` or `sub`.
    /// The associated value is the instruction word.
    ArithmeticOverflow(u32),
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IllegalInstruction(word) => write!(f, "IllegalInstruction({word:#010x})"),
            Self::ArithmeticOverflow(word) => write!(f, "ArithmeticOverflow({word:#010x})"),
        }
    }
}
