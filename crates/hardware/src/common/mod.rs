//! Common utilities and types used throughout the pipeline simulator.
//!
//! This module provides the building blocks shared by every other component. It includes:
//! 1. **Constants:** Memory size, pipeline depth, halt sentinel, and fault flush lengths.
//! 2. **Memory Access:** Access kinds and transfer widths for caches and the memory store.
//! 3. **Error Handling:** The fatal `SimError` taxonomy and recoverable `Fault` kinds.
//! 4. **Register Management:** The 32-entry MIPS general-purpose register file.

/// Common constants used throughout the simulator.
pub mod constants;

/// Memory access kind and width definitions.
pub mod data;

/// Error types and recoverable fault definitions.
pub mod error;

/// Register file implementation.
pub mod reg;

pub use constants::{HALT_WORD, PIPELINE_DEPTH};
pub use data::{AccessKind, Width};
pub use error::{Fault, SimError};
pub use reg::RegisterFile;
