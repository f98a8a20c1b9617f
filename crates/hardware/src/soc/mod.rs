//! System Components.
//!
//! This module holds the parts of the simulated machine outside the core.
//! Only the flat memory window is modelled; there are no devices or bus.

/// Byte-addressable memory window.
pub mod memory;

pub use memory::MemoryStore;
