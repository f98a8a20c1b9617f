//! Simulation driver, program loading and output artifacts.
//!
//! Provides the `Simulator` context that couples the functional executor to
//! the timing engine, the loader that prepares memory from a program image,
//! and the writers for the files a run leaves behind.

/// Program loading and artifact naming.
pub mod loader;

/// Output artifact writers.
pub mod output;

/// Simulator context and run loops.
pub mod simulator;

pub use self::simulator::{RunStatus, Simulator, run_functional};
