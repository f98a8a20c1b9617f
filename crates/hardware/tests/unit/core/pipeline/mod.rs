

/// Stage slot shifting tests.
pub mod latches;
