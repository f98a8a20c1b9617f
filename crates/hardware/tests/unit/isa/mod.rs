/// Classification and hazard-helper tests.
pub mod classify;
