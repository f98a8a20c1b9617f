

/// LRU rank invariant property tests.
pub mod lru_properties;
