//! Least Recently Used (LRU) Rank Bookkeeping.
//!
//! Each valid way of a set carries a rank; 1 is the most recently used and
//! the valid ranks of a set always form exactly `{1, ..., valid_ways}`.
//! Invalid ways carry rank 0.
//!
//! # Performance
//!
//! - **Time Complexity:** O(W) per operation, W = associativity
//! - **Space Complexity:** one rank per way, stored in the line itself

use super::CacheLine;

/// Makes `way` the most recently used after a hit.
///
/// Every other valid way ranked ahead of it (smaller rank) ages by one; ways
/// ranked behind it keep their rank.
pub fn promote(set: &mut [CacheLine], way: usize) {
    let Some(hit_rank) = set.get(way).map(|line| line.rank) else {
        return;
    };
    for (idx, line) in set.iter_mut().enumerate() {
        if idx != way && line.valid && line.rank < hit_rank {
            line.rank += 1;
        }
    }
    if let Some(line) = set.get_mut(way) {
        line.rank = 1;
    }
}

/// Assigns rank 1 to a previously invalid `way` that is being filled.
///
/// Every other valid way ages by one.
pub fn fill(set: &mut [CacheLine], way: usize) {
    for (idx, line) in set.iter_mut().enumerate() {
        if idx != way && line.valid {
            line.rank += 1;
        }
    }
    if let Some(line) = set.get_mut(way) {
        line.rank = 1;
    }
}

/// Picks the victim in a full set and rotates every rank.
///
/// The victim is the way whose rank equals the associativity. Applying
/// `rank = rank % ways + 1` to every way then ages all other ways by one and
/// gives the victim rank 1, ready for the incoming block.
///
/// # Returns
///
/// The victim way index.
pub fn evict_and_rotate(set: &mut [CacheLine]) -> usize {
    let ways = set.len() as u32;
    let victim = set
        .iter()
        .position(|line| line.rank == ways)
        .unwrap_or(0);
    for line in set.iter_mut() {
        line.rank = line.rank % ways + 1;
    }
    victim
}
