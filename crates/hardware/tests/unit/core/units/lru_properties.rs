//! LRU Property Tests.
//!
//! Random access streams over small caches, checking after every access that:
//! 1. **Rank permutation:** The valid ways of every set hold exactly the ranks
//!    `1..=valid_ways`, and invalid ways hold rank 0.
//! 2. **Accounting:** Hits plus misses equals the number of accesses.
//! 3. **Determinism:** Replaying a stream on a fresh cache gives identical outcomes.

use pipesim_core::common::AccessKind;
use pipesim_core::config::CacheConfig;
use pipesim_core::core::units::cache::CacheSim;
use proptest::prelude::*;

/// (size, block, ways) geometries covering direct-mapped, set-associative and
/// fully associative caches.
const GEOMETRIES: [(u32, u32, u32); 4] = [(64, 16, 1), (128, 16, 2), (256, 16, 4), (64, 8, 8)];

fn build(geometry: usize) -> CacheSim {
    let (size, block, ways) = GEOMETRIES[geometry];
    CacheSim::new(&CacheConfig::new(size, block, ways, 0)).unwrap()
}

fn assert_rank_invariant(cache: &CacheSim) {
    for set in 0..cache.num_sets() {
        let lines = cache.set(set).unwrap();
        let mut ranks: Vec<u32> = lines.iter().filter(|l| l.valid).map(|l| l.rank).collect();
        ranks.sort_unstable();
        let expected: Vec<u32> = (1..=ranks.len() as u32).collect();
        assert_eq!(ranks, expected, "set {set} ranks not a permutation: {lines:?}");
        assert!(
            lines.iter().filter(|l| !l.valid).all(|l| l.rank == 0),
            "set {set} has a ranked invalid way: {lines:?}"
        );
    }
}

proptest! {
    #[test]
    fn ranks_form_permutation_after_every_access(
        geometry in 0..GEOMETRIES.len(),
        addrs in prop::collection::vec(0u32..2048, 1..200),
    ) {
        let mut cache = build(geometry);
        for &addr in &addrs {
            let _ = cache.access(addr, AccessKind::Read);
            assert_rank_invariant(&cache);
        }
        prop_assert_eq!(cache.hits() + cache.misses(), addrs.len() as u64);
    }

    #[test]
    fn outcomes_are_deterministic(
        geometry in 0..GEOMETRIES.len(),
        addrs in prop::collection::vec(any::<u32>(), 1..100),
    ) {
        let run = |addrs: &[u32]| {
            let mut cache = build(geometry);
            addrs.iter().map(|&a| cache.access(a, AccessKind::Read)).collect::<Vec<_>>()
        };
        prop_assert_eq!(run(&addrs), run(&addrs));
    }

    #[test]
    fn accessed_block_is_resident_and_most_recent(
        geometry in 0..GEOMETRIES.len(),
        addrs in prop::collection::vec(0u32..4096, 1..100),
    ) {
        let mut cache = build(geometry);
        for &addr in &addrs {
            let _ = cache.access(addr, AccessKind::Write);
            prop_assert!(cache.contains(addr));
            let set = cache.set(cache.set_index(addr)).unwrap();
            let line = set.iter().find(|l| l.valid && l.tag == cache.tag(addr));
            prop_assert_eq!(line.map(|l| l.rank), Some(1));
        }
    }
}
