//! Set-Associative Cache Model.
//!
//! This module implements the tag store used for instruction and data cache
//! timing. It models only hit/miss outcomes and recency: no data is stored and
//! reads and writes take the same path. Outcomes are a pure function of the
//! configuration and the access order.
//!
//! Address decomposition for a cache with `B`-byte blocks and `S` sets:
//! - set index = `(addr >> log2(B)) mod S`
//! - tag = `addr >> (log2(B) + log2(S))`

/// Rank-based least-recently-used bookkeeping.
pub mod lru;

use std::io::{self, Write};

use crate::common::data::AccessKind;
use crate::common::error::SimError;
use crate::config::CacheConfig;

/// One way of a cache set.
///
/// `rank` is 1 for the most recently used valid way and counts up to the
/// number of valid ways in the set; invalid ways carry rank 0.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheLine {
    /// Address bits above the set index.
    pub tag: u32,
    /// Whether the way holds a block.
    pub valid: bool,
    /// Recency rank (1 = MRU).
    pub rank: u32,
}

/// Cache simulator implementing a set-associative cache with strict LRU replacement.
#[derive(Clone, Debug)]
pub struct CacheSim {
    config: CacheConfig,
    lines: Vec<CacheLine>, // index = (set * ways) + way
    num_sets: usize,
    ways: usize,
    offset_bits: u32,
    index_bits: u32,
    hits: u64,
    misses: u64,
}

impl CacheSim {
    /// Creates a new cache from its configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Size, block size, associativity and miss latency.
    ///
    /// # Errors
    ///
    /// Returns `SimError::Configuration` unless `ways >= 1`, the block size is
    /// a power of two, and the size divides into a power-of-two number of sets
    /// (at least one) of `ways` blocks each.
    pub fn new(config: &CacheConfig) -> Result<Self, SimError> {
        let bad = |why: &str| {
            Err(SimError::Configuration(format!(
                "cache (size={}, block={}, ways={}): {why}",
                config.size_bytes, config.block_bytes, config.ways
            )))
        };

        if config.ways == 0 {
            return bad("associativity must be at least 1");
        }
        if !config.block_bytes.is_power_of_two() {
            return bad("block size must be a power of two");
        }
        let set_bytes = u64::from(config.ways) * u64::from(config.block_bytes);
        let size = u64::from(config.size_bytes);
        if size % set_bytes != 0 {
            return bad("size must be a multiple of ways * block size");
        }
        let num_sets = size / set_bytes;
        if num_sets == 0 || !num_sets.is_power_of_two() {
            return bad("set count must be a power of two and at least 1");
        }

        let num_sets = num_sets as usize;
        let ways = config.ways as usize;
        Ok(Self {
            config: *config,
            lines: vec![CacheLine::default(); num_sets * ways],
            num_sets,
            ways,
            offset_bits: config.block_bytes.trailing_zeros(),
            index_bits: num_sets.trailing_zeros(),
            hits: 0,
            misses: 0,
        })
    }

    /// Set index an address maps to.
    #[inline]
    pub fn set_index(&self, addr: u32) -> usize {
        (addr.checked_shr(self.offset_bits).unwrap_or(0) as usize) % self.num_sets
    }

    /// Tag stored for an address.
    #[inline]
    pub fn tag(&self, addr: u32) -> u32 {
        addr.checked_shr(self.offset_bits + self.index_bits)
            .unwrap_or(0)
    }

    /// Checks if the cache holds the block containing `addr`, without
    /// touching counters or recency.
    pub fn contains(&self, addr: u32) -> bool {
        let tag = self.tag(addr);
        self.set(self.set_index(addr))
            .is_some_and(|set| set.iter().any(|line| line.valid && line.tag == tag))
    }

    /// Accesses the cache for the specified address.
    ///
    /// On a hit the way becomes most recently used. On a miss the block is
    /// installed, into the first invalid way if there is one, otherwise over
    /// the least recently used way.
    ///
    /// # Arguments
    ///
    /// * `addr` - Byte address accessed.
    /// * `kind` - Read or write; both are timed identically.
    ///
    /// # Returns
    ///
    /// `true` on a hit.
    pub fn access(&mut self, addr: u32, kind: AccessKind) -> bool {
        let set_index = self.set_index(addr);
        let tag = self.tag(addr);
        let set = self.set_mut(set_index);

        if let Some(way) = set.iter().position(|line| line.valid && line.tag == tag) {
            lru::promote(set, way);
            self.hits += 1;
            tracing::trace!(addr, set_index, way, ?kind, "cache hit");
            return true;
        }

        let way = match set.iter().position(|line| !line.valid) {
            Some(free) => {
                lru::fill(set, free);
                free
            }
            None => lru::evict_and_rotate(set),
        };
        if let Some(line) = set.get_mut(way) {
            line.tag = tag;
            line.valid = true;
        }
        self.misses += 1;
        tracing::trace!(addr, set_index, way, ?kind, "cache miss");
        false
    }

    /// Number of hits since construction.
    pub const fn hits(&self) -> u64 {
        self.hits
    }

    /// Number of misses since construction.
    pub const fn misses(&self) -> u64 {
        self.misses
    }

    /// Stall cycles charged for each miss.
    pub const fn miss_latency(&self) -> u32 {
        self.config.miss_latency
    }

    /// Number of sets.
    pub const fn num_sets(&self) -> usize {
        self.num_sets
    }

    /// Associativity.
    pub const fn ways(&self) -> usize {
        self.ways
    }

    /// Configuration the cache was built from.
    pub const fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Ways of one set, in way order, or `None` if `set_index >= num_sets()`.
    pub fn set(&self, set_index: usize) -> Option<&[CacheLine]> {
        let base = set_index.checked_mul(self.ways)?;
        self.lines.get(base..base.checked_add(self.ways)?)
    }

    // `set_index` always comes from `set_index()`, which masks it below `num_sets`.
    fn set_mut(&mut self, set_index: usize) -> &mut [CacheLine] {
        let base = set_index * self.ways;
        &mut self.lines[base..base + self.ways]
    }

    /// Writes the cache geometry, counters and every non-empty set.
    ///
    /// # Errors
    ///
    /// Propagates any error from `out`.
    pub fn dump(&self, name: &str, out: &mut impl Write) -> io::Result<()> {
        writeln!(out, "---------------------")?;
        writeln!(out, "Begin {name} State")?;
        writeln!(out, "---------------------")?;
        writeln!(
            out,
            "size={} block={} ways={} sets={} miss_latency={}",
            self.config.size_bytes,
            self.config.block_bytes,
            self.ways,
            self.num_sets,
            self.config.miss_latency
        )?;
        writeln!(out, "hits={} misses={}", self.hits, self.misses)?;
        for (set_index, set) in self.lines.chunks_exact(self.ways).enumerate() {
            if !set.iter().any(|line| line.valid) {
                continue;
            }
            write!(out, "set {set_index:4}:")?;
            for line in set {
                if line.valid {
                    write!(out, " [tag=0x{:08x} rank={}]", line.tag, line.rank)?;
                } else {
                    write!(out, " [invalid]")?;
                }
            }
            writeln!(out)?;
        }
        writeln!(out, "---------------------")?;
        writeln!(out, "End {name} State")?;
        writeln!(out, "---------------------")
    }
}
