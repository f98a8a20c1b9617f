//! Configuration system for the pipeline simulator.
//!
//! This module defines all configuration structures used to parameterize a run.
//! It provides:
//! 1. **Defaults:** Baseline memory window, dump range and cache geometry.
//! 2. **Structures:** General, memory and cache settings, deserializable from JSON.
//! 3. **Plain-text cache files:** The eight-integer format naming I-cache then D-cache
//!    size, block size, ways and miss latency, one property per line.
//!
//! Geometry is validated when a cache is built (`CacheSim::new`), not here, so that
//! an invalid file is still reported with the cache that rejected it.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::common::error::SimError;

/// Default configuration constants for the simulator.
mod defaults {
    use crate::common::constants;

    /// Size of the memory window (64 KiB).
    pub const MEMORY_SIZE: usize = constants::MEMORY_SIZE;

    /// First byte address of the memory dump.
    pub const DUMP_START: u32 = constants::DUMP_START;

    /// End (exclusive) byte address of the memory dump.
    pub const DUMP_END: u32 = constants::DUMP_END;

    /// Default cache size in bytes (1 KiB).
    pub const CACHE_SIZE: u32 = 1024;

    /// Default cache block size in bytes.
    pub const CACHE_BLOCK: u32 = 16;

    /// Default associativity.
    pub const CACHE_WAYS: u32 = 2;

    /// Default miss penalty in cycles.
    pub const MISS_LATENCY: u32 = 10;
}

/// Root configuration structure containing all simulator settings.
///
/// # Examples
///
/// ```
/// use pipesim_core::config::Config;
///
/// let config = Config::default();
/// assert!(config.general.trace_pipeline);
/// assert_eq!(config.memory.size_bytes, 0x10000);
/// ```
///
/// Deserializing from JSON; omitted fields keep their defaults:
///
/// ```
/// use pipesim_core::config::Config;
///
/// let json = r#"{
///     "general": { "trace_pipeline": false, "max_cycles": 5000 },
///     "memory": { "dump_start": 256, "dump_end": 512 },
///     "cache": {
///         "l1_i": { "size_bytes": 256, "block_bytes": 16, "ways": 2, "miss_latency": 5 },
///         "l1_d": { "size_bytes": 512, "block_bytes": 32, "ways": 4, "miss_latency": 8 }
///     }
/// }"#;
///
/// let config = Config::from_json_str(json).unwrap();
/// assert!(!config.general.trace_pipeline);
/// assert_eq!(config.general.max_cycles, 5000);
/// assert_eq!(config.memory.size_bytes, 0x10000);
/// assert_eq!(config.cache.l1_d.ways, 4);
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// General simulation settings
    #[serde(default)]
    pub general: GeneralConfig,
    /// Memory window and dump settings
    #[serde(default)]
    pub memory: MemoryConfig,
    /// Instruction and data cache configuration
    #[serde(default)]
    pub cache: CacheHierarchyConfig,
}

impl Config {
    /// Parses a configuration from a JSON document.
    ///
    /// # Errors
    ///
    /// Returns `SimError::Json` if the document is malformed or has wrong types.
    pub fn from_json_str(json: &str) -> Result<Self, SimError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns `SimError::Io` if the file cannot be read, or `SimError::Json`
    /// if its contents are invalid.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, SimError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| SimError::io(path, e))?;
        Self::from_json_str(&text)
    }

    /// Resolves the cache hierarchy for a cycle run.
    ///
    /// A plain-text cache file, when given, overrides the `cache` section.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`CacheHierarchyConfig::from_file`].
    pub fn cache_hierarchy(
        &self,
        cache_file: Option<&Path>,
    ) -> Result<CacheHierarchyConfig, SimError> {
        match cache_file {
            Some(path) => CacheHierarchyConfig::from_file(path),
            None => Ok(self.cache.clone()),
        }
    }
}

/// General simulation settings and options.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneralConfig {
    /// Write the per-cycle pipeline trace artifact.
    #[serde(default = "GeneralConfig::default_trace_pipeline")]
    pub trace_pipeline: bool,

    /// Upper bound on simulated cycles; 0 runs until halt.
    #[serde(default)]
    pub max_cycles: u64,
}

impl GeneralConfig {
    /// Pipeline tracing is on unless disabled.
    const fn default_trace_pipeline() -> bool {
        true
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            trace_pipeline: true,
            max_cycles: 0,
        }
    }
}

/// Memory window configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct MemoryConfig {
    /// Size of the byte-addressable memory window starting at address 0
    #[serde(default = "MemoryConfig::default_size")]
    pub size_bytes: usize,

    /// First byte address written to the memory dump
    #[serde(default = "MemoryConfig::default_dump_start")]
    pub dump_start: u32,

    /// End (exclusive) of the memory dump range
    #[serde(default = "MemoryConfig::default_dump_end")]
    pub dump_end: u32,

    /// Optional file of hex `address value` word pairs applied before the program is loaded
    #[serde(default)]
    pub init_image: Option<PathBuf>,
}

impl MemoryConfig {
    /// Returns the default memory window size.
    const fn default_size() -> usize {
        defaults::MEMORY_SIZE
    }

    /// Returns the default dump start address.
    const fn default_dump_start() -> u32 {
        defaults::DUMP_START
    }

    /// Returns the default dump end address.
    const fn default_dump_end() -> u32 {
        defaults::DUMP_END
    }
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            size_bytes: defaults::MEMORY_SIZE,
            dump_start: defaults::DUMP_START,
            dump_end: defaults::DUMP_END,
            init_image: None,
        }
    }
}

/// Instruction and data cache configuration.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct CacheHierarchyConfig {
    /// Instruction cache
    #[serde(default)]
    pub l1_i: CacheConfig,
    /// Data cache
    #[serde(default)]
    pub l1_d: CacheConfig,
}

/// Property names in file order, used for parse diagnostics.
const CACHE_FILE_PROPERTIES: [&str; 8] = [
    "ICache cache size",
    "ICache block size",
    "ICache ways",
    "ICache miss latency",
    "DCache cache size",
    "DCache block size",
    "DCache ways",
    "DCache miss latency",
];

impl CacheHierarchyConfig {
    /// Parses the plain-text cache configuration format.
    ///
    /// Each of the eight properties is the first unsigned decimal integer on its
    /// own line; anything after it on the line is ignored and blank lines are
    /// skipped.
    ///
    /// # Arguments
    ///
    /// * `text` - File contents.
    ///
    /// # Errors
    ///
    /// Returns `SimError::ConfigParse` naming the first property that is missing
    /// or not a valid unsigned integer.
    ///
    /// # Examples
    ///
    /// ```
    /// use pipesim_core::config::CacheHierarchyConfig;
    ///
    /// let caches = CacheHierarchyConfig::parse("256\n16\n2\n10\n512\n32\n4\n20\n").unwrap();
    /// assert_eq!(caches.l1_i.size_bytes, 256);
    /// assert_eq!(caches.l1_d.miss_latency, 20);
    /// ```
    pub fn parse(text: &str) -> Result<Self, SimError> {
        let mut tokens = text
            .lines()
            .filter_map(|line| line.split_whitespace().next());

        let mut values = [0u32; CACHE_FILE_PROPERTIES.len()];
        for (idx, (slot, property)) in values.iter_mut().zip(CACHE_FILE_PROPERTIES).enumerate() {
            *slot = tokens
                .next()
                .and_then(|tok| tok.parse::<u32>().ok())
                .ok_or(SimError::ConfigParse {
                    line: idx + 1,
                    property,
                })?;
        }

        let [is, ib, iw, il, ds, db, dw, dl] = values;
        Ok(Self {
            l1_i: CacheConfig::new(is, ib, iw, il),
            l1_d: CacheConfig::new(ds, db, dw, dl),
        })
    }

    /// Reads and parses a plain-text cache configuration file.
    ///
    /// # Errors
    ///
    /// Returns `SimError::Io` if the file cannot be read, otherwise as [`Self::parse`].
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SimError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| SimError::io(path, e))?;
        Self::parse(&text)
    }
}

/// Individual cache configuration.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
pub struct CacheConfig {
    /// Total cache size in bytes
    #[serde(default = "CacheConfig::default_size")]
    pub size_bytes: u32,

    /// Block (line) size in bytes; must be a power of two
    #[serde(default = "CacheConfig::default_block")]
    pub block_bytes: u32,

    /// Associativity (number of ways)
    #[serde(default = "CacheConfig::default_ways")]
    pub ways: u32,

    /// Stall cycles charged on a miss
    #[serde(default = "CacheConfig::default_miss_latency")]
    pub miss_latency: u32,
}

impl CacheConfig {
    /// Creates a cache configuration from its four parameters.
    pub const fn new(size_bytes: u32, block_bytes: u32, ways: u32, miss_latency: u32) -> Self {
        Self {
            size_bytes,
            block_bytes,
            ways,
            miss_latency,
        }
    }

    /// Returns the default cache size in bytes.
    const fn default_size() -> u32 {
        defaults::CACHE_SIZE
    }

    /// Returns the default block size in bytes.
    const fn default_block() -> u32 {
        defaults::CACHE_BLOCK
    }

    /// Returns the default associativity.
    const fn default_ways() -> u32 {
        defaults::CACHE_WAYS
    }

    /// Returns the default miss latency in cycles.
    const fn default_miss_latency() -> u32 {
        defaults::MISS_LATENCY
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self::new(
            defaults::CACHE_SIZE,
            defaults::CACHE_BLOCK,
            defaults::CACHE_WAYS,
            defaults::MISS_LATENCY,
        )
    }
}
