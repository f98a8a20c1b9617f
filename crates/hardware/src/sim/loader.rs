//! Program Loading and Artifact Naming.
//!
//! This module prepares the memory a run starts from. It performs:
//! 1. **Binary loading:** Reads a big-endian program image from disk.
//! 2. **Memory setup:** Applies the optional initial image, then copies the
//!    program to address 0.
//! 3. **Naming:** Derives the `<base>` prefix shared by every output artifact.

use std::fs;
use std::path::{Path, PathBuf};

use crate::common::error::SimError;
use crate::config::Config;
use crate::soc::MemoryStore;

/// Reads a binary file from disk into a byte vector.
///
/// # Errors
///
/// Returns `SimError::Io` naming the path if the file cannot be read.
pub fn load_binary(path: impl AsRef<Path>) -> Result<Vec<u8>, SimError> {
    let path = path.as_ref();
    fs::read(path).map_err(|e| SimError::io(path, e))
}

/// Builds the memory window for a run.
///
/// The initial image (if configured) is applied first so the program always
/// wins where the two overlap.
///
/// # Arguments
///
/// * `program` - Path to the program image, loaded at address 0.
/// * `config` - Memory size and optional initial image path.
///
/// # Errors
///
/// Returns `SimError::Io` if a file cannot be read, or `SimError::OutOfRange`
/// if the program or an image word does not fit in memory.
pub fn load_program(program: impl AsRef<Path>, config: &Config) -> Result<MemoryStore, SimError> {
    let mut mem = MemoryStore::new(config.memory.size_bytes);

    if let Some(image_path) = &config.memory.init_image {
        let text = fs::read_to_string(image_path).map_err(|e| SimError::io(image_path, e))?;
        let words = mem.apply_init_image(&text)?;
        tracing::info!(path = %image_path.display(), words, "applied initial memory image");
    }

    let image = load_binary(&program)?;
    mem.load_image(&image)?;
    tracing::info!(
        path = %program.as_ref().display(),
        bytes = image.len(),
        "program loaded"
    );
    Ok(mem)
}

/// Artifact prefix for a program: the path with its extension removed and
/// `_<suffix>` appended.
///
/// # Examples
///
/// ```
/// use std::path::{Path, PathBuf};
/// use pipesim_core::sim::loader::base_name;
///
/// assert_eq!(base_name(Path::new("tests/fib.bin"), "cycle"), PathBuf::from("tests/fib_cycle"));
/// assert_eq!(base_name(Path::new("prog"), "funct"), PathBuf::from("prog_funct"));
/// ```
pub fn base_name(program: &Path, suffix: &str) -> PathBuf {
    let mut name = program.with_extension("").into_os_string();
    name.push("_");
    name.push(suffix);
    PathBuf::from(name)
}
