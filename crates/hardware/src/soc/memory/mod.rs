//! Byte-Addressable Memory Store.
//!
//! This module implements the memory window the program runs in. It provides:
//! 1. **Access:** Bounds-checked 1, 2 and 4 byte big-endian reads and writes.
//! 2. **Loading:** Program images copied in at address 0 and optional word-pair
//!    initial images.
//! 3. **Observability:** The memory-range dump written at the end of a run.

use std::io::{self, Write};

use crate::common::data::Width;
use crate::common::error::SimError;

/// Words printed per row of a memory dump.
const DUMP_WORDS_PER_ROW: u32 = 5;

/// Flat big-endian memory starting at address 0.
#[derive(Clone, Debug)]
pub struct MemoryStore {
    bytes: Vec<u8>,
}

impl MemoryStore {
    /// Creates a zero-filled memory window of `size` bytes.
    pub fn new(size: usize) -> Self {
        Self {
            bytes: vec![0; size],
        }
    }

    /// Size of the window in bytes.
    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    fn range(&self, addr: u32, width: usize) -> Result<std::ops::Range<usize>, SimError> {
        let start = addr as usize;
        match start.checked_add(width) {
            Some(end) if end <= self.bytes.len() => Ok(start..end),
            _ => Err(SimError::OutOfRange {
                addr,
                width,
                size: self.bytes.len(),
            }),
        }
    }

    /// Reads a big-endian value.
    ///
    /// # Arguments
    ///
    /// * `addr` - Address of the most significant byte.
    /// * `width` - Number of bytes to read.
    ///
    /// # Returns
    ///
    /// The value zero-extended to 32 bits.
    ///
    /// # Errors
    ///
    /// Returns `SimError::OutOfRange` if any byte lies outside the window.
    pub fn get_value(&self, addr: u32, width: Width) -> Result<u32, SimError> {
        let range = self.range(addr, width.bytes())?;
        Ok(self.bytes[range]
            .iter()
            .fold(0u32, |acc, &b| (acc << 8) | u32::from(b)))
    }

    /// Writes the low `width` bytes of `value` big-endian.
    ///
    /// # Errors
    ///
    /// Returns `SimError::OutOfRange` if any byte lies outside the window.
    pub fn set_value(&mut self, addr: u32, width: Width, value: u32) -> Result<(), SimError> {
        let range = self.range(addr, width.bytes())?;
        let n = width.bytes();
        for (i, byte) in self.bytes[range].iter_mut().enumerate() {
            *byte = (value >> ((n - 1 - i) * 8)) as u8;
        }
        Ok(())
    }

    /// Copies a program image into memory starting at address 0.
    ///
    /// # Errors
    ///
    /// Returns `SimError::OutOfRange` if the image is larger than the window.
    pub fn load_image(&mut self, image: &[u8]) -> Result<(), SimError> {
        let size = self.bytes.len();
        let dst = self
            .bytes
            .get_mut(..image.len())
            .ok_or_else(|| SimError::OutOfRange {
                addr: 0,
                width: image.len(),
                size,
            })?;
        dst.copy_from_slice(image);
        Ok(())
    }

    /// Applies an initial memory image of whitespace-separated hex
    /// `address value` pairs, each value written as a word.
    ///
    /// Parsing stops at the first token that is not hex, and a trailing
    /// unpaired address is ignored.
    ///
    /// # Errors
    ///
    /// Returns `SimError::OutOfRange` if a pair addresses bytes outside the window.
    pub fn apply_init_image(&mut self, text: &str) -> Result<usize, SimError> {
        let mut words = text.split_whitespace().map_while(parse_hex);
        let mut applied = 0;
        while let (Some(addr), Some(value)) = (words.next(), words.next()) {
            self.set_value(addr, Width::Word, value)?;
            applied += 1;
        }
        Ok(applied)
    }

    /// Writes the words in `[start, end)` five per row, each row prefixed by
    /// its address, between `Begin Memory State` / `End Memory State` banners.
    ///
    /// # Errors
    ///
    /// Returns an `io::Error` if `out` fails or the range leaves the window.
    pub fn dump(&self, start: u32, end: u32, out: &mut impl Write) -> io::Result<()> {
        writeln!(out, "---------------------")?;
        writeln!(out, "Begin Memory State")?;
        writeln!(out, "---------------------")?;

        let mut row = start;
        while row < end {
            write!(out, "0x{row:08x}: ")?;
            let mut addr = row;
            for _ in 0..DUMP_WORDS_PER_ROW {
                if addr >= end {
                    break;
                }
                let word = self
                    .get_value(addr, Width::Word)
                    .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
                write!(out, "0x{word:08x} ")?;
                addr += Width::Word.bytes() as u32;
            }
            writeln!(out)?;
            row += DUMP_WORDS_PER_ROW * Width::Word.bytes() as u32;
        }

        writeln!(out, "---------------------")?;
        writeln!(out, "End Memory State")?;
        writeln!(out, "---------------------")
    }
}

fn parse_hex(token: &str) -> Option<u32> {
    let digits = token
        .strip_prefix("0x")
        .or_else(|| token.strip_prefix("0X"))
        .unwrap_or(token);
    u32::from_str_radix(digits, 16).ok()
}
