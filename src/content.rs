//! Byte-for-byte content comparison
//!
//! Files are compared by size first and then by streaming both in fixed-size
//! blocks. Empty files never count as equal: they carry nothing to
//! deduplicate.

use crate::error::{Result, TreeCompareError};
use crate::tree::path;
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;
use tracing::debug;

/// Default comparison block size (8 MiB)
pub const DEFAULT_BLOCK_SIZE: usize = 8 * 1024 * 1024;

/// Result of comparing two files
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    /// Sizes differ; no content was read
    SizeMismatch { left: u64, right: u64 },
    /// Both files are empty
    Empty,
    /// Contents differ within the block starting at `offset`
    ContentMismatch { offset: u64 },
    /// Every byte matches
    Identical,
}

impl Comparison {
    /// True only for identical, non-empty contents
    pub fn is_identical(&self) -> bool {
        matches!(self, Comparison::Identical)
    }
}

/// Streaming file comparator
#[derive(Debug, Clone, Copy)]
pub struct ContentComparator {
    block_size: usize,
}

impl Default for ContentComparator {
    fn default() -> Self {
        Self {
            block_size: DEFAULT_BLOCK_SIZE,
        }
    }
}

impl ContentComparator {
    /// Create a comparator reading `block_size` bytes at a time
    pub fn new(block_size: usize) -> Result<Self> {
        if block_size == 0 {
            return Err(TreeCompareError::Config(
                "Block size must be greater than zero".to_string(),
            ));
        }
        Ok(Self { block_size })
    }

    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// True if both files hold the same non-empty bytes
    pub fn contents_equal(&self, left: &Path, right: &Path) -> Result<bool> {
        Ok(self.compare(left, right)?.is_identical())
    }

    /// Compare two files, reporting why they differ
    ///
    /// Fails with `SameFile` when both paths spell the same absolute path.
    pub fn compare(&self, left: &Path, right: &Path) -> Result<Comparison> {
        let left = path::absolutize(left)?;
        let right = path::absolutize(right)?;
        if left == right {
            return Err(TreeCompareError::SameFile(left));
        }

        let left_size = file_size(&left)?;
        let right_size = file_size(&right)?;
        let outcome = if left_size != right_size {
            Comparison::SizeMismatch {
                left: left_size,
                right: right_size,
            }
        } else if left_size == 0 {
            Comparison::Empty
        } else {
            self.compare_blocks(&left, &right, left_size)?
        };

        debug!(
            left = %left.display(),
            right = %right.display(),
            outcome = ?outcome,
            "Compared files"
        );
        Ok(outcome)
    }

    fn compare_blocks(&self, left: &Path, right: &Path, size: u64) -> Result<Comparison> {
        let mut left_file = File::open(left).map_err(|e| TreeCompareError::io(left, e))?;
        let mut right_file = File::open(right).map_err(|e| TreeCompareError::io(right, e))?;

        // Small files do not need a full block buffer.
        let capacity = usize::try_from(size)
            .map(|size| size.min(self.block_size))
            .unwrap_or(self.block_size);
        let mut left_block = vec![0u8; capacity];
        let mut right_block = vec![0u8; capacity];
        let mut offset = 0u64;

        loop {
            let left_len = read_block(&mut left_file, &mut left_block)
                .map_err(|e| TreeCompareError::io(left, e))?;
            let right_len = read_block(&mut right_file, &mut right_block)
                .map_err(|e| TreeCompareError::io(right, e))?;

            if left_len != right_len || left_block[..left_len] != right_block[..right_len] {
                return Ok(Comparison::ContentMismatch { offset });
            }
            if left_len == 0 {
                return Ok(Comparison::Identical);
            }
            offset += left_len as u64;
        }
    }
}

fn file_size(path: &Path) -> Result<u64> {
    std::fs::metadata(path)
        .map(|metadata| metadata.len())
        .map_err(|e| TreeCompareError::io(path, e))
}

/// Fill `buf` as far as the reader allows; returns bytes read, 0 at end of file
fn read_block<R: Read>(reader: &mut R, buf: &mut [u8]) -> std::io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}
