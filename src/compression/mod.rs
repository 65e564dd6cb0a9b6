//! The compression module manages encoding and decoding for huffzip.
//!
//! Encoding happens in the following steps:
//! - Frequency count: count every byte value over the whole input.
//! - Tree and codes: build the Huffman tree from the counts and read a code for each symbol off it.
//! - Header: write the 256 counts and the trailing-bit-count byte.
//! - Packing: rewind the input and append the code of every byte to the bitstream.
//!
//! Because the input is read twice, the encoder requires a source that can seek back to its start.
//!
//! Decoding is single pass. It follows the inverse of the compression process.
//! - Header: read the counts and rebuild the same tree and codes the encoder used.
//! - Cross-check: recompute the trailing-bit-count and compare it with the stored byte.
//! - Walk: follow the payload bits down the tree, emitting one byte per leaf reached.
//!

use std::fs::{File, OpenOptions};
use std::io::ErrorKind;
use std::path::Path;

use crate::error::{Error, Result};

pub mod compress;
pub mod decompress;

/// Byte counts for one encode or decode run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub bytes_in: u64,
    pub bytes_out: u64,
}

impl Summary {
    /// Output size as a fraction of input size.
    pub fn ratio(&self) -> f64 {
        if self.bytes_in == 0 {
            return 0.0;
        }
        self.bytes_out as f64 / self.bytes_in as f64
    }
}

/// Open the output file, refusing to replace an existing file unless `force` is set.
fn open_output(path: &Path, force: bool) -> Result<File> {
    let mut options = OpenOptions::new();
    options.write(true);
    if force {
        options.create(true).truncate(true);
    } else {
        options.create_new(true);
    }
    options.open(path).map_err(|e| match e.kind() {
        ErrorKind::AlreadyExists => Error::OutputExists(path.to_path_buf()),
        _ => Error::Io(e),
    })
}
