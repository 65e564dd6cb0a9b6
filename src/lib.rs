//! Byte oriented Huffman compression.
//!
//! Version 0.1.0
//!
//! Provides compression and decompression of files with a single static Huffman code over
//! the 256 byte values. The encoded file is self describing: it opens with the count of every
//! byte value, and the decoder rebuilds the exact code tree from those counts alone.
//!
//! Basic usage to compress a file is as follows:
//!
//! `$> huffzip encode test.txt`
//!
//! This will compress the file and create the file test.txt.huf.
//!
//! The same codec is available in memory:
//!
//! ```
//! let encoded = huffzip::encode_bytes(b"abracadabra").unwrap();
//! assert_eq!(huffzip::decode_bytes(&encoded).unwrap(), b"abracadabra");
//! ```
//!
pub mod bitstream;
pub mod compression;
pub mod error;
pub mod huffman_coding;
pub mod tools;

pub use compression::compress::{encode, encode_bytes};
pub use compression::decompress::{decode, decode_bytes};
pub use compression::Summary;
pub use error::{Error, ErrorKind, PayloadError, Result};
