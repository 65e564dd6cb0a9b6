//! The huffman module builds the code tree and the code table for huffzip. Decoding the
//! huffman data happens in the decompress function, which walks the same tree.
//!
//! The tree always holds one leaf for each of the 256 byte values, even those with a zero
//! count. The decoder never sees the original data: it rebuilds the tree from the counts
//! stored in the file header, so construction must be fully deterministic. Nodes are
//! merged lightest first, and equal weights are broken by node id (leaves take their
//! symbol value, merged nodes are numbered in creation order).
//!
//! The process of encoding and decoding is inherently sequential and does not benefit
//! from multithreading.
//!

pub mod huffman;
pub mod huffman_codes;
