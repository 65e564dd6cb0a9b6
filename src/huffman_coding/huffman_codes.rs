//! Derives the bit code of every symbol from a finished Huffman tree.
//!
//! Codes are read off the tree root-to-leaf: a left branch appends a 0, a right
//! branch appends a 1. All 256 symbols receive a code, including those that
//! never occur, so the encoder and decoder compute the same aggregates from
//! the same counts.

use crate::error::{Error, Result};
use crate::tools::freq_count::{FrequencyTable, SYMBOLS};

use super::huffman::{HuffmanTree, NodeData};

/// Longest code the packer can take in one piece.
pub const MAX_CODE_LEN: u32 = 64;

/// A variable length code. The code occupies the `len` low bits of `bits`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Code {
    pub bits: u64,
    pub len: u32,
}

impl Code {
    pub fn new(bits: u64, len: u32) -> Self {
        Self { bits, len }
    }

    /// Extend the code by one bit. Bits past 64 fall off the top; `len` stays exact.
    fn push(self, bit: u64) -> Self {
        Self {
            bits: self.bits << 1 | bit,
            len: self.len + 1,
        }
    }
}

/// Code for each of the 256 symbols.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTable {
    codes: [Code; SYMBOLS],
}

impl CodeTable {
    /// Walk the tree depth first (with an explicit stack, since a skewed tree
    /// can be 255 levels deep) and record the path to every leaf.
    pub fn from_tree(tree: &HuffmanTree) -> Self {
        let mut codes = [Code::default(); SYMBOLS];
        let mut stack = vec![(tree.root(), Code::default())];

        while let Some((id, code)) = stack.pop() {
            match tree.node(id).node_data {
                NodeData::Kids(left, right) => {
                    stack.push((right, code.push(1)));
                    stack.push((left, code.push(0)));
                }
                NodeData::Leaf(symbol) => codes[symbol as usize] = code,
            }
        }
        Self { codes }
    }

    pub fn code(&self, symbol: u8) -> Code {
        self.codes[symbol as usize]
    }

    pub fn max_len(&self) -> u32 {
        self.codes.iter().map(|c| c.len).max().unwrap_or(0)
    }

    /// Number of payload bits needed to encode data with these counts.
    pub fn payload_bits(&self, freqs: &FrequencyTable) -> u64 {
        freqs
            .counts()
            .iter()
            .zip(self.codes.iter())
            .map(|(&count, code)| count as u64 * code.len as u64)
            .sum()
    }

    /// Meaningful bits in the last payload byte, 1-8. A byte that is exactly
    /// full (or no payload at all) reports 8.
    pub fn trailing_bits(&self, freqs: &FrequencyTable) -> u8 {
        match self.payload_bits(freqs) % 8 {
            0 => 8,
            bits => bits as u8,
        }
    }

    /// Fails if a symbol that occurs in `freqs` has a code too long to pack.
    pub fn check_packable(&self, freqs: &FrequencyTable) -> Result<()> {
        for (symbol, code) in self.codes.iter().enumerate() {
            if code.len > MAX_CODE_LEN && freqs.count(symbol as u8) > 0 {
                return Err(Error::CodeTooLong {
                    symbol: symbol as u8,
                    len: code.len,
                });
            }
        }
        Ok(())
    }
}
