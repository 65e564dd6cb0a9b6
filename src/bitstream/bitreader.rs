//! BitReader: reads the packed payload of a huffzip file and turns it back into symbols.
//!
//! The reader is told up front how many payload bits the header declares. That budget
//! marks where the data ends inside the final byte, so the padding below the trailing
//! bit boundary is shifted away before those bits can reach the tree walk.
//!
//! NOTE: This module can read from any I/O source that supports the read() call.
//!

use std::io::{ErrorKind, Read};

use crate::error::{PayloadError, Result};
use crate::huffman_coding::huffman::{HuffmanTree, Walk};

const BUFFER_SIZE: usize = 64 * 1024;
/// Refill the queue whenever it holds this many bits or fewer.
const LOW_WATER: u32 = 56;

/// Reads a huffzip payload.
#[derive(Debug)]
pub struct BitReader<R> {
    buffer: Vec<u8>,
    cursor: usize,
    source: R,
    queue: u64,
    q_bits: u32,
    /// Declared payload bits not yet moved into the queue.
    bits_left: u64,
    total_bits: u64,
}

impl<R: Read> BitReader<R> {
    /// Creates a new BitReader for a payload of `payload_bits` bits.
    pub fn new(source: R, payload_bits: u64) -> Self {
        Self {
            buffer: Vec::with_capacity(BUFFER_SIZE),
            cursor: 0,
            source,
            queue: 0,
            q_bits: 0,
            bits_left: payload_bits,
            total_bits: payload_bits,
        }
    }

    /// Check (and refill) buffer. Returns true if we have data, false if there is no more
    fn have_data(&mut self) -> Result<bool> {
        // Only try to read more data when the buffer length is equal to the buffer cursor location
        if self.cursor == self.buffer.len() {
            self.buffer.resize(BUFFER_SIZE, 0);
            let size = loop {
                match self.source.read(&mut self.buffer) {
                    Ok(size) => break size,
                    Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                    Err(e) => return Err(e.into()),
                }
            };
            // Adjust the buffer if we read less than the buffer size
            self.buffer.truncate(size);
            self.cursor = 0;
            // If nothing came back from our read attempt, then we have no more data.
            if size == 0 {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Top up the queue from the buffer, stopping at the declared end of the payload.
    fn fill(&mut self) -> Result<()> {
        while self.q_bits <= LOW_WATER && self.bits_left > 0 {
            if !self.have_data()? {
                return Err(PayloadError::Truncated {
                    missing_bits: self.bits_left,
                }
                .into());
            }
            let byte = self.buffer[self.cursor];
            self.cursor += 1;
            // The last byte may carry padding below the data bits: shift it out.
            let take = self.bits_left.min(8) as u32;
            self.queue = self.queue << take | (byte >> (8 - take)) as u64;
            self.q_bits += take;
            self.bits_left -= take as u64;
        }
        Ok(())
    }

    /// Decode the next symbol by walking `tree` from its root.
    pub fn next_symbol(&mut self, tree: &HuffmanTree) -> Result<u8> {
        let mut node = tree.root();
        loop {
            if self.q_bits <= LOW_WATER {
                self.fill()?;
            }
            if self.q_bits == 0 {
                return Err(PayloadError::EndedMidCode.into());
            }
            match tree.walk(node, self.queue, self.q_bits) {
                Walk::Symbol { symbol, rest } => {
                    self.q_bits = rest;
                    return Ok(symbol);
                }
                Walk::Pending { node: next } => {
                    // Every queued bit went into this code, keep going from here.
                    self.q_bits = 0;
                    node = next;
                }
            }
        }
    }

    /// Declared payload bits not yet decoded.
    pub fn bits_remaining(&self) -> u64 {
        self.bits_left + self.q_bits as u64
    }

    /// Confirm nothing follows the declared payload.
    pub fn finish(&mut self) -> Result<()> {
        if self.have_data()? {
            return Err(PayloadError::TrailingData.into());
        }
        Ok(())
    }

    /// Debugging function. Report current position in the payload as [bytes.bits].
    pub fn loc(&self) -> String {
        let used = self.total_bits - self.bits_remaining();
        format!("[{}.{}]", used / 8, used % 8)
    }
}
