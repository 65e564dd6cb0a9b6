use std::io::Write;

use log::trace;

use super::bitpacker::BitPacker;
use crate::error::Result;
use crate::tools::freq_count::FrequencyTable;

/// Writes a huffzip file. Puts the count header and trailing-bit-count byte on the
/// output, then streams the payload bytes produced by BitPacker.
pub struct BitWriter<W> {
    /// Handle to the output stream
    writer: W,
    /// Bytes written so far.
    written: u64,
}

impl<W: Write> BitWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, written: 0 }
    }

    /// Push the 256 big-endian counts and the trailing-bit-count byte.
    pub fn push_header(&mut self, freqs: &FrequencyTable, trailing_bits: u8) -> Result<()> {
        let header = freqs.to_header();
        self.writer.write_all(&header)?;
        self.writer.write_all(&[trailing_bits])?;
        self.written += header.len() as u64 + 1;
        trace!("Wrote header, trailing bit count {}", trailing_bits);
        Ok(())
    }

    /// Write out (and drain) the bytes the packer has completed so far.
    pub fn add_payload(&mut self, packer: &mut BitPacker) -> Result<()> {
        let data = packer.take_output();
        if !data.is_empty() {
            self.writer.write_all(&data)?;
            self.written += data.len() as u64;
        }
        // Hand the allocation back so the packer does not have to regrow it.
        packer.output = data;
        packer.output.clear();
        Ok(())
    }

    /// Flush the underlying stream and give it back.
    pub fn finish(mut self) -> Result<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }

    pub fn written(&self) -> u64 {
        self.written
    }
}
