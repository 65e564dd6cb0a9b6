use std::io::Read;

use crate::error::{Error, Result};

/// Number of possible symbols (one per byte value).
pub const SYMBOLS: usize = 256;
/// Size of the serialized count table: 256 big-endian u32 values.
pub const HEADER_SIZE: usize = SYMBOLS * 4;

const READ_CHUNK: usize = 64 * 1024;

/// Occurrence count for each of the 256 byte values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: [u32; SYMBOLS],
}

impl FrequencyTable {
    /// Creates an all-zero table.
    pub fn new() -> Self {
        Self {
            counts: [0; SYMBOLS],
        }
    }

    /// Adds the bytes of `data` to the running counts.
    pub fn add(&mut self, data: &[u8]) -> Result<()> {
        for &byte in data {
            let count = &mut self.counts[byte as usize];
            *count = count
                .checked_add(1)
                .ok_or(Error::CountOverflow { symbol: byte })?;
        }
        Ok(())
    }

    /// Returns a frequency count of the input data.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let mut freqs = Self::new();
        freqs.add(data)?;
        Ok(freqs)
    }

    /// Counts everything `reader` yields until end of stream.
    pub fn from_reader<R: Read>(reader: &mut R) -> Result<Self> {
        let mut freqs = Self::new();
        let mut buf = vec![0_u8; READ_CHUNK];
        loop {
            let size = match reader.read(&mut buf) {
                Ok(0) => break,
                Ok(size) => size,
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            };
            freqs.add(&buf[..size])?;
        }
        Ok(freqs)
    }

    /// Reads the table back from its big-endian header form.
    pub fn from_header(header: &[u8; HEADER_SIZE]) -> Self {
        let mut counts = [0_u32; SYMBOLS];
        for (count, word) in counts.iter_mut().zip(header.chunks_exact(4)) {
            *count = u32::from_be_bytes([word[0], word[1], word[2], word[3]]);
        }
        Self { counts }
    }

    /// Serializes the table as 256 big-endian u32 values.
    pub fn to_header(&self) -> [u8; HEADER_SIZE] {
        let mut header = [0_u8; HEADER_SIZE];
        for (word, count) in header.chunks_exact_mut(4).zip(self.counts.iter()) {
            word.copy_from_slice(&count.to_be_bytes());
        }
        header
    }

    pub fn count(&self, symbol: u8) -> u32 {
        self.counts[symbol as usize]
    }

    pub fn counts(&self) -> &[u32; SYMBOLS] {
        &self.counts
    }

    /// Total number of bytes counted.
    pub fn total(&self) -> u64 {
        self.counts.iter().map(|&c| c as u64).sum()
    }

    /// Number of symbols that occur at least once.
    pub fn distinct(&self) -> usize {
        self.counts.iter().filter(|&&c| c > 0).count()
    }
}

impl Default for FrequencyTable {
    fn default() -> Self {
        Self::new()
    }
}

impl From<[u32; SYMBOLS]> for FrequencyTable {
    fn from(counts: [u32; SYMBOLS]) -> Self {
        Self { counts }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn empty_test() {
        let freqs = FrequencyTable::from_bytes(&[]).unwrap();
        assert_eq!(freqs.total(), 0);
        assert_eq!(freqs.distinct(), 0);
        assert!(freqs.counts().iter().all(|&c| c == 0));
    }

    #[test]
    fn count_test() {
        let freqs = FrequencyTable::from_bytes(b"abracadabra").unwrap();
        assert_eq!(freqs.count(b'a'), 5);
        assert_eq!(freqs.count(b'b'), 2);
        assert_eq!(freqs.count(b'r'), 2);
        assert_eq!(freqs.count(b'c'), 1);
        assert_eq!(freqs.count(b'd'), 1);
        assert_eq!(freqs.count(b'z'), 0);
        assert_eq!(freqs.total(), 11);
        assert_eq!(freqs.distinct(), 5);
    }

    #[test]
    fn reader_test() {
        let data = b"Hello, world!".repeat(10_000);
        let freqs = FrequencyTable::from_reader(&mut data.as_slice()).unwrap();
        assert_eq!(freqs, FrequencyTable::from_bytes(&data).unwrap());
        assert_eq!(freqs.total(), data.len() as u64);
    }

    #[test]
    fn header_test() {
        let mut counts = [0_u32; SYMBOLS];
        counts[0] = 1;
        counts[1] = 0x0102_0304;
        counts[255] = u32::MAX;
        let freqs = FrequencyTable::from(counts);
        let header = freqs.to_header();
        assert_eq!(&header[0..4], &[0, 0, 0, 1]);
        assert_eq!(&header[4..8], &[1, 2, 3, 4]);
        assert_eq!(&header[1020..1024], &[0xff, 0xff, 0xff, 0xff]);
        assert_eq!(FrequencyTable::from_header(&header), freqs);
    }

    #[test]
    fn overflow_test() {
        let mut counts = [0_u32; SYMBOLS];
        counts[b'x' as usize] = u32::MAX;
        let mut freqs = FrequencyTable::from(counts);
        assert!(matches!(
            freqs.add(b"x"),
            Err(Error::CountOverflow { symbol: b'x' })
        ));
    }
}
