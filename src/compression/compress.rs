use std::fs::{self, File};
use std::io::{self, Cursor, ErrorKind, Read, Seek, SeekFrom, Write};

use log::{debug, info, trace, warn};

use super::{open_output, Summary};
use crate::bitstream::bitpacker::BitPacker;
use crate::bitstream::bitwriter::BitWriter;
use crate::error::Result;
use crate::huffman_coding::huffman::HuffmanTree;
use crate::huffman_coding::huffman_codes::CodeTable;
use crate::tools::cli::HuffOpts;
use crate::tools::freq_count::FrequencyTable;

const READ_SIZE: usize = 64 * 1024;

/// Encode everything `input` holds from its current position to the end, writing the
/// huffzip file to `output`.
///
/// The input is read twice, once to count and once to pack, so it must be seekable.
/// The output receives the 1024 byte count header, the trailing-bit-count byte and the
/// packed payload (no payload at all for empty input).
pub fn encode<R, W>(input: &mut R, output: W) -> Result<Summary>
where
    R: Read + Seek,
    W: Write,
{
    let start = input.stream_position()?;

    // First pass: count.
    let freqs = FrequencyTable::from_reader(input)?;
    let tree = HuffmanTree::new(&freqs);
    let codes = CodeTable::from_tree(&tree);
    codes.check_packable(&freqs)?;
    let trailing_bits = codes.trailing_bits(&freqs);
    debug!(
        "{} bytes, {} distinct symbols, longest code {} bits, {} payload bits",
        freqs.total(),
        freqs.distinct(),
        codes.max_len(),
        codes.payload_bits(&freqs)
    );

    let mut bw = BitWriter::new(output);
    bw.push_header(&freqs, trailing_bits)?;

    // Second pass: pack.
    input.seek(SeekFrom::Start(start))?;
    let mut bp = BitPacker::new(READ_SIZE);
    let mut buf = vec![0_u8; READ_SIZE];
    let mut packed = 0_u64;
    loop {
        let size = match input.read(&mut buf) {
            Ok(0) => break,
            Ok(size) => size,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        };
        buf[..size]
            .iter()
            .for_each(|&byte| bp.append(codes.code(byte)));
        packed += size as u64;
        bw.add_payload(&mut bp)?;
        trace!("Packed {} bytes, bitstream at {}", packed, bp.loc());
    }
    bp.finish();
    bw.add_payload(&mut bp)?;

    // The header is only valid if the second pass saw the same data as the first.
    if packed != freqs.total() || (packed > 0 && bp.last_bits != trailing_bits) {
        return Err(io::Error::new(
            ErrorKind::InvalidData,
            "input changed between the counting and packing passes",
        )
        .into());
    }

    let bytes_out = bw.written();
    bw.finish()?;
    Ok(Summary {
        bytes_in: packed,
        bytes_out,
    })
}

/// Encode a byte slice in memory.
pub fn encode_bytes(data: &[u8]) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(data.len() / 2 + 1025);
    encode(&mut Cursor::new(data), &mut out)?;
    Ok(out)
}

/// Compress the input file defined in opts <HuffOpts>.
pub fn compress_file(opts: &HuffOpts) -> Result<Summary> {
    let mut fin = File::open(&opts.input)?;
    let out_path = opts.output_path();
    let f_out = open_output(&out_path, opts.force_overwrite)?;

    info!(
        "Encoding {} into {}",
        opts.input.display(),
        out_path.display()
    );
    match encode(&mut fin, f_out) {
        Ok(summary) => {
            info!(
                "{} bytes in, {} bytes out ({:.1}%).",
                summary.bytes_in,
                summary.bytes_out,
                summary.ratio() * 100.0
            );
            Ok(summary)
        }
        Err(e) => {
            // A partial file is useless, don't leave it behind.
            if fs::remove_file(&out_path).is_err() {
                warn!("Could not remove partial output {}", out_path.display());
            }
            Err(e)
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::tools::freq_count::HEADER_SIZE;

    #[test]
    fn empty_test() {
        let out = encode_bytes(b"").unwrap();
        assert_eq!(out.len(), HEADER_SIZE + 1);
        assert!(out[..HEADER_SIZE].iter().all(|&b| b == 0));
        assert_eq!(out[HEADER_SIZE], 8);
    }

    #[test]
    fn single_byte_test() {
        let out = encode_bytes(b"a").unwrap();
        assert_eq!(out.len(), HEADER_SIZE + 2);
        let a = b'a' as usize * 4;
        assert_eq!(&out[a..a + 4], &[0, 0, 0, 1]);
        // 'a' gets the one bit code "1", so the payload is one byte with one data bit.
        assert_eq!(&out[HEADER_SIZE..], &[1, 0b1000_0000]);
    }

    #[test]
    fn summary_test() {
        let data = b"aaaaaaaaaaaaaaaaaaaaaaaaaaaaaabcaaaaaaaaaaaaaaaaaaaaaaaa";
        let mut out = Vec::new();
        let summary = encode(&mut Cursor::new(&data[..]), &mut out).unwrap();
        assert_eq!(summary.bytes_in, data.len() as u64);
        assert_eq!(summary.bytes_out, out.len() as u64);
        // Mostly one bit codes, so the payload is a handful of bytes.
        assert!(out.len() < HEADER_SIZE + 1 + 16);
    }

    #[test]
    fn seek_start_test() {
        // Encoding starts from the current position, and rewinds only to there.
        let mut input = Cursor::new(b"skip:abc".to_vec());
        input.set_position(5);
        let mut out = Vec::new();
        encode(&mut input, &mut out).unwrap();
        assert_eq!(out, encode_bytes(b"abc").unwrap());
    }

    #[test]
    fn deterministic_test() {
        let data = b"qwertyuiop[]asdfghjkl;'zxcvbnm,./1234567890!@#$%^&*()-+-=";
        assert_eq!(encode_bytes(data).unwrap(), encode_bytes(data).unwrap());
    }
}
