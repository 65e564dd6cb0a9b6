use std::fs::{self, File};
use std::io::{ErrorKind, Read, Write};

use log::{debug, error, info, trace, warn};

use super::{open_output, Summary};
use crate::bitstream::bitreader::BitReader;
use crate::error::{Error, PayloadError, Result};
use crate::huffman_coding::huffman::HuffmanTree;
use crate::huffman_coding::huffman_codes::CodeTable;
use crate::tools::cli::HuffOpts;
use crate::tools::freq_count::{FrequencyTable, HEADER_SIZE};

/// Count table plus the trailing-bit-count byte.
const PREAMBLE_SIZE: usize = HEADER_SIZE + 1;
const WRITE_SIZE: usize = 64 * 1024;

/// Decode a huffzip stream from `input`, writing the original bytes to `output`.
///
/// Fails with `TruncatedHeader` if the input is shorter than the count table plus the
/// trailing-bit-count byte, and with `CorruptPayload` if the stored trailing-bit-count
/// or the payload disagrees with the stored counts.
pub fn decode<R, W>(mut input: R, mut output: W) -> Result<Summary>
where
    R: Read,
    W: Write,
{
    let mut preamble = [0_u8; PREAMBLE_SIZE];
    let got = read_full(&mut input, &mut preamble)?;
    if got < PREAMBLE_SIZE {
        error!("Found only {} header bytes.", got);
        return Err(Error::TruncatedHeader {
            required: PREAMBLE_SIZE,
            actual: got,
        });
    }
    let mut header = [0_u8; HEADER_SIZE];
    header.copy_from_slice(&preamble[..HEADER_SIZE]);
    let stored_bits = preamble[HEADER_SIZE];

    // Rebuild the tree the encoder used, from nothing but the stored counts.
    let freqs = FrequencyTable::from_header(&header);
    let tree = HuffmanTree::new(&freqs);
    let codes = CodeTable::from_tree(&tree);

    let expected_bits = codes.trailing_bits(&freqs);
    if stored_bits != expected_bits {
        error!(
            "Trailing bit count is {}, but the counts imply {}.",
            stored_bits, expected_bits
        );
        return Err(PayloadError::TrailingBits {
            stored: stored_bits,
            expected: expected_bits,
        }
        .into());
    }
    let payload_bits = codes.payload_bits(&freqs);
    debug!(
        "{} symbols to decode, {} distinct, {} payload bits, tree depth {}",
        freqs.total(),
        freqs.distinct(),
        payload_bits,
        tree.depth()
    );

    let mut br = BitReader::new(input, payload_bits);
    let mut decoded = FrequencyTable::new();
    let mut out = Vec::with_capacity(WRITE_SIZE);
    let mut bytes_out = 0_u64;
    while br.bits_remaining() > 0 {
        out.push(br.next_symbol(&tree)?);
        if out.len() == WRITE_SIZE {
            decoded.add(&out)?;
            output.write_all(&out)?;
            bytes_out += out.len() as u64;
            out.clear();
            trace!("Wrote {} bytes, payload at {}", bytes_out, br.loc());
        }
    }
    decoded.add(&out)?;
    output.write_all(&out)?;
    output.flush()?;
    bytes_out += out.len() as u64;
    br.finish()?;

    // A payload that walks cleanly can still be wrong. It must reproduce the counts.
    if let Some(symbol) = (0..=255_u8).find(|&s| decoded.count(s) != freqs.count(s)) {
        return Err(PayloadError::FrequencyMismatch {
            symbol,
            expected: freqs.count(symbol),
            actual: decoded.count(symbol),
        }
        .into());
    }

    Ok(Summary {
        bytes_in: PREAMBLE_SIZE as u64 + (payload_bits + 7) / 8,
        bytes_out,
    })
}

/// Decode a huffzip file held in memory.
pub fn decode_bytes(data: &[u8]) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    decode(data, &mut out)?;
    Ok(out)
}

/// Read until `buf` is full or the input ends. Returns the number of bytes read.
fn read_full<R: Read>(input: &mut R, buf: &mut [u8]) -> Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match input.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(size) => filled += size,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }
    Ok(filled)
}

/// Decompress the file specified in opts (HuffOpts).
pub fn decompress_file(opts: &HuffOpts) -> Result<Summary> {
    let fin = File::open(&opts.input)?;
    let out_path = opts.output_path();
    let f_out = open_output(&out_path, opts.force_overwrite)?;

    info!(
        "Decoding {} into {}",
        opts.input.display(),
        out_path.display()
    );
    match decode(fin, f_out) {
        Ok(summary) => {
            info!(
                "{} bytes in, {} bytes out.",
                summary.bytes_in, summary.bytes_out
            );
            Ok(summary)
        }
        Err(e) => {
            if fs::remove_file(&out_path).is_err() {
                warn!("Could not remove partial output {}", out_path.display());
            }
            Err(e)
        }
    }
}
