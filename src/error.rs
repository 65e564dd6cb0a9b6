//! Error types for huffzip.
//!
//! Every codec operation returns a structured error instead of panicking. The
//! top-level [`Error`] separates a short header from a damaged payload from an
//! I/O failure so callers can branch on the failure class via [`Error::kind`].

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for encode and decode.
#[derive(Debug, Error)]
pub enum Error {
    /// The encoded input ended before the fixed-size header was complete.
    #[error("truncated header: need {required} bytes, got {actual}")]
    TruncatedHeader { required: usize, actual: usize },

    /// The payload does not agree with the counts stored in the header.
    #[error("corrupt payload: {0}")]
    CorruptPayload(#[from] PayloadError),

    /// A symbol occurs more often than a 32 bit header count can record.
    #[error("symbol {symbol} occurs more than {} times", u32::MAX)]
    CountOverflow { symbol: u8 },

    /// A code is wider than the 64 bit packing queue.
    #[error("code for symbol {symbol} is {len} bits long (limit is 64)")]
    CodeTooLong { symbol: u8, len: u32 },

    /// Refusing to replace an existing file without --force.
    #[error("output file {} already exists (use --force to overwrite)", .0.display())]
    OutputExists(PathBuf),

    /// Reading or writing the underlying stream failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Ways a payload can disagree with its header.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PayloadError {
    /// The stored trailing-bit-count is not the one the counts imply.
    #[error("trailing bit count is {stored}, counts imply {expected}")]
    TrailingBits { stored: u8, expected: u8 },

    /// The payload ended before the declared number of bits.
    #[error("payload is {missing_bits} bits short")]
    Truncated { missing_bits: u64 },

    /// Bytes follow the last declared payload bit.
    #[error("unexpected data after the last payload byte")]
    TrailingData,

    /// The declared bits ran out in the middle of a code.
    #[error("payload ends inside a code")]
    EndedMidCode,

    /// The decoded data does not reproduce the stored counts.
    #[error("symbol {symbol} decoded {actual} times, header says {expected}")]
    FrequencyMismatch { symbol: u8, expected: u32, actual: u32 },
}

/// Coarse failure classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    TruncatedHeader,
    CorruptPayload,
    Limit,
    Usage,
    Io,
}

impl Error {
    /// Returns the failure class of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::TruncatedHeader { .. } => ErrorKind::TruncatedHeader,
            Error::CorruptPayload(_) => ErrorKind::CorruptPayload,
            Error::CountOverflow { .. } | Error::CodeTooLong { .. } => ErrorKind::Limit,
            Error::OutputExists(_) => ErrorKind::Usage,
            Error::Io(_) => ErrorKind::Io,
        }
    }
}

/// Type alias for Result with our Error type
pub type Result<T> = std::result::Result<T, Error>;
