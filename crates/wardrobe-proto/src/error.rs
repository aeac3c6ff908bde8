//! Wire-level errors.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("buffer too short: need {needed} more bytes, have {remaining}")]
    BufferTooShort { needed: usize, remaining: usize },

    #[error("var-int ends mid-value")]
    VarIntTruncated,

    #[error("var-int is too long (more than {max_bytes} bytes)")]
    VarIntTooLong { max_bytes: usize },

    #[error("invalid UTF-8 string")]
    InvalidUtf8,

    #[error("unknown cosmetic slot ordinal: {0}")]
    UnknownSlot(u8),

    #[error("invalid state marker byte: {0:#04x}")]
    InvalidStateMarker(u8),

    #[error("record count {count} cannot fit in {remaining} remaining bytes")]
    ImplausibleCount { count: u32, remaining: usize },

    #[error("{0} trailing bytes after payload")]
    TrailingBytes(usize),
}
