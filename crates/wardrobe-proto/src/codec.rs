//! Encoding/decoding traits and string helpers.

use bytes::{Buf, BufMut};

use crate::error::DecodeError;
use crate::types::VarUInt32;

/// Encode a value onto a buffer.
pub trait WireEncode {
    fn wire_encode(&self, buf: &mut impl BufMut);
}

/// Decode a value from a buffer.
pub trait WireDecode: Sized {
    fn wire_decode(buf: &mut impl Buf) -> Result<Self, DecodeError>;
}

/// Write a length-prefixed string (VarUInt32 byte length + UTF-8).
pub fn write_string(buf: &mut impl BufMut, s: &str) {
    VarUInt32(s.len() as u32).wire_encode(buf);
    buf.put_slice(s.as_bytes());
}

/// Read a length-prefixed string (VarUInt32 byte length + UTF-8).
pub fn read_string(buf: &mut impl Buf) -> Result<String, DecodeError> {
    let len = VarUInt32::wire_decode(buf)?.0 as usize;
    if len > buf.remaining() {
        return Err(DecodeError::BufferTooShort {
            needed: len,
            remaining: buf.remaining(),
        });
    }
    let mut raw = vec![0u8; len];
    buf.copy_to_slice(&mut raw);
    String::from_utf8(raw).map_err(|_| DecodeError::InvalidUtf8)
}
