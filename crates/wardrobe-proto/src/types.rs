//! Variable-length integer primitives used by the outfit wire format.

use bytes::{Buf, BufMut};
use serde::{Deserialize, Serialize};

use crate::codec::{WireDecode, WireEncode};
use crate::error::DecodeError;

/// Unsigned variable-length integer (plain LEB128).
/// Used for record counts and string lengths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VarUInt32(pub u32);

impl VarUInt32 {
    /// Maximum bytes a VarUInt32 can occupy.
    pub const MAX_BYTES: usize = 5;
}

/// Unsigned variable-length 64-bit integer (plain LEB128).
/// Used for target entity identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VarUInt64(pub u64);

impl VarUInt64 {
    /// Maximum bytes a VarUInt64 can occupy.
    pub const MAX_BYTES: usize = 10;
}

fn put_uvarint(buf: &mut impl BufMut, mut value: u64) {
    while value >= 0x80 {
        buf.put_u8((value as u8 & 0x7F) | 0x80);
        value >>= 7;
    }
    buf.put_u8(value as u8);
}

fn get_uvarint(buf: &mut impl Buf, max_bytes: usize) -> Result<u64, DecodeError> {
    let mut value: u64 = 0;
    let mut read = 0;
    loop {
        if read == max_bytes {
            return Err(DecodeError::VarIntTooLong { max_bytes });
        }
        if !buf.has_remaining() {
            return Err(DecodeError::VarIntTruncated);
        }
        let byte = buf.get_u8();
        value |= u64::from(byte & 0x7F) << (7 * read);
        read += 1;
        if byte & 0x80 == 0 {
            return Ok(value);
        }
    }
}

impl WireEncode for VarUInt32 {
    fn wire_encode(&self, buf: &mut impl BufMut) {
        put_uvarint(buf, u64::from(self.0));
    }
}

impl WireDecode for VarUInt32 {
    fn wire_decode(buf: &mut impl Buf) -> Result<Self, DecodeError> {
        Ok(VarUInt32(get_uvarint(buf, Self::MAX_BYTES)? as u32))
    }
}

impl WireEncode for VarUInt64 {
    fn wire_encode(&self, buf: &mut impl BufMut) {
        put_uvarint(buf, self.0);
    }
}

impl WireDecode for VarUInt64 {
    fn wire_decode(buf: &mut impl Buf) -> Result<Self, DecodeError> {
        Ok(VarUInt64(get_uvarint(buf, Self::MAX_BYTES)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::BytesMut;

    fn roundtrip_varuint32(value: u32) {
        let v = VarUInt32(value);
        let mut buf = BytesMut::new();
        v.wire_encode(&mut buf);
        let decoded = VarUInt32::wire_decode(&mut buf.freeze()).unwrap();
        assert_eq!(decoded.0, value);
    }

    #[test]
    fn varuint32_roundtrip() {
        for value in [0, 1, 127, 128, 255, 300, 100_000, u32::MAX] {
            roundtrip_varuint32(value);
        }
    }

    #[test]
    fn varuint32_single_byte_values() {
        let mut buf = BytesMut::new();
        VarUInt32(1).wire_encode(&mut buf);
        assert_eq!(&buf[..], &[0x01]);

        let mut buf = BytesMut::new();
        VarUInt32(127).wire_encode(&mut buf);
        assert_eq!(&buf[..], &[0x7F]);
    }

    #[test]
    fn varuint32_continuation_bit() {
        let mut buf = BytesMut::new();
        VarUInt32(300).wire_encode(&mut buf);
        assert_eq!(&buf[..], &[0xAC, 0x02]);
    }

    #[test]
    fn varuint32_truncated() {
        let buf: &[u8] = &[];
        assert_eq!(
            VarUInt32::wire_decode(&mut &buf[..]),
            Err(DecodeError::VarIntTruncated)
        );
        let buf: &[u8] = &[0x80];
        assert_eq!(
            VarUInt32::wire_decode(&mut &buf[..]),
            Err(DecodeError::VarIntTruncated)
        );
    }

    #[test]
    fn varuint32_too_long() {
        let buf: &[u8] = &[0x80, 0x80, 0x80, 0x80, 0x80, 0x01];
        assert_eq!(
            VarUInt32::wire_decode(&mut &buf[..]),
            Err(DecodeError::VarIntTooLong {
                max_bytes: VarUInt32::MAX_BYTES
            })
        );
    }

    fn roundtrip_varuint64(value: u64) {
        let v = VarUInt64(value);
        let mut buf = BytesMut::new();
        v.wire_encode(&mut buf);
        let decoded = VarUInt64::wire_decode(&mut buf.freeze()).unwrap();
        assert_eq!(decoded.0, value);
    }

    #[test]
    fn varuint64_roundtrip() {
        for value in [0, 1, 42, 127, 128, u32::MAX as u64, u64::MAX] {
            roundtrip_varuint64(value);
        }
    }

    #[test]
    fn varuint64_truncated() {
        let buf: &[u8] = &[0xFF, 0xFF];
        assert_eq!(
            VarUInt64::wire_decode(&mut &buf[..]),
            Err(DecodeError::VarIntTruncated)
        );
    }

    #[test]
    fn varuint64_too_long() {
        let buf: &[u8] = &[0x80; 11];
        assert_eq!(
            VarUInt64::wire_decode(&mut &buf[..]),
            Err(DecodeError::VarIntTooLong {
                max_bytes: VarUInt64::MAX_BYTES
            })
        );
    }
}
