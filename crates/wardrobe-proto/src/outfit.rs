//! Outfit-update payload: records, slots, and the channel wire layout.
//!
//! One frame on the outfit channel carries exactly one payload:
//!
//! ```text
//! payload := count:VarUInt32 record*count
//! record  := target:VarUInt64 slot:u8 state
//! state   := 0x00 | 0x01 descriptor:string
//! ```

use bytes::{Buf, BufMut, Bytes, BytesMut};
use serde::{Deserialize, Serialize};

use crate::codec::{read_string, write_string, WireDecode, WireEncode};
use crate::error::DecodeError;
use crate::types::{VarUInt32, VarUInt64};

/// Channel id used by the current transport generation.
pub const CHANNEL_MODERN: &str = "wardrobe:outfits";

/// Channel id used by the legacy transport generation.
pub const CHANNEL_LEGACY: &str = "WDB|Outfits";

/// Smallest possible encoded record: one-byte target, slot ordinal,
/// cleared-state marker. Used to reject implausible record counts before
/// allocating.
const MIN_RECORD_BYTES: usize = 3;

/// Cosmetic attachment point. The wire form is the single-byte ordinal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CosmeticSlot {
    Hat,
    Cape,
    Face,
    ShoulderLeft,
    ShoulderRight,
    FullBody,
}

impl CosmeticSlot {
    pub fn ordinal(&self) -> u8 {
        match self {
            CosmeticSlot::Hat => 0,
            CosmeticSlot::Cape => 1,
            CosmeticSlot::Face => 2,
            CosmeticSlot::ShoulderLeft => 3,
            CosmeticSlot::ShoulderRight => 4,
            CosmeticSlot::FullBody => 5,
        }
    }

    pub fn from_ordinal(ordinal: u8) -> Option<Self> {
        match ordinal {
            0 => Some(CosmeticSlot::Hat),
            1 => Some(CosmeticSlot::Cape),
            2 => Some(CosmeticSlot::Face),
            3 => Some(CosmeticSlot::ShoulderLeft),
            4 => Some(CosmeticSlot::ShoulderRight),
            5 => Some(CosmeticSlot::FullBody),
            _ => None,
        }
    }
}

/// One equip/clear instruction for a target entity's slot.
///
/// `state == None` is the cleared marker; `Some` carries the serialized
/// cosmetic descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutfitUpdate {
    pub target: u64,
    pub slot: CosmeticSlot,
    pub state: Option<String>,
}

impl OutfitUpdate {
    pub fn equip(target: u64, slot: CosmeticSlot, descriptor: impl Into<String>) -> Self {
        Self {
            target,
            slot,
            state: Some(descriptor.into()),
        }
    }

    pub fn clear(target: u64, slot: CosmeticSlot) -> Self {
        Self {
            target,
            slot,
            state: None,
        }
    }
}

impl WireEncode for OutfitUpdate {
    fn wire_encode(&self, buf: &mut impl BufMut) {
        VarUInt64(self.target).wire_encode(buf);
        buf.put_u8(self.slot.ordinal());
        match &self.state {
            Some(descriptor) => {
                buf.put_u8(1);
                write_string(buf, descriptor);
            }
            None => buf.put_u8(0),
        }
    }
}

impl WireDecode for OutfitUpdate {
    fn wire_decode(buf: &mut impl Buf) -> Result<Self, DecodeError> {
        let target = VarUInt64::wire_decode(buf)?.0;
        if buf.remaining() < 2 {
            return Err(DecodeError::BufferTooShort {
                needed: 2,
                remaining: buf.remaining(),
            });
        }
        let ordinal = buf.get_u8();
        let slot = CosmeticSlot::from_ordinal(ordinal).ok_or(DecodeError::UnknownSlot(ordinal))?;
        let state = match buf.get_u8() {
            0 => None,
            1 => Some(read_string(buf)?),
            other => return Err(DecodeError::InvalidStateMarker(other)),
        };
        Ok(Self {
            target,
            slot,
            state,
        })
    }
}

/// Ordered sequence of outfit updates, as carried by one channel frame.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutfitUpdatesPayload {
    pub updates: Vec<OutfitUpdate>,
}

impl OutfitUpdatesPayload {
    pub fn new(updates: Vec<OutfitUpdate>) -> Self {
        Self { updates }
    }

    /// Encode into a standalone frame body.
    pub fn encode_frame(&self) -> Bytes {
        let mut buf = BytesMut::new();
        self.wire_encode(&mut buf);
        buf.freeze()
    }

    /// Decode a whole frame body. The frame must contain exactly one
    /// payload; trailing bytes are rejected.
    pub fn decode_frame(frame: &[u8]) -> Result<Self, DecodeError> {
        let mut buf = frame;
        let payload = Self::wire_decode(&mut buf)?;
        if buf.has_remaining() {
            return Err(DecodeError::TrailingBytes(buf.remaining()));
        }
        Ok(payload)
    }
}

impl WireEncode for OutfitUpdatesPayload {
    fn wire_encode(&self, buf: &mut impl BufMut) {
        VarUInt32(self.updates.len() as u32).wire_encode(buf);
        for update in &self.updates {
            update.wire_encode(buf);
        }
    }
}

impl WireDecode for OutfitUpdatesPayload {
    fn wire_decode(buf: &mut impl Buf) -> Result<Self, DecodeError> {
        let count = VarUInt32::wire_decode(buf)?.0;
        if count as usize * MIN_RECORD_BYTES > buf.remaining() {
            return Err(DecodeError::ImplausibleCount {
                count,
                remaining: buf.remaining(),
            });
        }
        let mut updates = Vec::with_capacity(count as usize);
        for _ in 0..count {
            updates.push(OutfitUpdate::wire_decode(buf)?);
        }
        Ok(Self { updates })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_payload() -> OutfitUpdatesPayload {
        OutfitUpdatesPayload::new(vec![
            OutfitUpdate::equip(42, CosmeticSlot::Hat, "cowboy_hat"),
            OutfitUpdate::clear(42, CosmeticSlot::Cape),
            OutfitUpdate::equip(7, CosmeticSlot::FullBody, "astronaut"),
        ])
    }

    #[test]
    fn roundtrip_empty() {
        let payload = OutfitUpdatesPayload::default();
        let frame = payload.encode_frame();
        assert_eq!(&frame[..], &[0x00]);
        assert_eq!(OutfitUpdatesPayload::decode_frame(&frame).unwrap(), payload);
    }

    #[test]
    fn roundtrip_mixed() {
        let payload = sample_payload();
        let frame = payload.encode_frame();
        assert_eq!(OutfitUpdatesPayload::decode_frame(&frame).unwrap(), payload);
    }

    #[test]
    fn single_record_fixed_bytes() {
        let payload =
            OutfitUpdatesPayload::new(vec![OutfitUpdate::equip(42, CosmeticSlot::Hat, "cowboy_hat")]);
        let frame = payload.encode_frame();
        assert_eq!(
            &frame[..],
            &[
                0x01, // count
                0x2A, // target 42
                0x00, // slot Hat
                0x01, // state present
                0x0A, // descriptor length
                0x63, 0x6F, 0x77, 0x62, 0x6F, 0x79, 0x5F, 0x68, 0x61, 0x74,
            ]
        );
        assert_eq!(OutfitUpdatesPayload::decode_frame(&frame).unwrap(), payload);
    }

    #[test]
    fn truncated_frames_fail() {
        let frame = sample_payload().encode_frame();
        // Every strict prefix must fail; none may yield a partial payload.
        for len in 0..frame.len() {
            assert!(
                OutfitUpdatesPayload::decode_frame(&frame[..len]).is_err(),
                "prefix of {len} bytes decoded successfully"
            );
        }
    }

    #[test]
    fn count_exceeding_buffer_rejected() {
        // Claims 200 records but carries three bytes.
        let frame = [0xC8, 0x01, 0x2A, 0x00];
        assert_eq!(
            OutfitUpdatesPayload::decode_frame(&frame),
            Err(DecodeError::ImplausibleCount {
                count: 200,
                remaining: 2,
            })
        );
    }

    #[test]
    fn unknown_slot_rejected() {
        let frame = [0x01, 0x2A, 0x09, 0x00];
        assert_eq!(
            OutfitUpdatesPayload::decode_frame(&frame),
            Err(DecodeError::UnknownSlot(9))
        );
    }

    #[test]
    fn invalid_state_marker_rejected() {
        let frame = [0x01, 0x2A, 0x00, 0x02, 0x00];
        assert_eq!(
            OutfitUpdatesPayload::decode_frame(&frame),
            Err(DecodeError::InvalidStateMarker(2))
        );
    }

    #[test]
    fn trailing_bytes_rejected() {
        let mut frame = sample_payload().encode_frame().to_vec();
        frame.push(0xFF);
        assert_eq!(
            OutfitUpdatesPayload::decode_frame(&frame),
            Err(DecodeError::TrailingBytes(1))
        );
    }

    #[test]
    fn cleared_marker_carries_no_descriptor() {
        let payload = OutfitUpdatesPayload::new(vec![OutfitUpdate::clear(1, CosmeticSlot::Hat)]);
        let frame = payload.encode_frame();
        assert_eq!(&frame[..], &[0x01, 0x01, 0x00, 0x00]);
    }

    #[test]
    fn slot_ordinals_roundtrip() {
        for ordinal in 0..=5u8 {
            let slot = CosmeticSlot::from_ordinal(ordinal).unwrap();
            assert_eq!(slot.ordinal(), ordinal);
        }
        assert_eq!(CosmeticSlot::from_ordinal(6), None);
        assert_eq!(CosmeticSlot::from_ordinal(255), None);
    }

    #[test]
    fn channel_ids() {
        assert_eq!(CHANNEL_MODERN, "wardrobe:outfits");
        assert_eq!(CHANNEL_LEGACY, "WDB|Outfits");
    }
}
