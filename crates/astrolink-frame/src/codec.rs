use astrolink_transport::Packet;
use bytes::BufMut;

use crate::error::{FrameError, Result};
use crate::header::{LinkHeader, HEADER_SIZE};

/// Network identifier: 4 bytes, big-endian on the wire.
pub const IDENTIFIER_SIZE: usize = 4;

/// Link-layer trailer bytes closing every inbound frame. Never inspected.
pub const TRAILER_SIZE: usize = 2;

/// Largest frame body the astrodev radio carries.
pub const ASTRODEV_PACKET_SIZE: usize = 255;

/// Payload MTU advertised by an astrodev interface.
pub const DEFAULT_MTU: usize = ASTRODEV_PACKET_SIZE - IDENTIFIER_SIZE;

/// Decoder settings for one interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameConfig {
    /// Inbound frames carry a link header to strip.
    pub header_mode: bool,
    /// Maximum payload size, identifier excluded.
    pub mtu: usize,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            header_mode: false,
            mtu: DEFAULT_MTU,
        }
    }
}

/// A validated inbound frame, borrowing from the raw buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodedFrame<'a> {
    /// Link header, present in header mode.
    pub header: Option<LinkHeader>,
    /// Network identifier in host byte order.
    pub id: u32,
    /// Payload with identifier and trailer removed.
    pub payload: &'a [u8],
}

/// Read a network identifier from the first four bytes of `src`.
pub fn read_identifier(src: &[u8]) -> Option<u32> {
    let bytes: [u8; IDENTIFIER_SIZE] = src.get(..IDENTIFIER_SIZE)?.try_into().ok()?;
    Some(u32::from_be_bytes(bytes))
}

/// Write a network identifier in network byte order.
pub fn write_identifier(id: u32, dst: &mut impl BufMut) {
    dst.put_u32(id);
}

/// Wire length of an outbound frame carrying `payload_len` bytes.
pub fn wire_len(payload_len: usize) -> usize {
    payload_len + IDENTIFIER_SIZE
}

/// Decode an inbound radio frame.
///
/// Wire format:
/// ```text
/// ┌──────────────────┬──────────────┬──────────────┬─────────────┐
/// │ Link header      │ Identifier   │ Payload      │ Trailer     │
/// │ (14B, header     │ (4B BE)      │ (0..=MTU B)  │ (2B,        │
/// │  mode only)      │              │              │  ignored)   │
/// └──────────────────┴──────────────┴──────────────┴─────────────┘
/// ```
///
/// Every length is checked before the payload is sliced; a frame that would
/// underflow is rejected, never wrapped.
pub fn decode_frame<'a>(raw: &'a [u8], config: &FrameConfig) -> Result<DecodedFrame<'a>> {
    let (header, body) = if config.header_mode {
        let min = HEADER_SIZE + IDENTIFIER_SIZE;
        if raw.len() < min {
            return Err(FrameError::TooShortForHeader {
                len: raw.len(),
                min,
            });
        }
        (LinkHeader::from_bytes(raw), &raw[HEADER_SIZE..])
    } else {
        if raw.len() < IDENTIFIER_SIZE {
            return Err(FrameError::TooShort {
                len: raw.len(),
                min: IDENTIFIER_SIZE,
            });
        }
        (None, raw)
    };

    let min = IDENTIFIER_SIZE;
    let max = config.mtu.saturating_add(IDENTIFIER_SIZE);
    let len = body
        .len()
        .checked_sub(TRAILER_SIZE)
        .filter(|len| (min..=max).contains(len))
        .ok_or(FrameError::LengthOutOfBounds {
            len: body.len().saturating_sub(TRAILER_SIZE),
            min,
            max,
        })?;

    let packet = &body[..len];
    let id = read_identifier(packet).ok_or(FrameError::LengthOutOfBounds { len, min, max })?;

    Ok(DecodedFrame {
        header,
        id,
        payload: &packet[IDENTIFIER_SIZE..],
    })
}

/// Encode an outbound frame: identifier in network order, then the payload.
pub fn encode_frame(id: u32, payload: &[u8], dst: &mut impl BufMut) {
    write_identifier(id, dst);
    dst.put_slice(payload);
}

/// Encode a packet into its outbound wire form.
pub fn encode_packet(packet: &Packet, dst: &mut impl BufMut) {
    encode_frame(packet.id, packet.payload(), dst);
}

#[cfg(test)]
mod tests {
    use bytes::BytesMut;

    use super::*;
    use crate::header::Address;

    fn with_trailer(mut frame: Vec<u8>) -> Vec<u8> {
        frame.extend_from_slice(&[0xA5, 0x5A]);
        frame
    }

    #[test]
    fn decode_header_mode_strips_header_and_trailer() {
        let header = LinkHeader::new(Address::new("GROUND", 0), Address::new("SAT", 1));
        let mut raw = header.as_bytes().to_vec();
        raw.extend_from_slice(&[0x00, 0x00, 0x00, 0x2A]);
        raw.extend_from_slice(b"hello");
        let raw = with_trailer(raw);

        let config = FrameConfig {
            header_mode: true,
            mtu: 9,
        };
        let frame = decode_frame(&raw, &config).unwrap();

        assert_eq!(frame.id, 42);
        assert_eq!(frame.payload, b"hello");
        assert_eq!(frame.header, Some(header));
    }

    #[test]
    fn decode_without_header_converts_identifier() {
        let raw = with_trailer(vec![0x12, 0x34, 0x56, 0x78, 1, 2, 3]);
        let frame = decode_frame(&raw, &FrameConfig::default()).unwrap();

        assert_eq!(frame.id, 0x1234_5678);
        assert_eq!(frame.payload, &[1, 2, 3]);
        assert!(frame.header.is_none());
    }

    #[test]
    fn decode_accepts_every_valid_length() {
        let config = FrameConfig {
            header_mode: false,
            mtu: 32,
        };
        for total in (IDENTIFIER_SIZE + TRAILER_SIZE)..=(config.mtu + IDENTIFIER_SIZE + TRAILER_SIZE)
        {
            let raw: Vec<u8> = (0..total).map(|i| i as u8).collect();
            let frame = decode_frame(&raw, &config).unwrap();
            assert_eq!(frame.payload.len(), total - TRAILER_SIZE - IDENTIFIER_SIZE);
            assert_eq!(frame.id, u32::from_be_bytes([0, 1, 2, 3]));
        }
    }

    #[test]
    fn decode_rejects_frame_shorter_than_identifier() {
        let err = decode_frame(&[1, 2, 3], &FrameConfig::default()).unwrap_err();
        assert_eq!(err, FrameError::TooShort { len: 3, min: 4 });
    }

    #[test]
    fn decode_rejects_short_header_mode_frames() {
        let config = FrameConfig {
            header_mode: true,
            ..FrameConfig::default()
        };
        for len in 0..(HEADER_SIZE + IDENTIFIER_SIZE) {
            let err = decode_frame(&vec![0u8; len], &config).unwrap_err();
            assert!(matches!(err, FrameError::TooShortForHeader { .. }), "len {len}");
        }
    }

    #[test]
    fn decode_rejects_identifier_eaten_by_trailer() {
        // Long enough to pass the first check, too short once the trailer goes.
        for len in IDENTIFIER_SIZE..(IDENTIFIER_SIZE + TRAILER_SIZE) {
            let err = decode_frame(&vec![0u8; len], &FrameConfig::default()).unwrap_err();
            assert!(matches!(err, FrameError::LengthOutOfBounds { .. }), "len {len}");
        }

        let config = FrameConfig {
            header_mode: true,
            ..FrameConfig::default()
        };
        let err = decode_frame(&[0u8; HEADER_SIZE + IDENTIFIER_SIZE], &config).unwrap_err();
        assert_eq!(
            err,
            FrameError::LengthOutOfBounds {
                len: 2,
                min: IDENTIFIER_SIZE,
                max: DEFAULT_MTU + IDENTIFIER_SIZE
            }
        );
    }

    #[test]
    fn decode_rejects_payload_over_mtu() {
        let config = FrameConfig {
            header_mode: false,
            mtu: 4,
        };
        let ok = with_trailer(vec![0; IDENTIFIER_SIZE + 4]);
        assert!(decode_frame(&ok, &config).is_ok());

        let too_long = with_trailer(vec![0; IDENTIFIER_SIZE + 5]);
        let err = decode_frame(&too_long, &config).unwrap_err();
        assert_eq!(
            err,
            FrameError::LengthOutOfBounds {
                len: 9,
                min: 4,
                max: 8
            }
        );
    }

    #[test]
    fn encode_prepends_big_endian_identifier() {
        let mut buf = BytesMut::new();
        encode_frame(0xDEAD_BEEF, b"payload", &mut buf);

        assert_eq!(buf.len(), wire_len(7));
        assert_eq!(&buf[..4], &[0xDE, 0xAD, 0xBE, 0xEF]);
        assert_eq!(&buf[4..], b"payload");
    }

    #[test]
    fn encoded_packet_decodes_back() {
        let packet = Packet::new(0x8100_2A0F, b"telemetry");
        let mut wire = Vec::new();
        encode_packet(&packet, &mut wire);
        wire.extend_from_slice(&[0, 0]);

        let frame = decode_frame(&wire, &FrameConfig::default()).unwrap();
        assert_eq!(frame.id, packet.id);
        assert_eq!(frame.payload, packet.payload());
    }

    #[test]
    fn empty_payload_round_trips() {
        let mut wire = Vec::new();
        encode_frame(1, b"", &mut wire);
        assert_eq!(wire.len(), IDENTIFIER_SIZE);
        wire.extend_from_slice(&[0, 0]);

        let frame = decode_frame(&wire, &FrameConfig::default()).unwrap();
        assert_eq!(frame.id, 1);
        assert!(frame.payload.is_empty());
    }

    #[test]
    fn identifier_helpers_agree() {
        let mut buf = Vec::new();
        write_identifier(0x0102_0304, &mut buf);
        assert_eq!(buf, vec![1, 2, 3, 4]);
        assert_eq!(read_identifier(&buf), Some(0x0102_0304));
        assert_eq!(read_identifier(&buf[..3]), None);
    }
}
