//! Frame codec for astrodev radio links.
//!
//! Inbound frames arrive as
//! `[link header (header mode only)] [identifier, 4B BE] [payload] [trailer, 2B]`.
//! Outbound frames are `[identifier, 4B BE] [payload]`; no header, no trailer.
//!
//! Decoding validates every length before touching the payload and never
//! allocates; callers copy the borrowed payload wherever it needs to live.

pub mod codec;
pub mod error;
pub mod header;

pub use codec::{
    decode_frame, encode_frame, encode_packet, read_identifier, wire_len, write_identifier,
    DecodedFrame, FrameConfig, ASTRODEV_PACKET_SIZE, DEFAULT_MTU, IDENTIFIER_SIZE, TRAILER_SIZE,
};
pub use error::{FrameError, Result};
pub use header::{Address, LinkHeader, ADDRESS_SIZE, HEADER_SIZE};
