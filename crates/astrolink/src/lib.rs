//! Astrodev radio link adapter for packet network stacks.
//!
//! Bridges a point-to-point radio transceiver to a packet-oriented network
//! stack: inbound radio frames are stripped, validated and delivered as
//! packets; outbound packets are framed with a big-endian identifier and
//! handed to the radio.
//!
//! # Crate Structure
//!
//! - [`transport`]: packet buffers, pools and the radio transmit seam
//! - [`frame`]: link header stripping, identifier framing, length checks
//! - [`iface`]: the interface itself, with its channel table and stats

/// Re-export transport types.
pub mod transport {
    pub use astrolink_transport::*;
}

/// Re-export frame codec types.
pub mod frame {
    pub use astrolink_frame::*;
}

/// Re-export interface types.
pub mod iface {
    pub use astrolink_iface::*;
}
