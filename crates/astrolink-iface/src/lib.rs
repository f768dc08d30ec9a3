//! Astrodev radio interface for a packet network stack.
//!
//! Binds the frame codec to the stack's packet pool and the radio's transmit
//! primitive:
//! - [`AstrodevInterface::receive`] decodes raw radio frames and hands packets
//!   to the stack
//! - [`AstrodevInterface::transmit`] is the interface's next hop, framing
//!   packets for the radio
//! - [`ChannelTable`] tracks the last identifier seen per radio module for
//!   telemetry
//!
//! [`initialize`] wires an interface together and registers it with the stack.

pub mod adapter;
pub mod channels;
pub mod config;
pub mod error;
pub mod rx;
pub mod stack;
pub mod stats;
pub mod tx;

#[cfg(test)]
mod testing;

pub use adapter::{initialize, AstrodevHandle, AstrodevInterface};
pub use channels::{channel_table, ChannelTable, NUM_MODULES};
pub use config::{AdapterConfig, DEFAULT_INTERFACE_NAME};
pub use error::{IfaceError, Result, TxError};
pub use stack::{Collaborators, NetworkStack, NextHop};
pub use stats::{InterfaceStats, StatsSnapshot};
