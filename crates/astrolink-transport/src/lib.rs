//! Packet buffers and radio seams for the astrodev link adapter.
//!
//! The adapter never owns a network stack or a radio driver. This crate
//! defines what it needs from them:
//! - [`Packet`] buffers handed out by a [`PacketPool`]
//! - the [`RadioTx`] transmit capability bound at initialization
//! - the [`TaskWoken`] flag passed through to the stack's ingress hand-off
//!
//! [`HeapPool`] and, on Unix, [`DatagramRadio`] are ready-made collaborators
//! for hosts that have neither.

pub mod error;
pub mod packet;
pub mod pool;
pub mod traits;

#[cfg(unix)]
pub mod uds;

pub use error::{Result, TransportError};
pub use packet::Packet;
pub use pool::{HeapPool, PacketPool, DEFAULT_POOL_BUFFERS};
pub use traits::{RadioTx, TaskWoken};

#[cfg(unix)]
pub use uds::DatagramRadio;
