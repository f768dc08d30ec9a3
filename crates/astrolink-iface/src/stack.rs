use std::sync::Arc;
use std::time::Duration;

use astrolink_transport::{Packet, PacketPool, TaskWoken};

use crate::channels::{channel_table, ChannelTable};
use crate::error::{Result, TxError};

/// An interface as the network stack sees it.
pub trait NextHop: Send + Sync {
    /// Display name.
    fn name(&self) -> &str;

    /// Largest payload the interface carries.
    fn mtu(&self) -> usize;

    /// Send a packet out of this interface.
    ///
    /// On success the packet has been released to the pool. On failure it is
    /// returned inside the error.
    fn nexthop(&self, packet: Packet, timeout: Duration) -> std::result::Result<(), TxError>;
}

/// The network stack an interface delivers into and registers with.
pub trait NetworkStack: Send + Sync {
    /// Ingress hand-off. Ownership of `packet` passes to the stack.
    fn deliver(&self, packet: Packet, iface: &dyn NextHop, woken: &mut TaskWoken);

    /// Add an interface to the routing table.
    fn register_interface(&self, iface: Arc<dyn NextHop>) -> Result<()>;
}

/// Shared collaborators an interface is wired to.
#[derive(Clone)]
pub struct Collaborators {
    /// Packet buffer source for the receive path and sink for sent packets.
    pub pool: Arc<dyn PacketPool>,
    /// Stack receiving inbound packets.
    pub stack: Arc<dyn NetworkStack>,
    /// Table recording identifiers per module.
    pub channels: &'static ChannelTable,
}

impl Collaborators {
    /// Wire to `pool` and `stack`, tracking identifiers in the process-wide table.
    pub fn new(pool: Arc<dyn PacketPool>, stack: Arc<dyn NetworkStack>) -> Self {
        Self {
            pool,
            stack,
            channels: channel_table(),
        }
    }

    /// Track identifiers in `channels` instead of the process-wide table.
    pub fn with_channel_table(mut self, channels: &'static ChannelTable) -> Self {
        self.channels = channels;
        self
    }
}

impl std::fmt::Debug for Collaborators {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Collaborators")
            .field("channels", &self.channels)
            .finish_non_exhaustive()
    }
}
