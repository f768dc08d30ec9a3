use std::sync::Arc;
use std::time::Duration;

use astrolink_frame::{FrameConfig, DEFAULT_MTU};
use astrolink_transport::{Packet, PacketPool, RadioTx};
use tracing::{info, warn};

use crate::channels::{ChannelTable, NUM_MODULES};
use crate::config::AdapterConfig;
use crate::error::{IfaceError, Result, TxError};
use crate::stack::{Collaborators, NetworkStack, NextHop};
use crate::stats::{InterfaceStats, StatsSnapshot};

/// Immutable per-interface settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AstrodevHandle {
    /// Inbound frames carry a link header to strip.
    pub header_mode: bool,
    /// Radio module index for channel table bookkeeping.
    pub module: usize,
}

/// A registered astrodev radio interface.
pub struct AstrodevInterface {
    pub(crate) name: String,
    pub(crate) mtu: usize,
    pub(crate) handle: AstrodevHandle,
    pub(crate) frame_config: FrameConfig,
    pub(crate) radio: Box<dyn RadioTx>,
    pub(crate) pool: Arc<dyn PacketPool>,
    pub(crate) stack: Arc<dyn NetworkStack>,
    pub(crate) channels: &'static ChannelTable,
    pub(crate) stats: InterfaceStats,
}

/// Bind `radio` into a new interface named `name` and register it with the stack.
///
/// The MTU is fixed at [`DEFAULT_MTU`]. The interface lives as long as the
/// stack holds it; there is no teardown.
pub fn initialize(
    handle: AstrodevHandle,
    radio: impl RadioTx + 'static,
    name: &str,
    collaborators: Collaborators,
) -> Result<Arc<AstrodevInterface>> {
    if name.trim().is_empty() {
        return Err(IfaceError::InvalidConfig(
            "interface name must not be empty".to_string(),
        ));
    }
    if handle.module >= NUM_MODULES {
        warn!(
            iface = name,
            module = handle.module,
            max = NUM_MODULES,
            "module index outside channel table; identifiers will not be tracked"
        );
    }

    let iface = Arc::new(AstrodevInterface {
        name: name.to_string(),
        mtu: DEFAULT_MTU,
        handle,
        frame_config: FrameConfig {
            header_mode: handle.header_mode,
            mtu: DEFAULT_MTU,
        },
        radio: Box::new(radio),
        pool: collaborators.pool,
        stack: Arc::clone(&collaborators.stack),
        channels: collaborators.channels,
        stats: InterfaceStats::default(),
    });

    collaborators.stack.register_interface(iface.clone())?;
    info!(
        iface = name,
        mtu = iface.mtu,
        header_mode = handle.header_mode,
        module = handle.module,
        "interface registered"
    );

    Ok(iface)
}

impl AstrodevInterface {
    /// Validate `config` and [`initialize`] an interface from it.
    pub fn from_config(
        config: &AdapterConfig,
        radio: impl RadioTx + 'static,
        collaborators: Collaborators,
    ) -> Result<Arc<Self>> {
        config.validate()?;
        initialize(config.handle(), radio, &config.name, collaborators)
    }

    /// Interface display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Largest payload carried, identifier excluded.
    pub fn mtu(&self) -> usize {
        self.mtu
    }

    /// Settings this interface was built with.
    pub fn handle(&self) -> AstrodevHandle {
        self.handle
    }

    /// Current traffic counters.
    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }

    /// The table this interface records identifiers into.
    pub fn channels(&self) -> &'static ChannelTable {
        self.channels
    }
}

impl NextHop for AstrodevInterface {
    fn name(&self) -> &str {
        &self.name
    }

    fn mtu(&self) -> usize {
        self.mtu
    }

    fn nexthop(&self, packet: Packet, timeout: Duration) -> std::result::Result<(), TxError> {
        self.transmit(packet, timeout)
    }
}

impl std::fmt::Debug for AstrodevInterface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AstrodevInterface")
            .field("name", &self.name)
            .field("mtu", &self.mtu)
            .field("handle", &self.handle)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}
