//! Receive path: radio frame in, network packet out.

use astrolink_frame::decode_frame;
use astrolink_transport::TaskWoken;
use tracing::{debug, warn};

use crate::adapter::AstrodevInterface;
use crate::error::{IfaceError, Result};

impl AstrodevInterface {
    /// Handle one raw frame from the radio driver.
    ///
    /// Valid frames become packets delivered to the stack; the identifier is
    /// then recorded for this interface's module. Anything else is logged and
    /// counted as dropped. Nothing is returned and nothing is retried.
    pub fn receive(&self, raw: &[u8], woken: &mut TaskWoken) {
        match self.try_receive(raw, woken) {
            Ok(id) => debug!(iface = %self.name, len = raw.len(), id, "packet delivered"),
            Err(err) => {
                self.stats.record_rx_dropped();
                warn!(iface = %self.name, len = raw.len(), error = %err, "radio frame dropped");
            }
        }
    }

    fn try_receive(&self, raw: &[u8], woken: &mut TaskWoken) -> Result<u32> {
        let frame = decode_frame(raw, &self.frame_config)?;

        let mut packet = self
            .pool
            .acquire(self.mtu)
            .ok_or(IfaceError::PoolExhausted { size: self.mtu })?;
        if let Err(err) = packet.set_payload(frame.payload) {
            self.pool.release(packet);
            return Err(err.into());
        }
        packet.id = frame.id;

        let id = packet.id;
        let len = packet.len();
        self.stack.deliver(packet, self, woken);
        self.channels.record(self.handle.module, id);
        self.stats.record_rx(len);
        Ok(id)
    }
}
