//! Transmit path: network packet in, radio frame out.

use std::time::Duration;

use astrolink_frame::{encode_packet, wire_len};
use astrolink_transport::Packet;
use tracing::{debug, warn};

use crate::adapter::AstrodevInterface;
use crate::error::TxError;

impl AstrodevInterface {
    /// Frame `packet` and hand it to the radio.
    ///
    /// The identifier is recorded for this interface's module before the
    /// attempt. On success the packet is released to the pool. On failure it
    /// is returned inside the error untouched and the transmit-error counter
    /// is bumped. `timeout` is forwarded to the radio; nothing here waits or
    /// retries.
    pub fn transmit(&self, packet: Packet, timeout: Duration) -> Result<(), TxError> {
        let size = wire_len(packet.len());

        let mut txbuf: Vec<u8> = Vec::new();
        if let Err(err) = txbuf.try_reserve_exact(size) {
            self.stats.record_tx_error();
            warn!(iface = %self.name, size, error = %err, "transmit buffer allocation failed");
            return Err(TxError::OutOfMemory { size, packet });
        }

        self.channels.record(self.handle.module, packet.id);
        encode_packet(&packet, &mut txbuf);

        match self.radio.transmit(&txbuf, timeout) {
            Ok(()) => {
                self.stats.record_tx(size);
                debug!(iface = %self.name, id = packet.id, size, "packet transmitted");
                self.pool.release(packet);
                Ok(())
            }
            Err(source) => {
                self.stats.record_tx_error();
                warn!(iface = %self.name, id = packet.id, error = %source, "radio transmit failed");
                Err(TxError::TransmitFailed { packet, source })
            }
        }
    }
}
