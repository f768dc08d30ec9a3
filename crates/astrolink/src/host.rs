//! Minimal in-process network stack for driving an interface from the CLI.

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use astrolink_frame::TRAILER_SIZE;
use astrolink_iface::{NetworkStack, NextHop, Result};
use astrolink_transport::{Packet, RadioTx, TaskWoken};
use tracing::debug;

/// A delivered packet and the interface it came in on.
pub type Delivery = (Packet, String);

/// Hands delivered packets to a channel and remembers registrations.
#[derive(Default)]
pub struct HostStack {
    deliveries: Option<Sender<Delivery>>,
    interfaces: Mutex<Vec<String>>,
}

impl HostStack {
    /// A stack whose deliveries are read from the returned receiver.
    pub fn channel() -> (Arc<Self>, Receiver<Delivery>) {
        let (tx, rx) = mpsc::channel();
        let stack = Self {
            deliveries: Some(tx),
            interfaces: Mutex::new(Vec::new()),
        };
        (Arc::new(stack), rx)
    }

    /// Names of registered interfaces.
    pub fn interfaces(&self) -> Vec<String> {
        self.interfaces
            .lock()
            .map(|names| names.clone())
            .unwrap_or_default()
    }
}

impl NetworkStack for HostStack {
    fn deliver(&self, packet: Packet, iface: &dyn NextHop, _woken: &mut TaskWoken) {
        let Some(tx) = &self.deliveries else {
            debug!(iface = iface.name(), id = packet.id, "no consumer; packet discarded");
            return;
        };
        let delivery = (packet, iface.name().to_string());
        if let Err(mpsc::SendError((packet, name))) = tx.send(delivery) {
            debug!(iface = %name, id = packet.id, "consumer gone; packet discarded");
        }
    }

    fn register_interface(&self, iface: Arc<dyn NextHop>) -> Result<()> {
        if let Ok(mut names) = self.interfaces.lock() {
            names.push(iface.name().to_string());
        }
        Ok(())
    }
}

/// Stands in for the far transceiver: appends the link trailer a real radio
/// adds on the air, so a peer running `receive` can decode what we send.
pub struct TrailingRadio<R> {
    inner: R,
}

impl<R: RadioTx> TrailingRadio<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }
}

impl<R: RadioTx> RadioTx for TrailingRadio<R> {
    fn transmit(&self, frame: &[u8], timeout: Duration) -> astrolink_transport::Result<()> {
        let mut air = Vec::with_capacity(frame.len() + TRAILER_SIZE);
        air.extend_from_slice(frame);
        air.resize(frame.len() + TRAILER_SIZE, 0);
        self.inner.transmit(&air, timeout)
    }
}
