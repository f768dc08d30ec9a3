//! Test doubles for the stack, pool and radio.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use astrolink_frame::DEFAULT_MTU;
use astrolink_transport::{HeapPool, Packet, PacketPool, RadioTx, TaskWoken, TransportError};

use crate::channels::ChannelTable;
use crate::error::{IfaceError, Result};
use crate::stack::{NetworkStack, NextHop};

/// A fresh channel table per test, so tests never share slots.
pub(crate) fn leaked_table() -> &'static ChannelTable {
    Box::leak(Box::new(ChannelTable::new()))
}

#[derive(Default)]
pub(crate) struct RecordingStack {
    delivered: Mutex<Vec<(Packet, String)>>,
    registered: Mutex<Vec<(String, usize)>>,
    wake: bool,
    refuse: bool,
}

impl RecordingStack {
    pub(crate) fn waking() -> Self {
        Self {
            wake: true,
            ..Self::default()
        }
    }

    pub(crate) fn refusing_registration() -> Self {
        Self {
            refuse: true,
            ..Self::default()
        }
    }

    pub(crate) fn delivered(&self) -> Vec<(Packet, String)> {
        self.delivered.lock().unwrap().clone()
    }

    pub(crate) fn registered(&self) -> Vec<(String, usize)> {
        self.registered.lock().unwrap().clone()
    }
}

impl NetworkStack for RecordingStack {
    fn deliver(&self, packet: Packet, iface: &dyn NextHop, woken: &mut TaskWoken) {
        if self.wake {
            woken.set();
        }
        self.delivered
            .lock()
            .unwrap()
            .push((packet, iface.name().to_string()));
    }

    fn register_interface(&self, iface: Arc<dyn NextHop>) -> Result<()> {
        if self.refuse {
            return Err(IfaceError::Registration("routing table full".to_string()));
        }
        self.registered
            .lock()
            .unwrap()
            .push((iface.name().to_string(), iface.mtu()));
        Ok(())
    }
}

#[derive(Clone, Default)]
pub(crate) struct RecordingRadio {
    frames: Arc<Mutex<Vec<Vec<u8>>>>,
    timeouts: Arc<Mutex<Vec<Duration>>>,
    failing: Arc<AtomicBool>,
}

impl RecordingRadio {
    pub(crate) fn failing() -> Self {
        let radio = Self::default();
        radio.set_failing(true);
        radio
    }

    pub(crate) fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub(crate) fn frames(&self) -> Vec<Vec<u8>> {
        self.frames.lock().unwrap().clone()
    }

    pub(crate) fn timeouts(&self) -> Vec<Duration> {
        self.timeouts.lock().unwrap().clone()
    }
}

impl RadioTx for RecordingRadio {
    fn transmit(&self, frame: &[u8], timeout: Duration) -> astrolink_transport::Result<()> {
        self.timeouts.lock().unwrap().push(timeout);
        if self.failing.load(Ordering::SeqCst) {
            return Err(TransportError::Radio("no ack from transceiver".to_string()));
        }
        self.frames.lock().unwrap().push(frame.to_vec());
        Ok(())
    }
}

/// Heap pool that counts traffic through it.
pub(crate) struct CountingPool {
    inner: HeapPool,
    acquired: AtomicUsize,
    released: AtomicUsize,
}

impl CountingPool {
    pub(crate) fn new(buffers: usize) -> Self {
        Self {
            inner: HeapPool::new(buffers, DEFAULT_MTU),
            acquired: AtomicUsize::new(0),
            released: AtomicUsize::new(0),
        }
    }

    pub(crate) fn acquired(&self) -> usize {
        self.acquired.load(Ordering::SeqCst)
    }

    pub(crate) fn released(&self) -> usize {
        self.released.load(Ordering::SeqCst)
    }
}

impl PacketPool for CountingPool {
    fn acquire(&self, max_size: usize) -> Option<Packet> {
        self.acquired.fetch_add(1, Ordering::SeqCst);
        self.inner.acquire(max_size)
    }

    fn release(&self, packet: Packet) {
        self.released.fetch_add(1, Ordering::SeqCst);
        self.inner.release(packet);
    }
}

/// A pool with nothing left.
pub(crate) struct EmptyPool;

impl PacketPool for EmptyPool {
    fn acquire(&self, _max_size: usize) -> Option<Packet> {
        None
    }

    fn release(&self, _packet: Packet) {}
}
