use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// Per-interface traffic and error counters.
#[derive(Debug, Default)]
pub struct InterfaceStats {
    rx: AtomicU64,
    rx_bytes: AtomicU64,
    rx_dropped: AtomicU64,
    tx: AtomicU64,
    tx_bytes: AtomicU64,
    tx_error: AtomicU64,
}

/// Point-in-time copy of [`InterfaceStats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsSnapshot {
    /// Packets delivered to the stack.
    pub rx: u64,
    /// Payload bytes delivered to the stack.
    pub rx_bytes: u64,
    /// Inbound frames dropped (malformed or no buffer).
    pub rx_dropped: u64,
    /// Frames handed to the radio.
    pub tx: u64,
    /// Wire bytes handed to the radio.
    pub tx_bytes: u64,
    /// Transmissions that failed.
    pub tx_error: u64,
}

impl InterfaceStats {
    pub(crate) fn record_rx(&self, bytes: usize) {
        self.rx.fetch_add(1, Ordering::Relaxed);
        self.rx_bytes.fetch_add(bytes as u64, Ordering::Relaxed);
    }

    pub(crate) fn record_rx_dropped(&self) {
        self.rx_dropped.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_tx(&self, bytes: usize) {
        self.tx.fetch_add(1, Ordering::Relaxed);
        self.tx_bytes.fetch_add(bytes as u64, Ordering::Relaxed);
    }

    pub(crate) fn record_tx_error(&self) {
        self.tx_error.fetch_add(1, Ordering::Relaxed);
    }

    /// Read every counter.
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            rx: self.rx.load(Ordering::Relaxed),
            rx_bytes: self.rx_bytes.load(Ordering::Relaxed),
            rx_dropped: self.rx_dropped.load(Ordering::Relaxed),
            tx: self.tx.load(Ordering::Relaxed),
            tx_bytes: self.tx_bytes.load(Ordering::Relaxed),
            tx_error: self.tx_error.load(Ordering::Relaxed),
        }
    }
}
