//! Last network identifier seen per radio module.
//!
//! Telemetry beacons report these values. Each slot is a single atomic store,
//! so concurrent writers from the receive and transmit paths race benignly:
//! the last write wins.

use std::sync::atomic::{AtomicU32, Ordering};

/// Number of radio modules tracked.
pub const NUM_MODULES: usize = 4;

static CHANNEL_TABLE: ChannelTable = ChannelTable::new();

/// The process-wide table used by interfaces unless told otherwise.
pub fn channel_table() -> &'static ChannelTable {
    &CHANNEL_TABLE
}

/// Fixed table of identifiers indexed by module number.
#[derive(Debug)]
pub struct ChannelTable {
    slots: [AtomicU32; NUM_MODULES],
}

impl ChannelTable {
    /// A table with every slot zeroed.
    pub const fn new() -> Self {
        Self {
            slots: [const { AtomicU32::new(0) }; NUM_MODULES],
        }
    }

    /// Store `id` for `module`. Out-of-range modules are ignored.
    pub fn record(&self, module: usize, id: u32) {
        if let Some(slot) = self.slots.get(module) {
            slot.store(id, Ordering::Relaxed);
        }
    }

    /// Last identifier stored for `module`, or `None` when out of range.
    pub fn read(&self, module: usize) -> Option<u32> {
        self.slots.get(module).map(|slot| slot.load(Ordering::Relaxed))
    }

    /// Copy of every slot.
    pub fn snapshot(&self) -> [u32; NUM_MODULES] {
        std::array::from_fn(|module| self.slots[module].load(Ordering::Relaxed))
    }

    /// Zero every slot.
    pub fn reset(&self) {
        for slot in &self.slots {
            slot.store(0, Ordering::Relaxed);
        }
    }
}

impl Default for ChannelTable {
    fn default() -> Self {
        Self::new()
    }
}
