use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use tracing::{debug, trace, warn};

use crate::packet::Packet;

/// Default number of buffers a [`HeapPool`] hands out at once.
pub const DEFAULT_POOL_BUFFERS: usize = 10;

/// Source of packet buffers owned by the network stack.
///
/// `acquire` never blocks; an exhausted pool returns `None` and the caller
/// drops whatever it was trying to deliver.
pub trait PacketPool: Send + Sync {
    /// Take a buffer able to hold at least `max_size` payload bytes.
    fn acquire(&self, max_size: usize) -> Option<Packet>;

    /// Return a buffer to the pool.
    fn release(&self, packet: Packet);
}

static NEXT_POOL_ID: AtomicU64 = AtomicU64::new(1);

/// Heap-backed pool with a fixed number of outstanding buffers.
///
/// Only buffers this pool issued count against the limit. Releasing anything
/// else (a clone, a packet built by hand, another pool's buffer) is logged and
/// ignored.
#[derive(Debug)]
pub struct HeapPool {
    id: u64,
    buffers: usize,
    buffer_size: usize,
    outstanding: AtomicUsize,
}

impl HeapPool {
    /// Create a pool of `buffers` buffers of up to `buffer_size` bytes each.
    pub fn new(buffers: usize, buffer_size: usize) -> Self {
        Self {
            id: NEXT_POOL_ID.fetch_add(1, Ordering::Relaxed),
            buffers,
            buffer_size,
            outstanding: AtomicUsize::new(0),
        }
    }

    /// Number of buffers currently handed out.
    pub fn outstanding(&self) -> usize {
        self.outstanding.load(Ordering::Acquire)
    }

    /// Total number of buffers.
    pub fn capacity(&self) -> usize {
        self.buffers
    }

    /// Largest payload a single buffer holds.
    pub fn buffer_size(&self) -> usize {
        self.buffer_size
    }
}

impl PacketPool for HeapPool {
    fn acquire(&self, max_size: usize) -> Option<Packet> {
        if max_size > self.buffer_size {
            debug!(
                max_size,
                buffer_size = self.buffer_size,
                "requested buffer larger than pool buffers"
            );
            return None;
        }

        let buffers = self.buffers;
        let reserved = self
            .outstanding
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| {
                (n < buffers).then_some(n + 1)
            });
        if reserved.is_err() {
            debug!(buffers, "packet pool exhausted");
            return None;
        }

        trace!(max_size, "packet buffer acquired");
        Some(Packet::issued_by(self.id, self.buffer_size))
    }

    fn release(&self, packet: Packet) {
        if packet.origin() != Some(self.id) {
            warn!(
                id = packet.id,
                origin = ?packet.origin(),
                pool = self.id,
                "ignoring release of a buffer this pool did not issue"
            );
            return;
        }
        drop(packet);

        let released = self
            .outstanding
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| n.checked_sub(1));
        if released.is_err() {
            warn!(pool = self.id, "packet buffer released with none outstanding");
            return;
        }
        trace!("packet buffer released");
    }
}
