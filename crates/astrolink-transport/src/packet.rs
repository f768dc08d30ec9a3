use bytes::BytesMut;

use crate::error::{Result, TransportError};

/// A network-layer packet buffer.
///
/// The identifier is always held in host byte order; only the codec ever sees
/// its wire form. The payload buffer has a fixed capacity chosen when the
/// buffer was acquired from a [`PacketPool`](crate::PacketPool).
///
/// Clones and packets built with [`Packet::new`] or [`Packet::with_capacity`]
/// belong to no pool; equality ignores where a buffer came from.
#[derive(Debug)]
pub struct Packet {
    /// Network identifier (addressing and priority fields), host order.
    pub id: u32,
    data: BytesMut,
    capacity: usize,
    origin: Option<u64>,
}

impl Packet {
    /// Create an empty packet able to hold `capacity` payload bytes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            id: 0,
            data: BytesMut::with_capacity(capacity),
            capacity,
            origin: None,
        }
    }

    /// An empty buffer issued by the pool identified by `pool_id`.
    pub(crate) fn issued_by(pool_id: u64, capacity: usize) -> Self {
        Self {
            origin: Some(pool_id),
            ..Self::with_capacity(capacity)
        }
    }

    /// Identifier of the pool that issued this buffer, if any.
    pub(crate) fn origin(&self) -> Option<u64> {
        self.origin
    }

    /// Create a packet holding exactly `payload`.
    pub fn new(id: u32, payload: &[u8]) -> Self {
        Self {
            id,
            data: BytesMut::from(payload),
            capacity: payload.len(),
            origin: None,
        }
    }

    /// Replace the payload.
    ///
    /// Fails without touching the buffer if `payload` exceeds the capacity.
    pub fn set_payload(&mut self, payload: &[u8]) -> Result<()> {
        if payload.len() > self.capacity {
            return Err(TransportError::PayloadTooLarge {
                size: payload.len(),
                capacity: self.capacity,
            });
        }
        self.data.clear();
        self.data.extend_from_slice(payload);
        Ok(())
    }

    /// The payload bytes (identifier excluded).
    pub fn payload(&self) -> &[u8] {
        &self.data
    }

    /// Payload length in bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True when the payload is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Maximum payload this buffer accepts.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Drop the payload and reset the identifier, keeping the allocation.
    pub fn clear(&mut self) {
        self.id = 0;
        self.data.clear();
    }
}

impl Clone for Packet {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            data: self.data.clone(),
            capacity: self.capacity,
            origin: None,
        }
    }
}

impl PartialEq for Packet {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.capacity == other.capacity && self.data == other.data
    }
}

impl Eq for Packet {}
