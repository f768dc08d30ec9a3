use astrolink_frame::FrameError;
use astrolink_transport::{Packet, TransportError};

/// Errors raised while receiving frames or setting up an interface.
#[derive(Debug, thiserror::Error)]
pub enum IfaceError {
    /// The inbound frame failed validation.
    #[error("malformed frame: {0}")]
    Frame(#[from] FrameError),

    /// The packet pool had no buffer to give.
    #[error("packet pool exhausted (requested {size} bytes)")]
    PoolExhausted { size: usize },

    /// Packet buffer or radio error.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Adapter configuration is unusable.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration document could not be parsed.
    #[error("configuration parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// The network stack refused the interface.
    #[error("interface registration failed: {0}")]
    Registration(String),
}

pub type Result<T> = std::result::Result<T, IfaceError>;

/// A failed transmission.
///
/// The packet is never released to the pool on failure; it comes back to the
/// caller, who decides whether to retry or drop it.
#[derive(Debug, thiserror::Error)]
pub enum TxError {
    /// No memory for the transmit buffer.
    #[error("no memory for {size}-byte transmit buffer")]
    OutOfMemory { size: usize, packet: Packet },

    /// The radio reported a failure.
    #[error("radio transmit failed: {source}")]
    TransmitFailed {
        packet: Packet,
        #[source]
        source: TransportError,
    },
}

impl TxError {
    /// Transmit failures are reported as timeouts to the stack.
    pub fn is_timeout(&self) -> bool {
        matches!(self, TxError::TransmitFailed { .. })
    }

    /// True when the transmit buffer could not be allocated.
    pub fn is_out_of_memory(&self) -> bool {
        matches!(self, TxError::OutOfMemory { .. })
    }

    /// The packet that was not sent.
    pub fn packet(&self) -> &Packet {
        match self {
            TxError::OutOfMemory { packet, .. } | TxError::TransmitFailed { packet, .. } => packet,
        }
    }

    /// Take back ownership of the packet that was not sent.
    pub fn into_packet(self) -> Packet {
        match self {
            TxError::OutOfMemory { packet, .. } | TxError::TransmitFailed { packet, .. } => packet,
        }
    }
}
