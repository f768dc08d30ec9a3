use std::path::PathBuf;

/// Errors raised by packet buffers and radio transports.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// Failed to bind the radio socket.
    #[error("failed to bind to {path}: {source}")]
    Bind {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to connect the radio socket to its peer.
    #[error("failed to connect to {path}: {source}")]
    Connect {
        path: PathBuf,
        source: std::io::Error,
    },

    /// An I/O error occurred on the radio socket.
    #[error("transport I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The socket path is too long for the platform.
    #[error("socket path too long ({len} bytes, max {max}): {path}")]
    PathTooLong {
        path: PathBuf,
        len: usize,
        max: usize,
    },

    /// The radio accepted fewer bytes than the frame holds.
    #[error("short radio write ({written} of {expected} bytes)")]
    ShortWrite { written: usize, expected: usize },

    /// The radio driver reported a failure.
    #[error("radio failure: {0}")]
    Radio(String),

    /// A payload does not fit the packet buffer.
    #[error("payload too large ({size} bytes, capacity {capacity})")]
    PayloadTooLarge { size: usize, capacity: usize },
}

impl TransportError {
    /// True when the failure is a timeout reported by the radio.
    pub fn is_timeout(&self) -> bool {
        match self {
            TransportError::Io(err) => matches!(
                err.kind(),
                std::io::ErrorKind::TimedOut | std::io::ErrorKind::WouldBlock
            ),
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, TransportError>;
