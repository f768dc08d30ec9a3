use std::fmt;
use std::io;

use astrolink_frame::FrameError;
use astrolink_iface::{IfaceError, TxError};
use astrolink_transport::TransportError;

// Stable process exit codes.
pub const SUCCESS: i32 = 0;
pub const FAILURE: i32 = 1;
pub const TRANSPORT_ERROR: i32 = 3;
pub const PERMISSION_DENIED: i32 = 50;
pub const DATA_INVALID: i32 = 60;
pub const USAGE: i32 = 64;
pub const TIMEOUT: i32 = 124;
pub const INTERNAL: i32 = 125;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug)]
pub struct CliError {
    pub code: i32,
    pub message: String,
}

impl CliError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

pub fn io_error(context: &str, err: io::Error) -> CliError {
    let code = match err.kind() {
        io::ErrorKind::PermissionDenied => PERMISSION_DENIED,
        io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock => TIMEOUT,
        io::ErrorKind::ConnectionRefused | io::ErrorKind::NotFound => FAILURE,
        _ => INTERNAL,
    };
    CliError::new(code, format!("{context}: {err}"))
}

pub fn transport_error(context: &str, err: TransportError) -> CliError {
    match err {
        TransportError::Bind { source, .. }
        | TransportError::Connect { source, .. }
        | TransportError::Io(source) => io_error(context, source),
        TransportError::PayloadTooLarge { .. } => {
            CliError::new(DATA_INVALID, format!("{context}: {err}"))
        }
        TransportError::PathTooLong { .. } => CliError::new(USAGE, format!("{context}: {err}")),
        other => CliError::new(TRANSPORT_ERROR, format!("{context}: {other}")),
    }
}

pub fn frame_error(context: &str, err: FrameError) -> CliError {
    CliError::new(DATA_INVALID, format!("{context}: {err}"))
}

pub fn iface_error(context: &str, err: IfaceError) -> CliError {
    match err {
        IfaceError::Frame(err) => frame_error(context, err),
        IfaceError::Transport(err) => transport_error(context, err),
        IfaceError::InvalidConfig(_) | IfaceError::Json(_) => {
            CliError::new(USAGE, format!("{context}: {err}"))
        }
        other => CliError::new(INTERNAL, format!("{context}: {other}")),
    }
}

pub fn tx_error(context: &str, err: TxError) -> CliError {
    match err {
        TxError::TransmitFailed { source, .. } if !source.is_timeout() => {
            transport_error(context, source)
        }
        TxError::TransmitFailed { .. } => CliError::new(TIMEOUT, format!("{context}: {err}")),
        TxError::OutOfMemory { .. } => CliError::new(INTERNAL, format!("{context}: {err}")),
    }
}

#[cfg(test)]
mod tests {
    use astrolink_transport::Packet;

    use super::*;

    #[test]
    fn malformed_frames_are_data_invalid() {
        let err = frame_error("decode", FrameError::TooShort { len: 1, min: 4 });
        assert_eq!(err.code, DATA_INVALID);
        assert!(err.message.starts_with("decode: "));
    }

    #[test]
    fn radio_timeouts_map_to_124() {
        let err = tx_error(
            "send",
            TxError::TransmitFailed {
                packet: Packet::new(1, b""),
                source: TransportError::Io(io::Error::from(io::ErrorKind::WouldBlock)),
            },
        );
        assert_eq!(err.code, TIMEOUT);
    }

    #[test]
    fn radio_failures_map_to_transport_error() {
        let err = tx_error(
            "send",
            TxError::TransmitFailed {
                packet: Packet::new(1, b""),
                source: TransportError::Radio("carrier lost".to_string()),
            },
        );
        assert_eq!(err.code, TRANSPORT_ERROR);
    }

    #[test]
    fn config_errors_are_usage() {
        let err = iface_error("config", IfaceError::InvalidConfig("empty".to_string()));
        assert_eq!(err.code, USAGE);
    }
}
