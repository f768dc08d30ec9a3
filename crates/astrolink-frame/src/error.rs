/// Reasons an inbound radio frame is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FrameError {
    /// Header mode is on and the frame cannot hold a link header plus identifier.
    #[error("frame too short for header ({len} bytes, min {min})")]
    TooShortForHeader { len: usize, min: usize },

    /// The frame cannot hold a network identifier.
    #[error("frame too short ({len} bytes, min {min})")]
    TooShort { len: usize, min: usize },

    /// The identifier-plus-payload length left after stripping is out of range.
    #[error("length out of bounds ({len} bytes, expected {min}..={max})")]
    LengthOutOfBounds { len: usize, min: usize, max: usize },
}

pub type Result<T> = std::result::Result<T, FrameError>;
