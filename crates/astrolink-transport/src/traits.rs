use std::time::Duration;

use crate::error::Result;

/// The radio's transmit primitive.
///
/// Bound into an adapter at initialization. `frame` is the complete wire
/// frame; the implementation sends it as one radio transmission or fails.
/// `timeout` is the caller's budget for the attempt. Implementations may use
/// it to bound blocking; the adapter never waits on its own.
pub trait RadioTx: Send + Sync {
    /// Send one frame.
    fn transmit(&self, frame: &[u8], timeout: Duration) -> Result<()>;
}

impl<F> RadioTx for F
where
    F: Fn(&[u8]) -> Result<()> + Send + Sync,
{
    fn transmit(&self, frame: &[u8], _timeout: Duration) -> Result<()> {
        self(frame)
    }
}

/// Set when delivering a packet made a waiting task runnable.
///
/// Receive paths running in interrupt context pass this through to the
/// stack's ingress hand-off and inspect it afterwards to decide whether to
/// yield.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TaskWoken(bool);

impl TaskWoken {
    /// A cleared flag.
    pub fn new() -> Self {
        Self(false)
    }

    /// Record that a task was woken.
    pub fn set(&mut self) {
        self.0 = true;
    }

    /// Whether any hand-off woke a task.
    pub fn is_set(&self) -> bool {
        self.0
    }
}
