use std::os::unix::fs::{FileTypeExt, MetadataExt, PermissionsExt};
use std::os::unix::net::UnixDatagram;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::{debug, info};

use crate::error::{Result, TransportError};
use crate::traits::RadioTx;

/// A radio link over Unix datagram sockets.
///
/// Each datagram is one radio frame, so frame boundaries survive the link
/// the same way they do over the air. The bound side receives frames, the
/// connected side transmits them.
pub struct DatagramRadio {
    socket: UnixDatagram,
    path: PathBuf,
    created_inode: Option<(u64, u64)>,
}

impl DatagramRadio {
    /// Default permission mode for created socket paths.
    pub const DEFAULT_SOCKET_MODE: u32 = 0o600;
    /// Largest datagram accepted by [`recv_frame`](Self::recv_frame) callers.
    pub const MAX_FRAME_LEN: usize = 512;
    /// Unix `sockaddr_un.sun_path` is typically 108 bytes on Linux, 104 on macOS.
    #[cfg(target_os = "linux")]
    const MAX_PATH_LEN: usize = 108;
    #[cfg(not(target_os = "linux"))]
    const MAX_PATH_LEN: usize = 104;

    /// Bind a receiving radio at `path`.
    ///
    /// A stale socket left at `path` is removed first; any other kind of file
    /// is an error.
    pub fn bind(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let path_bytes = path.as_os_str().len();
        if path_bytes >= Self::MAX_PATH_LEN {
            return Err(TransportError::PathTooLong {
                path,
                len: path_bytes,
                max: Self::MAX_PATH_LEN,
            });
        }

        if path.exists() {
            let metadata = std::fs::symlink_metadata(&path).map_err(|e| TransportError::Bind {
                path: path.clone(),
                source: e,
            })?;
            if !metadata.file_type().is_socket() {
                return Err(TransportError::Bind {
                    path: path.clone(),
                    source: std::io::Error::new(
                        std::io::ErrorKind::AlreadyExists,
                        "existing path is not a unix socket",
                    ),
                });
            }
            debug!(?path, "removing stale socket");
            std::fs::remove_file(&path).map_err(|e| TransportError::Bind {
                path: path.clone(),
                source: e,
            })?;
        }

        let socket = UnixDatagram::bind(&path).map_err(|e| TransportError::Bind {
            path: path.clone(),
            source: e,
        })?;

        let bind_err = |e| TransportError::Bind {
            path: path.clone(),
            source: e,
        };
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(Self::DEFAULT_SOCKET_MODE))
            .map_err(bind_err)?;
        let created = std::fs::symlink_metadata(&path).map_err(bind_err)?;
        let created_inode = Some((created.dev(), created.ino()));

        info!(?path, "radio socket bound");

        Ok(Self {
            socket,
            path,
            created_inode,
        })
    }

    /// Open a transmitting radio aimed at the socket bound at `path`.
    pub fn connect(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let socket = UnixDatagram::unbound()?;
        socket.connect(&path).map_err(|e| TransportError::Connect {
            path: path.clone(),
            source: e,
        })?;
        debug!(?path, "radio socket connected");
        Ok(Self {
            socket,
            path,
            created_inode: None,
        })
    }

    /// Receive one frame into `buf`, returning its length.
    ///
    /// Frames longer than `buf` are truncated by the socket.
    pub fn recv_frame(&self, buf: &mut [u8]) -> Result<usize> {
        Ok(self.socket.recv(buf)?)
    }

    /// Bound how long [`recv_frame`](Self::recv_frame) blocks.
    pub fn set_read_timeout(&self, timeout: Option<Duration>) -> Result<()> {
        self.socket.set_read_timeout(timeout).map_err(Into::into)
    }

    /// The socket path this radio is bound or connected to.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RadioTx for DatagramRadio {
    fn transmit(&self, frame: &[u8], timeout: Duration) -> Result<()> {
        // A zero timeout is rejected by the socket API; treat it as "block".
        let timeout = (!timeout.is_zero()).then_some(timeout);
        self.socket.set_write_timeout(timeout)?;

        let written = self.socket.send(frame)?;
        if written != frame.len() {
            return Err(TransportError::ShortWrite {
                written,
                expected: frame.len(),
            });
        }
        Ok(())
    }
}

impl std::fmt::Debug for DatagramRadio {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatagramRadio")
            .field("path", &self.path)
            .field("bound", &self.created_inode.is_some())
            .finish()
    }
}

impl Drop for DatagramRadio {
    fn drop(&mut self) {
        let Some((expected_dev, expected_ino)) = self.created_inode else {
            return;
        };
        if let Ok(metadata) = std::fs::symlink_metadata(&self.path) {
            if metadata.file_type().is_socket()
                && metadata.dev() == expected_dev
                && metadata.ino() == expected_ino
            {
                debug!(path = ?self.path, "cleaning up radio socket");
                let _ = std::fs::remove_file(&self.path);
            } else {
                debug!(
                    path = ?self.path,
                    "socket path identity changed; skipping cleanup"
                );
            }
        }
    }
}
