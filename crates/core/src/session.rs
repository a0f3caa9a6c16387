//! Device session: an open hiddev node and the ioctls issued on it.

use crate::error::{Error, Result};
use crate::ioctl::RequestCode;
use crate::transport::HiddevTransport;
use std::fs::File;
use std::os::unix::io::AsRawFd;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default hiddev node used when no device path is configured.
pub const DEFAULT_DEVICE: &str = "/dev/usb/hiddev0";

/// Exclusive handle to one hiddev character device.
///
/// The kernel keeps per-handle report state between usage-set calls and the
/// final report commit, so a session must be driven by one sequence of calls
/// at a time.
#[derive(Debug)]
pub struct DeviceSession {
    file: File,
    path: PathBuf,
}

impl DeviceSession {
    /// Open `path` read-only.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| Error::DeviceNotFound {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "Opened hiddev node");
        Ok(Self {
            file,
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HiddevTransport for DeviceSession {
    fn ioctl(&self, request: RequestCode, buf: &mut [u8]) -> Result<i32> {
        if buf.len() != request.size() {
            return Err(Error::LayoutMismatch {
                record: "ioctl argument",
                expected: request.size(),
                actual: buf.len(),
            });
        }

        let fd = self.file.as_raw_fd();
        // SAFETY: `fd` stays open for the lifetime of `self`. `buf` is a live
        // mutable slice whose length equals the size encoded in `request`,
        // which is the number of bytes the kernel reads or writes.
        let rv = unsafe { libc::ioctl(fd, request.bits() as _, buf.as_mut_ptr()) };
        if rv < 0 {
            return Err(Error::Ioctl {
                request,
                source: std::io::Error::last_os_error(),
            });
        }
        Ok(rv)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hiddev::{IntArg, HIDIOCGVERSION};
    use crate::record::Record;

    #[test]
    fn open_missing_node_is_device_not_found() {
        let err = DeviceSession::open("/nonexistent/hiddev9").unwrap_err();
        match err {
            Error::DeviceNotFound { path, .. } => {
                assert_eq!(path, PathBuf::from("/nonexistent/hiddev9"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn device_not_found_message_names_path() {
        let err = DeviceSession::open("/nonexistent/hiddev9").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/hiddev9"));
    }

    #[test]
    fn ioctl_on_regular_file_fails() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let session = DeviceSession::open(file.path()).unwrap();
        assert_eq!(session.path(), file.path());

        let mut buf = vec![0u8; IntArg::SIZE];
        let err = session.ioctl(HIDIOCGVERSION, &mut buf).unwrap_err();
        match err {
            Error::Ioctl { request, source } => {
                assert_eq!(request, HIDIOCGVERSION);
                assert_eq!(source.raw_os_error(), Some(libc::ENOTTY));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn ioctl_rejects_buffer_of_wrong_size() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let session = DeviceSession::open(file.path()).unwrap();
        let mut buf = vec![0u8; 3];
        assert!(matches!(
            session.ioctl(HIDIOCGVERSION, &mut buf),
            Err(Error::LayoutMismatch {
                expected: 4,
                actual: 3,
                ..
            })
        ));
    }
}
