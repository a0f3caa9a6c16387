//! Error types for gmouse-core.

use crate::ioctl::RequestCode;
use std::path::PathBuf;
use thiserror::Error;

/// Core library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Device node missing or not readable.
    #[error("no such device {}: {source}", path.display())]
    DeviceNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Vendor/product pair is not a supported G-series mouse.
    #[error("unsupported device: vendor {vendor} (0x{vendor:04X}), product {product} (0x{product:04X})")]
    UnsupportedDevice { vendor: u16, product: u16 },

    /// The kernel rejected an ioctl.
    #[error("ioctl {request} failed: {source}")]
    Ioctl {
        request: RequestCode,
        #[source]
        source: std::io::Error,
    },

    /// A buffer does not match the declared layout of a record.
    #[error("layout mismatch in {record}: expected {expected} bytes, got {actual}")]
    LayoutMismatch {
        record: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Record too large for the 7-bit size field of an ioctl request code.
    #[error("ioctl payload of {size} bytes does not fit the request size field")]
    RequestTooLarge { size: usize },

    /// Command payloads are exactly six bytes.
    #[error("command payload must be 6 bytes, got {len}")]
    InvalidPayload { len: usize },

    /// Settings file could not be read or parsed.
    #[error("config error: {0}")]
    Config(String),
}

/// Convenience Result alias.
pub type Result<T> = std::result::Result<T, Error>;
