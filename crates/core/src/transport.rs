//! hiddev transport abstraction.
//!
//! Provides a trait-based transport layer so that a real device node and a
//! mock device share the same interface.

use crate::error::Result;
use crate::ioctl::RequestCode;
use crate::record::{pack, unpack, Record};
use tracing::trace;

/// Abstraction over a single ioctl on an open device handle.
///
/// The kernel may read and/or overwrite `buf` depending on the request's
/// direction bits. Calls on one transport must not be interleaved.
pub trait HiddevTransport: Send {
    /// Issue `request` with `buf` as its argument. Returns the ioctl's
    /// non-negative return value.
    fn ioctl(&self, request: RequestCode, buf: &mut [u8]) -> Result<i32>;
}

/// Pack `record`, issue `request` with it, and unpack whatever the kernel
/// left in the buffer back into `record`.
pub fn issue<R: Record>(
    transport: &dyn HiddevTransport,
    request: RequestCode,
    record: &mut R,
) -> Result<i32> {
    let mut buf = pack(record)?;
    trace!(
        request = %request,
        record = R::NAME,
        buf_hex = format_args!("{:02X?}", buf),
        "ioctl TX"
    );

    let rv = transport.ioctl(request, &mut buf)?;
    *record = unpack(&buf)?;

    trace!(
        request = %request,
        rv = rv,
        buf_hex = format_args!("{:02X?}", buf),
        "ioctl RX"
    );
    Ok(rv)
}
