//! gmouse-core: hiddev record codec, ioctl numbering, and the G-series
//! command protocol.
//!
//! This crate talks to Logitech G3/G5/G7/G9 mice through the Linux hiddev
//! interface (`/dev/usb/hiddev*`), without any vendor driver.

pub mod command;
pub mod error;
pub mod hiddev;
pub mod identify;
pub mod inspect;
#[cfg(test)]
mod integration_tests;
pub mod ioctl;
pub mod payload;
pub mod record;
pub mod session;
pub mod settings;
pub mod transport;

/// Logitech USB Vendor ID (1133).
pub const LOGITECH_VID: u16 = 0x046D;

/// Known G-series product IDs.
pub mod pids {
    /// G5, first hardware generation (49217).
    pub const G5_FIRST: u16 = 0xC041;
    /// G5, second hardware generation (49225).
    pub const G5_SECOND: u16 = 0xC049;
    /// G7 (50458).
    pub const G7: u16 = 0xC51A;
    /// G3 (49218).
    pub const G3: u16 = 0xC042;
    /// G9 (49224).
    pub const G9: u16 = 0xC048;
}
