//! ioctl request-code numbering.
//!
//! A request code packs four things into 32 bits:
//!
//! ```text
//!  31..29    28..23   22..16      15..8         7..0
//! [direction][  0  ][  size  ][subsystem tag][operation]
//! ```
//!
//! The size field is 7 bits wide. A record that does not fit is rejected
//! rather than masked, since a truncated size would address a different
//! operation on the kernel side.

use crate::error::{Error, Result};
use crate::record::Record;
use std::fmt;

/// Subsystem tag for the HID device interface.
pub const HID_TAG: u8 = b'H';

/// Largest payload size the request code can carry.
pub const MAX_PAYLOAD_SIZE: usize = 0x7F;

const SIZE_SHIFT: u32 = 16;
const TAG_SHIFT: u32 = 8;

/// Which way the ioctl argument buffer travels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// No argument buffer.
    None,
    /// Kernel fills the buffer.
    Read,
    /// Kernel consumes the buffer.
    Write,
    /// Kernel consumes the buffer and writes results back into it.
    ReadWrite,
}

impl Direction {
    pub const fn bits(self) -> u32 {
        match self {
            Self::None => 0x2000_0000,
            Self::Write => 0x4000_0000,
            Self::Read => 0x8000_0000,
            Self::ReadWrite => 0x8000_0000 | 0x4000_0000,
        }
    }
}

/// A derived ioctl request code.
///
/// Stored as the signed 32-bit value native ioctl signatures take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestCode(i32);

impl RequestCode {
    /// Build a request code, or `None` if `size` overflows the size field.
    pub const fn checked(direction: Direction, size: usize, tag: u8, number: u8) -> Option<Self> {
        if size > MAX_PAYLOAD_SIZE {
            return None;
        }
        let bits: u32 = direction.bits()
            | ((size as u32) << SIZE_SHIFT)
            | ((tag as u32) << TAG_SHIFT)
            | number as u32;
        // Two's-complement reinterpretation of the same 32 bits. Codes with
        // the Read bit set come out negative.
        Some(Self(i32::from_ne_bytes(bits.to_ne_bytes())))
    }

    /// Runtime derivation for an arbitrary payload size.
    pub fn derive(direction: Direction, size: usize, tag: u8, number: u8) -> Result<Self> {
        Self::checked(direction, size, tag, number).ok_or(Error::RequestTooLarge { size })
    }

    /// Request code for a HID operation whose argument is the record `R`.
    ///
    /// Meant for `const` items: an oversized record fails compilation.
    pub const fn hid<R: Record>(direction: Direction, number: u8) -> Self {
        match Self::checked(direction, R::SIZE, HID_TAG, number) {
            Some(code) => code,
            None => panic!("record does not fit the ioctl size field"),
        }
    }

    /// Request code for a HID operation without an argument buffer.
    pub const fn hid_none(number: u8) -> Self {
        match Self::checked(Direction::None, 0, HID_TAG, number) {
            Some(code) => code,
            None => panic!("unreachable: zero-sized request"),
        }
    }

    /// Signed value, as passed to `ioctl(2)`.
    pub const fn value(self) -> i32 {
        self.0
    }

    /// Same 32 bits, unsigned.
    pub const fn bits(self) -> u32 {
        u32::from_ne_bytes(self.0.to_ne_bytes())
    }

    /// Size field, in bytes.
    pub const fn size(self) -> usize {
        ((self.bits() >> SIZE_SHIFT) as usize) & MAX_PAYLOAD_SIZE
    }

    /// Operation number within the subsystem.
    pub const fn number(self) -> u8 {
        (self.bits() & 0xFF) as u8
    }
}

impl fmt::Display for RequestCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08X}", self.bits())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_flag_request() {
        let code = RequestCode::derive(Direction::Write, 4, HID_TAG, 0x0F).unwrap();
        assert_eq!(code.bits(), 0x4004_480F);
        assert_eq!(code.value(), 0x4004_480F);
    }

    #[test]
    fn read_requests_are_negative() {
        let code = RequestCode::derive(Direction::Read, 4, HID_TAG, 0x01).unwrap();
        assert_eq!(code.bits(), 0x8004_4801);
        assert_eq!(code.value(), 0x8004_4801u32 as i32);
        assert!(code.value() < 0);
    }

    #[test]
    fn read_write_sets_both_bits() {
        let code = RequestCode::derive(Direction::ReadWrite, 24, HID_TAG, 0x0B).unwrap();
        assert_eq!(code.bits(), 0xC018_480B);
    }

    #[test]
    fn no_argument_request() {
        let code = RequestCode::hid_none(0x05);
        assert_eq!(code.bits(), 0x2000_4805);
        assert_eq!(code.size(), 0);
    }

    #[test]
    fn size_and_number_accessors() {
        let code = RequestCode::derive(Direction::Write, 12, HID_TAG, 0x08).unwrap();
        assert_eq!(code.size(), 12);
        assert_eq!(code.number(), 0x08);
    }

    #[test]
    fn largest_size_is_accepted() {
        let code = RequestCode::derive(Direction::Read, 127, HID_TAG, 0x06).unwrap();
        assert_eq!(code.bits(), 0x807F_4806);
    }

    #[test]
    fn oversized_payload_is_rejected() {
        assert!(matches!(
            RequestCode::derive(Direction::Read, 128, HID_TAG, 0x06),
            Err(Error::RequestTooLarge { size: 128 })
        ));
        assert!(RequestCode::checked(Direction::Read, 260, HID_TAG, 0x04).is_none());
    }

    #[test]
    fn derivation_is_deterministic() {
        let a = RequestCode::derive(Direction::ReadWrite, 56, HID_TAG, 0x0A).unwrap();
        let b = RequestCode::derive(Direction::ReadWrite, 56, HID_TAG, 0x0A).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn display_is_hex() {
        let code = RequestCode::derive(Direction::Write, 4, HID_TAG, 0x0F).unwrap();
        assert_eq!(code.to_string(), "0x4004480F");
    }
}
