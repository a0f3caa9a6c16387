//! Fixed-layout binary records.
//!
//! Every hiddev ioctl argument is a C struct. Each one is modelled as a Rust
//! struct implementing [`Record`], which declares its field table in kernel
//! order. [`pack`] and [`unpack`] walk that table, so a record's `encode` and
//! `decode` can only emit or consume fields in the declared order and widths.
//!
//! Integers use native byte order, as the kernel reads them straight out of
//! process memory. Alignment padding is declared as [`FieldKind::Pad`] and
//! written as zeros; it never appears in the Rust struct.

use crate::error::{Error, Result};

/// Primitive type of one record field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    U32,
    I32,
    U16,
    /// Fixed-length raw bytes.
    Bytes(usize),
    /// Alignment padding.
    Pad(usize),
}

impl FieldKind {
    /// Width in bytes.
    pub const fn width(&self) -> usize {
        match self {
            Self::U32 | Self::I32 => 4,
            Self::U16 => 2,
            Self::Bytes(n) | Self::Pad(n) => *n,
        }
    }
}

/// One named entry of a record layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub name: &'static str,
    pub kind: FieldKind,
}

impl Field {
    pub const fn new(name: &'static str, kind: FieldKind) -> Self {
        Self { name, kind }
    }
}

/// Total byte length of a layout.
pub const fn layout_size(fields: &[Field]) -> usize {
    let mut total = 0;
    let mut i = 0;
    while i < fields.len() {
        total += fields[i].kind.width();
        i += 1;
    }
    total
}

/// A struct with a fixed, kernel-defined byte layout.
pub trait Record: Sized {
    /// C struct name, used in error messages and logs.
    const NAME: &'static str;
    /// Fields in memory order.
    const FIELDS: &'static [Field];
    /// Size of the packed buffer.
    const SIZE: usize = layout_size(Self::FIELDS);

    /// Write each non-padding field, in declared order.
    fn encode(&self, enc: &mut Encoder) -> Result<()>;

    /// Read each non-padding field, in declared order.
    fn decode(dec: &mut Decoder<'_>) -> Result<Self>;
}

/// Pack a record into a buffer of exactly `R::SIZE` bytes.
pub fn pack<R: Record>(record: &R) -> Result<Vec<u8>> {
    let mut enc = Encoder::new::<R>();
    record.encode(&mut enc)?;
    enc.finish()
}

/// Unpack a buffer of exactly `R::SIZE` bytes.
pub fn unpack<R: Record>(bytes: &[u8]) -> Result<R> {
    if bytes.len() != R::SIZE {
        return Err(Error::LayoutMismatch {
            record: R::NAME,
            expected: R::SIZE,
            actual: bytes.len(),
        });
    }
    let mut dec = Decoder::new::<R>(bytes);
    let record = R::decode(&mut dec)?;
    dec.finish()?;
    Ok(record)
}

/// Field-checked writer used by [`Record::encode`].
pub struct Encoder {
    record: &'static str,
    fields: &'static [Field],
    next: usize,
    size: usize,
    buf: Vec<u8>,
}

impl Encoder {
    fn new<R: Record>() -> Self {
        Self {
            record: R::NAME,
            fields: R::FIELDS,
            next: 0,
            size: R::SIZE,
            buf: Vec::with_capacity(R::SIZE),
        }
    }

    fn mismatch(&self, width: usize) -> Error {
        Error::LayoutMismatch {
            record: self.record,
            expected: self.size,
            actual: self.buf.len() + width,
        }
    }

    /// Advance to the next value field, zero-filling any padding on the way.
    fn expect(&mut self, kind: FieldKind) -> Result<()> {
        let fields = self.fields;
        while let Some(field) = fields.get(self.next) {
            self.next += 1;
            match field.kind {
                FieldKind::Pad(n) => self.buf.resize(self.buf.len() + n, 0),
                k if k == kind => return Ok(()),
                _ => return Err(self.mismatch(kind.width())),
            }
        }
        Err(self.mismatch(kind.width()))
    }

    pub fn u32(&mut self, value: u32) -> Result<()> {
        self.expect(FieldKind::U32)?;
        self.buf.extend_from_slice(&value.to_ne_bytes());
        Ok(())
    }

    pub fn i32(&mut self, value: i32) -> Result<()> {
        self.expect(FieldKind::I32)?;
        self.buf.extend_from_slice(&value.to_ne_bytes());
        Ok(())
    }

    pub fn u16(&mut self, value: u16) -> Result<()> {
        self.expect(FieldKind::U16)?;
        self.buf.extend_from_slice(&value.to_ne_bytes());
        Ok(())
    }

    pub fn bytes(&mut self, value: &[u8]) -> Result<()> {
        self.expect(FieldKind::Bytes(value.len()))?;
        self.buf.extend_from_slice(value);
        Ok(())
    }

    fn finish(mut self) -> Result<Vec<u8>> {
        let fields = self.fields;
        while let Some(field) = fields.get(self.next) {
            match field.kind {
                FieldKind::Pad(n) => self.buf.resize(self.buf.len() + n, 0),
                _ => return Err(self.mismatch(0)),
            }
            self.next += 1;
        }
        if self.buf.len() != self.size {
            return Err(self.mismatch(0));
        }
        Ok(self.buf)
    }
}

/// Field-checked reader used by [`Record::decode`].
pub struct Decoder<'a> {
    record: &'static str,
    fields: &'static [Field],
    next: usize,
    offset: usize,
    bytes: &'a [u8],
}

impl<'a> Decoder<'a> {
    fn new<R: Record>(bytes: &'a [u8]) -> Self {
        Self {
            record: R::NAME,
            fields: R::FIELDS,
            next: 0,
            offset: 0,
            bytes,
        }
    }

    fn mismatch(&self, width: usize) -> Error {
        Error::LayoutMismatch {
            record: self.record,
            expected: self.bytes.len(),
            actual: self.offset + width,
        }
    }

    fn take(&mut self, kind: FieldKind) -> Result<&'a [u8]> {
        let fields = self.fields;
        while let Some(field) = fields.get(self.next) {
            self.next += 1;
            match field.kind {
                FieldKind::Pad(n) => self.offset += n,
                k if k == kind => {
                    let end = self.offset + kind.width();
                    let slice = self
                        .bytes
                        .get(self.offset..end)
                        .ok_or_else(|| self.mismatch(kind.width()))?;
                    self.offset = end;
                    return Ok(slice);
                }
                _ => return Err(self.mismatch(kind.width())),
            }
        }
        Err(self.mismatch(kind.width()))
    }

    fn array<const N: usize>(&mut self, kind: FieldKind) -> Result<[u8; N]> {
        let slice = self.take(kind)?;
        slice.try_into().map_err(|_| self.mismatch(N))
    }

    pub fn u32(&mut self) -> Result<u32> {
        self.array(FieldKind::U32).map(u32::from_ne_bytes)
    }

    pub fn i32(&mut self) -> Result<i32> {
        self.array(FieldKind::I32).map(i32::from_ne_bytes)
    }

    pub fn u16(&mut self) -> Result<u16> {
        self.array(FieldKind::U16).map(u16::from_ne_bytes)
    }

    pub fn bytes<const N: usize>(&mut self) -> Result<[u8; N]> {
        self.array(FieldKind::Bytes(N))
    }

    fn finish(self) -> Result<()> {
        let rest = self.fields.get(self.next..).unwrap_or_default();
        if rest.iter().all(|f| matches!(f.kind, FieldKind::Pad(_))) {
            Ok(())
        } else {
            Err(self.mismatch(0))
        }
    }
}
