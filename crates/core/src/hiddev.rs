//! Linux hiddev ABI: argument records and request codes.
//!
//! Layouts mirror `<linux/hiddev.h>` with natural C alignment.

use crate::error::Result;
use crate::ioctl::{Direction, RequestCode};
use crate::record::{Decoder, Encoder, Field, FieldKind, Record};
use serde::Serialize;

/// HID report types.
pub mod report_type {
    pub const INPUT: u32 = 1;
    pub const OUTPUT: u32 = 2;
    pub const FEATURE: u32 = 3;
}

/// Report ID modifiers understood by HIDIOCGREPORTINFO.
pub mod report_id {
    pub const UNKNOWN: u32 = 0xFFFF_FFFF;
    pub const FIRST: u32 = 0x0000_0100;
    pub const NEXT: u32 = 0x0000_0200;
    pub const MASK: u32 = 0x0000_00FF;
}

/// Length of the string descriptor value buffer.
pub const STRING_VALUE_LEN: usize = 256;

/// `unsigned int` argument for version and flag requests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IntArg {
    pub value: u32,
}

impl Record for IntArg {
    const NAME: &'static str = "uint";
    const FIELDS: &'static [Field] = &[Field::new("value", FieldKind::U32)];

    fn encode(&self, enc: &mut Encoder) -> Result<()> {
        enc.u32(self.value)
    }

    fn decode(dec: &mut Decoder<'_>) -> Result<Self> {
        Ok(Self { value: dec.u32()? })
    }
}

/// `struct hiddev_devinfo`: bus location and USB identity of the device.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MouseIdentity {
    pub bus_type: u32,
    pub bus_number: u32,
    pub device_number: u32,
    pub interface_number: u32,
    pub vendor_id: u16,
    pub product_id: u16,
    pub version: u16,
    pub application_count: u32,
}

impl Record for MouseIdentity {
    const NAME: &'static str = "hiddev_devinfo";
    const FIELDS: &'static [Field] = &[
        Field::new("bustype", FieldKind::U32),
        Field::new("busnum", FieldKind::U32),
        Field::new("devnum", FieldKind::U32),
        Field::new("ifnum", FieldKind::U32),
        Field::new("vendor", FieldKind::U16),
        Field::new("product", FieldKind::U16),
        Field::new("version", FieldKind::U16),
        Field::new("", FieldKind::Pad(2)),
        Field::new("num_applications", FieldKind::U32),
    ];

    fn encode(&self, enc: &mut Encoder) -> Result<()> {
        enc.u32(self.bus_type)?;
        enc.u32(self.bus_number)?;
        enc.u32(self.device_number)?;
        enc.u32(self.interface_number)?;
        enc.u16(self.vendor_id)?;
        enc.u16(self.product_id)?;
        enc.u16(self.version)?;
        enc.u32(self.application_count)
    }

    fn decode(dec: &mut Decoder<'_>) -> Result<Self> {
        Ok(Self {
            bus_type: dec.u32()?,
            bus_number: dec.u32()?,
            device_number: dec.u32()?,
            interface_number: dec.u32()?,
            vendor_id: dec.u16()?,
            product_id: dec.u16()?,
            version: dec.u16()?,
            application_count: dec.u32()?,
        })
    }
}

/// `struct hiddev_string_descriptor`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringDescriptor {
    pub index: i32,
    pub value: [u8; STRING_VALUE_LEN],
}

impl Default for StringDescriptor {
    fn default() -> Self {
        Self {
            index: 0,
            value: [0; STRING_VALUE_LEN],
        }
    }
}

impl StringDescriptor {
    /// Value up to the first NUL, lossily decoded.
    pub fn text(&self) -> String {
        let end = self
            .value
            .iter()
            .position(|&b| b == 0)
            .unwrap_or(STRING_VALUE_LEN);
        String::from_utf8_lossy(&self.value[..end]).into_owned()
    }
}

impl Record for StringDescriptor {
    const NAME: &'static str = "hiddev_string_descriptor";
    const FIELDS: &'static [Field] = &[
        Field::new("index", FieldKind::I32),
        Field::new("value", FieldKind::Bytes(STRING_VALUE_LEN)),
    ];

    fn encode(&self, enc: &mut Encoder) -> Result<()> {
        enc.i32(self.index)?;
        enc.bytes(&self.value)
    }

    fn decode(dec: &mut Decoder<'_>) -> Result<Self> {
        Ok(Self {
            index: dec.i32()?,
            value: dec.bytes()?,
        })
    }
}

/// `struct hiddev_report_info`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReportInfo {
    pub report_type: u32,
    pub report_id: u32,
    pub num_fields: u32,
}

impl Record for ReportInfo {
    const NAME: &'static str = "hiddev_report_info";
    const FIELDS: &'static [Field] = &[
        Field::new("report_type", FieldKind::U32),
        Field::new("report_id", FieldKind::U32),
        Field::new("num_fields", FieldKind::U32),
    ];

    fn encode(&self, enc: &mut Encoder) -> Result<()> {
        enc.u32(self.report_type)?;
        enc.u32(self.report_id)?;
        enc.u32(self.num_fields)
    }

    fn decode(dec: &mut Decoder<'_>) -> Result<Self> {
        Ok(Self {
            report_type: dec.u32()?,
            report_id: dec.u32()?,
            num_fields: dec.u32()?,
        })
    }
}

/// `struct hiddev_field_info`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FieldInfo {
    pub report_type: u32,
    pub report_id: u32,
    pub field_index: u32,
    pub max_usage: u32,
    pub flags: u32,
    pub physical: u32,
    pub logical: u32,
    pub application: u32,
    pub logical_minimum: i32,
    pub logical_maximum: i32,
    pub physical_minimum: i32,
    pub physical_maximum: i32,
    pub unit_exponent: u32,
    pub unit: u32,
}

impl Record for FieldInfo {
    const NAME: &'static str = "hiddev_field_info";
    const FIELDS: &'static [Field] = &[
        Field::new("report_type", FieldKind::U32),
        Field::new("report_id", FieldKind::U32),
        Field::new("field_index", FieldKind::U32),
        Field::new("maxusage", FieldKind::U32),
        Field::new("flags", FieldKind::U32),
        Field::new("physical", FieldKind::U32),
        Field::new("logical", FieldKind::U32),
        Field::new("application", FieldKind::U32),
        Field::new("logical_minimum", FieldKind::I32),
        Field::new("logical_maximum", FieldKind::I32),
        Field::new("physical_minimum", FieldKind::I32),
        Field::new("physical_maximum", FieldKind::I32),
        Field::new("unit_exponent", FieldKind::U32),
        Field::new("unit", FieldKind::U32),
    ];

    fn encode(&self, enc: &mut Encoder) -> Result<()> {
        enc.u32(self.report_type)?;
        enc.u32(self.report_id)?;
        enc.u32(self.field_index)?;
        enc.u32(self.max_usage)?;
        enc.u32(self.flags)?;
        enc.u32(self.physical)?;
        enc.u32(self.logical)?;
        enc.u32(self.application)?;
        enc.i32(self.logical_minimum)?;
        enc.i32(self.logical_maximum)?;
        enc.i32(self.physical_minimum)?;
        enc.i32(self.physical_maximum)?;
        enc.u32(self.unit_exponent)?;
        enc.u32(self.unit)
    }

    fn decode(dec: &mut Decoder<'_>) -> Result<Self> {
        Ok(Self {
            report_type: dec.u32()?,
            report_id: dec.u32()?,
            field_index: dec.u32()?,
            max_usage: dec.u32()?,
            flags: dec.u32()?,
            physical: dec.u32()?,
            logical: dec.u32()?,
            application: dec.u32()?,
            logical_minimum: dec.i32()?,
            logical_maximum: dec.i32()?,
            physical_minimum: dec.i32()?,
            physical_maximum: dec.i32()?,
            unit_exponent: dec.u32()?,
            unit: dec.u32()?,
        })
    }
}

/// `struct hiddev_usage_ref`: addresses one usage slot of a report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UsageRef {
    pub report_type: u32,
    pub report_id: u32,
    pub field_index: u32,
    pub usage_index: u32,
    pub usage_code: u32,
    pub value: i32,
}

impl Record for UsageRef {
    const NAME: &'static str = "hiddev_usage_ref";
    const FIELDS: &'static [Field] = &[
        Field::new("report_type", FieldKind::U32),
        Field::new("report_id", FieldKind::U32),
        Field::new("field_index", FieldKind::U32),
        Field::new("usage_index", FieldKind::U32),
        Field::new("usage_code", FieldKind::U32),
        Field::new("value", FieldKind::I32),
    ];

    fn encode(&self, enc: &mut Encoder) -> Result<()> {
        enc.u32(self.report_type)?;
        enc.u32(self.report_id)?;
        enc.u32(self.field_index)?;
        enc.u32(self.usage_index)?;
        enc.u32(self.usage_code)?;
        enc.i32(self.value)
    }

    fn decode(dec: &mut Decoder<'_>) -> Result<Self> {
        Ok(Self {
            report_type: dec.u32()?,
            report_id: dec.u32()?,
            field_index: dec.u32()?,
            usage_index: dec.u32()?,
            usage_code: dec.u32()?,
            value: dec.i32()?,
        })
    }
}

/// `struct hiddev_collection_info`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CollectionInfo {
    pub index: u32,
    pub kind: u32,
    pub usage: u32,
    pub level: u32,
}

impl Record for CollectionInfo {
    const NAME: &'static str = "hiddev_collection_info";
    const FIELDS: &'static [Field] = &[
        Field::new("index", FieldKind::U32),
        Field::new("type", FieldKind::U32),
        Field::new("usage", FieldKind::U32),
        Field::new("level", FieldKind::U32),
    ];

    fn encode(&self, enc: &mut Encoder) -> Result<()> {
        enc.u32(self.index)?;
        enc.u32(self.kind)?;
        enc.u32(self.usage)?;
        enc.u32(self.level)
    }

    fn decode(dec: &mut Decoder<'_>) -> Result<Self> {
        Ok(Self {
            index: dec.u32()?,
            kind: dec.u32()?,
            usage: dec.u32()?,
            level: dec.u32()?,
        })
    }
}

// Request codes. The string descriptor (260 bytes) exceeds the size field,
// so HIDIOCGSTRING has no entry here.
pub const HIDIOCGVERSION: RequestCode = RequestCode::hid::<IntArg>(Direction::Read, 0x01);
pub const HIDIOCGDEVINFO: RequestCode = RequestCode::hid::<MouseIdentity>(Direction::Read, 0x03);
pub const HIDIOCINITREPORT: RequestCode = RequestCode::hid_none(0x05);
pub const HIDIOCGREPORT: RequestCode = RequestCode::hid::<ReportInfo>(Direction::Write, 0x07);
pub const HIDIOCSREPORT: RequestCode = RequestCode::hid::<ReportInfo>(Direction::Write, 0x08);
pub const HIDIOCGREPORTINFO: RequestCode =
    RequestCode::hid::<ReportInfo>(Direction::ReadWrite, 0x09);
pub const HIDIOCGFIELDINFO: RequestCode =
    RequestCode::hid::<FieldInfo>(Direction::ReadWrite, 0x0A);
pub const HIDIOCGUSAGE: RequestCode = RequestCode::hid::<UsageRef>(Direction::ReadWrite, 0x0B);
pub const HIDIOCSUSAGE: RequestCode = RequestCode::hid::<UsageRef>(Direction::Write, 0x0C);
pub const HIDIOCGUCODE: RequestCode = RequestCode::hid::<UsageRef>(Direction::ReadWrite, 0x0D);
pub const HIDIOCGFLAG: RequestCode = RequestCode::hid::<IntArg>(Direction::Read, 0x0E);
pub const HIDIOCSFLAG: RequestCode = RequestCode::hid::<IntArg>(Direction::Write, 0x0F);
pub const HIDIOCGCOLLECTIONINDEX: RequestCode =
    RequestCode::hid::<UsageRef>(Direction::Write, 0x10);
pub const HIDIOCGCOLLECTIONINFO: RequestCode =
    RequestCode::hid::<CollectionInfo>(Direction::ReadWrite, 0x11);
