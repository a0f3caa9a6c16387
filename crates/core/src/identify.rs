//! Mouse identification: read the device-info record and check it against
//! the supported G-series models.

use crate::error::{Error, Result};
use crate::hiddev::{IntArg, MouseIdentity, HIDIOCGDEVINFO, HIDIOCGVERSION};
use crate::transport::{issue, HiddevTransport};
use crate::{pids, LOGITECH_VID};
use serde::Serialize;
use tracing::{debug, info, warn};

/// Supported Logitech mouse models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MouseModel {
    G5First,
    G5Second,
    G7,
    G3,
    G9,
}

impl MouseModel {
    pub const ALL: &'static [MouseModel] = &[
        MouseModel::G5First,
        MouseModel::G5Second,
        MouseModel::G7,
        MouseModel::G3,
        MouseModel::G9,
    ];

    /// Look up model from USB product ID.
    pub fn from_pid(pid: u16) -> Option<Self> {
        match pid {
            pids::G5_FIRST => Some(Self::G5First),
            pids::G5_SECOND => Some(Self::G5Second),
            pids::G7 => Some(Self::G7),
            pids::G3 => Some(Self::G3),
            pids::G9 => Some(Self::G9),
            _ => None,
        }
    }

    /// Human-readable name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::G5First => "Logitech G5 (1st generation)",
            Self::G5Second => "Logitech G5 (2nd generation)",
            Self::G7 => "Logitech G7",
            Self::G3 => "Logitech G3",
            Self::G9 => "Logitech G9",
        }
    }

    /// USB Product ID.
    pub fn pid(&self) -> u16 {
        match self {
            Self::G5First => pids::G5_FIRST,
            Self::G5Second => pids::G5_SECOND,
            Self::G7 => pids::G7,
            Self::G3 => pids::G3,
            Self::G9 => pids::G9,
        }
    }
}

impl std::fmt::Display for MouseModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Read the device-info record (HIDIOCGDEVINFO).
pub fn identify(transport: &dyn HiddevTransport) -> Result<MouseIdentity> {
    let mut identity = MouseIdentity::default();
    issue(transport, HIDIOCGDEVINFO, &mut identity)?;
    debug!(
        vendor = format_args!("0x{:04X}", identity.vendor_id),
        product = format_args!("0x{:04X}", identity.product_id),
        bus = identity.bus_number,
        dev = identity.device_number,
        "Read device info"
    );
    Ok(identity)
}

/// Accept only a Logitech vendor ID paired with a known G-series product ID.
pub fn validate(identity: &MouseIdentity) -> Result<MouseModel> {
    let model = if identity.vendor_id == LOGITECH_VID {
        MouseModel::from_pid(identity.product_id)
    } else {
        None
    };

    match model {
        Some(model) => {
            info!(model = model.name(), "Supported mouse identified");
            Ok(model)
        }
        None => {
            warn!(
                vendor = identity.vendor_id,
                product = identity.product_id,
                "Refusing to configure unrecognised device"
            );
            Err(Error::UnsupportedDevice {
                vendor: identity.vendor_id,
                product: identity.product_id,
            })
        }
    }
}

/// Identify and validate in one step.
pub fn identify_supported(transport: &dyn HiddevTransport) -> Result<(MouseIdentity, MouseModel)> {
    let identity = identify(transport)?;
    let model = validate(&identity)?;
    Ok((identity, model))
}

/// hiddev driver version (HIDIOCGVERSION), e.g. `0x0001_0004` for 1.0.4.
pub fn read_driver_version(transport: &dyn HiddevTransport) -> Result<u32> {
    let mut version = IntArg::default();
    issue(transport, HIDIOCGVERSION, &mut version)?;
    Ok(version.value)
}
