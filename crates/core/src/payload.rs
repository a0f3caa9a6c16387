//! Six-byte vendor command payloads and the named presets that produce them.
//!
//! Each payload is the body of output report 0x10. The bytes are opaque to
//! the command protocol; the presets below are the values the G-series
//! firmware accepts for DPI, LED and speed-button settings.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Number of usages in one command report.
pub const PAYLOAD_LEN: usize = 6;

/// One command report body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CommandPayload([u8; PAYLOAD_LEN]);

impl CommandPayload {
    pub const fn new(bytes: [u8; PAYLOAD_LEN]) -> Self {
        Self(bytes)
    }

    pub fn bytes(&self) -> &[u8; PAYLOAD_LEN] {
        &self.0
    }
}

impl TryFrom<&[u8]> for CommandPayload {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        let arr: [u8; PAYLOAD_LEN] = bytes
            .try_into()
            .map_err(|_| Error::InvalidPayload { len: bytes.len() })?;
        Ok(Self(arr))
    }
}

impl std::fmt::Display for CommandPayload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02X?}", self.0)
    }
}

/// Sensor resolution presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
#[repr(u16)]
pub enum Dpi {
    Dpi400 = 400,
    Dpi800 = 800,
    Dpi1600 = 1600,
    Dpi2000 = 2000,
}

impl Dpi {
    pub const ALL: &'static [Dpi] = &[Dpi::Dpi400, Dpi::Dpi800, Dpi::Dpi1600, Dpi::Dpi2000];

    /// Convert from a raw DPI value.
    pub fn from_value(dpi: u16) -> Option<Self> {
        match dpi {
            400 => Some(Self::Dpi400),
            800 => Some(Self::Dpi800),
            1600 => Some(Self::Dpi1600),
            2000 => Some(Self::Dpi2000),
            _ => None,
        }
    }

    pub fn value(&self) -> u16 {
        *self as u16
    }

    pub fn payload(&self) -> CommandPayload {
        let level = match self {
            Self::Dpi400 => 0x80,
            Self::Dpi800 => 0x81,
            Self::Dpi1600 => 0x82,
            Self::Dpi2000 => 0x83,
        };
        CommandPayload::new([0x00, 0x80, 0x63, level, 0x00, 0x00])
    }
}

impl TryFrom<u16> for Dpi {
    type Error = String;

    fn try_from(dpi: u16) -> std::result::Result<Self, String> {
        Self::from_value(dpi).ok_or_else(|| format!("unsupported DPI {dpi} (use 400, 800, 1600 or 2000)"))
    }
}

impl From<Dpi> for u16 {
    fn from(dpi: Dpi) -> u16 {
        dpi.value()
    }
}

impl std::str::FromStr for Dpi {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, String> {
        let dpi: u16 = s.trim().parse().map_err(|_| format!("invalid DPI '{s}'"))?;
        Self::try_from(dpi)
    }
}

impl std::fmt::Display for Dpi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} DPI", self.value())
    }
}

/// Which of the DPI indicator LEDs are lit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LedPattern {
    None,
    #[serde(rename = "1")]
    One,
    #[serde(rename = "2")]
    Two,
    #[serde(rename = "3")]
    Three,
    All,
}

impl LedPattern {
    pub const ALL: &'static [LedPattern] = &[
        LedPattern::None,
        LedPattern::One,
        LedPattern::Two,
        LedPattern::Three,
        LedPattern::All,
    ];

    /// Parse a CLI-style name (case-insensitive): none, 1, 2, 3, all.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "none" => Some(Self::None),
            "1" => Some(Self::One),
            "2" => Some(Self::Two),
            "3" => Some(Self::Three),
            "all" => Some(Self::All),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::One => "1",
            Self::Two => "2",
            Self::Three => "3",
            Self::All => "all",
        }
    }

    pub fn payload(&self) -> CommandPayload {
        let (a, b) = match self {
            Self::None => (0x11, 0x01),
            Self::One => (0x11, 0x02),
            Self::Two => (0x21, 0x01),
            Self::Three => (0x12, 0x01),
            Self::All => (0x22, 0x02),
        };
        CommandPayload::new([0x00, 0x80, 0x51, a, b, 0x00])
    }
}

impl std::str::FromStr for LedPattern {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, String> {
        Self::from_name(s).ok_or_else(|| format!("unknown LED pattern '{s}' (use none, 1, 2, 3 or all)"))
    }
}

impl std::fmt::Display for LedPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// State of the hardware DPI +/- buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpeedButtons {
    Enabled,
    Disabled,
}

impl SpeedButtons {
    pub fn payload(&self) -> CommandPayload {
        // Register 0x01, byte 3: 0x80 hands the buttons back to the firmware.
        let flag = match self {
            Self::Enabled => 0x80,
            Self::Disabled => 0x00,
        };
        CommandPayload::new([0x00, 0x80, 0x01, flag, 0x00, 0x00])
    }
}

impl std::fmt::Display for SpeedButtons {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Enabled => f.write_str("enabled"),
            Self::Disabled => f.write_str("disabled"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_from_slice_requires_six_bytes() {
        let ok = CommandPayload::try_from(&[0x00, 0x80, 0x63, 0x82, 0x00, 0x00][..]).unwrap();
        assert_eq!(ok.bytes(), &[0x00, 0x80, 0x63, 0x82, 0x00, 0x00]);

        assert!(matches!(
            CommandPayload::try_from(&[0x00, 0x80, 0x63][..]),
            Err(Error::InvalidPayload { len: 3 })
        ));
        assert!(matches!(
            CommandPayload::try_from(&[0u8; 7][..]),
            Err(Error::InvalidPayload { len: 7 })
        ));
    }

    #[test]
    fn dpi_payloads() {
        assert_eq!(Dpi::Dpi400.payload().bytes(), &[0x00, 0x80, 0x63, 0x80, 0x00, 0x00]);
        assert_eq!(Dpi::Dpi800.payload().bytes(), &[0x00, 0x80, 0x63, 0x81, 0x00, 0x00]);
        assert_eq!(Dpi::Dpi1600.payload().bytes(), &[0x00, 0x80, 0x63, 0x82, 0x00, 0x00]);
        assert_eq!(Dpi::Dpi2000.payload().bytes(), &[0x00, 0x80, 0x63, 0x83, 0x00, 0x00]);
    }

    #[test]
    fn dpi_parses_supported_values_only() {
        for dpi in Dpi::ALL {
            assert_eq!(dpi.value().to_string().parse::<Dpi>().unwrap(), *dpi);
        }
        assert!("1200".parse::<Dpi>().is_err());
        assert!("fast".parse::<Dpi>().is_err());
    }

    #[test]
    fn led_payloads() {
        assert_eq!(LedPattern::None.payload().bytes(), &[0x00, 0x80, 0x51, 0x11, 0x01, 0x00]);
        assert_eq!(LedPattern::One.payload().bytes(), &[0x00, 0x80, 0x51, 0x11, 0x02, 0x00]);
        assert_eq!(LedPattern::Two.payload().bytes(), &[0x00, 0x80, 0x51, 0x21, 0x01, 0x00]);
        assert_eq!(LedPattern::Three.payload().bytes(), &[0x00, 0x80, 0x51, 0x12, 0x01, 0x00]);
        assert_eq!(LedPattern::All.payload().bytes(), &[0x00, 0x80, 0x51, 0x22, 0x02, 0x00]);
    }

    #[test]
    fn led_from_name_is_case_insensitive() {
        assert_eq!(LedPattern::from_name("NONE"), Some(LedPattern::None));
        assert_eq!(LedPattern::from_name("All"), Some(LedPattern::All));
        assert_eq!(LedPattern::from_name("2"), Some(LedPattern::Two));
        assert_eq!(LedPattern::from_name("4"), None);
        for led in LedPattern::ALL {
            assert_eq!(LedPattern::from_name(led.label()), Some(*led));
        }
    }

    #[test]
    fn speed_button_payloads_differ_only_in_flag() {
        let on = SpeedButtons::Enabled.payload();
        let off = SpeedButtons::Disabled.payload();
        assert_eq!(off.bytes(), &[0x00, 0x80, 0x01, 0x00, 0x00, 0x00]);
        assert_eq!(on.bytes(), &[0x00, 0x80, 0x01, 0x80, 0x00, 0x00]);
    }

    #[test]
    fn presets_serialize_as_cli_spellings() {
        assert_eq!(serde_json::to_string(&Dpi::Dpi1600).unwrap(), "1600");
        assert_eq!(serde_json::to_string(&LedPattern::Three).unwrap(), "\"3\"");
        assert_eq!(serde_json::to_string(&LedPattern::All).unwrap(), "\"all\"");
        assert_eq!(
            serde_json::from_str::<SpeedButtons>("\"disabled\"").unwrap(),
            SpeedButtons::Disabled
        );
        assert!(serde_json::from_str::<Dpi>("1200").is_err());
    }
}
