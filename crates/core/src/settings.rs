//! Settings: which device to open and which presets to apply.
//!
//! Settings may come from a JSON file and are then overridden field by field
//! from the command line. The payload plan is derived once from the final
//! settings and handed to the command sender as an immutable list.

use crate::error::{Error, Result};
use crate::payload::{CommandPayload, Dpi, LedPattern, SpeedButtons};
use crate::session::DEFAULT_DEVICE;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// DPI applied when none is configured.
pub const DEFAULT_DPI: Dpi = Dpi::Dpi1600;

/// LED pattern applied when none is configured.
pub const DEFAULT_LED: LedPattern = LedPattern::None;

/// Mouse configuration for one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// hiddev node to open.
    pub device: PathBuf,
    pub dpi: Option<Dpi>,
    pub led: Option<LedPattern>,
    /// Left untouched when unset.
    pub speed_buttons: Option<SpeedButtons>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            device: PathBuf::from(DEFAULT_DEVICE),
            dpi: None,
            led: None,
            speed_buttons: None,
        }
    }
}

impl Settings {
    /// Load settings from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("read {}: {e}", path.display())))?;
        let settings: Settings = serde_json::from_str(&content)
            .map_err(|e| Error::Config(format!("parse {}: {e}", path.display())))?;
        debug!(path = %path.display(), "Loaded settings");
        Ok(settings)
    }

    /// Ordered payloads: DPI, then LEDs, then speed buttons if requested.
    pub fn payloads(&self) -> Vec<CommandPayload> {
        let mut plan = vec![
            self.dpi.unwrap_or(DEFAULT_DPI).payload(),
            self.led.unwrap_or(DEFAULT_LED).payload(),
        ];
        if let Some(buttons) = self.speed_buttons {
            plan.push(buttons.payload());
        }
        plan
    }
}
