use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ValidationError;

/// A selectable countdown length, in whole minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Preset(u32);

impl Preset {
    pub const FIVE: Preset = Preset(5);
    pub const TEN: Preset = Preset(10);
    pub const FIFTEEN: Preset = Preset(15);

    /// The presets offered when no configuration overrides them.
    pub const DEFAULTS: [Preset; 3] = [Preset::FIVE, Preset::TEN, Preset::FIFTEEN];

    /// Build a preset, rejecting zero-length countdowns.
    pub fn from_minutes(minutes: u32) -> Result<Self, ValidationError> {
        if minutes == 0 {
            return Err(ValidationError::InvalidValue {
                field: "preset".into(),
                message: "a preset must last at least one minute".into(),
            });
        }
        Ok(Self(minutes))
    }

    pub fn minutes(self) -> u32 {
        self.0
    }

    /// Countdown length in seconds.
    pub fn secs(self) -> u64 {
        u64::from(self.0).saturating_mul(60)
    }

    /// Picker label, e.g. "10 minutes".
    pub fn label(self) -> String {
        if self.0 == 1 {
            "1 minute".to_string()
        } else {
            format!("{} minutes", self.0)
        }
    }
}

impl Default for Preset {
    fn default() -> Self {
        Preset::TEN
    }
}

impl TryFrom<u32> for Preset {
    type Error = ValidationError;

    fn try_from(minutes: u32) -> Result<Self, Self::Error> {
        Preset::from_minutes(minutes)
    }
}

impl From<Preset> for u32 {
    fn from(preset: Preset) -> Self {
        preset.0
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}
