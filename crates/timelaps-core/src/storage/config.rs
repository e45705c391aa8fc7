//! TOML-based application configuration.
//!
//! Stores user preferences including:
//! - Countdown presets and the default selection
//! - The "still running" reminder (delay and wording)
//! - Completion sound
//! - Motivational quotes
//!
//! Configuration is stored at `~/.config/timelaps/config.toml`.
//! The session journal is never written here.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::data_dir;
use crate::error::ConfigError;
use crate::quotes;
use crate::timer::Preset;

/// Countdown configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerConfig {
    /// Offered presets, in minutes.
    #[serde(default = "default_presets")]
    pub presets: Vec<u32>,
    /// Preset selected when none is given, in minutes.
    #[serde(default = "default_preset")]
    pub default_preset: u32,
}

/// Reminder notification configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReminderConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_reminder_delay")]
    pub delay_secs: u64,
    #[serde(default = "default_reminder_title")]
    pub title: String,
    #[serde(default = "default_reminder_body")]
    pub body: String,
}

/// Completion sound configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoundConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/timelaps/config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub timer: TimerConfig,
    #[serde(default)]
    pub reminder: ReminderConfig,
    #[serde(default)]
    pub sound: SoundConfig,
    #[serde(default = "quotes::default_quotes")]
    pub quotes: Vec<String>,
}

// Default functions
fn default_presets() -> Vec<u32> {
    Preset::DEFAULTS.iter().map(|p| p.minutes()).collect()
}
fn default_preset() -> u32 {
    Preset::default().minutes()
}
fn default_true() -> bool {
    true
}
fn default_reminder_delay() -> u64 {
    300
}
fn default_reminder_title() -> String {
    "Back to your session".into()
}
fn default_reminder_body() -> String {
    "Your timer is still running. Stay focused!".into()
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            presets: default_presets(),
            default_preset: default_preset(),
        }
    }
}

impl Default for ReminderConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            delay_secs: default_reminder_delay(),
            title: default_reminder_title(),
            body: default_reminder_body(),
        }
    }
}

impl Default for SoundConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timer: TimerConfig::default(),
            reminder: ReminderConfig::default(),
            sound: SoundConfig::default(),
            quotes: quotes::default_quotes(),
        }
    }
}

impl ReminderConfig {
    pub fn delay(&self) -> Duration {
        Duration::from_secs(self.delay_secs)
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };
        let mut parts = key.split('.').peekable();
        if key.is_empty() {
            return Err(ConfigError::UnknownKey(key.to_string()));
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            let is_leaf = parts.peek().is_none();
            if is_leaf {
                let obj = current
                    .as_object_mut()
                    .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
                let existing = obj
                    .get(part)
                    .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value
                            .parse::<bool>()
                            .map_err(|_| invalid(format!("cannot parse '{value}' as bool")))?,
                    ),
                    serde_json::Value::Number(_) => value
                        .parse::<u64>()
                        .map(|n| serde_json::Value::Number(n.into()))
                        .map_err(|_| invalid(format!("cannot parse '{value}' as number")))?,
                    serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                        serde_json::from_str(value).map_err(|e| invalid(e.to_string()))?
                    }
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current
                .get_mut(part)
                .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
        }

        Err(ConfigError::UnknownKey(key.to_string()))
    }

    /// Location of `config.toml`.
    pub fn path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from the data directory, writing defaults when no file exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    /// Load from an explicit path, writing defaults when it does not exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let cfg: Config = toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })?;
                cfg.validate()?;
                Ok(cfg)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                tracing::info!(path = %path.display(), "wrote default configuration");
                Ok(cfg)
            }
            Err(e) => Err(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
        }
    }

    /// Persist to the data directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
        Ok(())
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "falling back to default configuration");
            Self::default()
        })
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by dot-separated key. The caller saves.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be parsed,
    /// or the result fails validation. `self` is unchanged on error.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json = serde_json::to_value(&*self).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    /// Check cross-field constraints.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timer.presets.is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "timer.presets".into(),
                message: "at least one preset is required".into(),
            });
        }
        if self.timer.presets.contains(&0) {
            return Err(ConfigError::InvalidValue {
                key: "timer.presets".into(),
                message: "presets must be at least one minute".into(),
            });
        }
        if !self.timer.presets.contains(&self.timer.default_preset) {
            return Err(ConfigError::InvalidValue {
                key: "timer.default_preset".into(),
                message: format!(
                    "{} is not one of the presets {:?}",
                    self.timer.default_preset, self.timer.presets
                ),
            });
        }
        if self.reminder.delay_secs == 0 {
            return Err(ConfigError::InvalidValue {
                key: "reminder.delay_secs".into(),
                message: "delay must be greater than zero".into(),
            });
        }
        Ok(())
    }

    /// Presets in ascending order, deduplicated.
    pub fn presets(&self) -> Vec<Preset> {
        let mut presets: Vec<Preset> = self
            .timer
            .presets
            .iter()
            .filter_map(|m| Preset::from_minutes(*m).ok())
            .collect();
        presets.sort_unstable();
        presets.dedup();
        presets
    }

    pub fn default_preset(&self) -> Preset {
        Preset::from_minutes(self.timer.default_preset).unwrap_or_default()
    }

    /// Look up a configured preset by minutes.
    pub fn preset(&self, minutes: u32) -> Option<Preset> {
        self.presets().into_iter().find(|p| p.minutes() == minutes)
    }
}
