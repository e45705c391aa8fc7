mod config;

pub use config::{Config, ReminderConfig, SoundConfig, TimerConfig};

use std::path::PathBuf;

use crate::error::ConfigError;

/// Returns the configuration directory.
///
/// `TIMELAPS_HOME` overrides everything. Otherwise `~/.config/timelaps`,
/// or `~/.config/timelaps-dev` when `TIMELAPS_ENV=dev`.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let dir = match std::env::var_os("TIMELAPS_HOME") {
        Some(home) => PathBuf::from(home),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("TIMELAPS_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("timelaps-dev")
            } else {
                base_dir.join("timelaps")
            }
        }
    };

    std::fs::create_dir_all(&dir).map_err(|source| ConfigError::DataDir {
        path: dir.clone(),
        source,
    })?;
    Ok(dir)
}
