mod config;

pub use config::{Config, TimerConfig, UiConfig};

use std::path::PathBuf;

use crate::error::{ConfigError, Result};

/// Returns the data directory.
///
/// `POMODORO_DATA_DIR` wins if set. Otherwise `~/.config/pomodoro[-dev]/`
/// based on `POMODORO_ENV` (set `POMODORO_ENV=dev` for a development copy).
///
/// # Errors
/// Returns an error if no home directory can be found or if creating the
/// directory fails.
pub fn data_dir() -> Result<PathBuf> {
    let dir = match std::env::var_os("POMODORO_DATA_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => {
            let base_dir = dirs::home_dir().ok_or(ConfigError::NoDataDir)?.join(".config");
            let env = std::env::var("POMODORO_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("pomodoro-dev")
            } else {
                base_dir.join("pomodoro")
            }
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
