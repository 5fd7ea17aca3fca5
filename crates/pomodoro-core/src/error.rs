//! Core error types for pomodoro-core.
//!
//! The timer engine itself never fails; these cover configuration storage,
//! theme lookup and talking to a stopped runtime.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for pomodoro-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML write error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    /// No theme registered under this key
    #[error("Unknown theme: {0}")]
    UnknownTheme(String),

    /// The timer runtime has shut down
    #[error("Timer runtime is no longer running")]
    RuntimeClosed,
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Key does not exist
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// No usable data directory
    #[error("Could not determine data directory")]
    NoDataDir,
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
