//! Core error types for timelaps-core.
//!
//! This module defines the error hierarchy using thiserror. Journal
//! operations are deliberately infallible and have no variants here.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for timelaps-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Timer engine errors
    #[error("Timer error: {0}")]
    Timer(#[from] TimerError),

    /// Session controller errors
    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Timer engine errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimerError {
    /// A countdown must last at least one second
    #[error("countdown duration must be greater than zero")]
    ZeroDuration,

    /// `start` was called while a countdown is running
    #[error("a countdown is already running ({remaining_secs}s remaining)")]
    AlreadyRunning { remaining_secs: u64 },
}

/// Session controller errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// `confirm_name` was called with no finished countdown awaiting a name
    #[error("no completed countdown is waiting for a name")]
    NoPendingCompletion,
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

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown dotted configuration key
    #[error("unknown config key: {0}")]
    UnknownKey(String),

    /// Data directory could not be created
    #[error("Failed to prepare data directory {path}: {source}")]
    DataDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Validation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Empty collection
    #[error("Empty collection: {0}")]
    EmptyCollection(String),

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

/// Notification permission or delivery errors.
///
/// These never abort a countdown; callers log them and carry on.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NotifyError {
    /// The user refused notification permission
    #[error("notification permission denied")]
    PermissionDenied,

    /// The platform reported a failure while requesting permission
    #[error("notification backend unavailable: {0}")]
    Unavailable(String),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
