//! Error types for ptrsweep.
//!
//! Uses `thiserror` for ergonomic error definitions.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Main error type for sweep operations.
#[derive(Error, Debug)]
pub enum ScanError {
    /// The CIDR string did not parse as an IPv4 network/prefix pair.
    #[error("invalid CIDR '{cidr}': {reason}")]
    InvalidRange { cidr: String, reason: String },

    /// The resolver answered authoritatively that no record exists.
    #[error("NXDOMAIN - no local record")]
    NoRecord,

    #[error("lookup failed: {0}")]
    LookupFailure(String),

    #[error("lookup timed out after {0:?}")]
    Timeout(Duration),

    #[error("missing DNS server: {0}")]
    MissingResolver(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ScanError {
    /// Build an [`ScanError::InvalidRange`] for the given input.
    pub fn invalid_range(cidr: impl Into<String>, reason: impl ToString) -> Self {
        Self::InvalidRange {
            cidr: cidr.into(),
            reason: reason.to_string(),
        }
    }
}

/// Errors raised while loading the settings file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {path}: {reason}")]
    ReadFailed { path: PathBuf, reason: String },

    #[error("invalid settings format: {0}")]
    InvalidFormat(String),
}

impl From<ConfigError> for ScanError {
    fn from(err: ConfigError) -> Self {
        Self::InvalidConfig(err.to_string())
    }
}

/// Result type alias for sweep operations.
pub type ScanResult<T> = Result<T, ScanError>;

/// Result type alias for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;
