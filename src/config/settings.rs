//! Application settings and paths.
//!
//! Optional defaults read from an XDG-compliant settings file.

use crate::error::{ConfigError, ConfigResult};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Location of the settings file in the XDG config directory
/// (`~/.config/ptrsweep/settings.json` on Linux).
pub fn default_settings_file() -> Option<PathBuf> {
    ProjectDirs::from("com", "ptrsweep", "ptrsweep")
        .map(|project| project.config_dir().join("settings.json"))
}

/// Defaults that apply when the command line leaves a value unset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// Number of concurrent lookup workers.
    pub workers: usize,
    /// Per-lookup timeout in milliseconds.
    pub timeout_ms: u64,
    /// Resolver endpoint (`host[:port]`); falls back to resolv.conf when unset.
    pub dns: Option<String>,
    /// Print negative and failed lookups.
    pub verbose: bool,
    /// Set the recursion-desired bit on queries.
    pub recursion: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            workers: 64,
            timeout_ms: 2000,
            dns: None,
            verbose: false,
            recursion: false,
        }
    }
}

impl AppSettings {
    /// Load settings from the default location.
    ///
    /// A missing file yields the built-in defaults.
    pub fn load() -> ConfigResult<Self> {
        match default_settings_file() {
            Some(file) if file.exists() => Self::load_from(&file),
            _ => Ok(Self::default()),
        }
    }

    /// Load settings from a specific file.
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        serde_json::from_str(&content).map_err(|e| ConfigError::InvalidFormat(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_settings() {
        let settings = AppSettings::default();
        assert_eq!(settings.workers, 64);
        assert_eq!(settings.timeout_ms, 2000);
        assert!(settings.dns.is_none());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"workers": 16, "dns": "10.0.0.2:5353"}}"#).unwrap();

        let settings = AppSettings::load_from(file.path()).unwrap();
        assert_eq!(settings.workers, 16);
        assert_eq!(settings.dns.as_deref(), Some("10.0.0.2:5353"));
        assert_eq!(settings.timeout_ms, 2000);
        assert!(!settings.recursion);
    }

    #[test]
    fn test_malformed_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "workers = 16").unwrap();

        let err = AppSettings::load_from(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidFormat(_)));
    }

    #[test]
    fn test_missing_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = AppSettings::load_from(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, ConfigError::ReadFailed { .. }));
    }
}
