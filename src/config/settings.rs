//! Application settings and paths.
//!
//! Settings are read from a JSON file: either the one given with `--config`
//! or `settings.json` in the XDG config directory. Every field is optional.

use crate::error::{ConfigError, ConfigResult};
use crate::scanner::ScanConfig;
use crate::types::{PortError, PortSpec};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Default hosts file, relative to the working directory.
pub const DEFAULT_HOSTS_FILE: &str = "port-scan.hosts";

/// Application directory paths following the XDG Base Directory Specification.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Configuration directory (~/.config/port-scan)
    pub config_dir: PathBuf,
}

impl Paths {
    /// Locate the per-user directories.
    pub fn discover() -> ConfigResult<Self> {
        let project =
            ProjectDirs::from("", "", "port-scan").ok_or(ConfigError::DirectoryNotFound)?;

        Ok(Self {
            config_dir: project.config_dir().to_path_buf(),
        })
    }

    /// Get the path to the settings file.
    pub fn settings_file(&self) -> PathBuf {
        self.config_dir.join("settings.json")
    }
}

/// Application-wide settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// Path of the hosts file.
    pub hosts_file: PathBuf,
    /// Default port specification.
    pub ports: String,
    /// Default timeout in milliseconds.
    pub timeout_ms: u64,
    /// Default per-host probe concurrency.
    pub concurrency: usize,
    /// Default number of hosts scanned at once.
    pub host_concurrency: usize,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            hosts_file: PathBuf::from(DEFAULT_HOSTS_FILE),
            ports: PortSpec::DEFAULT.to_string(),
            timeout_ms: ScanConfig::DEFAULT_TIMEOUT.as_millis() as u64,
            concurrency: ScanConfig::DEFAULT_CONCURRENCY,
            host_concurrency: 1,
        }
    }
}

impl AppSettings {
    /// Load settings from `explicit`, or from the default location.
    ///
    /// An explicit file must exist. A missing default file yields defaults.
    pub fn load(explicit: Option<&Path>) -> ConfigResult<Self> {
        if let Some(path) = explicit {
            return Self::load_from(path);
        }

        let file = match Paths::discover() {
            Ok(paths) => paths.settings_file(),
            Err(e) => {
                debug!(error = %e, "no config directory, using defaults");
                return Ok(Self::default());
            }
        };

        if !file.exists() {
            return Ok(Self::default());
        }

        Self::load_from(&file)
    }

    /// Load settings from a specific file.
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let settings: Self =
            serde_json::from_str(&content).map_err(|e| ConfigError::InvalidFormat(e.to_string()))?;
        settings.validate()?;

        debug!(path = %path.display(), "loaded settings");
        Ok(settings)
    }

    /// Check that every value is usable.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.hosts_file.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue("hosts_file cannot be empty".to_string()));
        }
        if self.timeout_ms == 0 {
            return Err(ConfigError::InvalidValue("timeout_ms must be positive".to_string()));
        }
        if self.concurrency == 0 || self.host_concurrency == 0 {
            return Err(ConfigError::InvalidValue(
                "concurrency values must be positive".to_string(),
            ));
        }
        self.port_spec()
            .map_err(|e| ConfigError::InvalidValue(format!("ports: {}", e)))?;
        Ok(())
    }

    /// Parse the default port specification.
    pub fn port_spec(&self) -> Result<PortSpec, PortError> {
        self.ports.parse()
    }

    /// Build the scan configuration these settings describe.
    pub fn scan_config(&self) -> ScanConfig {
        ScanConfig::new()
            .with_timeout(Duration::from_millis(self.timeout_ms))
            .with_concurrency(self.concurrency)
            .with_host_concurrency(self.host_concurrency)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_settings() {
        let settings = AppSettings::default();
        assert_eq!(settings.hosts_file, PathBuf::from("port-scan.hosts"));
        assert_eq!(settings.ports, "22,80,443");
        assert_eq!(settings.timeout_ms, 1000);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{ "ports": "8080,8443", "timeout_ms": 250 }"#).unwrap();

        let settings = AppSettings::load(Some(path.as_path())).unwrap();
        assert_eq!(settings.ports, "8080,8443");
        assert_eq!(settings.timeout_ms, 250);
        assert_eq!(settings.concurrency, 500);

        let config = settings.scan_config();
        assert_eq!(config.timeout, Duration::from_millis(250));
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let dir = tempdir().unwrap();
        let err = AppSettings::load(Some(dir.path().join("missing.json").as_path())).unwrap_err();
        assert!(matches!(err, ConfigError::ReadFailed { .. }));
    }

    #[test]
    fn test_invalid_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{ not json").unwrap();

        let err = AppSettings::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidFormat(_)));
    }

    #[test]
    fn test_invalid_values() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");

        let cases = [
            r#"{ "timeout_ms": 0 }"#,
            r#"{ "ports": "0-10" }"#,
            r#"{ "concurrency": 0 }"#,
        ];
        for content in cases {
            fs::write(&path, content).unwrap();
            let err = AppSettings::load_from(&path).unwrap_err();
            assert!(matches!(err, ConfigError::InvalidValue(_)), "{}", content);
        }
    }
}
