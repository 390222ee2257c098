//! Error types for port-scan.
//!
//! Uses `thiserror` for ergonomic error definitions.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the host list and its durable record.
#[derive(Error, Debug)]
pub enum HostsError {
    #[error("host '{0}' not found in the list")]
    NotFound(String),

    #[error("invalid host '{0}': must be non-empty and contain no whitespace")]
    InvalidHost(String),

    #[error("hosts file {} is corrupt: {reason}", .path.display())]
    CorruptStore { path: PathBuf, reason: String },

    #[error("hosts file {} could not be accessed: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not determine configuration directory")]
    DirectoryNotFound,

    #[error("failed to read config file {}: {reason}", .path.display())]
    ReadFailed { path: PathBuf, reason: String },

    #[error("invalid config format: {0}")]
    InvalidFormat(String),

    #[error("invalid setting: {0}")]
    InvalidValue(String),
}

/// Errors surfaced by the command-line actions.
#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Hosts(#[from] HostsError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Port(#[from] crate::types::PortError),

    #[error("output error: {0}")]
    Output(#[from] std::io::Error),
}

/// Result type alias for host list operations.
pub type HostsResult<T> = Result<T, HostsError>;

/// Result type alias for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Result type alias for CLI actions.
pub type CliResult<T> = Result<T, CliError>;
