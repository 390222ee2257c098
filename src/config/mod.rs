//! Configuration management for port-scan.
//!
//! Settings come from, in order of precedence: command-line flags, the
//! `PORT_SCAN_HOSTS_FILE` environment variable, a JSON settings file and the
//! built-in defaults.

mod settings;

pub use settings::{AppSettings, Paths, DEFAULT_HOSTS_FILE};
