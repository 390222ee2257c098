//! In-memory host list with a line-delimited durable record.
//!
//! The record holds one host per line, in insertion order. Loading a path
//! that does not exist yields an empty list.

use crate::error::{HostsError, HostsResult};
use std::collections::HashSet;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::debug;

/// An ordered list of unique host identifiers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostsList {
    hosts: Vec<String>,
}

impl HostsList {
    /// Create an empty host list.
    pub const fn new() -> Self {
        Self { hosts: Vec::new() }
    }

    /// Load a list from the record at `path`.
    pub fn open(path: impl AsRef<Path>) -> HostsResult<Self> {
        let mut list = Self::new();
        list.load(path)?;
        Ok(list)
    }

    /// Append `host` unless it is already present.
    ///
    /// Returns `true` if the host was added, `false` if it was already in the
    /// list. Duplicates are not an error.
    pub fn add(&mut self, host: &str) -> HostsResult<bool> {
        validate_host(host)?;

        if self.contains(host) {
            debug!(host, "host already in list, skipping");
            return Ok(false);
        }

        self.hosts.push(host.to_string());
        debug!(host, "added host");
        Ok(true)
    }

    /// Remove `host`, shifting later entries left.
    pub fn remove(&mut self, host: &str) -> HostsResult<()> {
        let idx = self
            .position(host)
            .ok_or_else(|| HostsError::NotFound(host.to_string()))?;

        self.hosts.remove(idx);
        debug!(host, "removed host");
        Ok(())
    }

    /// Check whether `host` is in the list (exact, case-sensitive match).
    pub fn contains(&self, host: &str) -> bool {
        self.position(host).is_some()
    }

    /// Iterate over the hosts in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &str> + Clone + '_ {
        self.hosts.iter().map(String::as_str)
    }

    /// Borrow the hosts as a slice.
    pub fn as_slice(&self) -> &[String] {
        &self.hosts
    }

    pub fn len(&self) -> usize {
        self.hosts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hosts.is_empty()
    }

    /// Replace the contents with the record at `path`.
    ///
    /// A missing file leaves the list empty. On any error the list is left
    /// unchanged.
    pub fn load(&mut self, path: impl AsRef<Path>) -> HostsResult<()> {
        let path = path.as_ref();

        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "hosts file does not exist, starting empty");
                self.hosts.clear();
                return Ok(());
            }
            Err(source) => {
                return Err(HostsError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        self.hosts = decode(&bytes).map_err(|reason| HostsError::CorruptStore {
            path: path.to_path_buf(),
            reason,
        })?;

        debug!(path = %path.display(), count = self.hosts.len(), "loaded hosts");
        Ok(())
    }

    /// Write the list to `path`, overwriting any previous content.
    pub fn save(&self, path: impl AsRef<Path>) -> HostsResult<()> {
        let path = path.as_ref();

        fs::write(path, self.encode()).map_err(|source| HostsError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        debug!(path = %path.display(), count = self.hosts.len(), "saved hosts");
        Ok(())
    }

    fn position(&self, host: &str) -> Option<usize> {
        self.hosts.iter().position(|h| h == host)
    }

    fn encode(&self) -> String {
        let mut out = String::with_capacity(self.hosts.iter().map(|h| h.len() + 1).sum());
        for host in &self.hosts {
            out.push_str(host);
            out.push('\n');
        }
        out
    }
}

/// A host must survive a round trip through a single record line.
fn validate_host(host: &str) -> HostsResult<()> {
    if host.is_empty() || host.chars().any(char::is_whitespace) {
        return Err(HostsError::InvalidHost(host.to_string()));
    }
    Ok(())
}

fn decode(bytes: &[u8]) -> Result<Vec<String>, String> {
    let content = std::str::from_utf8(bytes).map_err(|e| format!("not valid UTF-8: {}", e))?;

    let mut seen: HashSet<&str> = HashSet::new();
    let mut hosts: Vec<String> = Vec::new();
    for (n, line) in content.lines().enumerate() {
        let lineno = n + 1;
        if line.is_empty() {
            return Err(format!("line {}: empty host entry", lineno));
        }
        if validate_host(line).is_err() {
            return Err(format!("line {}: invalid host '{}'", lineno, line));
        }
        if !seen.insert(line) {
            return Err(format!("line {}: duplicate host '{}'", lineno, line));
        }
        hosts.push(line.to_string());
    }

    Ok(hosts)
}
