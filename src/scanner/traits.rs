//! Prober trait abstraction and scan result types.
//!
//! The orchestrator only talks to a [`Prober`], so the TCP implementation can
//! be swapped for doubles in tests.

use crate::types::Port;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Reachability of a single port.
///
/// Every failure to connect, whatever the cause, is `Closed`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PortState {
    /// A TCP connection was established.
    Open,
    /// No connection could be established.
    #[default]
    Closed,
}

impl fmt::Display for PortState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open => write!(f, "open"),
            Self::Closed => write!(f, "closed"),
        }
    }
}

/// Result of probing a single port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortResult {
    pub port: Port,
    pub state: PortState,
}

impl PortResult {
    pub fn new(port: Port, state: PortState) -> Self {
        Self { port, state }
    }

    pub fn is_open(&self) -> bool {
        self.state == PortState::Open
    }
}

/// All port results for one host, in the order the ports were requested.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostResult {
    pub host: String,
    pub ports: Vec<PortResult>,
}

impl HostResult {
    /// Iterate over the open ports only.
    pub fn open_ports(&self) -> impl Iterator<Item = &PortResult> {
        self.ports.iter().filter(|r| r.is_open())
    }

    /// Count of open ports.
    pub fn open_count(&self) -> usize {
        self.open_ports().count()
    }
}

/// Configuration for a scan invocation.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Per-connection timeout, including name resolution.
    pub timeout: Duration,
    /// Maximum probes in flight for a single host.
    pub concurrency: usize,
    /// Maximum hosts scanned at the same time.
    pub host_concurrency: usize,
}

impl ScanConfig {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(1000);
    pub const DEFAULT_CONCURRENCY: usize = 500;

    pub fn new() -> Self {
        Self {
            timeout: Self::DEFAULT_TIMEOUT,
            concurrency: Self::DEFAULT_CONCURRENCY,
            host_concurrency: 1,
        }
    }

    /// Set the timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the per-host probe concurrency. Zero is treated as one.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Set how many hosts are scanned at once. Zero is treated as one.
    pub fn with_host_concurrency(mut self, hosts: usize) -> Self {
        self.host_concurrency = hosts.max(1);
        self
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Something that can classify a single host:port pair.
///
/// # Example
///
/// ```ignore
/// use port_scan::scanner::{Prober, TcpProber};
///
/// let prober = TcpProber::new(Duration::from_millis(500));
/// let state = prober.probe("localhost", Port::new(22).unwrap()).await;
/// ```
#[async_trait]
pub trait Prober: Send + Sync {
    /// Probe one port. Must never fail; errors map to `PortState::Closed`.
    async fn probe(&self, host: &str, port: Port) -> PortState;
}

/// A prober shared across probe tasks.
pub type SharedProber = Arc<dyn Prober>;
