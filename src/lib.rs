//! # port-scan - A TCP Port Scanner for a List of Hosts
//!
//! port-scan keeps a persisted list of hosts and checks which TCP ports
//! accept connections on each of them.
//!
//! ## Features
//!
//! - **Host list**: ordered, duplicate-free, stored as one host per line
//! - **Concurrent scanning**: one tokio task per port with a bounded fan-out
//! - **Ordered results**: hosts and ports come back in the order requested,
//!   whatever order the probes finish in
//! - **Streaming output**: plain text, JSON lines or CSV
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! use futures::StreamExt;
//! use port_scan::hosts::HostsList;
//! use port_scan::scanner::{run_scan, ScanConfig};
//! use port_scan::types::PortSpec;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let mut list = HostsList::open("port-scan.hosts")?;
//!     list.add("localhost")?;
//!     list.save("port-scan.hosts")?;
//!
//!     let ports = "22,80,443".parse::<PortSpec>()?.to_ports();
//!     let mut results = std::pin::pin!(run_scan(&list, &ports, &ScanConfig::default()));
//!     while let Some(host) = results.next().await {
//!         println!("{}: {} open", host.host, host.open_count());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! - [`hosts`] - The host list and its durable record
//! - [`scanner`] - The TCP prober and the scan orchestrator
//! - [`types`] - Port newtypes and port specifications
//! - [`config`] - Settings file and defaults
//! - [`output`] - Result rendering
//! - [`cli`] - Command-line subcommands
//! - [`error`] - Error types

pub mod cli;
pub mod config;
pub mod error;
pub mod hosts;
pub mod output;
pub mod scanner;
pub mod types;

// Re-export commonly used types
pub use error::{CliError, ConfigError, HostsError};
pub use hosts::{add_hosts, list_hosts, remove_hosts, HostsList};
pub use scanner::{run_scan, HostResult, PortResult, PortState, Prober, ScanConfig, TcpProber};
pub use types::{Port, PortSpec};
