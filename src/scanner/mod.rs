//! Scanner module - fans probes out across hosts and ports.
//!
//! Each host gets one tokio task per port, bounded by a semaphore. Results are
//! written into slots indexed by port position once every task of that host
//! has finished, so completion order never leaks into the output. Hosts are
//! yielded as a stream in input order.

pub mod tcp;
pub mod traits;

use crate::hosts::HostsList;
use crate::types::Port;
use futures::stream::{self, Stream, StreamExt};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, warn};

pub use tcp::TcpProber;
pub use traits::{HostResult, PortResult, PortState, Prober, ScanConfig, SharedProber};

/// Scan every host in `list` on `ports` with TCP connect probes.
///
/// The host list is copied up front; the returned stream does not borrow it.
/// An empty list produces an empty stream.
pub fn run_scan(
    list: &HostsList,
    ports: &[Port],
    config: &ScanConfig,
) -> impl Stream<Item = HostResult> + Send + 'static {
    let prober: SharedProber = Arc::new(TcpProber::new(config.timeout));
    scan_hosts(list.as_slice().to_vec(), ports.to_vec(), prober, config)
}

/// Scan `hosts` on `ports` using `prober`.
///
/// Up to `config.host_concurrency` hosts are in flight at once; results are
/// still yielded in the order of `hosts`.
pub fn scan_hosts(
    hosts: Vec<String>,
    ports: Vec<Port>,
    prober: SharedProber,
    config: &ScanConfig,
) -> impl Stream<Item = HostResult> + Send + 'static {
    let ports: Arc<[Port]> = ports.into();
    let concurrency = config.concurrency.clamp(1, Semaphore::MAX_PERMITS);
    let host_concurrency = config.host_concurrency.max(1);

    debug!(
        hosts = hosts.len(),
        ports = ports.len(),
        concurrency,
        host_concurrency,
        "starting scan"
    );

    stream::iter(hosts)
        .map(move |host| {
            scan_host(host, Arc::clone(&ports), Arc::clone(&prober), concurrency)
        })
        .buffered(host_concurrency)
}

/// Probe all ports of one host and assemble its result.
async fn scan_host(
    host: String,
    ports: Arc<[Port]>,
    prober: SharedProber,
    concurrency: usize,
) -> HostResult {
    let semaphore = Arc::new(Semaphore::new(concurrency));
    let mut slots = vec![PortState::Closed; ports.len()];
    let mut tasks = JoinSet::new();

    for (idx, &port) in ports.iter().enumerate() {
        // Waiting here keeps at most `concurrency` tasks alive per host.
        let permit = match Arc::clone(&semaphore).acquire_owned().await {
            Ok(permit) => permit,
            Err(e) => {
                warn!(
                    host = %host,
                    port = port.as_u16(),
                    error = %e,
                    "could not schedule probe, reporting closed"
                );
                continue;
            }
        };

        let prober = Arc::clone(&prober);
        let host = host.clone();
        tasks.spawn(async move {
            let state = prober.probe(&host, port).await;
            drop(permit);
            (idx, state)
        });
    }

    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((idx, state)) => slots[idx] = state,
            Err(e) => warn!(host = %host, error = %e, "probe task failed, reporting closed"),
        }
    }

    let ports = ports
        .iter()
        .zip(slots)
        .map(|(&port, state)| PortResult::new(port, state))
        .collect::<Vec<_>>();

    let open = ports.iter().filter(|r| r.is_open()).count();
    debug!(host = %host, open, total = ports.len(), "host scanned");

    HostResult { host, ports }
}
