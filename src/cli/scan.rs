//! Scan subcommand implementation.
//!
//! Handles `port-scan scan`: loads the hosts file, scans every host and
//! streams each host's results as soon as they are ready.

use crate::cli::OutputFormat;
use crate::config::AppSettings;
use crate::error::CliResult;
use crate::hosts::HostsList;
use crate::output::Reporter;
use crate::scanner::{run_scan, ScanConfig};
use crate::types::{Port, PortSpec};
use clap::builder::RangedU64ValueParser;
use clap::Parser;
use futures::StreamExt;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::Write;
use std::path::Path;
use std::pin::pin;
use std::time::Duration;
use tracing::{info, warn};

/// Run a port scan on the hosts in the list.
#[derive(Parser, Debug)]
pub struct ScanCommand {
    /// Ports to scan (e.g., "22,80,443", "8000-8010") [default: 22,80,443]
    #[arg(short, long, value_name = "PORTS")]
    pub ports: Option<String>,

    /// Connection timeout in milliseconds [default: 1000]
    #[arg(
        short = 't',
        long,
        value_name = "MS",
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub timeout: Option<u64>,

    /// Maximum probes in flight per host [default: 500]
    #[arg(
        short = 'c',
        long,
        value_parser = RangedU64ValueParser::<usize>::new().range(1..)
    )]
    pub concurrency: Option<usize>,

    /// Number of hosts scanned at the same time [default: 1]
    #[arg(long, value_parser = RangedU64ValueParser::<usize>::new().range(1..))]
    pub host_concurrency: Option<usize>,

    /// Output format for results
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Plain)]
    pub output: OutputFormat,

    /// Only show open ports
    #[arg(long)]
    pub open_only: bool,
}

impl ScanCommand {
    /// Execute the scan command.
    pub async fn execute<W: Write>(
        &self,
        out: W,
        hosts_file: &Path,
        settings: &AppSettings,
        show_progress: bool,
    ) -> CliResult<()> {
        let spec: PortSpec = self.ports.as_deref().unwrap_or(&settings.ports).parse()?;
        let ports = spec.to_ports();
        let config = self.scan_config(settings);

        let mut reporter = Reporter::new(out, self.output).open_only(self.open_only);
        scan_action(&mut reporter, hosts_file, &ports, &config, show_progress).await?;
        Ok(())
    }

    /// Apply command-line overrides on top of the settings.
    fn scan_config(&self, settings: &AppSettings) -> ScanConfig {
        let mut config = settings.scan_config();
        if let Some(ms) = self.timeout {
            config = config.with_timeout(Duration::from_millis(ms));
        }
        if let Some(n) = self.concurrency {
            config = config.with_concurrency(n);
        }
        if let Some(n) = self.host_concurrency {
            config = config.with_host_concurrency(n);
        }
        config
    }
}

/// Scan the hosts in `hosts_file` on `ports`, reporting each host as it
/// completes.
///
/// Returns the number of hosts scanned.
pub async fn scan_action<W: Write>(
    reporter: &mut Reporter<W>,
    hosts_file: &Path,
    ports: &[Port],
    config: &ScanConfig,
    show_progress: bool,
) -> CliResult<usize> {
    let list = HostsList::open(hosts_file)?;

    if list.is_empty() {
        warn!(hosts_file = %hosts_file.display(), "no hosts to scan");
        reporter.finish()?;
        return Ok(0);
    }

    info!(
        hosts = list.len(),
        ports = ports.len(),
        timeout_ms = config.timeout.as_millis() as u64,
        "scanning"
    );

    let progress = show_progress.then(|| progress_bar(list.len() as u64));

    let mut results = pin!(run_scan(&list, ports, config));
    let mut scanned = 0;

    while let Some(result) = results.next().await {
        if let Some(pb) = &progress {
            pb.inc(1);
            pb.set_message(result.host.clone());
        }

        match &progress {
            Some(pb) => pb.suspend(|| reporter.report(&result))?,
            None => reporter.report(&result)?,
        }
        scanned += 1;
    }

    if let Some(pb) = progress {
        pb.finish_and_clear();
    }

    reporter.finish()?;
    Ok(scanned)
}

fn progress_bar(len: u64) -> ProgressBar {
    let pb = ProgressBar::new(len);
    let style = ProgressStyle::with_template(
        "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} hosts {msg}",
    )
    .map(|s| s.progress_chars("=>-"))
    .unwrap_or_else(|_| ProgressStyle::default_bar());
    pb.set_style(style);
    pb
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::net::TcpListener;

    #[tokio::test]
    async fn test_scan_action_reports_each_host() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("port-scan.hosts");

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let open = Port::new(listener.local_addr().unwrap().port()).unwrap();
        let closed = {
            let l = TcpListener::bind("127.0.0.1:0").await.unwrap();
            Port::new(l.local_addr().unwrap().port()).unwrap()
        };

        let mut list = HostsList::new();
        list.add("127.0.0.1").unwrap();
        list.add("localhost").unwrap();
        list.save(&path).unwrap();

        let mut buf = Vec::new();
        let config = ScanConfig::new().with_timeout(Duration::from_millis(500));
        let scanned = {
            let mut reporter = Reporter::new(&mut buf, OutputFormat::Plain);
            scan_action(&mut reporter, &path, &[closed, open], &config, false)
                .await
                .unwrap()
        };
        assert_eq!(scanned, 2);

        let out = String::from_utf8(buf).unwrap();
        let first = format!("127.0.0.1:\n\t{}: closed\n\t{}: open\n\n", closed, open);
        assert!(out.starts_with(&first), "unexpected output: {:?}", out);
        assert!(out[first.len()..].starts_with("localhost:\n"));
    }

    #[tokio::test]
    async fn test_scan_action_empty_list() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("port-scan.hosts");

        let mut buf = Vec::new();
        let scanned = {
            let mut reporter = Reporter::new(&mut buf, OutputFormat::Plain);
            let ports = [Port::new(80).unwrap()];
            scan_action(&mut reporter, &path, &ports, &ScanConfig::new(), false)
                .await
                .unwrap()
        };

        assert_eq!(scanned, 0);
        assert!(buf.is_empty());
    }

    #[tokio::test]
    async fn test_scan_action_corrupt_store() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("port-scan.hosts");
        std::fs::write(&path, "host1\nhost1\n").unwrap();

        let mut buf = Vec::new();
        let mut reporter = Reporter::new(&mut buf, OutputFormat::Plain);
        let ports = [Port::new(80).unwrap()];
        let err = scan_action(&mut reporter, &path, &ports, &ScanConfig::new(), false)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            crate::error::CliError::Hosts(crate::error::HostsError::CorruptStore { .. })
        ));
    }

    #[test]
    fn test_flags_override_settings() {
        let cmd = ScanCommand {
            ports: None,
            timeout: Some(200),
            concurrency: None,
            host_concurrency: Some(4),
            output: OutputFormat::Plain,
            open_only: false,
        };
        let config = cmd.scan_config(&AppSettings::default());
        assert_eq!(config.timeout, Duration::from_millis(200));
        assert_eq!(config.concurrency, 500);
        assert_eq!(config.host_concurrency, 4);
    }
}
