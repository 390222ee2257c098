//! CLI subcommand definitions and handlers.
//!
//! Implements a git-like subcommand architecture:
//! - `port-scan hosts add|list|delete` - Manage the hosts list
//! - `port-scan scan` - Scan every host in the list

mod hosts;
mod scan;

pub use hosts::{add_action, delete_action, list_action, HostsAction, HostsCommand};
pub use scan::{scan_action, ScanCommand};

use crate::config::AppSettings;
use crate::error::CliResult;
use clap::{ArgAction, Parser, Subcommand};
use std::io;
use std::path::PathBuf;
use tracing::debug;

/// port-scan - a fast TCP port scanner for a list of hosts.
///
/// Keep a list of hosts with `hosts add`, `hosts list` and `hosts delete`,
/// then run `scan` to check which TCP ports answer on each of them.
#[derive(Parser, Debug)]
#[command(name = "port-scan")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Fast TCP port scanner")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Hosts file
    #[arg(
        short = 'f',
        long,
        global = true,
        env = "PORT_SCAN_HOSTS_FILE",
        value_name = "PATH"
    )]
    pub hosts_file: Option<PathBuf>,

    /// Path to a JSON settings file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage the hosts list
    #[command(alias = "h")]
    Hosts(HostsCommand),

    /// Run a port scan on the hosts in the list
    #[command(alias = "s")]
    Scan(ScanCommand),
}

impl Commands {
    /// Name used in error context.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Hosts(_) => "hosts",
            Self::Scan(_) => "scan",
        }
    }
}

impl Cli {
    /// Resolve settings and run the selected subcommand, writing to stdout.
    pub async fn execute(&self) -> CliResult<()> {
        let settings = AppSettings::load(self.config.as_deref())?;
        let hosts_file = self
            .hosts_file
            .clone()
            .unwrap_or_else(|| settings.hosts_file.clone());
        debug!(hosts_file = %hosts_file.display(), "using hosts file");

        match &self.command {
            Commands::Hosts(cmd) => cmd.execute(&mut io::stdout().lock(), &hosts_file),
            Commands::Scan(cmd) => {
                let progress = self.shows_progress(
                    std::env::var_os("RUST_LOG").is_some(),
                    console::user_attended_stderr(),
                );
                cmd.execute(io::stdout(), &hosts_file, &settings, progress)
                    .await
            }
        }
    }

    /// The progress bar shares stderr with the logs, so it is only drawn on
    /// a terminal while logging stays at the default warn level.
    fn shows_progress(&self, log_env_set: bool, attended: bool) -> bool {
        attended && !log_env_set && !self.quiet && self.verbose == 0
    }
}

/// Output format for scan results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable plain text
    #[default]
    Plain,
    /// One JSON object per host per line
    Json,
    /// CSV rows of host, port and state
    Csv,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Plain => write!(f, "plain"),
            Self::Json => write!(f, "json"),
            Self::Csv => write!(f, "csv"),
        }
    }
}
