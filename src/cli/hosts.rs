//! Hosts subcommand implementation.
//!
//! Handles `port-scan hosts add|list|delete`. Each action loads the hosts
//! file, applies its change and saves before reporting.

use crate::error::CliResult;
use crate::hosts::{list_hosts, remove_hosts, HostsList};
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::Path;

/// Manage the hosts list.
#[derive(Parser, Debug)]
pub struct HostsCommand {
    #[command(subcommand)]
    pub action: HostsAction,
}

/// Hosts list actions.
#[derive(Subcommand, Debug)]
pub enum HostsAction {
    /// Add new hosts to the list
    #[command(alias = "a")]
    Add {
        /// Hosts to add
        #[arg(required = true, value_name = "HOST")]
        hosts: Vec<String>,
    },

    /// List hosts in the list
    #[command(alias = "l")]
    List,

    /// Delete hosts from the list
    #[command(aliases = ["d", "rm"])]
    Delete {
        /// Hosts to delete
        #[arg(required = true, value_name = "HOST")]
        hosts: Vec<String>,
    },
}

impl HostsCommand {
    /// Execute the hosts command.
    pub fn execute<W: Write>(&self, out: &mut W, hosts_file: &Path) -> CliResult<()> {
        match &self.action {
            HostsAction::Add { hosts } => add_action(out, hosts_file, hosts),
            HostsAction::List => list_action(out, hosts_file),
            HostsAction::Delete { hosts } => delete_action(out, hosts_file, hosts),
        }
    }
}

/// Add `hosts` to the list at `hosts_file`.
///
/// Hosts already present are skipped without a message.
pub fn add_action<W: Write>(out: &mut W, hosts_file: &Path, hosts: &[String]) -> CliResult<()> {
    let mut list = HostsList::open(hosts_file)?;

    let mut added = Vec::new();
    for host in hosts {
        if list.add(host)? {
            added.push(host);
        }
    }

    list.save(hosts_file)?;

    for host in added {
        writeln!(out, "Added host: {}", host)?;
    }
    Ok(())
}

/// Print every host in the list at `hosts_file`, one per line.
pub fn list_action<W: Write>(out: &mut W, hosts_file: &Path) -> CliResult<()> {
    let list = HostsList::open(hosts_file)?;

    for host in list_hosts(&list) {
        writeln!(out, "{}", host)?;
    }
    Ok(())
}

/// Delete `hosts` from the list at `hosts_file`.
///
/// Nothing is saved if any of them is missing.
pub fn delete_action<W: Write>(out: &mut W, hosts_file: &Path, hosts: &[String]) -> CliResult<()> {
    let mut list = HostsList::open(hosts_file)?;

    remove_hosts(&mut list, hosts)?;
    list.save(hosts_file)?;

    let mut reported: Vec<&String> = Vec::with_capacity(hosts.len());
    for host in hosts {
        if !reported.contains(&host) {
            writeln!(out, "Deleted host: {}", host)?;
            reported.push(host);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CliError, HostsError};
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn strings(hosts: &[&str]) -> Vec<String> {
        hosts.iter().map(|h| h.to_string()).collect()
    }

    fn setup(hosts: &[&str], init_list: bool) -> (TempDir, PathBuf) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("port-scan.hosts");

        if init_list {
            let mut list = HostsList::new();
            for h in hosts {
                list.add(h).unwrap();
            }
            list.save(&path).unwrap();
        }

        (dir, path)
    }

    fn run<F>(action: F) -> String
    where
        F: FnOnce(&mut Vec<u8>) -> CliResult<()>,
    {
        let mut out = Vec::new();
        action(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    const HOSTS: [&str; 3] = ["host1", "host2", "host3"];

    #[test]
    fn test_add_action() {
        let (_dir, path) = setup(&HOSTS, false);
        let out = run(|out| add_action(out, &path, &strings(&HOSTS)));
        assert_eq!(out, "Added host: host1\nAdded host: host2\nAdded host: host3\n");
    }

    #[test]
    fn test_add_action_skips_existing() {
        let (_dir, path) = setup(&HOSTS, true);
        let out = run(|out| add_action(out, &path, &strings(&["host2", "host4"])));
        assert_eq!(out, "Added host: host4\n");

        let out = run(|out| list_action(out, &path));
        assert_eq!(out, "host1\nhost2\nhost3\nhost4\n");
    }

    #[test]
    fn test_list_action() {
        let (_dir, path) = setup(&HOSTS, true);
        let out = run(|out| list_action(out, &path));
        assert_eq!(out, "host1\nhost2\nhost3\n");
    }

    #[test]
    fn test_list_action_without_file() {
        let (_dir, path) = setup(&HOSTS, false);
        assert_eq!(run(|out| list_action(out, &path)), "");
    }

    #[test]
    fn test_delete_action() {
        let (_dir, path) = setup(&HOSTS, true);
        let out = run(|out| delete_action(out, &path, &strings(&["host1", "host2"])));
        assert_eq!(out, "Deleted host: host1\nDeleted host: host2\n");
    }

    #[test]
    fn test_delete_action_missing_host_saves_nothing() {
        let (_dir, path) = setup(&HOSTS, true);

        let mut out = Vec::new();
        let err = delete_action(&mut out, &path, &strings(&["host1", "nope"])).unwrap_err();
        assert!(matches!(err, CliError::Hosts(HostsError::NotFound(ref h)) if h == "nope"));
        assert!(out.is_empty());

        assert_eq!(run(|out| list_action(out, &path)), "host1\nhost2\nhost3\n");
    }

    #[test]
    fn test_add_list_delete_session() {
        let (_dir, path) = setup(&HOSTS, false);
        let mut out = Vec::new();

        add_action(&mut out, &path, &strings(&HOSTS)).unwrap();
        list_action(&mut out, &path).unwrap();
        delete_action(&mut out, &path, &strings(&["host2"])).unwrap();
        list_action(&mut out, &path).unwrap();

        let mut expected = String::new();
        for h in HOSTS {
            expected.push_str(&format!("Added host: {}\n", h));
        }
        expected.push_str("host1\nhost2\nhost3\n");
        expected.push_str("Deleted host: host2\n");
        expected.push_str("host1\nhost3\n");

        assert_eq!(String::from_utf8(out).unwrap(), expected);
    }
}
