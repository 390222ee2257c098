//! Host list management.
//!
//! [`HostsList`] is an explicit handle; callers load it from a path, mutate it
//! and save it back. The free functions below are the batch operations used by
//! the command-line actions.

mod list;

pub use list::HostsList;

use crate::error::{HostsError, HostsResult};

/// Add every host in `hosts`, skipping those already present.
///
/// Returns the number of hosts actually added. Stops at the first host that
/// cannot be stored.
pub fn add_hosts<I, S>(list: &mut HostsList, hosts: I) -> HostsResult<usize>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut added = 0;
    for host in hosts {
        if list.add(host.as_ref())? {
            added += 1;
        }
    }
    Ok(added)
}

/// Remove every host in `hosts`.
///
/// All hosts are checked before anything is removed: if any of them is not in
/// the list, `NotFound` is returned and the list is unchanged.
pub fn remove_hosts<I, S>(list: &mut HostsList, hosts: I) -> HostsResult<usize>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let hosts: Vec<S> = hosts.into_iter().collect();

    if let Some(missing) = hosts.iter().find(|h| !list.contains(h.as_ref())) {
        let missing: &str = missing.as_ref();
        return Err(HostsError::NotFound(missing.to_string()));
    }

    let mut removed = 0;
    for host in &hosts {
        // Repeated arguments were already removed on an earlier pass.
        if list.contains(host.as_ref()) {
            list.remove(host.as_ref())?;
            removed += 1;
        }
    }
    Ok(removed)
}

/// Iterate over the hosts in insertion order.
pub fn list_hosts(list: &HostsList) -> impl Iterator<Item = &str> + Clone + '_ {
    list.iter()
}
