//! JSON output formatting, one object per line.

use crate::scanner::HostResult;
use std::io::{self, Write};

/// Write one host's results as a single JSON line.
pub fn write_host<W: Write>(out: &mut W, result: &HostResult, open_only: bool) -> io::Result<()> {
    if open_only {
        let filtered = HostResult {
            host: result.host.clone(),
            ports: result.open_ports().copied().collect(),
        };
        serde_json::to_writer(&mut *out, &filtered)?;
    } else {
        serde_json::to_writer(&mut *out, result)?;
    }
    writeln!(out)
}
