//! Plain text output formatting.
//!
//! Scan results are plain, uncoloured lines so they can be piped. Errors on
//! stderr use `console` styling.

use crate::scanner::HostResult;
use console::style;
use std::io::{self, Write};

/// Write one host's results.
///
/// ```text
/// host1:
///     22: closed
///     80: open
///
/// ```
pub fn write_host<W: Write>(out: &mut W, result: &HostResult, open_only: bool) -> io::Result<()> {
    writeln!(out, "{}:", result.host)?;

    for port in result.ports.iter().filter(|r| !open_only || r.is_open()) {
        writeln!(out, "\t{}: {}", port.port, port.state)?;
    }

    writeln!(out)
}

/// Print an error message.
pub fn print_error(msg: &str) {
    eprintln!("{} {}", style("Error:").red().bold(), msg);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::{PortResult, PortState};
    use crate::types::Port;

    fn sample() -> HostResult {
        HostResult {
            host: "host1".to_string(),
            ports: vec![
                PortResult::new(Port::new(22).unwrap(), PortState::Closed),
                PortResult::new(Port::new(80).unwrap(), PortState::Open),
            ],
        }
    }

    #[test]
    fn test_write_host() {
        let mut out = Vec::new();
        write_host(&mut out, &sample(), false).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "host1:\n\t22: closed\n\t80: open\n\n"
        );
    }

    #[test]
    fn test_write_host_open_only() {
        let mut out = Vec::new();
        write_host(&mut out, &sample(), true).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "host1:\n\t80: open\n\n");
    }
}
