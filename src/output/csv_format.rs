//! CSV output formatting.

use crate::scanner::HostResult;
use std::io::{self, Write};

/// Streams `host,port,state` rows.
pub struct CsvWriter<W: Write> {
    wtr: csv::Writer<W>,
    header_written: bool,
}

impl<W: Write> CsvWriter<W> {
    pub fn new(out: W) -> Self {
        Self {
            wtr: csv::Writer::from_writer(out),
            header_written: false,
        }
    }

    /// Write one host's rows, emitting the header before the first host.
    pub fn write_host(&mut self, result: &HostResult, open_only: bool) -> io::Result<()> {
        if !self.header_written {
            self.wtr.write_record(["host", "port", "state"])?;
            self.header_written = true;
        }

        for port in result.ports.iter().filter(|r| !open_only || r.is_open()) {
            let port_num = port.port.to_string();
            let state = port.state.to_string();
            self.wtr
                .write_record([result.host.as_str(), port_num.as_str(), state.as_str()])?;
        }

        self.wtr.flush()
    }

    /// Write the header if no host was written, then flush.
    pub fn finish(&mut self) -> io::Result<()> {
        if !self.header_written {
            self.wtr.write_record(["host", "port", "state"])?;
            self.header_written = true;
        }
        self.wtr.flush()
    }
}
