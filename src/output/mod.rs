//! Output formatting module.
//!
//! [`Reporter`] renders host results to a writer as they arrive, in plain
//! text, JSON lines or CSV.

mod csv_format;
mod json_format;
mod plain;

pub use plain::print_error;

use crate::cli::OutputFormat;
use crate::scanner::HostResult;
use csv_format::CsvWriter;
use std::io::{self, Write};

enum Sink<W: Write> {
    Plain(W),
    Json(W),
    Csv(CsvWriter<W>),
}

/// Streams scan results to an output sink.
pub struct Reporter<W: Write> {
    sink: Sink<W>,
    open_only: bool,
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W, format: OutputFormat) -> Self {
        let sink = match format {
            OutputFormat::Plain => Sink::Plain(out),
            OutputFormat::Json => Sink::Json(out),
            OutputFormat::Csv => Sink::Csv(CsvWriter::new(out)),
        };
        Self {
            sink,
            open_only: false,
        }
    }

    /// Leave closed ports out of the rendered output.
    pub fn open_only(mut self, open_only: bool) -> Self {
        self.open_only = open_only;
        self
    }

    /// Render one host's results and flush.
    pub fn report(&mut self, result: &HostResult) -> io::Result<()> {
        match &mut self.sink {
            Sink::Plain(out) => {
                plain::write_host(out, result, self.open_only)?;
                out.flush()
            }
            Sink::Json(out) => {
                json_format::write_host(out, result, self.open_only)?;
                out.flush()
            }
            Sink::Csv(wtr) => wtr.write_host(result, self.open_only),
        }
    }

    /// Finish the output once the scan is over.
    pub fn finish(&mut self) -> io::Result<()> {
        match &mut self.sink {
            Sink::Plain(out) | Sink::Json(out) => out.flush(),
            Sink::Csv(wtr) => wtr.finish(),
        }
    }
}
