//! Parqet CSV writer.
//!
//! Semicolon-delimited, CRLF-terminated, quoting only fields that need it.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use csv::{QuoteStyle, Terminator, WriterBuilder};

use crate::error::{WriteError, WriteResult};
use crate::models::{OutputRow, HEADER};

/// Writes the Parqet header followed by converted rows.
pub struct ParqetWriter<W: Write> {
    inner: csv::Writer<W>,
}

impl<W: Write> ParqetWriter<W> {
    /// Wrap a sink and emit the header line.
    pub fn new(sink: W) -> WriteResult<Self> {
        let mut inner = WriterBuilder::new()
            .delimiter(b';')
            .has_headers(false)
            .quote_style(QuoteStyle::Necessary)
            .terminator(Terminator::CRLF)
            .from_writer(sink);

        inner.write_record(HEADER)?;

        Ok(Self { inner })
    }

    pub fn write_row(&mut self, row: &OutputRow) -> WriteResult<()> {
        self.inner.write_record(row.fields())?;
        Ok(())
    }

    /// Flush and hand back the sink.
    pub fn finish(self) -> WriteResult<W> {
        self.inner
            .into_inner()
            .map_err(|e| WriteError::Io(e.into_error()))
    }
}

/// Create the output file and write the header.
pub fn create_output<P: AsRef<Path>>(path: P) -> WriteResult<ParqetWriter<BufWriter<File>>> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|source| WriteError::Create {
        path: path.to_path_buf(),
        source,
    })?;
    ParqetWriter::new(BufWriter::new(file))
}
