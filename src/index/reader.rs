//! Reading delimited feed data into a [`FeedIndex`].
//!
//! Every physical line is a row. Blank lines are rows with no fields: they
//! count toward the skipped leading rows, and anywhere after those they fail
//! the field count check like any other short row.

use super::{FeedIndex, IndexBuilder, IndexOptions};
use crate::error::{ErrorContext, FeedError, ParseErrorKind, Result};
use crate::model::{Record, Schema};
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// Index a feed file on disk.
///
/// The file handle lives only for the duration of this call and is closed
/// on every return path.
pub fn index_file(path: &Path, schema: Schema, options: &IndexOptions) -> Result<FeedIndex> {
    let file = File::open(path).map_err(|e| FeedError::io(path, e))?;
    index_reader(file, &path.display().to_string(), schema, options)
}

/// Index feed data from any reader.
///
/// `source` labels the input in log lines and error messages. A row whose
/// field count does not match the schema, or that cannot be decoded, fails
/// the whole call.
pub fn index_reader<R: Read>(
    reader: R,
    source: &str,
    schema: Schema,
    options: &IndexOptions,
) -> Result<FeedIndex> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .delimiter(options.delimiter)
        .terminator(csv::Terminator::Any(b'\n'))
        .flexible(true)
        .from_reader(Terminated::new(reader));

    let mut rows = RowSink {
        builder: IndexBuilder::new(schema, source),
        schema,
        source,
        skip_rows: options.skip_rows,
        rows_seen: 0,
    };
    let mut row = csv::StringRecord::new();

    loop {
        // The csv reader drops blank lines, so they are recovered from the
        // gap between where a read starts and where its row begins.
        let start = csv_reader.position().line();
        let more = csv_reader
            .read_record(&mut row)
            .map_err(|e| read_error(e, source, start))?;
        let end = csv_reader.position().line();

        if !more {
            for line in start..end {
                rows.push(Vec::new(), line)?;
            }
            break;
        }

        let first = end.saturating_sub(lines_spanned(&row)).max(start);
        for line in start..first {
            rows.push(Vec::new(), line)?;
        }
        rows.push(row_values(&row), first)?;
    }

    rows.builder.finish()
}

/// Numbers rows, drops the leading ones and feeds the rest to the builder.
struct RowSink<'a> {
    builder: IndexBuilder,
    schema: Schema,
    source: &'a str,
    skip_rows: usize,
    rows_seen: usize,
}

impl RowSink<'_> {
    fn push(&mut self, values: Vec<String>, line: u64) -> Result<()> {
        self.rows_seen += 1;
        if self.rows_seen <= self.skip_rows {
            self.builder.skip_row(line);
            return Ok(());
        }

        let record = Record::new(self.schema, values)
            .with_context(|| format!("{}: line {line}", self.source))?;
        self.builder.push(record, line)
    }
}

/// Physical lines consumed by one row, its terminator included.
fn lines_spanned(row: &csv::StringRecord) -> u64 {
    let embedded: usize = row.iter().map(|field| field.matches('\n').count()).sum();
    embedded as u64 + 1
}

/// Field values with a CRLF line ending removed. A line holding only a
/// line ending has no fields.
fn row_values(row: &csv::StringRecord) -> Vec<String> {
    let mut values: Vec<String> = row.iter().map(str::to_string).collect();
    if let Some(last) = values.last_mut() {
        if last.ends_with('\r') {
            last.pop();
        }
    }
    if values.len() == 1 && values[0].is_empty() {
        values.clear();
    }
    values
}

fn read_error(err: csv::Error, source: &str, line: u64) -> FeedError {
    let message = err.to_string();
    match err.into_kind() {
        csv::ErrorKind::Io(io_err) => FeedError::io(source, io_err),
        _ => FeedError::parse(
            format!("{source}: line {line}"),
            ParseErrorKind::Malformed(message),
        ),
    }
}

/// Appends a line break to input whose last line lacks one, so every row
/// read from it ends with a terminator.
struct Terminated<R> {
    inner: R,
    last: Option<u8>,
    done: bool,
}

impl<R> Terminated<R> {
    const fn new(inner: R) -> Self {
        Self {
            inner,
            last: None,
            done: false,
        }
    }
}

impl<R: Read> Read for Terminated<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.done || buf.is_empty() {
            return Ok(0);
        }
        let n = self.inner.read(buf)?;
        if n > 0 {
            self.last = Some(buf[n - 1]);
            return Ok(n);
        }
        self.done = true;
        match self.last {
            Some(byte) if byte != b'\n' => {
                buf[0] = b'\n';
                Ok(1)
            }
            _ => Ok(0),
        }
    }
}
