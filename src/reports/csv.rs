//! CSV report generator.
//!
//! Writes additions, deletions and column changes to three separate
//! comma-separated files, suitable for spreadsheet import.

use super::ReportError;
use crate::diff::DiffResult;
use crate::model::Schema;
use std::ffi::OsString;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Header of the deletions file.
const DELETIONS_HEADER: [&str; 1] = ["Key"];

/// Header of the column changes file.
const UPDATES_HEADER: [&str; 4] = ["Hash", "Field", "Left", "Right"];

/// Paths of the three files written for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFiles {
    pub additions: PathBuf,
    pub deletions: PathBuf,
    pub updates: PathBuf,
}

impl OutputFiles {
    /// Derive the three file names from a base such as `out/vendor`.
    #[must_use]
    pub fn for_base(base: &Path) -> Self {
        let with_suffix = |suffix: &str| {
            let mut name = OsString::from(base.as_os_str());
            name.push(suffix);
            PathBuf::from(name)
        };
        Self {
            additions: with_suffix("-adds.csv"),
            deletions: with_suffix("-dels.csv"),
            updates: with_suffix("-updates.csv"),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        [&self.additions, &self.deletions, &self.updates]
            .into_iter()
            .map(PathBuf::as_path)
    }
}

/// CSV report generator for one schema.
pub struct CsvReporter {
    schema: Schema,
}

impl CsvReporter {
    #[must_use]
    pub const fn new(schema: Schema) -> Self {
        Self { schema }
    }

    /// Header row = schema field names; one row of full values per addition.
    pub fn write_additions<W: Write>(
        &self,
        result: &DiffResult<'_>,
        writer: W,
    ) -> Result<usize, ReportError> {
        let mut csv_writer = ::csv::Writer::from_writer(writer);
        csv_writer.write_record(self.schema.fields())?;
        let mut rows = 0;
        for record in result.additions() {
            csv_writer.write_record(record.values())?;
            rows += 1;
        }
        csv_writer.flush()?;
        Ok(rows)
    }

    /// Header row `Key`; one identity hash per deletion.
    pub fn write_deletions<W: Write>(
        &self,
        result: &DiffResult<'_>,
        writer: W,
    ) -> Result<usize, ReportError> {
        let mut csv_writer = ::csv::Writer::from_writer(writer);
        csv_writer.write_record(DELETIONS_HEADER)?;
        let mut rows = 0;
        for record in result.deletions() {
            csv_writer.write_record([record.identity_hash()])?;
            rows += 1;
        }
        csv_writer.flush()?;
        Ok(rows)
    }

    /// Header row `Hash,Field,Left,Right`; one row per column change.
    pub fn write_column_changes<W: Write>(
        &self,
        result: &DiffResult<'_>,
        writer: W,
    ) -> Result<usize, ReportError> {
        let mut csv_writer = ::csv::Writer::from_writer(writer);
        csv_writer.write_record(UPDATES_HEADER)?;
        let mut rows = 0;
        for change in result.column_changes() {
            csv_writer.write_record([
                change.identity_hash(),
                change.field(),
                change.left_value(),
                change.right_value(),
            ])?;
            rows += 1;
        }
        csv_writer.flush()?;
        Ok(rows)
    }

    /// Write all three files next to `base`, returning their paths.
    pub fn write_files(
        &self,
        result: &DiffResult<'_>,
        base: &Path,
    ) -> Result<OutputFiles, ReportError> {
        let files = OutputFiles::for_base(base);

        let rows = self.write_additions(result, create(&files.additions)?)?;
        tracing::debug!("Wrote {rows} row(s) to {}", files.additions.display());

        let rows = self.write_deletions(result, create(&files.deletions)?)?;
        tracing::debug!("Wrote {rows} row(s) to {}", files.deletions.display());

        let rows = self.write_column_changes(result, create(&files.updates)?)?;
        tracing::debug!("Wrote {rows} row(s) to {}", files.updates.display());

        Ok(files)
    }
}

fn create(path: &Path) -> Result<BufWriter<File>, ReportError> {
    File::create(path)
        .map(BufWriter::new)
        .map_err(|source| ReportError::CreateFile {
            path: path.to_path_buf(),
            source,
        })
}
