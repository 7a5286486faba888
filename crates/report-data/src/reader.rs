//! CSV file loading for the report pipeline.
//!
//! Reads one or more comma-delimited files whose first line names the fields
//! and converts every data line into a [`RowRecord`].

use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;

use report_core::error::{ReportError, Result};
use report_core::models::RowRecord;
use tracing::debug;

// ── Public API ────────────────────────────────────────────────────────────────

/// Read every file in `paths` and concatenate their records.
///
/// Records keep file order, then line order within each file. All paths are
/// checked up front: if any of them is not an existing regular file the call
/// fails with [`ReportError::MissingFile`] before a single file is opened.
pub fn read_csv_files<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<RowRecord>> {
    for path in paths {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(ReportError::MissingFile(path.to_path_buf()));
        }
    }

    let mut all_records: Vec<RowRecord> = Vec::new();
    for path in paths {
        all_records.extend(read_csv_file(path.as_ref())?);
    }

    debug!(
        "Read {} records from {} files",
        all_records.len(),
        paths.len()
    );

    Ok(all_records)
}

/// Read a single CSV file into records.
///
/// A file holding only a header line, or nothing at all, yields no records.
pub fn read_csv_file(path: &Path) -> Result<Vec<RowRecord>> {
    let file = File::open(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => ReportError::MissingFile(path.to_path_buf()),
        _ => ReportError::FileRead {
            path: path.to_path_buf(),
            source,
        },
    })?;

    let records = read_csv_reader(BufReader::new(file)).map_err(|source| ReportError::Csv {
        path: path.to_path_buf(),
        source,
    })?;

    debug!("File {}: {} records", path.display(), records.len());
    Ok(records)
}

/// Parse CSV text from any reader.
///
/// Lines shorter than the header fill the missing fields with `""`; values
/// beyond the last header column are ignored. Input must be UTF-8.
pub fn read_csv_reader<R: io::Read>(reader: R) -> csv::Result<Vec<RowRecord>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let mut records = Vec::new();

    for result in csv_reader.records() {
        let line = result?;
        let record: RowRecord = headers
            .iter()
            .enumerate()
            .map(|(i, name)| (name, line.get(i).unwrap_or("")))
            .collect();
        records.push(record);
    }

    Ok(records)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
