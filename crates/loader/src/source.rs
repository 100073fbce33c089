use crate::error::LoadError;
use core_types::SourceRow;
use std::path::Path;

/// Reads a whole CSV source into normalized rows.
///
/// The file is read completely before any row is handed out, so a malformed
/// record anywhere in the file aborts the source before a single row of it is
/// written. Reading the same file again yields the same rows in the same order.
pub fn read_source(path: &Path) -> Result<Vec<SourceRow>, LoadError> {
    let source_name = source_name(path);
    let read_error = |source: csv::Error| LoadError::SourceRead {
        source_name: source_name.clone(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .map_err(read_error)?;

    let headers = reader.headers().map_err(read_error)?.clone();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(read_error)?;
        rows.push(SourceRow::from_raw(headers.iter(), record.iter()));
    }

    tracing::debug!(source = %source_name, rows = rows.len(), "Read source file.");
    Ok(rows)
}

/// The file name used to identify a source in progress output and errors.
pub fn source_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
