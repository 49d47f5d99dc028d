use csv::WriterBuilder;
use std::fs::{self, OpenOptions};
use std::path::Path;

use crate::error::{Error, Result};
use crate::report::ExportRow;

/// Header of the flat results file
pub const EXPORT_COLUMNS: [&str; 5] = ["analysis_date", "metric", "analysis_type", "category", "value"];

/// Append rows to the results file at `path`
///
/// The file (and its parent directories) is created on first use and gets
/// a header line; later calls append rows without repeating the header.
pub fn append_results<P: AsRef<Path>>(path: P, rows: &[ExportRow]) -> Result<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(Error::Io)?;
        }
    }

    let needs_header = match fs::metadata(path) {
        Ok(meta) => meta.len() == 0,
        Err(_) => true,
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(Error::Io)?;

    let mut wtr = WriterBuilder::new().has_headers(false).from_writer(file);

    if needs_header {
        wtr.write_record(EXPORT_COLUMNS).map_err(Error::Csv)?;
    }

    for row in rows {
        wtr.serialize(row).map_err(Error::Csv)?;
    }

    wtr.flush().map_err(Error::Io)?;
    log::info!("appended {} rows to {}", rows.len(), path.display());
    Ok(())
}
