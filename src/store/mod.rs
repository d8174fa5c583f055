// src/store/mod.rs

pub mod clean;

pub use clean::{clean, CleanedTable};

use csv::{ReaderBuilder, Writer};
use std::{fs, path::Path};
use tracing::{debug, info, instrument};

use crate::error::PersistError;
use crate::extract::ResultTable;

/// Write `table` as comma-delimited UTF-8: header line, then one line per
/// row, no index column. Missing parent directories are created.
#[instrument(level = "info", skip(table), fields(rows = table.len()))]
pub fn save(table: &ResultTable, path: &Path) -> Result<(), PersistError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| PersistError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let write_err = |source: csv::Error| PersistError::Write {
        path: path.to_path_buf(),
        source,
    };

    let mut wtr = Writer::from_path(path).map_err(write_err)?;
    wtr.write_record(table.header()).map_err(write_err)?;
    for row in table.rows() {
        wtr.write_record(row).map_err(write_err)?;
    }
    wtr.flush().map_err(|e| write_err(e.into()))?;

    info!(path = %path.display(), rows = table.len(), "saved table");
    Ok(())
}

/// Read a file written by [`save`], trim the header labels and drop every
/// row with an empty or missing field.
#[instrument(level = "info")]
pub fn load_and_clean(path: &Path) -> Result<CleanedTable, PersistError> {
    let read_err = |source: csv::Error| PersistError::Read {
        path: path.to_path_buf(),
        source,
    };

    let mut rdr = ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(read_err)?;

    let header: Vec<String> = rdr
        .headers()
        .map_err(read_err)?
        .iter()
        .map(str::to_string)
        .collect();
    if header.is_empty() {
        return Err(PersistError::NoHeader {
            path: path.to_path_buf(),
        });
    }

    let mut rows = Vec::new();
    for record in rdr.records() {
        let record = record.map_err(read_err)?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    let cleaned = clean::clean_rows(&header, rows);
    debug!(kept = cleaned.table().len(), dropped = cleaned.dropped(), "cleaned table");
    Ok(cleaned)
}
