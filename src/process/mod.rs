// src/process/mod.rs
pub mod raw_table;
pub mod utils;

use anyhow::{Context, Result};
use csv::{ReaderBuilder, StringRecord};
use std::{fs::File, io::Read, path::Path};
use tracing::{debug, trace};

pub use raw_table::RawTable;
use utils::{clean_header, normalize_row};

pub const DELIMITER: u8 = b';';
pub const QUOTE: u8 = b'"';

/// Open `path` and parse it as a semicolon-delimited CSV with a header record.
///
/// Returns `Ok(None)` when the file holds no header at all (empty file).
#[tracing::instrument(level = "debug", skip(path), fields(path = %path.as_ref().display()))]
pub fn load_csv<P: AsRef<Path>>(path: P) -> Result<Option<RawTable>> {
    let file = File::open(&path)
        .with_context(|| format!("Failed to open CSV file: {:?}", path.as_ref()))?;
    read_csv(file).with_context(|| format!("Failed to parse CSV file: {:?}", path.as_ref()))
}

/// Same as [`load_csv`], over any reader.
pub fn read_csv<R: Read>(reader: R) -> Result<Option<RawTable>> {
    let mut rdr = ReaderBuilder::new()
        .delimiter(DELIMITER)
        .quote(QUOTE)
        .has_headers(false)
        .flexible(true) // short and long records are repaired, not rejected
        .from_reader(reader);

    let mut record = StringRecord::new();
    if !rdr.read_record(&mut record).context("reading header record")? {
        return Ok(None);
    }
    let headers: Vec<String> = record.iter().map(clean_header).collect();
    let width = headers.len();
    debug!(columns = width, "parsed header");

    let mut rows = Vec::new();
    for (idx, result) in rdr.records().enumerate() {
        let record = result.with_context(|| format!("CSV parse error at record {}", idx + 1))?;
        if record.is_empty() {
            continue;
        }
        if record.len() != width {
            trace!(record = idx + 1, fields = record.len(), width, "repairing record width");
        }
        rows.push(normalize_row(record.iter(), width));
    }

    Ok(Some(RawTable { headers, rows }))
}
