use anyhow::{anyhow, Result};
use std::path::Path;
use tracing::{debug, info, warn};

use crate::process::load_csv;
use crate::store::Store;

/// What a single `import` call did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportOutcome {
    Imported {
        table: String,
        columns: usize,
        rows: usize,
    },
    /// A table with this name already exists; the file was not read.
    AlreadyPresent { table: String },
    MissingFile,
    EmptyFile,
}

impl ImportOutcome {
    /// Line to show the user for outcomes that deserve a warning.
    pub fn warning(&self, path: &Path) -> Option<String> {
        match self {
            Self::MissingFile => Some(format!("Warning: CSV file not found: {}", path.display())),
            Self::EmptyFile => Some(format!("Warning: CSV file empty: {}", path.display())),
            Self::Imported { .. } | Self::AlreadyPresent { .. } => None,
        }
    }
}

/// Table name for a CSV path: the file name without its extension.
pub fn table_name_for(path: &Path) -> Result<String> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .ok_or_else(|| anyhow!("cannot derive a table name from {:?}", path))
}

/// Loads CSV files into the store, one table per file.
pub struct Importer<'a> {
    store: &'a mut Store,
}

impl<'a> Importer<'a> {
    pub fn new(store: &'a mut Store) -> Self {
        Self { store }
    }

    /// Import `path` into a table named after its stem.
    ///
    /// Existing tables are left untouched, so re-running over the same files
    /// never duplicates rows. Missing and empty files are reported through the
    /// returned outcome rather than as errors.
    #[tracing::instrument(level = "info", skip(self, path), fields(path = %path.as_ref().display()))]
    pub fn import<P: AsRef<Path>>(&mut self, path: P) -> Result<ImportOutcome> {
        let path = path.as_ref();
        let table = table_name_for(path)?;

        if self.store.table_exists(&table)? {
            debug!(table = %table, "table already present; skipping");
            return Ok(ImportOutcome::AlreadyPresent { table });
        }

        if !path.is_file() {
            warn!("CSV file not found");
            return Ok(ImportOutcome::MissingFile);
        }

        let raw = match load_csv(path)? {
            Some(raw) => raw,
            None => {
                warn!("CSV file empty");
                return Ok(ImportOutcome::EmptyFile);
            }
        };

        self.store.create_table(&table, &raw.headers)?;
        self.store.create_indices(&table, &raw.headers)?;
        let rows = self.store.insert_rows(&table, &raw.headers, &raw.rows)?;
        info!(table = %table, rows, "imported");

        Ok(ImportOutcome::Imported {
            table,
            columns: raw.width(),
            rows,
        })
    }
}
