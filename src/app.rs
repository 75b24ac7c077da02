use anyhow::Result;
use std::{io::Write, path::PathBuf};
use tracing::{error, info};

use crate::answer::{answer_fixed_query, Answer};
use crate::config::Config;
use crate::import::{ImportOutcome, Importer};
use crate::store::Store;

#[derive(Debug)]
pub struct RunSummary {
    pub imports: Vec<(PathBuf, ImportOutcome)>,
    /// Paths whose import returned an error; later paths still ran.
    pub failed: Vec<PathBuf>,
    pub answer: Answer,
}

/// Import every configured CSV, answer the language question, release the store.
pub fn run<W: Write>(config: &Config, out: &mut W) -> Result<RunSummary> {
    info!(db = %config.db_path.display(), files = config.csv_paths.len(), "startup");
    let mut store = Store::open(&config.db_path)?;

    let result = import_and_answer(&mut store, config, out);
    let closed = store.close();

    let summary = result?;
    closed?;
    Ok(summary)
}

/// Everything `run` does between opening and closing the store.
pub fn import_and_answer<W: Write>(
    store: &mut Store,
    config: &Config,
    out: &mut W,
) -> Result<RunSummary> {
    let mut imports = Vec::with_capacity(config.csv_paths.len());
    let mut failed = Vec::new();

    let mut importer = Importer::new(store);
    for path in &config.csv_paths {
        match importer.import(path) {
            Ok(outcome) => {
                if let Some(line) = outcome.warning(path) {
                    writeln!(out, "{}", line)?;
                }
                imports.push((path.clone(), outcome));
            }
            Err(e) => {
                error!("import of {} failed: {:#}", path.display(), e);
                failed.push(path.clone());
            }
        }
    }

    let answer = answer_fixed_query(store, &config.language, out)?;
    Ok(RunSummary {
        imports,
        failed,
        answer,
    })
}
