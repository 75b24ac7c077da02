pub mod indexes;

use anyhow::{Context, Result};
use rusqlite::{params, params_from_iter, Connection, OptionalExtension};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Default location of the store, relative to the working directory.
pub const DEFAULT_DB_PATH: &str = "db.sqlite";

/// Owns the single SQLite connection for the life of a run.
///
/// The connection is released by [`Store::close`], or by `Drop` on any path
/// that returns early.
#[derive(Debug)]
pub struct Store {
    conn: Connection,
    path: Option<PathBuf>,
}

impl Store {
    /// Open `path`, creating the database file if it does not exist.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let conn = Connection::open(&path)
            .with_context(|| format!("opening store {}", path.display()))?;
        Self::init(conn, Some(path))
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("opening in-memory store")?;
        Self::init(conn, None)
    }

    fn init(conn: Connection, path: Option<PathBuf>) -> Result<Self> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")
            .context("enabling foreign keys")?;
        Ok(Self { conn, path })
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    pub fn table_exists(&self, table: &str) -> Result<bool> {
        let found = self
            .conn
            .query_row(
                "SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1",
                params![table],
                |_| Ok(()),
            )
            .optional()
            .with_context(|| format!("looking up table {}", table))?;
        Ok(found.is_some())
    }

    pub fn tables_exist(&self, tables: &[&str]) -> Result<bool> {
        for table in tables {
            if !self.table_exists(table)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// `CREATE TABLE` with one `TEXT` column per entry in `columns`.
    pub fn create_table(&self, table: &str, columns: &[String]) -> Result<()> {
        let defs: Vec<String> = columns
            .iter()
            .map(|c| format!("{} TEXT", quote_ident(c)))
            .collect();
        let ddl = format!("CREATE TABLE {} ({})", quote_ident(table), defs.join(", "));
        self.conn
            .execute_batch(&ddl)
            .with_context(|| format!("creating table {}", table))?;
        debug!(table, columns = columns.len(), "created table");
        Ok(())
    }

    /// Build the supporting indices registered for `table`, skipping any whose
    /// column is absent. Returns the names of the indices built.
    pub fn create_indices(&self, table: &str, columns: &[String]) -> Result<Vec<&'static str>> {
        let mut created = Vec::new();
        for rule in indexes::applicable(table, columns) {
            let sql = format!(
                "CREATE INDEX IF NOT EXISTS {} ON {}({})",
                quote_ident(rule.name),
                quote_ident(table),
                quote_ident(rule.column)
            );
            self.conn
                .execute_batch(&sql)
                .with_context(|| format!("creating index {}", rule.name))?;
            created.push(rule.name);
        }
        if !created.is_empty() {
            info!(table, indices = ?created, "created indices");
        }
        Ok(created)
    }

    /// Insert every row in a single transaction. Nothing is written if any
    /// row fails.
    pub fn insert_rows(
        &mut self,
        table: &str,
        columns: &[String],
        rows: &[Vec<Option<String>>],
    ) -> Result<usize> {
        if rows.is_empty() {
            return Ok(0);
        }

        let cols: Vec<String> = columns.iter().map(|c| quote_ident(c)).collect();
        let placeholders: Vec<String> = (1..=columns.len()).map(|i| format!("?{}", i)).collect();
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            quote_ident(table),
            cols.join(", "),
            placeholders.join(", ")
        );

        let tx = self.conn.transaction().context("starting insert transaction")?;
        {
            let mut stmt = tx
                .prepare(&sql)
                .with_context(|| format!("preparing insert into {}", table))?;
            for (idx, row) in rows.iter().enumerate() {
                stmt.execute(params_from_iter(row.iter()))
                    .with_context(|| format!("inserting row {} into {}", idx + 1, table))?;
            }
        }
        tx.commit()
            .with_context(|| format!("committing rows into {}", table))?;
        Ok(rows.len())
    }

    pub fn row_count(&self, table: &str) -> Result<i64> {
        let sql = format!("SELECT COUNT(*) FROM {}", quote_ident(table));
        self.conn
            .query_row(&sql, [], |r| r.get(0))
            .with_context(|| format!("counting rows in {}", table))
    }

    /// Release the connection, surfacing any error SQLite reports on close.
    pub fn close(self) -> Result<()> {
        self.conn
            .close()
            .map_err(|(_, err)| err)
            .context("closing store")
    }
}

/// Double-quote an SQL identifier, doubling any embedded quotes.
pub fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
