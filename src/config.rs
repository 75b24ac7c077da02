use std::{env, path::PathBuf};

use crate::answer::DEFAULT_LANGUAGE;
use crate::store::DEFAULT_DB_PATH;

/// Environment variable that relocates the store file.
pub const DB_PATH_ENV: &str = "WORLDIMPORT_DB";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub db_path: PathBuf,
    /// CSV files to import, in order.
    pub csv_paths: Vec<PathBuf>,
    pub language: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            csv_paths: Vec::new(),
            language: DEFAULT_LANGUAGE.to_string(),
        }
    }
}

impl Config {
    /// Every argument is a CSV path; there are no flags.
    pub fn from_args<I, S>(args: I, db_override: Option<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<PathBuf>,
    {
        let mut config = Self {
            csv_paths: args.into_iter().map(Into::into).collect(),
            ..Self::default()
        };
        if let Some(db) = db_override.filter(|s| !s.trim().is_empty()) {
            config.db_path = PathBuf::from(db);
        }
        config
    }

    /// Build from the process arguments and environment.
    pub fn from_env() -> Self {
        Self::from_args(env::args_os().skip(1), env::var(DB_PATH_ENV).ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_arguments_means_query_only() {
        let config = Config::from_args(Vec::<String>::new(), None);
        assert!(config.csv_paths.is_empty());
        assert_eq!(config.db_path, PathBuf::from("db.sqlite"));
        assert_eq!(config.language, "Spanish");
    }

    #[test]
    fn arguments_keep_their_order() {
        let config = Config::from_args(
            ["world/country.csv", "world/countrylanguage.csv", "world/city.csv"],
            None,
        );
        assert_eq!(
            config.csv_paths,
            vec![
                PathBuf::from("world/country.csv"),
                PathBuf::from("world/countrylanguage.csv"),
                PathBuf::from("world/city.csv"),
            ]
        );
    }

    #[test]
    fn db_path_override() {
        let config = Config::from_args(Vec::<String>::new(), Some("/tmp/w.sqlite".into()));
        assert_eq!(config.db_path, PathBuf::from("/tmp/w.sqlite"));

        let config = Config::from_args(Vec::<String>::new(), Some("  ".into()));
        assert_eq!(config.db_path, PathBuf::from(DEFAULT_DB_PATH));
    }
}
