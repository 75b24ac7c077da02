use anyhow::{Context, Result};
use rusqlite::params;
use std::io::Write;
use tracing::{debug, info};

use crate::store::Store;

pub const DEFAULT_LANGUAGE: &str = "Spanish";

/// Tables the join reads from.
pub const REQUIRED_TABLES: &[&str] = &["country", "countrylanguage"];

pub const INSUFFICIENT_DATA: &str =
    "Database does not contain required tables to answer the question.";
pub const NONE_FOUND: &str = "Answer: <none found>";

const COUNTRIES_BY_LANGUAGE: &str = "SELECT c.Name FROM countrylanguage cl \
     JOIN country c ON c.Code = cl.CountryCode \
     WHERE cl.Language = ?1 ORDER BY c.Name";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    /// One of [`REQUIRED_TABLES`] is missing; no query was run.
    InsufficientData,
    NoneFound,
    /// Country names, ascending.
    Countries(Vec<String>),
}

pub fn question(language: &str) -> String {
    format!(
        "In what countries is used the {} language? Provide their full names, sorted alphabetically.",
        language
    )
}

/// Names of countries where `language` is spoken, sorted by name.
pub fn countries_speaking(store: &Store, language: &str) -> Result<Answer> {
    if !store.tables_exist(REQUIRED_TABLES)? {
        debug!(tables = ?REQUIRED_TABLES, "required tables missing");
        return Ok(Answer::InsufficientData);
    }

    let mut stmt = store
        .connection()
        .prepare(COUNTRIES_BY_LANGUAGE)
        .context("preparing language query")?;
    let names = stmt
        .query_map(params![language], |r| r.get::<_, Option<String>>(0))
        .context("running language query")?
        .filter_map(|name| name.transpose())
        .collect::<rusqlite::Result<Vec<String>>>()
        .context("reading language query rows")?;
    info!(language, matches = names.len(), "answered language query");

    if names.is_empty() {
        Ok(Answer::NoneFound)
    } else {
        Ok(Answer::Countries(names))
    }
}

/// Write the question and its answer to `out`, one line per country.
pub fn write_answer<W: Write>(out: &mut W, language: &str, answer: &Answer) -> Result<()> {
    match answer {
        Answer::InsufficientData => writeln!(out, "{}", INSUFFICIENT_DATA)?,
        Answer::NoneFound => {
            writeln!(out, "{}", question(language))?;
            writeln!(out, "{}", NONE_FOUND)?;
        }
        Answer::Countries(names) => {
            writeln!(out, "{}", question(language))?;
            writeln!(out, "Answer:")?;
            for name in names {
                writeln!(out, "{}", name)?;
            }
        }
    }
    Ok(())
}

/// Run the fixed language query against `store` and print the result.
pub fn answer_fixed_query<W: Write>(store: &Store, language: &str, out: &mut W) -> Result<Answer> {
    let answer = countries_speaking(store, language)?;
    write_answer(out, language, &answer)?;
    Ok(answer)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cols(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn row(values: &[Option<&str>]) -> Vec<Option<String>> {
        values.iter().map(|v| v.map(str::to_string)).collect()
    }

    fn world(languages: &[(&str, &str)]) -> Store {
        let mut store = Store::open_in_memory().unwrap();
        let country = cols(&["Code", "Name"]);
        store.create_table("country", &country).unwrap();
        store
            .insert_rows(
                "country",
                &country,
                &[
                    row(&[Some("ESP"), Some("Spain")]),
                    row(&[Some("MEX"), Some("Mexico")]),
                    row(&[Some("NLD"), Some("Netherlands")]),
                ],
            )
            .unwrap();

        let lang = cols(&["CountryCode", "Language"]);
        store.create_table("countrylanguage", &lang).unwrap();
        let rows: Vec<_> = languages
            .iter()
            .map(|&(code, language)| row(&[Some(code), Some(language)]))
            .collect();
        store.insert_rows("countrylanguage", &lang, &rows).unwrap();
        store
    }

    fn render(store: &Store) -> (Answer, String) {
        let mut out = Vec::new();
        let answer = answer_fixed_query(store, DEFAULT_LANGUAGE, &mut out).unwrap();
        (answer, String::from_utf8(out).unwrap())
    }

    #[test]
    fn spanish_countries_in_alphabetical_order() {
        let store = world(&[("ESP", "Spanish"), ("MEX", "Spanish"), ("NLD", "Dutch")]);
        let (answer, text) = render(&store);

        assert_eq!(
            answer,
            Answer::Countries(vec!["Mexico".into(), "Spain".into()])
        );
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![question("Spanish").as_str(), "Answer:", "Mexico", "Spain"]
        );
    }

    #[test]
    fn no_matching_rows_prints_none_found() {
        let store = world(&[("NLD", "Dutch")]);
        let (answer, text) = render(&store);

        assert_eq!(answer, Answer::NoneFound);
        assert!(text.ends_with("Answer: <none found>\n"));
        assert!(text.starts_with("In what countries is used the Spanish language?"));
    }

    #[test]
    fn missing_language_table_is_insufficient() {
        let store = Store::open_in_memory().unwrap();
        store.create_table("country", &cols(&["Code", "Name"])).unwrap();
        let (answer, text) = render(&store);

        assert_eq!(answer, Answer::InsufficientData);
        assert_eq!(text, format!("{}\n", INSUFFICIENT_DATA));
    }

    #[test]
    fn unmatched_codes_and_null_names_are_dropped() {
        let mut store = world(&[("ESP", "Spanish"), ("ZZZ", "Spanish"), ("NUL", "Spanish")]);
        let country = cols(&["Code", "Name"]);
        store
            .insert_rows("country", &country, &[row(&[Some("NUL"), None])])
            .unwrap();

        assert_eq!(
            countries_speaking(&store, "Spanish").unwrap(),
            Answer::Countries(vec!["Spain".into()])
        );
    }
}
