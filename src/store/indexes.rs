/// One secondary index the importer knows how to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexRule {
    pub name: &'static str,
    pub column: &'static str,
}

/// Tables that get supporting indices for the language query, keyed by table name.
pub static INDEX_RULES: &[(&str, &[IndexRule])] = &[
    (
        "country",
        &[IndexRule {
            name: "idx_country_code",
            column: "Code",
        }],
    ),
    (
        "countrylanguage",
        &[
            IndexRule {
                name: "idx_cl_language",
                column: "Language",
            },
            IndexRule {
                name: "idx_cl_countrycode",
                column: "CountryCode",
            },
        ],
    ),
];

/// Rules registered for `table`; empty for every other table.
pub fn rules_for(table: &str) -> &'static [IndexRule] {
    INDEX_RULES
        .iter()
        .find(|(name, _)| *name == table)
        .map(|(_, rules)| *rules)
        .unwrap_or(&[])
}

/// Rules for `table` whose column is actually present.
pub fn applicable<'a>(
    table: &str,
    columns: &'a [String],
) -> impl Iterator<Item = &'static IndexRule> + 'a {
    rules_for(table)
        .iter()
        .filter(move |rule| columns.iter().any(|c| c == rule.column))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_tables_have_no_rules() {
        assert!(rules_for("city").is_empty());
        assert!(rules_for("Country").is_empty());
    }

    #[test]
    fn rules_require_the_column() {
        let cols = vec!["CountryCode".to_string(), "IsOfficial".to_string()];
        let names: Vec<_> = applicable("countrylanguage", &cols).map(|r| r.name).collect();
        assert_eq!(names, vec!["idx_cl_countrycode"]);

        let cols = vec!["Name".to_string()];
        assert_eq!(applicable("country", &cols).count(), 0);
    }
}
