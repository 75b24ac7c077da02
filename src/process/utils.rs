/// Marker some CSV exports write for a missing value.
pub const NULL_MARKER: &str = "NULL";

/// Trim whitespace, then strip any leading/trailing double quotes.
pub fn clean_header(raw: &str) -> String {
    raw.trim().trim_matches('"').to_string()
}

/// `""` and `NULL` are stored as SQL NULL; everything else verbatim.
pub fn clean_field(raw: &str) -> Option<String> {
    if raw.is_empty() || raw == NULL_MARKER {
        None
    } else {
        Some(raw.to_string())
    }
}

/// Fit a record to `width` fields: pad with NULL, or drop the extras.
pub fn normalize_row<'a, I>(fields: I, width: usize) -> Vec<Option<String>>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut row: Vec<Option<String>> = fields.into_iter().take(width).map(clean_field).collect();
    row.resize(width, None);
    row
}
