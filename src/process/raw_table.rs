#[derive(Debug)]
pub struct RawTable {
    /// Column names from the header record, after `clean_header`.
    pub headers: Vec<String>,
    /// Each data record, already fitted to `headers.len()`.
    pub rows: Vec<Vec<Option<String>>>,
}

impl RawTable {
    pub fn width(&self) -> usize {
        self.headers.len()
    }
}
