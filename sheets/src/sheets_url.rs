use std::env;

use crate::domain::A1Range;

const DEFAULT_SHEETS_URL: &str = "https://sheets.googleapis.com/v4/spreadsheets";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetsURL(String);

impl AsRef<str> for SheetsURL {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl SheetsURL {
    pub fn new(base: &str) -> Self {
        Self(base.to_string())
    }

    /// Creates a SheetsURL from `SHEETS_API_URL`, falling back to the public Google endpoint.
    pub fn from_env() -> Self {
        Self(env::var("SHEETS_API_URL").unwrap_or_else(|_| DEFAULT_SHEETS_URL.to_string()))
    }

    /// Append the given path to the URL.
    pub fn append_path(&self, path: &str) -> Self {
        let trimmed_url = self.0.trim_end_matches('/');
        let trimmed_path = path.trim_start_matches('/');
        Self(format!("{}/{}", trimmed_url, trimmed_path))
    }

    /// `{spreadsheet}/values/{range}` with the range percent-encoded.
    pub fn values(&self, spreadsheet_id: &str, range: &A1Range) -> Self {
        self.append_path(spreadsheet_id)
            .append_path("values")
            .append_path(&urlencoding::encode(&range.to_string()))
    }

    pub fn with_query(&self, key: &str, value: &str) -> Self {
        let separator = if self.0.contains('?') { '&' } else { '?' };
        Self(format!(
            "{}{}{}={}",
            self.0,
            separator,
            key,
            urlencoding::encode(value)
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_path_avoids_double_slashes() {
        let url = SheetsURL::new("https://example.test/v4/").append_path("/abc");
        assert_eq!(url.as_ref(), "https://example.test/v4/abc");
    }

    #[test]
    fn values_url_encodes_range() {
        let range = A1Range::new("Days", 0, 2, 98, 500);
        let url = SheetsURL::new(DEFAULT_SHEETS_URL).values("sheet-id", &range);
        assert_eq!(
            url.as_ref(),
            "https://sheets.googleapis.com/v4/spreadsheets/sheet-id/values/Days%21A2%3ACU500"
        );
    }

    #[test]
    fn query_parameters_are_chained() {
        let url = SheetsURL::new("https://example.test")
            .with_query("valueInputOption", "RAW")
            .with_query("includeValuesInResponse", "false");
        assert_eq!(
            url.as_ref(),
            "https://example.test?valueInputOption=RAW&includeValuesInResponse=false"
        );
    }
}
