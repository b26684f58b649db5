use std::fmt::{self, Display};

/// Spreadsheet column letters for a zero-based column index (`0` → `A`, `26` → `AA`).
pub fn column_name(index: usize) -> String {
    let mut letters = Vec::new();
    let mut n = index + 1;
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push(b'A' + rem as u8);
        n = (n - 1) / 26;
    }
    letters.reverse();
    String::from_utf8(letters).unwrap_or_default()
}

/// A rectangular A1-notation range on a named sheet, e.g. `Days!C5:CU5`.
///
/// Columns are zero-based indices, rows are the 1-based numbers shown in the sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct A1Range {
    pub sheet: String,
    pub first_column: usize,
    pub first_row: u32,
    pub last_column: usize,
    pub last_row: u32,
}

impl A1Range {
    pub fn new(
        sheet: &str,
        first_column: usize,
        first_row: u32,
        last_column: usize,
        last_row: u32,
    ) -> Self {
        Self {
            sheet: sheet.to_owned(),
            first_column,
            first_row,
            last_column,
            last_row,
        }
    }

    /// A range spanning `first_column..=last_column` of a single row.
    pub fn row(sheet: &str, row: u32, first_column: usize, last_column: usize) -> Self {
        Self::new(sheet, first_column, row, last_column, row)
    }

    fn quoted_sheet(&self) -> String {
        if self
            .sheet
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            self.sheet.clone()
        } else {
            format!("'{}'", self.sheet.replace('\'', "''"))
        }
    }
}

impl Display for A1Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}!{}{}:{}{}",
            self.quoted_sheet(),
            column_name(self.first_column),
            self.first_row,
            column_name(self.last_column),
            self.last_row
        )
    }
}
