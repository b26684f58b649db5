use async_trait::async_trait;
use sheets::{A1Range, SheetsClient, SheetsError};
use tracing::instrument;

use super::{StoreError, TimesheetStore};
use crate::activity::Activity;
use crate::grid::{DateKey, DayRow, SLOTS_PER_DAY};

/// First data row below the header row.
const FIRST_DATA_ROW: u32 = 2;
const LAST_CATEGORY_ROW: u32 = 100;
const LAST_DAY_ROW: u32 = 500;
/// Column A holds the date key, column B is free-form, payload starts at C.
const FIRST_PAYLOAD_COLUMN: usize = 2;
/// Ranges end at column CU, which leaves one spare column after the 96 payload cells.
const LAST_DAY_COLUMN: usize = 98;

/// Where the grid lives inside the spreadsheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetLayout {
    pub days_sheet: String,
    pub categories_sheet: String,
}

impl Default for SheetLayout {
    fn default() -> Self {
        Self {
            days_sheet: "Days".to_string(),
            categories_sheet: "Categories".to_string(),
        }
    }
}

impl SheetLayout {
    /// `Categories!A2:C100`: parent, code, name.
    pub fn categories_range(&self) -> A1Range {
        A1Range::new(&self.categories_sheet, 0, FIRST_DATA_ROW, 2, LAST_CATEGORY_ROW)
    }

    /// `Days!A2:CU500`: date key followed by payload cells.
    pub fn days_range(&self) -> A1Range {
        A1Range::new(&self.days_sheet, 0, FIRST_DATA_ROW, LAST_DAY_COLUMN, LAST_DAY_ROW)
    }

    /// `Days!A2:B500`: enough to find a date's row number.
    pub fn day_keys_range(&self) -> A1Range {
        A1Range::new(&self.days_sheet, 0, FIRST_DATA_ROW, 1, LAST_DAY_ROW)
    }

    /// `Days!C{row}:CU{row}`
    pub fn payload_range(&self, row: u32) -> A1Range {
        A1Range::row(&self.days_sheet, row, FIRST_PAYLOAD_COLUMN, LAST_DAY_COLUMN)
    }
}

/// Index into `rows` of the first row whose column A is exactly `date`.
pub(crate) fn find_day_row(rows: &[Vec<String>], date: &DateKey) -> Option<usize> {
    let wanted = date.to_string();
    rows.iter()
        .position(|row| row.first().is_some_and(|cell| *cell == wanted))
}

/// Payload cells of a `days_range` row.
pub(crate) fn payload_cells(row: &[String]) -> &[String] {
    let end = row.len().min(FIRST_PAYLOAD_COLUMN + SLOTS_PER_DAY);
    row.get(FIRST_PAYLOAD_COLUMN..end).unwrap_or(&[])
}

pub struct SheetsStore {
    client: SheetsClient,
    layout: SheetLayout,
}

impl SheetsStore {
    pub fn new(client: SheetsClient, layout: SheetLayout) -> Self {
        Self { client, layout }
    }
}

#[async_trait]
impl TimesheetStore for SheetsStore {
    fn label(&self) -> &str {
        "Google Sheets"
    }

    #[instrument(name = "SheetsStore::load_categories", skip(self))]
    async fn load_categories(&self) -> Result<Vec<Activity>, StoreError> {
        let range = self.layout.categories_range();
        let values = self
            .client
            .get_values(&range)
            .await
            .map_err(map_sheets_error)?;

        Ok(values
            .values
            .iter()
            .filter_map(|row| Activity::from_row(row))
            .collect())
    }

    #[instrument(name = "SheetsStore::load_row", skip(self), fields(date = %date))]
    async fn load_row(&self, date: &DateKey) -> Result<Option<DayRow>, StoreError> {
        let values = self
            .client
            .get_values(&self.layout.days_range())
            .await
            .map_err(map_sheets_error)?;

        let Some(index) = find_day_row(&values.values, date) else {
            tracing::warn!("date {} not found in {} sheet", date, self.layout.days_sheet);
            return Ok(None);
        };

        Ok(Some(DayRow::from_cells(payload_cells(&values.values[index]))))
    }

    #[instrument(name = "SheetsStore::save_row", skip(self, row), fields(date = %date))]
    async fn save_row(&self, date: &DateKey, row: &DayRow) -> Result<(), StoreError> {
        let keys = self
            .client
            .get_values(&self.layout.day_keys_range())
            .await
            .map_err(map_sheets_error)?;

        let Some(index) = find_day_row(&keys.values, date) else {
            tracing::warn!("date {} not found in {} sheet", date, self.layout.days_sheet);
            return Err(StoreError::NotFound(*date));
        };

        let sheet_row = FIRST_DATA_ROW + index as u32;
        let response = self
            .client
            .update_values(&self.layout.payload_range(sheet_row), vec![row.to_cells()])
            .await
            .map_err(map_sheets_error)?;

        tracing::debug!(
            "saved {} to row {} ({:?} cells updated)",
            date,
            sheet_row,
            response.updated_cells
        );
        Ok(())
    }
}

fn map_sheets_error(e: SheetsError) -> StoreError {
    match e {
        SheetsError::MalformedCredential(msg) => StoreError::MalformedCredential(msg),
        SheetsError::Signing(msg) | SheetsError::TokenExchange(msg) => StoreError::AuthFailure(msg),
        SheetsError::Unauthorized => {
            StoreError::AuthFailure("access to the spreadsheet was denied".to_string())
        }
        SheetsError::ResponseError(_) | SheetsError::Api { .. } | SheetsError::ParsingError(_) => {
            StoreError::NetworkFailure(e.to_string())
        }
    }
}
