use async_trait::async_trait;
use thiserror::Error;

use crate::activity::Activity;
use crate::grid::{DateKey, DayRow};

mod memory;
mod spreadsheet;

pub use memory::MemoryStore;
pub use spreadsheet::{SheetLayout, SheetsStore};

/// Row-oriented storage for the grid: one row of 96 quarter-hour codes per
/// day, keyed by [`DateKey`], plus the flat category list.
#[async_trait]
pub trait TimesheetStore: Send + Sync {
    /// Short name shown in the header.
    fn label(&self) -> &str;

    async fn load_categories(&self) -> Result<Vec<Activity>, StoreError>;

    /// The stored row for `date`, or `None` if the store has no row for it.
    async fn load_row(&self, date: &DateKey) -> Result<Option<DayRow>, StoreError>;

    /// Overwrite the row for `date`. Rows are never created; a missing row is
    /// [`StoreError::NotFound`].
    async fn save_row(&self, date: &DateKey, row: &DayRow) -> Result<(), StoreError>;
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("invalid credentials: {0}")]
    MalformedCredential(String),
    #[error("authentication failed: {0}")]
    AuthFailure(String),
    #[error("{0}")]
    NetworkFailure(String),
    #[error("Date {0} not found in sheet")]
    NotFound(DateKey),
}
