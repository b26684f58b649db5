use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use super::{StoreError, TimesheetStore};
use crate::activity::Activity;
use crate::grid::{DateKey, DayRow};

/// In-process store used by `timegrid dev` and by tests. Behaves like the
/// spreadsheet: rows exist only for dates that were seeded.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    categories: Vec<Activity>,
    rows: Arc<Mutex<BTreeMap<DateKey, DayRow>>>,
}

impl MemoryStore {
    pub fn new(categories: Vec<Activity>) -> Self {
        Self {
            categories,
            rows: Arc::default(),
        }
    }

    /// Demo categories with an empty row for each of `dates`.
    pub fn demo(dates: &[DateKey]) -> Self {
        let store = Self::new(demo_categories());
        for date in dates {
            store.insert_row(*date, DayRow::default());
        }
        store
    }

    #[cfg(test)]
    pub fn with_row(self, date: DateKey, row: DayRow) -> Self {
        self.insert_row(date, row);
        self
    }

    pub fn insert_row(&self, date: DateKey, row: DayRow) {
        self.lock().insert(date, row);
    }

    pub fn row(&self, date: &DateKey) -> Option<DayRow> {
        self.lock().get(date).cloned()
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<DateKey, DayRow>> {
        self.rows.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl TimesheetStore for MemoryStore {
    fn label(&self) -> &str {
        "Dev"
    }

    async fn load_categories(&self) -> Result<Vec<Activity>, StoreError> {
        Ok(self.categories.clone())
    }

    async fn load_row(&self, date: &DateKey) -> Result<Option<DayRow>, StoreError> {
        Ok(self.row(date))
    }

    async fn save_row(&self, date: &DateKey, row: &DayRow) -> Result<(), StoreError> {
        let mut rows = self.lock();
        match rows.get_mut(date) {
            Some(stored) => {
                *stored = row.clone();
                Ok(())
            }
            None => Err(StoreError::NotFound(*date)),
        }
    }
}

fn demo_categories() -> Vec<Activity> {
    vec![
        Activity::new("", "W", "Work"),
        Activity::new("W", "W1", "Meetings"),
        Activity::new("W", "W2", "Coding"),
        Activity::new("W", "W3", "Review"),
        Activity::new("", "S", "Sleep"),
        Activity::new("", "E", "Exercise"),
        Activity::new("E", "E1", "Running"),
        Activity::new("", "F", "Food"),
    ]
}
