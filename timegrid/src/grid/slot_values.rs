use std::collections::BTreeMap;

use super::slot_key::{DateKey, SlotKey, SLOTS_PER_DAY};

/// The 96 activity codes of one stored day row, in column order (hour-major).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayRow(Vec<Option<String>>);

impl Default for DayRow {
    fn default() -> Self {
        Self(vec![None; SLOTS_PER_DAY])
    }
}

impl DayRow {
    /// Build from raw payload cells. Empty cells are unfilled; short rows are padded
    /// and cells past the 96th are ignored.
    pub fn from_cells<S: AsRef<str>>(cells: &[S]) -> Self {
        let mut row = Self::default();
        for (slot, cell) in row.0.iter_mut().zip(cells) {
            let cell = cell.as_ref();
            if !cell.is_empty() {
                *slot = Some(cell.to_string());
            }
        }
        row
    }

    /// Cells to write back; unfilled slots become empty strings so stale values are cleared.
    pub fn to_cells(&self) -> Vec<String> {
        self.0
            .iter()
            .map(|code| code.clone().unwrap_or_default())
            .collect()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get(index).and_then(|code| code.as_deref())
    }

    pub fn filled(&self) -> usize {
        self.0.iter().filter(|code| code.is_some()).count()
    }
}

/// What a click did to a slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotEdit {
    Filled,
    Cleared,
    Overwritten { previous: String },
}

/// Sparse map from slot to activity code. A missing entry is an unfilled slot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlotValues(BTreeMap<SlotKey, String>);

impl SlotValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &SlotKey) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: SlotKey, code: impl Into<String>) -> Option<String> {
        self.0.insert(key, code.into())
    }

    pub fn remove(&mut self, key: &SlotKey) -> Option<String> {
        self.0.remove(key)
    }

    /// Click semantics: clicking a slot that already holds `code` clears it, any
    /// other slot ends up holding `code` (last writer wins).
    pub fn toggle(&mut self, key: SlotKey, code: &str) -> SlotEdit {
        match self.0.get(&key) {
            Some(current) if current == code => {
                self.remove(&key);
                SlotEdit::Cleared
            }
            Some(_) => {
                let previous = self.set(key, code).unwrap_or_default();
                SlotEdit::Overwritten { previous }
            }
            None => {
                self.set(key, code);
                SlotEdit::Filled
            }
        }
    }

    /// Insert every filled cell of a stored day row.
    pub fn insert_day(&mut self, date: DateKey, row: &DayRow) {
        for index in 0..SLOTS_PER_DAY {
            let Some(code) = row.get(index) else {
                continue;
            };
            if let Ok(key) = SlotKey::from_column(date, index) {
                self.set(key, code);
            }
        }
    }

    /// The full 96-column row for `date`, as it should be written back.
    pub fn day_row(&self, date: DateKey) -> DayRow {
        let mut row = DayRow::default();
        for (key, code) in self.0.iter().filter(|(key, _)| key.date() == date) {
            row.0[key.column_index()] = Some(code.clone());
        }
        row
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}
