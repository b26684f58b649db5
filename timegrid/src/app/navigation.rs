use super::*;
use crate::grid::{QUARTERS_PER_HOUR, SLOTS_PER_WINDOW};

const QUARTERS: usize = QUARTERS_PER_HOUR as usize;

impl<Tz: TimeZone> App<Tz> {
    /// Tab: switch between the grid and the activity panel.
    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Grid => Focus::Activities,
            Focus::Activities => Focus::Grid,
        };
    }

    /// Previous hour column, same quarter.
    pub fn grid_left(&mut self) {
        if self.grid_cursor >= QUARTERS {
            self.grid_cursor -= QUARTERS;
        }
    }

    /// Next hour column, same quarter.
    pub fn grid_right(&mut self) {
        if self.grid_cursor + QUARTERS < SLOTS_PER_WINDOW {
            self.grid_cursor += QUARTERS;
        }
    }

    /// Previous quarter within the hour column.
    pub fn grid_up(&mut self) {
        if self.grid_cursor % QUARTERS > 0 {
            self.grid_cursor -= 1;
        }
    }

    /// Next quarter within the hour column.
    pub fn grid_down(&mut self) {
        if self.grid_cursor % QUARTERS < QUARTERS - 1 {
            self.grid_cursor += 1;
        }
    }

    pub fn activity_up(&mut self) {
        self.activity_cursor = self.activity_cursor.saturating_sub(1);
    }

    pub fn activity_down(&mut self) {
        let rows = self.activities.visible_rows().len();
        if self.activity_cursor + 1 < rows {
            self.activity_cursor += 1;
        }
    }

    pub(super) fn clamp_activity_cursor(&mut self) {
        let rows = self.activities.visible_rows().len();
        self.activity_cursor = self.activity_cursor.min(rows.saturating_sub(1));
    }
}
