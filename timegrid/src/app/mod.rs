use chrono::{DateTime, Local, TimeZone};
use std::time::Instant;

use crate::activity::{Activity, ActivityTree, VisibleRow};
use crate::grid::{DateKey, DayRow, Slot, SlotEdit, SlotKey, SlotValues, TimeWindow};
use crate::runtime::Action;

mod navigation;
mod state;
pub use state::{Focus, Input, SessionError, StatusKind, StatusMessage};

/// Everything the terminal session knows: the current window, the edited
/// slot map and the activity selection.
pub struct App<Tz: TimeZone = Local> {
    pub running: bool,
    pub window: TimeWindow<Tz>,
    pub slot_values: SlotValues,
    pub activities: ActivityTree,
    pub selected_activity: Option<Activity>,
    pub focus: Focus,
    /// Index into `window.slots()`.
    pub grid_cursor: usize,
    /// Index into `activities.visible_rows()`.
    pub activity_cursor: usize,
    pub status: Option<StatusMessage>,
    /// Edits made since the last load or save.
    pub dirty: bool,
    pub backend_label: String,

    // Loading indicator
    pub is_loading: bool,
    pub throbber_state: throbber_widgets_tui::ThrobberState,
}

impl<Tz: TimeZone> App<Tz> {
    pub fn new(now: &DateTime<Tz>, backend_label: impl Into<String>) -> Self {
        Self {
            running: true,
            window: TimeWindow::ending_after(now),
            slot_values: SlotValues::new(),
            activities: ActivityTree::default(),
            selected_activity: None,
            focus: Focus::Grid,
            grid_cursor: 0,
            activity_cursor: 0,
            status: None,
            dirty: false,
            backend_label: backend_label.into(),
            is_loading: false,
            throbber_state: throbber_widgets_tui::ThrobberState::default(),
        }
    }

    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Apply a user intent. Anything that needs the store comes back as an
    /// [`Action`] for the runtime to execute.
    pub fn handle(&mut self, input: Input) -> Vec<Action> {
        match input {
            Input::SlotClick(key) => {
                if let Err(e) = self.click_slot(key) {
                    self.set_status(e.to_string(), StatusKind::Error);
                }
                Vec::new()
            }
            Input::SelectActivity(row) => {
                self.press_activity(row);
                Vec::new()
            }
            Input::Refresh => vec![Action::LoadWindow],
            Input::Save => vec![Action::SaveWindow],
        }
    }

    /// Fill, clear or overwrite a slot with the selected activity's code.
    pub fn click_slot(&mut self, key: SlotKey) -> Result<SlotEdit, SessionError> {
        let code = self
            .selected_activity
            .as_ref()
            .map(|activity| activity.code.clone())
            .ok_or(SessionError::NoActivitySelected)?;

        let edit = self.slot_values.toggle(key, &code);
        self.dirty = true;
        tracing::debug!("slot {} {:?} with {}", key, edit, code);
        Ok(edit)
    }

    /// A root with children expands or collapses; anything else becomes the
    /// selected activity, replacing the previous selection.
    pub fn press_activity(&mut self, row: VisibleRow) {
        let expandable = row.child.is_none()
            && self
                .activities
                .node(row.root)
                .is_some_and(|node| node.has_children());
        if expandable {
            self.activities.toggle_expanded(row.root);
            self.clamp_activity_cursor();
            return;
        }

        if let Some(activity) = self.activities.activity_at(row).cloned() {
            self.selected_activity = Some(activity);
        }
    }

    /// Press the first visible row showing `code`.
    #[cfg(test)]
    pub fn press_code(&mut self, code: &str) {
        let row = self.activities.visible_rows().into_iter().find(|row| {
            self.activities
                .activity_at(*row)
                .is_some_and(|activity| activity.code == code)
        });
        if let Some(row) = row {
            self.press_activity(row);
        }
    }

    /// Replace the activity list. A selection that no longer exists is dropped.
    pub fn set_activities(&mut self, activities: Vec<Activity>) {
        self.activities = ActivityTree::new(activities);
        if let Some(selected) = &self.selected_activity {
            if self.activities.find(&selected.code).is_none() {
                self.selected_activity = None;
            }
        }
        self.clamp_activity_cursor();
    }

    /// The window a reload at `now` would show. The session keeps its current
    /// window until the rows for this one have been loaded.
    pub fn next_window(&self, now: &DateTime<Tz>) -> TimeWindow<Tz> {
        let mut window = self.window.clone();
        window.update(now);
        window
    }

    /// Switch to `window` and replace the slot map with its freshly loaded
    /// rows. Dates without a stored row contribute nothing.
    pub fn apply_window(
        &mut self,
        window: TimeWindow<Tz>,
        rows: Vec<(DateKey, Option<DayRow>)>,
    ) {
        self.window = window;
        self.slot_values.clear();
        for (date, row) in rows {
            if let Some(row) = row {
                self.slot_values.insert_day(date, &row);
            }
        }
        tracing::debug!("{} filled slots loaded", self.slot_values.len());
        self.dirty = false;
    }

    /// One full row per window date, ready to be written back.
    pub fn day_rows(&self) -> Vec<(DateKey, DayRow)> {
        self.window
            .dates()
            .iter()
            .map(|date| (*date, self.slot_values.day_row(*date)))
            .collect()
    }

    pub fn cursor_slot(&self) -> Option<Slot> {
        self.window.slots().into_iter().nth(self.grid_cursor)
    }

    pub fn cursor_activity_row(&self) -> Option<VisibleRow> {
        self.activities
            .visible_rows()
            .get(self.activity_cursor)
            .copied()
    }

    pub fn activity_name(&self, code: &str) -> Option<&str> {
        self.activities
            .find(code)
            .map(|activity| activity.name.as_str())
    }

    pub fn set_status(&mut self, text: impl Into<String>, kind: StatusKind) {
        self.status = Some(StatusMessage::new(text, kind));
    }

    /// Drop the status message once it has been shown long enough.
    pub fn expire_status(&mut self, now: Instant) {
        if self.status.as_ref().is_some_and(|s| s.is_expired(now)) {
            self.status = None;
        }
    }
}
